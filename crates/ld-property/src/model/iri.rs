//! Absolute resource identifiers used as by-reference property values.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use url::Url;

/// An absolute IRI.
///
/// The source text is kept alongside the parsed form so that a value
/// decoded from a document is written back exactly as it was read; the
/// URL parser normalizes some inputs (e.g. adds a trailing `/` to a bare
/// authority) and that must not leak into the wire form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Iri {
    raw: String,
    url: Url,
}

/// Reason a string was not accepted as an IRI.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IriParseError {
    /// Contains whitespace, which the URI grammar never allows.
    #[error("IRI contains whitespace")]
    Whitespace,
    /// No scheme, or otherwise rejected by the URL parser.
    #[error("not an absolute IRI: {0}")]
    NotAbsolute(url::ParseError),
}

impl Iri {
    /// Parses an absolute IRI.
    ///
    /// Only strings with a non-empty scheme are accepted. Plain text such
    /// as `"hello"` or `"/relative/path"` is rejected rather than being
    /// resolved against some base.
    pub fn parse(s: &str) -> Result<Iri, IriParseError> {
        if s.chars().any(|c| c.is_ascii_whitespace()) {
            return Err(IriParseError::Whitespace);
        }
        let url = Url::parse(s).map_err(IriParseError::NotAbsolute)?;
        if url.scheme().is_empty() {
            return Err(IriParseError::NotAbsolute(url::ParseError::RelativeUrlWithoutBase));
        }
        Ok(Iri {
            raw: s.to_string(),
            url,
        })
    }

    /// Returns the IRI exactly as it was written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns the parsed URL.
    pub fn as_url(&self) -> &Url {
        &self.url
    }

    /// Returns the scheme (always non-empty).
    pub fn scheme(&self) -> &str {
        self.url.scheme()
    }
}

impl FromStr for Iri {
    type Err = IriParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Iri::parse(s)
    }
}

impl From<Url> for Iri {
    fn from(url: Url) -> Self {
        Iri {
            raw: url.as_str().to_string(),
            url,
        }
    }
}

impl fmt::Display for Iri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
