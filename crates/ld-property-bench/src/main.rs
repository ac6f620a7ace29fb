//! Benchmark for decoding, sorting, hashing and encoding `publicKey` properties.
//!
//! Generates a synthetic actor document whose `publicKey` property mixes
//! typed keys, bare IRIs and values of unrecognized shape.

use std::time::Instant;

use ld_property::codec::{decode_property, encode_property};
use ld_property::vocab::security::{deserialize_public_key, public_key_descriptor};
use ld_property::{AliasTable, canonical_digest};
use serde_json::{Map, Value, json};

const DEFAULT_COUNT: usize = 10_000;
const DECODE_ITERS: u32 = 10;

// =============================================================================
// DOCUMENT GENERATION
// =============================================================================

fn make_document(count: usize) -> Map<String, Value> {
    let mut values = Vec::with_capacity(count);
    for i in 0..count {
        let value = match i % 4 {
            0 | 1 => json!({
                "id": format!("https://ex.com/users/u{i}#main-key"),
                "type": "PublicKey",
                "owner": format!("https://ex.com/users/u{i}"),
                "publicKeyPem": format!("-----BEGIN PUBLIC KEY-----\nKEY{i}\n-----END PUBLIC KEY-----"),
            }),
            2 => json!(format!("https://ex.com/keys/{i}")),
            _ => json!({"id": format!("https://ex.com/things/{i}"), "type": "Thing"}),
        };
        values.push(value);
    }
    let mut doc = Map::new();
    doc.insert("publicKey".to_string(), Value::Array(values));
    doc
}

fn main() {
    let count = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_COUNT);

    let doc = make_document(count);
    let aliases = AliasTable::new();
    println!("Generated publicKey property with {} values", count);

    // Benchmark decoding
    let decode_start = Instant::now();
    for _ in 0..DECODE_ITERS {
        let decoded = decode_property(&doc, public_key_descriptor(), &aliases, &deserialize_public_key)
            .expect("Failed to decode");
        std::hint::black_box(decoded);
    }
    let decode_time = decode_start.elapsed() / DECODE_ITERS;
    let mut list = decode_property(&doc, public_key_descriptor(), &aliases, &deserialize_public_key)
        .expect("Failed to decode")
        .expect("publicKey property missing");

    let typed = list.iter().filter(|v| v.is_typed()).count();
    let iris = list.iter().filter(|v| v.is_iri()).count();
    let unknown = list.iter().filter(|v| v.is_unknown()).count();
    println!("\nDecode: {:?} per iteration", decode_time);
    println!("  - {} typed, {} IRIs, {} unknown", typed, iris, unknown);

    // Benchmark hashing in canonical order without reordering
    let digest_start = Instant::now();
    let digest = canonical_digest(&list).expect("Failed to hash");
    let digest_time = digest_start.elapsed();
    let hex: String = digest.iter().map(|b| format!("{b:02x}")).collect();
    println!("\nCanonical digest: {} in {:?}", hex, digest_time);

    // Benchmark in-place sort
    let sort_start = Instant::now();
    list.sort_canonical();
    let sort_time = sort_start.elapsed();
    println!("Sorted in {:?}", sort_time);

    let resorted = canonical_digest(&list).expect("Failed to hash");
    assert_eq!(digest, resorted, "digest must not depend on stored order");

    // Benchmark encoding
    let encode_start = Instant::now();
    let encoded = encode_property(&list).expect("Failed to encode");
    let encode_time = encode_start.elapsed();
    let bytes = serde_json::to_vec(&encoded).expect("Failed to print JSON");
    println!("\nEncode: {} bytes in {:?}", bytes.len(), encode_time);
    println!(
        "  Throughput: {:.2} MB/s",
        (bytes.len() as f64 / 1_000_000.0) / encode_time.as_secs_f64()
    );
}
