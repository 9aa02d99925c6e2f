//! Additive checksum used for every seeded decision in the engine.
//!
//! Dispute classification, wrong-counterparty selection, department
//! assignment, and synthetic workflow states all bucket on this value.
//! Historical results are only comparable when computed with the exact same
//! arithmetic, so this must never be swapped for a PRNG or a content hash.

/// Sum of the UTF-16 code units of `value`.
///
/// Not cryptographic. Collisions are expected and harmless: anagrams share a
/// bucket.
#[must_use]
pub fn simple_additive_hash(value: &str) -> u64 {
    value.encode_utf16().map(u64::from).sum()
}

/// Length of `value` in UTF-16 code units.
///
/// Paired with [`simple_additive_hash`] wherever the classifier mixes the
/// identifier length into an index.
#[must_use]
pub fn utf16_len(value: &str) -> u64 {
    value.encode_utf16().count() as u64
}
