// crates/horizon-core/src/crypto.rs

use sha2::{Digest, Sha256};

/// Compute SHA-256 hash of the given bytes.
///
/// Returns a 32-byte hash.
pub fn hash_bytes(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Compute the lowercase hex SHA-256 digest of the given bytes.
pub fn hash_hex(data: &[u8]) -> String {
    hex::encode(hash_bytes(data))
}

/// Map a name to a reproducible scalar in [0, 1].
///
/// The first 8 bytes of SHA-256(name) are read as a big-endian u64 and
/// divided by `u64::MAX`. Identical names always map to the identical scalar
/// on every platform.
pub fn hash_unit_scalar(name: &str) -> f64 {
    let digest = hash_bytes(name.as_bytes());
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest[..8]);
    unit_quotient(u64::from_be_bytes(head))
}

/// `head / (2^64 - 1)`, correctly rounded.
///
/// The exact quotient is `head / 2^64` plus less than `2^-64`, so it rounds
/// like `head` itself except at an exact halfway point, where it must round
/// up rather than to even.
fn unit_quotient(head: u64) -> f64 {
    const TWO_POW_64: f64 = 18_446_744_073_709_551_616.0;
    let bits = 64 - head.leading_zeros();
    if bits > 53 {
        let shift = bits - 53;
        let low = head & ((1u64 << shift) - 1);
        if low == 1u64 << (shift - 1) {
            // (head >> shift) + 1 <= 2^53, exact in f64.
            return ((head >> shift) + 1) as f64 * f64::from(1u32 << shift) / TWO_POW_64;
        }
    }
    head as f64 / TWO_POW_64
}
