//! Deterministic color assignment for map groupings.
//!
//! Maps an arbitrary string key (zone name, district name) to one of a
//! fixed 10-entry palette by hashing. The mapping must be stable across
//! process restarts and across the other implementations of this service:
//! SHA-1 of the UTF-8 bytes, digest interpreted as a big unsigned integer,
//! reduced modulo the palette size. Same key, same color, everywhere.

use sha1::{Digest, Sha1};

/// Fixed ordered palette. Order matters: index = digest mod 10.
pub const PALETTE: [&str; 10] = [
    "#0F766E", "#1D4ED8", "#7C3AED", "#DB2777", "#EA580C", "#16A34A", "#0EA5E9", "#F59E0B",
    "#6B7280", "#EF4444",
];

/// Returns the palette color for a string key.
///
/// Pure and case-sensitive: identical keys always receive identical
/// colors, within one request and across requests.
///
/// # Examples
///
/// ```
/// use geodash_core::color::color_for_key;
///
/// assert_eq!(color_for_key("hello"), "#1D4ED8");
/// assert_eq!(color_for_key(""), "#16A34A");
/// ```
#[must_use]
pub fn color_for_key(key: &str) -> &'static str {
    let digest = Sha1::digest(key.as_bytes());
    // Fold the 160-bit digest modulo 10 byte by byte. This is the exact
    // big-integer remainder, not a truncation.
    let mut rem: u32 = 0;
    for byte in digest {
        rem = (rem * 256 + u32::from(byte)) % 10;
    }
    PALETTE[rem as usize]
}
