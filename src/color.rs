//! Deterministic identity-to-color assignment.
//!
//! An identity string is hashed with 32-bit FNV-1 and reduced modulo the
//! palette size. Nothing is cached: the same string always yields the same
//! color, and unrelated strings may share one.

use owo_colors::AnsiColors;

/// Pod/container palette. Each entry is `(pod, container)`: the pod gets the
/// bright member and its containers the dim member of the same pair.
pub const PAIRED_PALETTE: [(AnsiColors, AnsiColors); 6] = [
    (AnsiColors::BrightCyan, AnsiColors::Cyan),
    (AnsiColors::BrightGreen, AnsiColors::Green),
    (AnsiColors::BrightMagenta, AnsiColors::Magenta),
    (AnsiColors::BrightYellow, AnsiColors::Yellow),
    (AnsiColors::BrightBlue, AnsiColors::Blue),
    (AnsiColors::BrightRed, AnsiColors::Red),
];

/// Palette for arbitrary identifiers such as trace and span ids.
pub const ID_PALETTE: [AnsiColors; 6] = [
    AnsiColors::Cyan,
    AnsiColors::Green,
    AnsiColors::Magenta,
    AnsiColors::Yellow,
    AnsiColors::Blue,
    AnsiColors::Red,
];

const FNV32_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV32_PRIME: u32 = 0x0100_0193;

/// 32-bit FNV-1 hash (multiply, then xor) of `bytes`.
pub const fn fnv1_32(bytes: &[u8]) -> u32 {
    let mut hash = FNV32_OFFSET_BASIS;
    let mut i = 0;
    while i < bytes.len() {
        hash = hash.wrapping_mul(FNV32_PRIME);
        hash ^= bytes[i] as u32;
        i += 1;
    }
    hash
}

/// Palette index for `identity` in a palette of `len` entries.
#[allow(clippy::cast_possible_truncation)] // the result is < len
pub const fn palette_index(identity: &str, len: usize) -> usize {
    (fnv1_32(identity.as_bytes()) % len as u32) as usize
}

/// Colors for a pod and its containers, chosen from the pod name alone.
pub const fn pod_colors(pod: &str) -> (AnsiColors, AnsiColors) {
    PAIRED_PALETTE[palette_index(pod, PAIRED_PALETTE.len())]
}

/// Color for an arbitrary identifier (trace id, span id).
pub const fn id_color(id: &str) -> AnsiColors {
    ID_PALETTE[palette_index(id, ID_PALETTE.len())]
}
