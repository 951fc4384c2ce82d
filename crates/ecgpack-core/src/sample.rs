// crates/ecgpack-core/src/sample.rs

use crate::error::{EcgError, Result};

/// Significant bits per ADC sample.
pub const SAMPLE_BITS: u32 = 11;

/// Largest representable sample value (11 bits).
pub const SAMPLE_MAX: u16 = 0x07FF;

/// Low byte of a sample: bits 7..0.
pub const LOW_MASK: u16 = 0x00FF;

/// High bits of a sample: bits 10..8, after shifting right by `HIGH_SHIFT`.
pub const HIGH_MASK: u16 = 0x0007;
pub const HIGH_SHIFT: u32 = 8;

/// Position of sample A's high bits inside the shared byte:
/// [A10 A9 A8 0 0 B10 B9 B8]
pub const SHARED_A_SHIFT: u32 = 5;

#[inline]
pub fn in_range(v: u16) -> bool {
    v <= SAMPLE_MAX
}

/// Reduce a raw 16-bit value to its 11 significant bits.
#[inline]
pub fn mask(v: u16) -> u16 {
    v & SAMPLE_MAX
}

/// Bytes needed to pack `n` samples: 3 per complete pair,
/// plus 2 for an unpaired trailing sample.
#[inline]
pub fn packed_len(n: usize) -> usize {
    3 * (n / 2) + 2 * (n % 2)
}

/// Recover the sample count from a raw packed buffer length.
///
/// `len % 3 == 0` -> complete pairs only; `len % 3 == 2` -> one trailing
/// unpaired sample. `len % 3 == 1` has no valid interpretation.
pub fn inferred_count(len: usize) -> Result<usize> {
    match len % 3 {
        0 => Ok(2 * (len / 3)),
        2 => Ok(2 * (len / 3) + 1),
        _ => Err(EcgError::MalformedBuffer(format!(
            "buffer length {len} is not a valid packed size (len % 3 == 1)"
        ))),
    }
}
