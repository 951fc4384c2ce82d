// crates/ecgpack-core/src/pack.rs

use crate::error::{EcgError, Result};
use crate::sample::{self, HIGH_MASK, HIGH_SHIFT, LOW_MASK, SHARED_A_SHIFT};

/// Pack 11-bit samples, two per 3-byte unit.
///
/// Unit layout for a pair (A, B):
/// - byte 0: A bits 7..0
/// - byte 1: shared = [A10 A9 A8 0 0 B10 B9 B8]
/// - byte 2: B bits 7..0
///
/// An unpaired trailing sample (odd input length) emits 2 bytes with the
/// B field of the shared byte zeroed.
///
/// Requirements:
/// - Every sample must be <= 2047. The first offender fails the whole call;
///   use `pack_lossy` for the legacy masking behavior.
pub fn pack(samples: &[u16]) -> Result<Vec<u8>> {
    if let Some((index, &value)) = samples
        .iter()
        .enumerate()
        .find(|&(_, &v)| !sample::in_range(v))
    {
        return Err(EcgError::OutOfRangeSample { index, value });
    }
    Ok(pack_unchecked(samples))
}

/// Legacy behavior of the original acquisition pipeline: each sample is
/// reduced to its low 11 bits before packing. Lossy for values > 2047
/// (their high bits cannot be recovered); never fails.
pub fn pack_lossy(samples: &[u16]) -> Vec<u8> {
    pack_unchecked(samples)
}

fn pack_unchecked(samples: &[u16]) -> Vec<u8> {
    let mut out = Vec::with_capacity(sample::packed_len(samples.len()));

    let mut pairs = samples.chunks_exact(2);
    for pair in &mut pairs {
        let (a, b) = (sample::mask(pair[0]), sample::mask(pair[1]));
        let high_a = (a >> HIGH_SHIFT) & HIGH_MASK;
        let high_b = (b >> HIGH_SHIFT) & HIGH_MASK;
        out.push((a & LOW_MASK) as u8);
        out.push(((high_a << SHARED_A_SHIFT) | high_b) as u8);
        out.push((b & LOW_MASK) as u8);
    }

    if let Some(&last) = pairs.remainder().first() {
        let a = sample::mask(last);
        let high_a = (a >> HIGH_SHIFT) & HIGH_MASK;
        out.push((a & LOW_MASK) as u8);
        out.push((high_a << SHARED_A_SHIFT) as u8);
    }

    out
}

/// Unpack a raw packed buffer back into 11-bit samples.
///
/// The raw format carries no sample count. With `count = None` it is
/// inferred from the buffer length (`len % 3 == 1` is malformed); with
/// `count = Some(n)` the buffer length must equal `packed_len(n)` exactly.
pub fn unpack(bytes: &[u8], count: Option<usize>) -> Result<Vec<u16>> {
    let n = match count {
        Some(n) => {
            let need = sample::packed_len(n);
            if need != bytes.len() {
                return Err(EcgError::CountMismatch {
                    given: n,
                    need,
                    got: bytes.len(),
                });
            }
            n
        }
        None => sample::inferred_count(bytes.len())?,
    };

    let mut out = Vec::with_capacity(n);

    let mut units = bytes.chunks_exact(3);
    for unit in &mut units {
        let shared = unit[1] as u16;
        let high_a = (shared >> SHARED_A_SHIFT) & HIGH_MASK;
        let high_b = shared & HIGH_MASK;
        out.push((high_a << HIGH_SHIFT) | unit[0] as u16);
        out.push((high_b << HIGH_SHIFT) | unit[2] as u16);
    }

    // Odd tail: 2 trailing bytes, sample A only.
    let tail = units.remainder();
    if tail.len() == 2 {
        let high_a = (tail[1] as u16 >> SHARED_A_SHIFT) & HIGH_MASK;
        out.push((high_a << HIGH_SHIFT) | tail[0] as u16);
    }

    debug_assert_eq!(out.len(), n);
    Ok(out)
}
