// crates/ecgpack-core/src/frame.rs

use crate::error::{EcgError, Result};
use crate::pack;
use crate::sample;

const MAGIC: &[u8; 4] = b"EPK1";

/// EPK1 layout (little-endian):
/// MAGIC[4] = "EPK1"
/// sample_count: varint(u64)
/// payload[packed_len(sample_count)]   raw pack() output
/// crc32: u32                          (over everything before crc32)
///
/// Carrying the count removes the ambiguity of raw buffers whose length
/// satisfies len % 3 == 1; raw (headerless) buffers remain supported for
/// back-compat via `pack`/`unpack` directly.
pub fn encode_frame(samples: &[u16]) -> Result<Vec<u8>> {
    let payload = pack::pack(samples)?;

    let mut out = Vec::with_capacity(4 + 10 + payload.len() + 4);
    out.extend_from_slice(MAGIC);
    write_var_u64(&mut out, samples.len() as u64);
    out.extend_from_slice(&payload);

    let crc = crc32(&out);
    out.extend_from_slice(&crc.to_le_bytes());
    Ok(out)
}

pub fn decode_frame(bytes: &[u8]) -> Result<Vec<u16>> {
    // magic + minimal varint + crc
    if bytes.len() < 4 + 1 + 4 {
        return Err(EcgError::Frame("frame too small".into()));
    }
    if &bytes[0..4] != MAGIC {
        return Err(EcgError::Frame("bad magic".into()));
    }

    let crc_off = bytes.len() - 4;
    let crc_expected = u32::from_le_bytes(
        bytes[crc_off..]
            .try_into()
            .map_err(|_| EcgError::Frame("truncated crc".into()))?,
    );
    let crc_actual = crc32(&bytes[..crc_off]);
    if crc_expected != crc_actual {
        return Err(EcgError::Frame(format!(
            "crc32 mismatch: stored 0x{crc_expected:08x}, computed 0x{crc_actual:08x}"
        )));
    }

    // The varint must not run into the crc trailer; bounding the read to
    // the pre-crc prefix turns that into an eof error instead of an
    // out-of-bounds payload slice.
    let head = &bytes[..crc_off];
    let mut i = 4usize;
    let count = read_count(head, &mut i)?;

    let payload = &head[i..];
    let need = sample::packed_len(count);
    if payload.len() != need {
        return Err(EcgError::Frame(format!(
            "payload length mismatch: count {count} needs {need} bytes, frame carries {}",
            payload.len()
        )));
    }

    pack::unpack(payload, Some(count))
}

/// Sample count of a frame without decoding the payload.
/// Verifies magic and crc first.
pub fn frame_sample_count(bytes: &[u8]) -> Result<usize> {
    if bytes.len() < 4 + 1 + 4 {
        return Err(EcgError::Frame("frame too small".into()));
    }
    if &bytes[0..4] != MAGIC {
        return Err(EcgError::Frame("bad magic".into()));
    }
    let crc_off = bytes.len() - 4;
    let crc_expected = u32::from_le_bytes(
        bytes[crc_off..]
            .try_into()
            .map_err(|_| EcgError::Frame("truncated crc".into()))?,
    );
    if crc_expected != crc32(&bytes[..crc_off]) {
        return Err(EcgError::Frame("crc32 mismatch".into()));
    }
    let mut i = 4usize;
    read_count(&bytes[..crc_off], &mut i)
}

/// Read the sample-count varint and sanity-check it against the bytes that
/// remain. `packed_len(n) >= n`, so a count larger than the rest of the
/// prefix can never describe a valid payload; rejecting it here also keeps
/// `packed_len` away from overflowing arithmetic on attacker-chosen counts.
fn read_count(head: &[u8], i: &mut usize) -> Result<usize> {
    let count = read_var_u64(head, i)?;
    let remaining = (head.len() - *i) as u64;
    if count > remaining {
        return Err(EcgError::Frame(format!(
            "implausible sample count {count} for {remaining} remaining bytes"
        )));
    }
    Ok(count as usize)
}

fn crc32(bytes: &[u8]) -> u32 {
    let mut h = crc32fast::Hasher::new();
    h.update(bytes);
    h.finalize()
}

// --- u64 varint (LEB128-like, 7-bit groups) ---

fn write_var_u64(out: &mut Vec<u8>, mut x: u64) {
    while x >= 0x80 {
        out.push(((x as u8) & 0x7F) | 0x80);
        x >>= 7;
    }
    out.push(x as u8);
}

fn read_var_u64(bytes: &[u8], i: &mut usize) -> Result<u64> {
    let mut shift: u32 = 0;
    let mut acc: u64 = 0;

    loop {
        if *i >= bytes.len() {
            return Err(EcgError::Frame("unexpected eof in varint".into()));
        }
        let b = bytes[*i];
        *i += 1;

        let low = (b & 0x7F) as u64;
        if shift >= 64 || (low << shift) >> shift != low {
            return Err(EcgError::Frame("varint overflow".into()));
        }
        acc |= low << shift;

        if (b & 0x80) == 0 {
            return Ok(acc);
        }
        shift += 7;
        if shift > 63 {
            return Err(EcgError::Frame("varint too long".into()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn varint_roundtrip_edges() {
        for x in [0u64, 1, 0x7F, 0x80, 0x3FFF, 0x4000, u64::MAX] {
            let mut buf = Vec::new();
            write_var_u64(&mut buf, x);
            let mut i = 0usize;
            assert_eq!(read_var_u64(&buf, &mut i).unwrap(), x);
            assert_eq!(i, buf.len());
        }
    }

    #[test]
    fn varint_rejects_eof() {
        let mut i = 0usize;
        assert!(read_var_u64(&[0x80], &mut i).is_err());
    }
}
