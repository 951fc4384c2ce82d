// crates/ecgpack-cli/src/io/packed.rs

use anyhow::Context;
use ecgpack_core::frame;

/// Write a framed .epk artifact (EPK1 magic + count + payload + crc32).
pub fn write_frame(path: &str, samples: &[u16]) -> anyhow::Result<()> {
    let bytes = frame::encode_frame(samples).map_err(|e| anyhow::anyhow!("{e}"))?;
    std::fs::write(path, bytes).with_context(|| format!("write epk: {path}"))?;
    Ok(())
}

pub fn read_frame(path: &str) -> anyhow::Result<Vec<u16>> {
    let bytes = std::fs::read(path).with_context(|| format!("read epk: {path}"))?;
    frame::decode_frame(&bytes).map_err(|e| anyhow::anyhow!("{path}: {e}"))
}

/// Write a headerless packed buffer (back-compat with the original
/// acquisition pipeline's bare binary output).
pub fn write_raw(path: &str, payload: &[u8]) -> anyhow::Result<()> {
    std::fs::write(path, payload).with_context(|| format!("write raw packed: {path}"))?;
    Ok(())
}

pub fn read_raw(path: &str, count: Option<usize>) -> anyhow::Result<Vec<u16>> {
    let bytes = std::fs::read(path).with_context(|| format!("read raw packed: {path}"))?;
    ecgpack_core::pack::unpack(&bytes, count).map_err(|e| anyhow::anyhow!("{path}: {e}"))
}
