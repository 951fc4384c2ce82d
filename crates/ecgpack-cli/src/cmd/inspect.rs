// crates/ecgpack-cli/src/cmd/inspect.rs

use anyhow::Context;
use clap::Args;
use ecgpack_core::{frame, sample};

#[derive(Args)]
pub struct InspectArgs {
    /// Input .epk path
    #[arg(long)]
    pub r#in: String,
}

pub fn run(args: InspectArgs) -> anyhow::Result<()> {
    let bytes = std::fs::read(&args.r#in).with_context(|| format!("read {}", args.r#in))?;

    // Validates magic + crc before reporting anything.
    let count = frame::frame_sample_count(&bytes).map_err(|e| anyhow::anyhow!("{e}"))?;

    let payload_len = sample::packed_len(count);
    let unpacked_bytes = count * 2;
    let ratio = if unpacked_bytes == 0 {
        0.0
    } else {
        (payload_len as f64) / (unpacked_bytes as f64)
    };

    let mut h = crc32fast::Hasher::new();
    h.update(&bytes[..bytes.len() - 4]);
    let stored_crc = h.finalize(); // frame_sample_count already matched it against the trailer

    eprintln!("--- inspect ---");
    eprintln!("file           = {}", args.r#in);
    eprintln!("magic          = EPK1 (ok)");
    eprintln!("crc32          = 0x{stored_crc:08x} (ok)");
    eprintln!("sample_count   = {count}");
    eprintln!("payload_bytes  = {payload_len}");
    eprintln!("frame_bytes    = {}", bytes.len());
    eprintln!("unpacked_bytes = {unpacked_bytes}");
    eprintln!("ratio          = {ratio:.4} (packed/unpacked)");

    Ok(())
}
