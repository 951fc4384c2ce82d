// crates/ecgpack-cli/src/cmd/pack.rs

use clap::Args;
use ecgpack_core::{pack, sample};

use crate::io::{packed, samples};

#[derive(Args)]
pub struct PackArgs {
    /// Input record: raw little-endian 16-bit samples
    #[arg(long)]
    pub r#in: String,

    /// Output .epk path. Defaults to "<in-stem>C.epk" next to the input
    /// (the acquisition pipeline's "<record>C" naming).
    #[arg(long)]
    pub out: Option<String>,

    /// Number of interleaved channels in the record
    #[arg(long, default_value_t = 1)]
    pub channels: usize,

    /// Channel to pack (0-based)
    #[arg(long, default_value_t = 0)]
    pub channel: usize,

    /// Mask each sample to 11 bits instead of rejecting out-of-range
    /// values. Lossy: masked high bits cannot be recovered.
    #[arg(long, default_value_t = false)]
    pub lossy: bool,

    /// Write a headerless packed buffer instead of an EPK1 frame.
    /// The sample count must then be carried out of band.
    #[arg(long, default_value_t = false)]
    pub raw: bool,
}

fn default_out(input: &str, raw: bool) -> String {
    let stem = input.strip_suffix(".bin").unwrap_or(input);
    let ext = if raw { "pkd" } else { "epk" };
    format!("{stem}C.{ext}")
}

pub fn run(args: PackArgs) -> anyhow::Result<()> {
    let signal = samples::read_record(&args.r#in, args.channels, args.channel)?;
    let out_path = args
        .out
        .clone()
        .unwrap_or_else(|| default_out(&args.r#in, args.raw));

    let sample_count = signal.len();
    let in_bytes = sample_count * 2;

    // Strict packing rejects out-of-range samples; --lossy masks them to
    // 11 bits up front, the original pipeline's behavior.
    let signal = if args.lossy {
        signal.into_iter().map(sample::mask).collect()
    } else {
        signal
    };

    let out_bytes = if args.raw {
        let payload = pack::pack(&signal)?;
        packed::write_raw(&out_path, &payload)?;
        payload.len()
    } else {
        packed::write_frame(&out_path, &signal)?;
        std::fs::metadata(&out_path)?.len() as usize
    };

    let ratio = if in_bytes == 0 {
        0.0
    } else {
        (out_bytes as f64) / (in_bytes as f64)
    };

    eprintln!(
        "pack ok: in={} samples={} channel={}/{} out={} in_bytes={} out_bytes={} ratio={:.4} mode={}{}",
        args.r#in,
        sample_count,
        args.channel,
        args.channels,
        out_path,
        in_bytes,
        out_bytes,
        ratio,
        if args.raw { "raw" } else { "epk1" },
        if args.lossy { "+lossy" } else { "" },
    );

    Ok(())
}
