// crates/ecgpack-cli/src/cmd/unpack.rs

use clap::Args;

use crate::io::{packed, samples};

#[derive(Args)]
pub struct UnpackArgs {
    /// Input .epk path (or raw packed buffer with --raw)
    #[arg(long)]
    pub r#in: String,

    /// Output path for decoded little-endian 16-bit samples
    #[arg(long)]
    pub out: String,

    /// Treat the input as a headerless packed buffer
    #[arg(long, default_value_t = false)]
    pub raw: bool,

    /// Sample count for --raw inputs. If omitted, inferred from the
    /// buffer length (fails when len % 3 == 1).
    #[arg(long)]
    pub count: Option<usize>,
}

pub fn run(args: UnpackArgs) -> anyhow::Result<()> {
    if args.count.is_some() && !args.raw {
        anyhow::bail!("--count only applies to --raw inputs (.epk carries its own count)");
    }

    let signal = if args.raw {
        packed::read_raw(&args.r#in, args.count)?
    } else {
        packed::read_frame(&args.r#in)?
    };

    samples::write_samples(&args.out, &signal)?;

    eprintln!(
        "unpack ok: in={} out={} samples={} out_bytes={}",
        args.r#in,
        args.out,
        signal.len(),
        signal.len() * 2,
    );
    Ok(())
}
