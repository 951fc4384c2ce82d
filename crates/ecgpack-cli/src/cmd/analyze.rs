// crates/ecgpack-cli/src/cmd/analyze.rs

use anyhow::Context;
use clap::Args;
use ecgpack_core::sample::SAMPLE_MAX;
use std::io::Cursor;

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Input file to analyze as raw bytes
    #[arg(long)]
    pub r#in: String,

    /// List the N most frequent byte values
    #[arg(long, default_value_t = 8)]
    pub top: usize,

    /// Report how much a general-purpose compressor still squeezes out
    /// of the bytes (packed artifacts should be close to incompressible)
    #[arg(long, default_value_t = true)]
    pub zstd: bool,

    /// Zstd compression level (1..=22 typical)
    #[arg(long, default_value_t = 3)]
    pub zstd_level: i32,

    /// Also read the file as a raw 16-bit LE record and report the
    /// sample range and 11-bit headroom
    #[arg(long, default_value_t = false)]
    pub samples: bool,
}

pub fn run(args: AnalyzeArgs) -> anyhow::Result<()> {
    let bytes = std::fs::read(&args.r#in).with_context(|| format!("read {}", args.r#in))?;
    let total = bytes.len() as u64;

    let mut hist = [0u64; 256];
    for &b in &bytes {
        hist[b as usize] += 1;
    }
    let distinct = hist.iter().filter(|&&c| c > 0).count();

    eprintln!("analyze {}", args.r#in);
    eprintln!("  bytes          {total}");
    eprintln!("  distinct       {distinct}/256");
    eprintln!(
        "  entropy        {:.4} bits/byte (8.0000 = incompressible)",
        shannon_bits(&hist, total)
    );

    if args.samples {
        match sample_stats(&bytes) {
            Some(s) => {
                eprintln!("  samples        {} (16-bit LE)", s.count);
                eprintln!("  range          {}..={}", s.min, s.max);
                if s.over_11bit == 0 {
                    eprintln!("  headroom       all within 11 bits, packs losslessly");
                } else {
                    eprintln!(
                        "  headroom       {} sample(s) above {SAMPLE_MAX}, strict pack will reject",
                        s.over_11bit
                    );
                }
            }
            None => eprintln!("  samples        odd byte length, not a 16-bit record"),
        }
    }

    if args.zstd {
        let z = zstd::stream::encode_all(Cursor::new(&bytes[..]), args.zstd_level)?;
        let ratio = if z.is_empty() {
            0.0
        } else {
            (total as f64) / (z.len() as f64)
        };
        eprintln!(
            "  zstd level {:<2}  {} bytes ({ratio:.4}x)",
            args.zstd_level,
            z.len()
        );
    }

    let mut ranked: Vec<(usize, u64)> = hist
        .iter()
        .copied()
        .enumerate()
        .filter(|&(_, c)| c > 0)
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    for (rank, &(b, c)) in ranked.iter().take(args.top).enumerate() {
        let pct = if total == 0 {
            0.0
        } else {
            (c as f64) * 100.0 / (total as f64)
        };
        eprintln!("  top #{:<2}        0x{b:02X} x{c} ({pct:.3}%)", rank + 1);
    }

    Ok(())
}

struct SampleStats {
    count: u64,
    min: u16,
    max: u16,
    over_11bit: u64,
}

fn sample_stats(bytes: &[u8]) -> Option<SampleStats> {
    if bytes.is_empty() || bytes.len() % 2 != 0 {
        return None;
    }

    let mut s = SampleStats {
        count: 0,
        min: u16::MAX,
        max: 0,
        over_11bit: 0,
    };
    for pair in bytes.chunks_exact(2) {
        let v = u16::from_le_bytes([pair[0], pair[1]]);
        s.min = s.min.min(v);
        s.max = s.max.max(v);
        if v > SAMPLE_MAX {
            s.over_11bit += 1;
        }
        s.count += 1;
    }
    Some(s)
}

fn shannon_bits(hist: &[u64; 256], total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    hist.iter()
        .filter(|&&c| c > 0)
        .map(|&c| {
            let p = (c as f64) / (total as f64);
            -p * p.log2()
        })
        .sum()
}
