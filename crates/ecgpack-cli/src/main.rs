// crates/ecgpack-cli/src/main.rs

use clap::{Parser, Subcommand};

mod cmd;
mod io;

#[derive(Parser)]
#[command(name = "ecgpack")]
#[command(about = "11-bit ECG sample pack codec", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Pack a 16-bit LE sample record into a .epk artifact
    Pack(cmd::pack::PackArgs),

    /// Unpack a .epk (or raw packed buffer) back to 16-bit LE samples
    Unpack(cmd::unpack::UnpackArgs),

    /// Inspect a .epk artifact (magic/crc, counts, sizes, ratio)
    Inspect(cmd::inspect::InspectArgs),

    /// Analyze a file as raw bytes (histogram, entropy, zstd scoreboard)
    Analyze(cmd::analyze::AnalyzeArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.cmd {
        Commands::Pack(args) => cmd::pack::run(args),
        Commands::Unpack(args) => cmd::unpack::run(args),
        Commands::Inspect(args) => cmd::inspect::run(args),
        Commands::Analyze(args) => cmd::analyze::run(args),
    }
}
