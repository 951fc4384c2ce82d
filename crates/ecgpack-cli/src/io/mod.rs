// crates/ecgpack-cli/src/io/mod.rs

pub mod packed;
pub mod samples;
