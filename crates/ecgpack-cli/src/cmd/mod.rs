// crates/ecgpack-cli/src/cmd/mod.rs

pub mod analyze;
pub mod inspect;
pub mod pack;
pub mod unpack;
