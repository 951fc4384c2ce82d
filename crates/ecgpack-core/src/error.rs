use thiserror::Error;

pub type Result<T> = std::result::Result<T, EcgError>;

#[derive(Debug, Error)]
pub enum EcgError {
    #[error("sample out of range: samples[{index}]={value} exceeds 11 bits (max 2047)")]
    OutOfRangeSample { index: usize, value: u16 },

    #[error("malformed buffer: {0}")]
    MalformedBuffer(String),

    #[error("count mismatch: {given} samples pack to {need} bytes, buffer has {got}")]
    CountMismatch { given: usize, need: usize, got: usize },

    #[error("frame error: {0}")]
    Frame(String),
}
