pub mod error;
pub mod frame;
pub mod pack;
pub mod sample;

pub use crate::error::{EcgError, Result};
pub use crate::frame::{decode_frame, encode_frame};
pub use crate::pack::{pack, pack_lossy, unpack};
