pub mod decoder;
pub mod encoder;

pub use decoder::{decode_resp, DecodeError};
pub use encoder::*;
