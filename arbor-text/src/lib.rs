#![doc = include_str!("../README.md")]
#![deny(missing_docs)]

pub mod error;
pub mod json;
pub mod parse;
pub mod print;

mod quoting;

pub use error::TextError;
pub use json::{from_json, to_json};
pub use parse::parse;
pub use print::print;
