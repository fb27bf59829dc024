#[macro_use]
extern crate derive_more;
extern crate getset;

pub mod cpp;
pub mod date_time;

mod error;

pub use crate::error::Error;

pub type Result<T> = std::result::Result<T, Error>;
