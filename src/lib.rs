#![doc = include_str!("../README.md")]
#![no_std]
#![deny(clippy::mod_module_files)]

extern crate alloc;

pub mod delimiters;
pub mod errors;
pub mod splitter;
#[cfg(feature = "testing")]
pub mod testing;

pub use delimiters::Delimiters;
pub use errors::{DelimiterError, Error};
pub use splitter::{Statements, split, split_sql_script};
