#![warn(clippy::all)]
#![allow(clippy::new_without_default)]
#![allow(non_camel_case_types)]

#[doc(hidden)]
pub use ::log as __log;

#[macro_use]
pub mod prelude;

pub mod log;
