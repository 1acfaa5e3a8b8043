#![warn(clippy::all)]
#![allow(clippy::new_without_default)]
#![allow(non_camel_case_types)]

#[macro_use]
extern crate gdh_diagnostics;

pub mod config;
pub mod parsing;

pub use config::Config;
pub use parsing::{Cfg_Entry, Cfg_Section, Cfg_Value};
