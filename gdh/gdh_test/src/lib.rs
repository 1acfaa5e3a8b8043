#![warn(clippy::all)]
#![allow(clippy::new_without_default)]
#![allow(non_camel_case_types)]

pub mod fake_engine;

pub use fake_engine::{Fake_Engine_Config, Fake_Report, Fake_Session};
