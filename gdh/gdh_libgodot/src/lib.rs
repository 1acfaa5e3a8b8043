#![warn(clippy::all)]
#![allow(clippy::new_without_default)]
#![allow(non_camel_case_types)]

#[macro_use]
extern crate gdh_diagnostics;

#[macro_use]
extern crate lazy_static;

pub mod args;
pub mod error;
pub mod extension;
pub mod ffi;
pub mod instance;
pub mod libgodot;

pub use args::Engine_Args;
pub use error::{Libgodot_Error, Result};
pub use instance::{Godot_Instance, Method_Hashes};
pub use libgodot::{Lib_Godot, Libgodot_Api};
