use crate::error::{Libgodot_Error, Result};
use std::convert::TryFrom;
use std::ffi::CString;
use std::os::raw::{c_char, c_int};

/// Command line handed to the engine. The first element is the program name,
/// just like a regular argv.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Engine_Args {
    args: Vec<String>,
}

impl Engine_Args {
    pub fn new(program: impl Into<String>) -> Self {
        Engine_Args {
            args: vec![program.into()],
        }
    }

    /// Uses the name this process was invoked with as program name.
    pub fn from_current_program() -> Self {
        Self::new(std::env::args().next().unwrap_or_default())
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn flag(self, flag: impl Into<String>, value: impl Into<String>) -> Self {
        self.arg(flag).arg(value)
    }

    pub fn extend<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn as_slice(&self) -> &[String] {
        &self.args
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    pub fn to_c_args(&self) -> Result<C_Args> {
        let c_strings = self
            .args
            .iter()
            .map(|arg| {
                CString::new(arg.as_str())
                    .map_err(|_| Libgodot_Error::Invalid_Argument(arg.clone()))
            })
            .collect::<Result<Vec<_>>>()?;
        let argc = c_int::try_from(c_strings.len())
            .map_err(|_| Libgodot_Error::Too_Many_Arguments(c_strings.len()))?;

        let mut argv = c_strings
            .iter()
            .map(|arg| arg.as_ptr() as *mut c_char)
            .collect::<Vec<_>>();
        argv.push(std::ptr::null_mut());

        Ok(C_Args {
            _c_strings: c_strings,
            argv,
            argc,
        })
    }
}

/// Owns the C strings `argv` points into, so it must outlive any call it's passed to.
pub struct C_Args {
    _c_strings: Vec<CString>,
    argv: Vec<*mut c_char>,
    argc: c_int,
}

impl C_Args {
    /// Number of arguments, not counting the terminating null.
    pub fn argc(&self) -> c_int {
        self.argc
    }

    pub fn argv(&mut self) -> *mut *mut c_char {
        self.argv.as_mut_ptr()
    }
}
