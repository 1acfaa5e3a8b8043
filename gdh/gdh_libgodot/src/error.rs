use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Libgodot_Error>;

#[derive(Debug, Error)]
pub enum Libgodot_Error {
    #[error("Error opening libgodot {path:?}: {source}")]
    Lib_Open {
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },

    #[error("Error acquiring function {symbol}: {source}")]
    Missing_Symbol {
        symbol: &'static str,
        #[source]
        source: libloading::Error,
    },

    #[error("Engine argument {0:?} contains a nul byte")]
    Invalid_Argument(String),

    #[error("Too many engine arguments ({0})")]
    Too_Many_Arguments(usize),

    #[error("Error creating Godot instance")]
    Create_Failed,

    #[error("The engine never called the extension init function")]
    Interface_Unavailable,

    #[error("The engine does not provide interface function {0}")]
    Missing_Interface_Function(&'static str),

    #[error("{class} has no method {method} with hash {hash}")]
    Missing_Method {
        class: &'static str,
        method: &'static str,
        hash: i64,
    },

    #[error("Godot instance was already started")]
    Already_Started,

    #[error("Godot instance failed to start")]
    Start_Failed,
}
