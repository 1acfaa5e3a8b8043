use gdh_libgodot::Libgodot_Error;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Runner_Error {
    #[error("Failed to read cfg {path:?}: {source}")]
    Cfg_Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid value for cfg var {name}: {reason}")]
    Invalid_Cfg {
        name: &'static str,
        reason: String,
    },

    #[error(transparent)]
    Libgodot(#[from] Libgodot_Error),
}
