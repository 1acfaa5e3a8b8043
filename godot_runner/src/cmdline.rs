use crate::variants::Variant_Kind;
use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_CFG_PATH: &str = "cfg/runner.cfg";

/// Loads libgodot, runs a Godot instance until it quits and tears it down.
#[derive(Parser, Debug)]
#[command(name = "godot_runner", version)]
pub struct Cmdline_Args {
    /// Runner cfg file, or a directory of .cfg files [default: cfg/runner.cfg].
    /// Unlike the default one, a path given here must exist.
    #[arg(long)]
    pub cfg: Option<PathBuf>,

    /// Path of the libgodot shared library.
    #[arg(long)]
    pub lib: Option<PathBuf>,

    /// Which fixed set of engine arguments to use.
    #[arg(long, value_enum)]
    pub variant: Option<Variant_Kind>,

    /// Stop after this many iterations even if the engine didn't quit (0 = never).
    #[arg(long)]
    pub max_iterations: Option<u64>,

    #[arg(short, long)]
    pub verbose: bool,

    /// Engine arguments, only used by the passthrough variant.
    #[arg(last = true)]
    pub engine_args: Vec<String>,
}
