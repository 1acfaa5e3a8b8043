#![warn(clippy::all)]
#![allow(clippy::new_without_default)]
#![allow(non_camel_case_types)]

#[macro_use]
extern crate gdh_diagnostics;

mod cmdline;
mod error;
mod run_loop;
mod settings;
mod variants;

use clap::Parser;
use cmdline::{Cmdline_Args, DEFAULT_CFG_PATH};
use error::Runner_Error;
use gdh_cfg::Config;
use gdh_libgodot::{Engine_Args, Lib_Godot};
use settings::Runner_Settings;
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cmdline = Cmdline_Args::parse();
    gdh_diagnostics::log::init_logger(cmdline.verbose);

    match run(&cmdline) {
        Ok(stats) => {
            lok!(
                "Ran {} iterations in {:.2} s{}.",
                stats.iterations,
                stats.elapsed.as_secs_f32(),
                if stats.quit_requested {
                    ""
                } else {
                    " (iteration limit reached)"
                }
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            lerr!("{}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cmdline: &Cmdline_Args) -> Result<run_loop::Run_Stats, Runner_Error> {
    let cfg = load_cfg(cmdline)?;
    let settings = Runner_Settings::resolve(cmdline, &cfg)?;
    linfo!(
        "Running the {:?} variant with {:?}.",
        settings.invocation.kind(),
        settings.lib_path
    );

    let lib = Lib_Godot::open(&settings.lib_path)?;
    let args = settings
        .invocation
        .engine_args(Engine_Args::from_current_program());
    let instance = lib.create_godot_instance_with_hashes(&args, settings.method_hashes)?;

    Ok(run_loop::run_to_completion(instance, settings.max_iterations)?)
}

// Only the default cfg may be missing.
fn load_cfg(cmdline: &Cmdline_Args) -> Result<Config, Runner_Error> {
    let (path, cfg) = match &cmdline.cfg {
        Some(path) => (path.as_path(), Config::new_from_path(path)),
        None => {
            let path = Path::new(DEFAULT_CFG_PATH);
            (path, Config::new_from_path_or_default(path))
        }
    };
    cfg.map_err(|source| Runner_Error::Cfg_Read {
        path: path.to_path_buf(),
        source,
    })
}
