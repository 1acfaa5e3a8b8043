use crate::cmdline::Cmdline_Args;
use crate::error::Runner_Error;
use crate::variants::{Desktop_Settings, Embedded_Settings, Invocation, Variant_Kind};
use gdh_cfg::Config;
use gdh_libgodot::{Lib_Godot, Method_Hashes};
use std::convert::TryFrom;
use std::path::PathBuf;

/// Everything the runner needs, after merging the cfg file and the command line.
/// The command line always wins.
#[derive(Clone, Debug, PartialEq)]
pub struct Runner_Settings {
    pub lib_path: PathBuf,
    pub invocation: Invocation,
    pub max_iterations: Option<u64>,
    pub method_hashes: Method_Hashes,
}

impl Runner_Settings {
    pub fn resolve(cmdline: &Cmdline_Args, cfg: &Config) -> Result<Self, Runner_Error> {
        let lib_path = cmdline
            .lib
            .clone()
            .or_else(|| cfg.read_string("libgodot/path").map(PathBuf::from))
            .unwrap_or_else(|| Lib_Godot::default_path().to_path_buf());

        let kind = match cmdline.variant {
            Some(kind) => kind,
            None => match cfg.read_string("run/variant") {
                Some(name) => Variant_Kind::from_cfg_str(name).ok_or_else(|| Runner_Error::Invalid_Cfg {
                    name: "run/variant",
                    reason: format!("unknown variant `{}`", name),
                })?,
                None => Variant_Kind::Desktop,
            },
        };

        let invocation = match kind {
            Variant_Kind::Desktop => Invocation::Desktop(read_desktop_settings(cfg)),
            Variant_Kind::Embedded => Invocation::Embedded(read_embedded_settings(cfg)),
            Variant_Kind::Passthrough => Invocation::Passthrough(cmdline.engine_args.clone()),
        };
        if kind != Variant_Kind::Passthrough && !cmdline.engine_args.is_empty() {
            lwarn!(
                "Ignoring engine args {:?}: they are only used by the passthrough variant.",
                cmdline.engine_args
            );
        }

        let max_iterations = match cmdline.max_iterations {
            Some(n) => n,
            None => read_u64(cfg, "run/max_iterations")?.unwrap_or(0),
        };

        Ok(Runner_Settings {
            lib_path,
            invocation,
            max_iterations: if max_iterations == 0 {
                None
            } else {
                Some(max_iterations)
            },
            method_hashes: read_method_hashes(cfg),
        })
    }
}

fn read_u64(cfg: &Config, name: &'static str) -> Result<Option<u64>, Runner_Error> {
    match cfg.read_int(name) {
        Some(n) => u64::try_from(n).map(Some).map_err(|_| Runner_Error::Invalid_Cfg {
            name,
            reason: format!("expected a non-negative number, got {}", n),
        }),
        None => Ok(None),
    }
}

fn read_string_or(cfg: &Config, name: &str, default: String) -> String {
    cfg.read_string(name).map(String::from).unwrap_or(default)
}

fn read_desktop_settings(cfg: &Config) -> Desktop_Settings {
    let default = Desktop_Settings::default();
    Desktop_Settings {
        project_path: cfg
            .read_string("desktop/project_path")
            .map(PathBuf::from)
            .unwrap_or(default.project_path),
        rendering_method: read_string_or(cfg, "desktop/rendering_method", default.rendering_method),
        rendering_driver: read_string_or(cfg, "desktop/rendering_driver", default.rendering_driver),
    }
}

fn read_embedded_settings(cfg: &Config) -> Embedded_Settings {
    let default = Embedded_Settings::default();
    Embedded_Settings {
        resource_dir: cfg
            .read_string("embedded/resource_dir")
            .map(PathBuf::from)
            .unwrap_or(default.resource_dir),
        main_pack: read_string_or(cfg, "embedded/main_pack", default.main_pack),
        rendering_driver: read_string_or(cfg, "embedded/rendering_driver", default.rendering_driver),
        rendering_method: read_string_or(cfg, "embedded/rendering_method", default.rendering_method),
        display_driver: read_string_or(cfg, "embedded/display_driver", default.display_driver),
    }
}

fn read_method_hashes(cfg: &Config) -> Method_Hashes {
    let default = Method_Hashes::default();
    Method_Hashes {
        start: cfg.read_int("godot_instance/start_hash").unwrap_or(default.start),
        is_started: cfg
            .read_int("godot_instance/is_started_hash")
            .unwrap_or(default.is_started),
        iteration: cfg
            .read_int("godot_instance/iteration_hash")
            .unwrap_or(default.iteration),
        shutdown: cfg
            .read_int("godot_instance/shutdown_hash")
            .unwrap_or(default.shutdown),
    }
}
