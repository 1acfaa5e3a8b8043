// The fixed engine command lines the runner knows about.

use clap::ValueEnum;
use gdh_libgodot::Engine_Args;
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Variant_Kind {
    /// Runs a project folder with the OpenGL compatibility renderer.
    Desktop,
    /// Runs an exported main pack on the embedded display driver.
    Embedded,
    /// Forwards the arguments given after `--`.
    Passthrough,
}

impl Variant_Kind {
    pub fn from_cfg_str(s: &str) -> Option<Self> {
        <Self as ValueEnum>::from_str(s, true).ok()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Desktop_Settings {
    pub project_path: PathBuf,
    pub rendering_method: String,
    pub rendering_driver: String,
}

impl Default for Desktop_Settings {
    fn default() -> Self {
        Desktop_Settings {
            project_path: PathBuf::from("../../project/"),
            rendering_method: String::from("gl_compatibility"),
            rendering_driver: String::from("opengl3"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Embedded_Settings {
    pub resource_dir: PathBuf,
    pub main_pack: String,
    pub rendering_driver: String,
    pub rendering_method: String,
    pub display_driver: String,
}

impl Default for Embedded_Settings {
    fn default() -> Self {
        Embedded_Settings {
            resource_dir: PathBuf::from("."),
            main_pack: String::from("main.pck"),
            rendering_driver: String::from("vulkan"),
            rendering_method: String::from("mobile"),
            display_driver: String::from("embedded"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Invocation {
    Desktop(Desktop_Settings),
    Embedded(Embedded_Settings),
    Passthrough(Vec<String>),
}

impl Invocation {
    pub fn kind(&self) -> Variant_Kind {
        match self {
            Invocation::Desktop(_) => Variant_Kind::Desktop,
            Invocation::Embedded(_) => Variant_Kind::Embedded,
            Invocation::Passthrough(_) => Variant_Kind::Passthrough,
        }
    }

    /// Appends this variant's arguments after the program name in `base`.
    pub fn engine_args(&self, base: Engine_Args) -> Engine_Args {
        match self {
            Invocation::Desktop(desktop) => base
                .flag("--path", desktop.project_path.to_string_lossy())
                .flag("--rendering-method", desktop.rendering_method.as_str())
                .flag("--rendering-driver", desktop.rendering_driver.as_str()),
            Invocation::Embedded(embedded) => base
                .flag(
                    "--main-pack",
                    embedded
                        .resource_dir
                        .join(&embedded.main_pack)
                        .to_string_lossy(),
                )
                .flag("--rendering-driver", embedded.rendering_driver.as_str())
                .flag("--rendering-method", embedded.rendering_method.as_str())
                .flag("--display-driver", embedded.display_driver.as_str()),
            Invocation::Passthrough(args) => base.extend(args.iter().cloned()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn desktop_args() {
        let args = Invocation::Desktop(Desktop_Settings::default())
            .engine_args(Engine_Args::new("runner"));
        assert_eq!(
            args.as_slice(),
            [
                "runner",
                "--path",
                "../../project/",
                "--rendering-method",
                "gl_compatibility",
                "--rendering-driver",
                "opengl3"
            ]
        );
    }

    #[test]
    fn embedded_args_join_the_main_pack() {
        let invocation = Invocation::Embedded(Embedded_Settings {
            resource_dir: PathBuf::from("res"),
            ..Default::default()
        });
        let args = invocation.engine_args(Engine_Args::new("runner"));
        let expected_pack = PathBuf::from("res").join("main.pck");
        assert_eq!(
            args.as_slice(),
            [
                "runner",
                "--main-pack",
                expected_pack.to_str().unwrap(),
                "--rendering-driver",
                "vulkan",
                "--rendering-method",
                "mobile",
                "--display-driver",
                "embedded"
            ]
        );
    }

    #[test]
    fn passthrough_keeps_order() {
        let invocation = Invocation::Passthrough(vec!["--headless".into(), "--quit".into()]);
        assert_eq!(invocation.kind(), Variant_Kind::Passthrough);
        let args = invocation.engine_args(Engine_Args::new("runner"));
        assert_eq!(args.as_slice(), ["runner", "--headless", "--quit"]);
    }

    #[test]
    fn variant_names_from_cfg() {
        assert_eq!(Variant_Kind::from_cfg_str("desktop"), Some(Variant_Kind::Desktop));
        assert_eq!(Variant_Kind::from_cfg_str("Embedded"), Some(Variant_Kind::Embedded));
        assert_eq!(Variant_Kind::from_cfg_str("ios"), None);
    }
}
