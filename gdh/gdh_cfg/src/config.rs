use super::parsing::{self, Cfg_Value};
use std::collections::HashMap;
use std::path::Path;

/// Flat view over one or more cfg files: every entry is addressed as `section/key`.
#[derive(Default, Debug)]
pub struct Config {
    cfg_var_table: HashMap<String, Cfg_Value>,
}

impl Config {
    /// Loads a single cfg file or every `.cfg` file inside a directory.
    pub fn new_from_path(path: &Path) -> std::io::Result<Config> {
        let start_t = std::time::Instant::now();
        let mut config = Config::default();
        for section in parsing::parse_config_dir(path)? {
            // Flatten section/entries into `header/key` names.
            for entry in section.entries {
                let name = format!("{}/{}", section.header, entry.key);
                lverbose!("Loading cfg var {} = {:?}", name, entry.value);
                config.cfg_var_table.insert(name, entry.value);
            }
        }

        lok!(
            "Loaded cfg {:?} in {} ms.",
            path,
            start_t.elapsed().as_secs_f32() * 1000.0
        );

        Ok(config)
    }

    /// Like `new_from_path`, but a missing file yields an empty config.
    pub fn new_from_path_or_default(path: &Path) -> std::io::Result<Config> {
        if path.exists() {
            Config::new_from_path(path)
        } else {
            linfo!("No cfg found at {:?}: using defaults.", path);
            Ok(Config::default())
        }
    }

    pub fn read_cfg(&self, name: &str) -> Option<&Cfg_Value> {
        self.cfg_var_table.get(name)
    }

    pub fn read_string(&self, name: &str) -> Option<&str> {
        match self.read_cfg(name)? {
            Cfg_Value::String(s) => Some(s.as_str()),
            other => {
                lwarn!("Cfg var {} is not a string: {:?}", name, other);
                None
            }
        }
    }

    pub fn read_int(&self, name: &str) -> Option<i64> {
        match self.read_cfg(name)? {
            Cfg_Value::Int(i) => Some(*i),
            other => {
                lwarn!("Cfg var {} is not an int: {:?}", name, other);
                None
            }
        }
    }

    pub fn read_float(&self, name: &str) -> Option<f32> {
        match self.read_cfg(name)? {
            Cfg_Value::Float(f) => Some(*f),
            Cfg_Value::Int(i) => Some(*i as f32),
            other => {
                lwarn!("Cfg var {} is not a float: {:?}", name, other);
                None
            }
        }
    }

    pub fn read_bool(&self, name: &str) -> Option<bool> {
        match self.read_cfg(name)? {
            Cfg_Value::Bool(b) => Some(*b),
            other => {
                lwarn!("Cfg var {} is not a bool: {:?}", name, other);
                None
            }
        }
    }

    pub fn write_cfg(&mut self, name: &str, val: Cfg_Value) -> Result<(), String> {
        match self.cfg_var_table.get_mut(name) {
            Some(cur) if std::mem::discriminant(cur) != std::mem::discriminant(&val) => Err(format!(
                "Cfg var {} was not updated because its current value ({:?}) has a type different from the new one ({:?}).",
                name, cur, val
            )),
            Some(cur) => {
                *cur = val;
                Ok(())
            }
            None => {
                self.cfg_var_table.insert(String::from(name), val);
                Ok(())
            }
        }
    }

    pub fn get_all_pairs(&self) -> impl Iterator<Item = (&str, &Cfg_Value)> + '_ {
        self.cfg_var_table
            .iter()
            .map(|(key, val)| (key.as_str(), val))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_cfg_file(dir: &Path, name: &str, contents: &str) {
        let mut file = std::fs::File::create(dir.join(name)).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
    }

    #[test]
    fn reads_typed_values_from_file() {
        let dir = tempfile::tempdir().unwrap();
        write_cfg_file(
            dir.path(),
            "runner.cfg",
            "/libgodot\npath ./libgodot.so\n/run\nmax_iterations 10\nverbose true\nscale 0.5\n",
        );

        let cfg = Config::new_from_path(&dir.path().join("runner.cfg")).unwrap();
        assert_eq!(cfg.read_string("libgodot/path"), Some("./libgodot.so"));
        assert_eq!(cfg.read_int("run/max_iterations"), Some(10));
        assert_eq!(cfg.read_bool("run/verbose"), Some(true));
        assert_eq!(cfg.read_float("run/scale"), Some(0.5));
        assert_eq!(cfg.read_float("run/max_iterations"), Some(10.0));

        // Wrong type or missing key
        assert_eq!(cfg.read_int("libgodot/path"), None);
        assert_eq!(cfg.read_string("libgodot/nope"), None);
    }

    #[test]
    fn reads_every_cfg_file_in_dir() {
        let dir = tempfile::tempdir().unwrap();
        write_cfg_file(dir.path(), "a.cfg", "/desktop\nproject_path ../p\n");
        write_cfg_file(dir.path(), "b.cfg", "/embedded\nmain_pack game.pck\n");
        write_cfg_file(dir.path(), "ignored.txt", "/run\nvariant embedded\n");

        let cfg = Config::new_from_path(dir.path()).unwrap();
        assert_eq!(cfg.read_string("desktop/project_path"), Some("../p"));
        assert_eq!(cfg.read_string("embedded/main_pack"), Some("game.pck"));
        assert!(cfg.read_cfg("run/variant").is_none());
    }

    #[test]
    fn missing_file_gives_empty_config() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::new_from_path_or_default(&dir.path().join("nope.cfg")).unwrap();
        assert_eq!(cfg.get_all_pairs().count(), 0);

        assert!(Config::new_from_path(&dir.path().join("nope.cfg")).is_err());
    }

    #[test]
    fn write_cfg_keeps_types_consistent() {
        let mut cfg = Config::default();
        cfg.write_cfg("run/max_iterations", Cfg_Value::Int(3)).unwrap();
        cfg.write_cfg("run/max_iterations", Cfg_Value::Int(4)).unwrap();
        assert_eq!(cfg.read_int("run/max_iterations"), Some(4));
        assert!(cfg
            .write_cfg("run/max_iterations", Cfg_Value::Bool(true))
            .is_err());
        assert_eq!(cfg.read_int("run/max_iterations"), Some(4));
    }
}
