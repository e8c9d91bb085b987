use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use hocon::{Hocon, HoconLoader};
use log::warn;

#[derive(Debug)]
pub struct ConfigLoader {
    hocon: Hocon,
    env: HashMap<String, String>,
    scope: String,
    base_dir: PathBuf,
}

impl ConfigLoader {
    pub fn new(path: impl AsRef<Path>, scope: String) -> Result<Self> {
        let path = path.as_ref();
        let env = std::env::vars().collect::<HashMap<_, _>>();
        let base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        let hocon = if path.is_file() {
            HoconLoader::new()
                .load_file(path)
                .with_context(|| format!("Failed to find or load config file at: {:?}", path))?
                .hocon()?
        } else {
            warn!("Config file {:?} not found, using defaults", path);
            Hocon::Hash(Default::default())
        };

        Ok(Self {
            hocon,
            env,
            scope,
            base_dir,
        })
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.env.get(name) {
            return Some(Value::String(value.clone()));
        }

        let scope = &self.hocon[self.scope.as_str()];
        if matches!(scope, Hocon::Hash(_)) {
            if let Some(value) = Self::map_hocon(scope, name) {
                return Some(value);
            }
        }

        Self::map_hocon(&self.hocon, name)
    }

    /// Resolves a path valued key against the directory holding the config file.
    pub fn get_relative_path(&self, name: &str) -> Option<PathBuf> {
        self.get(name)
            .and_then(|v| v.as_string())
            .map(|p| self.base_dir.join(p))
    }

    pub fn load<T: Config>(&self) -> Result<T> {
        let res = T::load(self)?;
        Ok(res)
    }

    pub fn scoped(&self, scope: &str) -> Self {
        Self {
            hocon: self.hocon.clone(),
            env: self.env.clone(),
            scope: scope.to_string(),
            base_dir: self.base_dir.clone(),
        }
    }

    fn map_hocon(hocon: &Hocon, name: &str) -> Option<Value> {
        match &hocon[name] {
            Hocon::Real(f64) => Some(Value::Float(*f64)),
            Hocon::Integer(i64) => Some(Value::Integer(*i64 as usize)),
            Hocon::String(string) => Some(Value::String(string.clone())),
            Hocon::Boolean(bool) => Some(Value::Boolean(*bool)),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub enum Value {
    String(String),
    Integer(usize),
    Float(f64),
    Boolean(bool),
}

impl Value {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(val) => Some(*val),
            Value::String(val) => Hocon::String(val.clone()).as_bool(),
            _ => None,
        }
    }

    pub fn as_usize(&self) -> Option<usize> {
        match self {
            Value::Integer(val) => Some(*val),
            Value::String(val) => val.parse::<usize>().ok(),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        self.as_usize().map(|v| v as u64)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(val) => Some(*val),
            Value::Integer(val) => Some(*val as f64),
            Value::String(val) => val.parse::<f64>().ok(),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<String> {
        match self {
            Value::String(val) => Some(val.clone()),
            Value::Boolean(true) => Some("true".to_string()),
            Value::Boolean(false) => Some("false".to_string()),
            Value::Float(val) => Some(val.to_string()),
            Value::Integer(val) => Some(val.to_string()),
        }
    }
}

pub trait Config {
    fn load(config: &ConfigLoader) -> Result<Self>
    where
        Self: Sized;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".conf").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_scoped_value_wins_over_root_value() {
        let file = write_config("workers = 2\ncrawl { workers = 8 }\n");
        let config = ConfigLoader::new(file.path(), "crawl".to_string()).unwrap();

        assert_eq!(config.get("workers").and_then(|v| v.as_usize()), Some(8));
    }

    #[test]
    fn test_root_value_is_used_when_scope_lacks_key() {
        let file = write_config("task_timeout_secs = 30\ncrawl { workers = 8 }\n");
        let config = ConfigLoader::new(file.path(), "crawl".to_string()).unwrap();

        assert_eq!(
            config.get("task_timeout_secs").and_then(|v| v.as_usize()),
            Some(30)
        );
    }

    #[test]
    fn test_missing_file_yields_no_values() {
        let config =
            ConfigLoader::new("/nonexistent/opening_tree.conf", "crawl".to_string()).unwrap();

        assert!(config.get("a_key_nobody_sets").is_none());
    }

    #[test]
    fn test_float_and_string_values() {
        let file = write_config("crawl { significance_threshold = 0.05, snapshot_dir = \"out\" }\n");
        let config = ConfigLoader::new(file.path(), "crawl".to_string()).unwrap();

        assert_eq!(
            config.get("significance_threshold").and_then(|v| v.as_f64()),
            Some(0.05)
        );
        assert_eq!(
            config.get_relative_path("snapshot_dir"),
            file.path().parent().map(|p| p.join("out"))
        );
    }

    #[test]
    fn test_string_values_parse_as_numbers() {
        assert_eq!(Value::String("12".to_string()).as_usize(), Some(12));
        assert_eq!(Value::String("0.5".to_string()).as_f64(), Some(0.5));
        assert_eq!(Value::String("twelve".to_string()).as_usize(), None);
    }
}
