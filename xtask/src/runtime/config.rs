//! Typed configuration loading helpers.

use crate::runtime::error::{XtaskError, XtaskResult};
use serde::de::DeserializeOwned;
use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// Generic TOML-backed config loader.
///
/// `ConfigLoader<T>` handles only filesystem access and TOML deserialization. Command modules
/// validate the typed value after loading it.
#[derive(Clone, Debug)]
pub struct ConfigLoader<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T> ConfigLoader<T>
where
    T: DeserializeOwned,
{
    /// Create a loader for the given workspace-relative path.
    pub fn new(root: &Path, relative_path: &str) -> Self {
        Self {
            path: root.join(relative_path),
            _marker: PhantomData,
        }
    }

    /// Load and deserialize the configuration file.
    ///
    /// Missing files, unreadable files, and TOML parse failures are all surfaced as
    /// [`XtaskErrorCategory::Config`](crate::runtime::error::XtaskErrorCategory::Config).
    pub fn load(&self) -> XtaskResult<T> {
        let body = fs::read_to_string(&self.path).map_err(|err| {
            XtaskError::config(format!("failed to read config: {err}")).with_path(&self.path)
        })?;
        toml::from_str(&body).map_err(|err| {
            XtaskError::config(format!("failed to parse config: {err}")).with_path(&self.path)
        })
    }

    /// Return the config path on disk.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::error::XtaskErrorCategory;
    use serde::Deserialize;
    use std::time::{SystemTime, UNIX_EPOCH};

    #[derive(Debug, Deserialize, PartialEq, Eq)]
    struct ExampleConfig {
        value: String,
        count: u32,
    }

    fn unique_test_root() -> PathBuf {
        std::env::temp_dir().join(format!(
            "xtask-config-test-{}",
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .expect("time")
                .as_nanos()
        ))
    }

    #[test]
    fn load_reads_workspace_relative_toml() {
        let root = unique_test_root();
        fs::create_dir_all(root.join("tools/automation")).expect("create config dir");
        fs::write(
            root.join("tools/automation/example.toml"),
            "value = \"ok\"\ncount = 7\n",
        )
        .expect("write config");

        let loader = ConfigLoader::<ExampleConfig>::new(&root, "tools/automation/example.toml");
        assert_eq!(
            loader.load().expect("load config"),
            ExampleConfig {
                value: "ok".into(),
                count: 7,
            }
        );

        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn missing_and_invalid_files_are_config_errors() {
        let root = unique_test_root();
        fs::create_dir_all(&root).expect("create temp root");
        fs::write(root.join("broken.toml"), "value = [").expect("write broken config");

        let missing = ConfigLoader::<ExampleConfig>::new(&root, "missing.toml")
            .load()
            .expect_err("missing config should fail");
        assert_eq!(missing.category, XtaskErrorCategory::Config);
        assert!(missing.to_string().contains("missing.toml"));

        let broken = ConfigLoader::<ExampleConfig>::new(&root, "broken.toml")
            .load()
            .expect_err("invalid config should fail");
        assert_eq!(broken.category, XtaskErrorCategory::Config);
        assert!(broken.to_string().contains("broken.toml"));

        let _ = fs::remove_dir_all(root);
    }
}
