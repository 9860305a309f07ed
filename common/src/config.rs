//! This is the `ConfigFile` struct.
//!
//! This is for finding the right default locations for the various
//! configuration files for `safar`.  This is a configuration file/struct
//! neutral loading engine, storing only the base directory and with `load()`
//! read the proper file or the default one.
//!
//! This encapsulates the configuration file, available with `.inner()` or
//! `.inner_mut()`.
//!

use std::fmt::Debug;
use std::path::PathBuf;
use std::{env, fs};

use crate::makepath;
use directories::BaseDirs;
use eyre::{eyre, Result};
use serde::de::DeserializeOwned;
use tracing::{debug, error, trace};

/// Config filename
const CONFIG: &str = "safar.hcl";

/// Main name for the directory base
const TAG: &str = "safar";

/// Returns the base directory for all our files (config, cached session).
///
#[tracing::instrument]
pub fn config_dir() -> PathBuf {
    let base = BaseDirs::new();

    match base {
        Some(base) => {
            #[cfg(unix)]
            let base = base.home_dir().join(".config").to_string_lossy().to_string();

            #[cfg(windows)]
            let base = base.data_local_dir().to_string_lossy().to_string();

            debug!("base = {base}");
            let base: PathBuf = makepath!(base, TAG);
            base
        }
        None => {
            #[cfg(unix)]
            let homedir = env::var("HOME")
                .map_err(|_| error!("No HOME variable defined, can not continue"))
                .unwrap_or_default();

            #[cfg(windows)]
            let homedir = env::var("LOCALAPPDATA")
                .map_err(|_| error!("No LOCALAPPDATA variable defined, can not continue"))
                .unwrap_or_default();

            debug!("base = {homedir}");

            #[cfg(unix)]
            let base: PathBuf = makepath!(homedir, ".config", TAG);

            #[cfg(windows)]
            let base: PathBuf = makepath!(homedir, TAG);

            base
        }
    }
}

/// Configuration for the CLI tool, supposed to include parameters and most
/// importantly credentials for the identity provider.
///
#[derive(Debug)]
pub struct ConfigFile<T: Debug + DeserializeOwned> {
    /// This is the base directory for all files.
    basedir: PathBuf,
    inner: Option<T>,
}

impl<T> ConfigFile<T>
where
    T: Debug + DeserializeOwned,
{
    fn new() -> Self {
        ConfigFile {
            basedir: config_dir(),
            inner: None,
        }
    }

    /// Returns the path of the default config directory
    ///
    pub fn config_path(&self) -> PathBuf {
        self.basedir.clone()
    }

    /// Returns the path of the default config file
    ///
    pub fn default_file(&self) -> PathBuf {
        let cfg = self.config_path().join(CONFIG);
        debug!("default = {cfg:?}");
        cfg
    }

    /// Load the file and return a struct T in the right format.
    ///
    /// Use the following search path:
    /// - default basedir (based on $HOME or $LOCALAPPDATA)
    /// - file specified on CLI
    ///
    #[tracing::instrument]
    pub fn load(fname: Option<&str>) -> Result<ConfigFile<T>> {
        let mut cfg = ConfigFile::<T>::new();

        let fname = match fname {
            Some(fname) => PathBuf::from(fname),
            None => cfg.default_file(),
        };

        // Use a full path
        //
        let fname = if fname.exists() {
            fname.canonicalize()?
        } else {
            return Err(eyre!(
                "Unknown config file {:?} and no default in {:?}",
                fname,
                cfg.default_file()
            ));
        };

        trace!("Loading config file {fname:?} from {:?}", cfg.config_path());

        let data = fs::read_to_string(fname)?;
        debug!("string data = {data}");

        let data: T = hcl::from_str(&data)?;
        debug!("struct data = {data:?}");

        cfg.inner = Some(data);
        Ok(cfg)
    }

    /// Return the inner configuration file
    ///
    pub fn inner(&self) -> &T {
        self.inner.as_ref().unwrap()
    }

    /// Return the inner configuration file as mutable
    ///
    pub fn inner_mut(&mut self) -> &mut T {
        self.inner.as_mut().unwrap()
    }

    /// Consume the engine, keep the configuration
    ///
    pub fn into_inner(self) -> T {
        self.inner.unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::env::temp_dir;

    use serde::Deserialize;

    #[derive(Clone, Debug, Default, Deserialize)]
    struct Foo {
        pub version: usize,
        pub name: String,
    }

    #[test]
    fn test_config_engine_load_file() -> Result<()> {
        let fname = temp_dir().join("safar-test.hcl");
        fs::write(&fname, "version = 1\nname = \"foo\"\n")?;

        let cfg = ConfigFile::<Foo>::load(Some(&fname.to_string_lossy()))?;
        let inner = cfg.inner();
        assert_eq!(1, inner.version);
        assert_eq!("foo", inner.name);

        fs::remove_file(&fname)?;
        Ok(())
    }

    #[test]
    fn test_config_engine_load_missing() {
        let cfg = ConfigFile::<Foo>::load(Some("/nonexistent/safar.hcl"));
        assert!(cfg.is_err());
    }
}
