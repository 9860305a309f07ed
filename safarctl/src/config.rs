//! Configuration for the CLI tool.
//!
//! Everything is optional: without a file we still plan trips and list
//! providers, only the identity commands insist on credentials.
//!

use serde::Deserialize;
use tracing::trace;

use eyre::Result;
use safar_auth::IdentityClient;
use safar_common::ConfigFile;
use safar_geocode::Nominatim;

use crate::Status;

/// Current version
pub const CVERSION: usize = 1;

/// Configuration for the CLI tool, supposed to include parameters and most
/// importantly credentials for the identity provider.
///
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Version in the file MUST match `CVERSION`
    pub version: usize,
    /// Identity provider credentials
    pub auth: Option<AuthConfig>,
    /// Geocoder parameters
    pub geocode: Option<GeocodeConfig>,
}

/// Identity provider endpoint and API key.
///
#[derive(Debug, Deserialize)]
pub struct AuthConfig {
    pub base_url: String,
    pub api_key: String,
}

/// Geocoder endpoint, defaults to the public Nominatim instance.
///
#[derive(Debug, Deserialize)]
pub struct GeocodeConfig {
    pub base_url: String,
}

impl Config {
    /// Load either the specified file or the default one.  A missing default
    /// file is fine (planning needs no credentials), a missing explicit file
    /// or a version mismatch is not.
    ///
    #[tracing::instrument]
    pub fn load(fname: Option<&str>) -> Result<Config> {
        trace!("config::load");

        let cfg = match ConfigFile::<Config>::load(fname) {
            Ok(cfg) => cfg.into_inner(),
            Err(e) => {
                if fname.is_some() {
                    return Err(e);
                }
                Config {
                    version: CVERSION,
                    ..Config::default()
                }
            }
        };
        if cfg.version != CVERSION {
            return Err(Status::BadFileVersion(cfg.version).into());
        }
        Ok(cfg)
    }

    /// Geocoding client, on the configured or the public instance.
    ///
    pub fn geocoder(&self) -> Nominatim {
        match &self.geocode {
            Some(g) => Nominatim::with_base(&g.base_url),
            None => Nominatim::new(),
        }
    }

    /// Identity client, only available when credentials are configured.
    ///
    pub fn identity(&self) -> Result<IdentityClient> {
        let auth = self
            .auth
            .as_ref()
            .ok_or_else(|| Status::MissingConfigParameter("auth".to_owned()))?;
        Ok(IdentityClient::new(&auth.base_url, &auth.api_key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::env::temp_dir;
    use std::fs;

    #[test]
    fn test_config_load_missing_default_is_fine() -> Result<()> {
        // Only meaningful on a machine without a real configuration.
        //
        if safar_common::config_dir().join("safar.hcl").exists() {
            return Ok(());
        }
        let cfg = Config::load(None)?;
        assert_eq!(CVERSION, cfg.version);
        assert!(cfg.identity().is_err());
        Ok(())
    }

    #[test]
    fn test_config_load_missing_explicit_fails() {
        assert!(Config::load(Some("/nonexistent/safar.hcl")).is_err());
    }

    #[test]
    fn test_config_load_bad_version() -> Result<()> {
        let fname = temp_dir().join("safar-badv.hcl");
        fs::write(&fname, "version = 42\n")?;

        let cfg = Config::load(Some(&fname.to_string_lossy()));
        assert!(cfg.is_err());

        fs::remove_file(&fname)?;
        Ok(())
    }

    #[test]
    fn test_config_load_full() -> Result<()> {
        let fname = temp_dir().join("safar-full.hcl");
        fs::write(
            &fname,
            r#"version = 1

auth {
  base_url = "https://identitytoolkit.example.com/v1"
  api_key  = "whatever"
}

geocode {
  base_url = "https://nominatim.example.com"
}
"#,
        )?;

        let cfg = Config::load(Some(&fname.to_string_lossy()))?;
        assert!(cfg.auth.is_some());
        assert!(cfg.identity().is_ok());

        fs::remove_file(&fname)?;
        Ok(())
    }
}
