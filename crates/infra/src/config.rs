//! Configuration loading and representation.

use std::path::PathBuf;

use anyhow::{Context, bail};

use savemyspot_spots::Coordinates;

use crate::location::PermissionStatus;

pub const ENV_DB_PATH: &str = "SAVEMYSPOT_DB_PATH";
pub const ENV_FIX: &str = "SAVEMYSPOT_FIX";
pub const ENV_LOCATION_PERMISSION: &str = "SAVEMYSPOT_LOCATION_PERMISSION";
pub const ENV_NATIVE_SCHEMES: &str = "SAVEMYSPOT_NATIVE_SCHEMES";

/// Runtime configuration for the application shell.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// SQLite file holding the key-value store.
    pub db_path: PathBuf,
    /// Position reported by the fixed location provider; `None` means every
    /// fix attempt fails.
    pub fixed_location: Option<Coordinates>,
    /// Answer given to foreground permission requests.
    pub location_permission: PermissionStatus,
    /// URL schemes treated as having an installed handler.
    pub native_schemes: Vec<String>,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let db_path = match lookup(ENV_DB_PATH).filter(|v| !v.trim().is_empty()) {
            Some(path) => PathBuf::from(path),
            None => default_db_path()?,
        };

        let fixed_location = lookup(ENV_FIX)
            .filter(|v| !v.trim().is_empty())
            .map(|v| parse_fix(&v).with_context(|| format!("invalid {ENV_FIX} value {v:?}")))
            .transpose()?;

        let location_permission = lookup(ENV_LOCATION_PERMISSION)
            .map(|v| PermissionStatus::from_platform(&v))
            .unwrap_or(PermissionStatus::Granted);

        let native_schemes = lookup(ENV_NATIVE_SCHEMES)
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            db_path,
            fixed_location,
            location_permission,
            native_schemes,
        })
    }
}

fn parse_fix(value: &str) -> anyhow::Result<Coordinates> {
    let Some((lat, lng)) = value.split_once(',') else {
        bail!("expected \"<latitude>,<longitude>\"");
    };
    let latitude: f64 = lat.trim().parse().context("latitude is not a number")?;
    let longitude: f64 = lng.trim().parse().context("longitude is not a number")?;
    Ok(Coordinates::new(latitude, longitude)?)
}

/// Resolve the default storage path: `{app_data_dir}/savemyspot/storage.db`.
fn default_db_path() -> anyhow::Result<PathBuf> {
    let base = dirs::data_dir()
        .or_else(|| {
            dirs::home_dir().map(|mut h| {
                h.push(".local");
                h.push("share");
                h
            })
        })
        .context("failed to resolve OS app data directory - tried data_dir() and home_dir()/.local/share")?;

    Ok(base.join("savemyspot").join("storage.db"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> anyhow::Result<AppConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn explicit_values_are_used() {
        let cfg = config(&[
            (ENV_DB_PATH, "/tmp/spots.db"),
            (ENV_FIX, " 51.5007 , -0.1246 "),
            (ENV_LOCATION_PERMISSION, "denied"),
            (ENV_NATIVE_SCHEMES, "comgooglemaps, ,geo"),
        ])
        .unwrap();

        assert_eq!(cfg.db_path, PathBuf::from("/tmp/spots.db"));
        assert_eq!(
            cfg.fixed_location,
            Some(Coordinates::new(51.5007, -0.1246).unwrap())
        );
        assert_eq!(cfg.location_permission, PermissionStatus::Denied);
        assert_eq!(cfg.native_schemes, vec!["comgooglemaps", "geo"]);
    }

    #[test]
    fn defaults_grant_permission_without_fix() {
        let cfg = config(&[(ENV_DB_PATH, "/tmp/spots.db")]).unwrap();
        assert_eq!(cfg.fixed_location, None);
        assert_eq!(cfg.location_permission, PermissionStatus::Granted);
        assert!(cfg.native_schemes.is_empty());
    }

    #[test]
    fn malformed_fix_is_rejected() {
        assert!(config(&[(ENV_DB_PATH, "/x"), (ENV_FIX, "north")]).is_err());
        assert!(config(&[(ENV_DB_PATH, "/x"), (ENV_FIX, "95,0")]).is_err());
    }
}
