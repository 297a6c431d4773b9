//! Layered configuration loader and path helpers.
//!
//! Uses Figment to merge, lowest precedence first: the built-in
//! `ScanSettings::default()`, `notescan.toml`, `notescan.<env>.toml`
//! (env from `RUST_ENV`), an explicit file passed by the caller, and
//! `NOTESCAN_*` env vars (`__` separates nested keys).

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::types::ScanSettings;

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load_with(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment = Figment::from(Serialized::defaults(ScanSettings::default()))
            .merge(Toml::file("notescan.toml"));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file("notescan.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("notescan.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("notescan.test.toml")),
            _ => {}
        }
        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(Error::NotFound(format!("config file {}", path.display())).into());
            }
            figment = figment.merge(Toml::file(path));
        }
        figment = figment.merge(Env::prefixed("NOTESCAN_").split("__"));

        Ok(Self { figment })
    }

    /// Defaults overlaid with a TOML document, no files or env involved.
    pub fn from_toml_str(toml: &str) -> Self {
        Self { figment: Figment::from(Serialized::defaults(ScanSettings::default())).merge(Toml::string(toml)) }
    }

    pub fn get<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| anyhow::anyhow!("Failed to get '{}': {}", key, e))
    }

    /// Extract and validate the full settings tree.
    pub fn settings(&self) -> Result<ScanSettings> {
        let settings: ScanSettings = self.figment.extract().map_err(|e| Error::InvalidConfig(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }
}

/// Expand `~` and `$VAR` / `${VAR}` in a user-supplied path. No canonicalization.
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let raw = input.as_ref();
    let with_env = shellexpand::env(raw).unwrap_or(std::borrow::Cow::Borrowed(raw));
    PathBuf::from(shellexpand::tilde(&with_env).as_ref())
}

/// Expand `p`, then anchor it at `base` unless it is already absolute.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}
