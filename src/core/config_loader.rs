//! # Config Loader
//!
//! Finds the configuration document, decodes it into the [`Config`] model and
//! checks the structural rules the rest of the engine relies on (non-empty,
//! unique action names; every step carries something to do).

use crate::{
    constants::{CONFIG_FILENAMES, CONFIG_PATH_ENV},
    models::Config,
};
use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Errors raised while locating, reading or decoding the configuration document.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No configuration file exists in the searched locations.
    #[error("File {0} not detected.")]
    NotFound(String),
    /// `MONICA_CONFIG` names a variable or `~` that cannot be expanded.
    #[error("Could not expand MONICA_CONFIG value '{path}': {source}")]
    PathExpansion {
        path: String,
        #[source]
        source: shellexpand::LookupError<std::env::VarError>,
    },
    /// The file exists but could not be read.
    #[error("Could not read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The YAML content is invalid.
    #[error("Failed to parse YAML file at '{path}': {source}")]
    YamlParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    /// The TOML content is invalid.
    #[error("Failed to parse TOML file at '{path}': {source}")]
    TomlParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    /// The document decoded, but breaks a structural rule.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// The syntax of a configuration document, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Toml,
}

impl ConfigFormat {
    /// `.toml` files are TOML; everything else is read as YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::Toml,
            _ => Self::Yaml,
        }
    }
}

/// Locates and loads the configuration document for a working directory.
#[derive(Debug)]
pub struct ConfigLoader {
    working_dir: PathBuf,
    explicit_path: Option<String>,
}

impl ConfigLoader {
    /// Creates a loader that honors the `MONICA_CONFIG` override.
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
            explicit_path: std::env::var(CONFIG_PATH_ENV).ok().filter(|p| !p.is_empty()),
        }
    }

    /// Replaces the explicit path, bypassing the environment.
    pub fn with_explicit_path(mut self, path: Option<String>) -> Self {
        self.explicit_path = path;
        self
    }

    /// Returns the path of the document that would be loaded.
    pub fn locate(&self) -> Result<PathBuf, ConfigError> {
        if let Some(raw) = &self.explicit_path {
            let expanded = shellexpand::full(raw).map_err(|source| ConfigError::PathExpansion {
                path: raw.clone(),
                source,
            })?;
            let path = self.working_dir.join(expanded.as_ref());
            log::debug!("Using configuration from {}: {}", CONFIG_PATH_ENV, path.display());
            return if path.is_file() {
                Ok(path)
            } else {
                Err(ConfigError::NotFound(raw.clone()))
            };
        }

        CONFIG_FILENAMES
            .iter()
            .map(|name| self.working_dir.join(name))
            .find(|candidate| {
                log::trace!("Probing for configuration at {}", candidate.display());
                candidate.is_file()
            })
            .ok_or_else(|| {
                ConfigError::NotFound(CONFIG_FILENAMES.first().copied().unwrap_or_default().to_string())
            })
    }

    /// Locates, reads, decodes and validates the configuration document.
    pub fn load(&self) -> Result<Config, ConfigError> {
        let path = self.locate()?;
        let content = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        let config = parse_config(&content, ConfigFormat::from_path(&path), &path)?;
        log::debug!(
            "Loaded {} action(s) from {}",
            config.actions.len(),
            path.display()
        );
        Ok(config)
    }
}

/// Decodes and validates a configuration document already read into memory.
pub fn parse_config(content: &str, format: ConfigFormat, path: &Path) -> Result<Config, ConfigError> {
    let config: Config = match format {
        ConfigFormat::Yaml => {
            serde_yaml::from_str(content).map_err(|source| ConfigError::YamlParse {
                path: path.to_path_buf(),
                source,
            })?
        }
        ConfigFormat::Toml => toml::from_str(content).map_err(|source| ConfigError::TomlParse {
            path: path.to_path_buf(),
            source,
        })?,
    };
    validate(&config)?;
    Ok(config)
}

/// Checks the structural rules of a decoded document.
///
/// References to unknown actions are deliberately *not* checked here: they are
/// skipped silently by the scanner, the resolver and the executor.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.actions.is_empty() {
        return Err(ConfigError::Invalid(
            "the document must declare at least one action".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for (i, action) in config.actions.iter().enumerate() {
        if action.name.trim().is_empty() {
            return Err(ConfigError::Invalid(format!("action #{} has an empty name", i + 1)));
        }
        if !seen.insert(action.name.as_str()) {
            return Err(ConfigError::Invalid(format!(
                "action '{}' is declared more than once",
                action.name
            )));
        }
        for (j, step) in action.content.iter().enumerate() {
            if step.action.is_none() && step.command.is_none() {
                return Err(ConfigError::Invalid(format!(
                    "step #{} of action '{}' has neither 'action' nor 'command'",
                    j + 1,
                    action.name
                )));
            }
        }
    }

    Ok(())
}
