//! Defaults for scaffolded code, read from `gencmd.yaml`.
//!
//! ```yaml
//! description: Generates deep-copy helpers
//! example: mycmd deepcopy paths=./...
//! header_file: hack/boilerplate.txt
//! ```
//!
//! Every key is optional and a missing file means defaults. The
//! `GENCMD_DESCRIPTION` environment variable overrides `description`.

use crate::error::ScaffoldError;
use serde::Deserialize;
use std::path::Path;

pub const CONFIG_FILE: &str = "gencmd.yaml";
pub const DESCRIPTION_ENV: &str = "GENCMD_DESCRIPTION";

const DEFAULT_DESCRIPTION: &str = "TODO: write a description here.";
const DEFAULT_EXAMPLE: &str = "TODO: write an example here.";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScaffoldConfig {
    /// Becomes `DESCRIPTION` in the command entry point.
    pub description: String,
    /// Becomes `HELPER` in the command entry point.
    pub example: String,
    /// License header the generator stubs prepend to their output.
    pub header_file: Option<String>,
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self {
            description: DEFAULT_DESCRIPTION.to_string(),
            example: DEFAULT_EXAMPLE.to_string(),
            header_file: None,
        }
    }
}

impl ScaffoldConfig {
    /// Load `gencmd.yaml` from `dir`, then apply environment overrides.
    pub fn load(dir: &Path) -> Result<Self, ScaffoldError> {
        let path = dir.join(CONFIG_FILE);
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            Self::from_yaml(&content).map_err(|message| ScaffoldError::Config {
                path: path.clone(),
                message,
            })?
        } else {
            Self::default()
        };

        if let Ok(description) = std::env::var(DESCRIPTION_ENV) {
            config.description = description;
        }
        Ok(config)
    }

    fn from_yaml(content: &str) -> Result<Self, String> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| e.to_string())
    }
}
