//! Layered configuration: built-in defaults, an optional TOML file, then
//! `PRICELENS__*` environment variables.

use crate::error::Result;
use crate::overlap::OverlapOptions;
use config::{Config, Environment, File, FileFormat};
use pricelens_visualization::ScalingOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Prefix for environment overrides, e.g. `PRICELENS__OVERLAP__CURRENCY=EUR`
pub const ENV_PREFIX: &str = "PRICELENS";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricelensConfig {
    pub overlap: OverlapOptions,
    pub scaling: ScalingOptions,
    /// Series keys stacked by the `scale` report when none are given
    pub value_keys: Vec<String>,
}

impl PricelensConfig {
    /// Load from `path` (when given) and the process environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::build(path, Environment::with_prefix(ENV_PREFIX))
    }

    /// Load from `path` and an explicit set of environment variables
    pub fn load_with_env(
        path: Option<&Path>,
        vars: impl IntoIterator<Item = (String, String)>,
    ) -> Result<Self> {
        let env = Environment::with_prefix(ENV_PREFIX).source(Some(vars.into_iter().collect()));
        Self::build(path, env)
    }

    fn build(path: Option<&Path>, env: Environment) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
        }
        let settings = builder
            .add_source(
                env.separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("value_keys"),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
