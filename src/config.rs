//! Configuration file parser for the tiling threshold and the solver
//! parameter bundle.
//!
//! ```toml
//! [tiling]
//! threshold = 0.5
//!
//! [solver]
//! model = "lasso"
//! lambda = 0.01
//! max_iter = 50000
//! tolerance = 1e-4
//! non_negative = true
//! alpha = 1.0
//! ```

use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

use crate::ress::{Model, Params};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("unknown solver model {0:?}; expected \"lasso\" or \"elastic-net\"")]
    UnknownModel(String),
}

impl FromStr for Model {
    type Err = ConfigError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lasso" => Ok(Model::Lasso),
            "elastic-net" | "elnet" => Ok(Model::ElasticNet),
            other => Err(ConfigError::UnknownModel(other.into())),
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub tiling: TilingConfig,
    #[serde(default)]
    pub solver: SolverConfig,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TilingConfig {
    /// Samples at or below this intensity do not form strips.
    #[serde(default)]
    pub threshold: f64,
}

impl Default for TilingConfig {
    fn default() -> Self {
        Self { threshold: 0.0 }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SolverConfig {
    pub model: Option<String>,
    pub lambda: Option<f64>,
    pub max_iter: Option<usize>,
    pub tolerance: Option<f64>,
    pub non_negative: Option<bool>,
    pub alpha: Option<f64>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self { model: None, lambda: None, max_iter: None, tolerance: None,
               non_negative: None, alpha: None }
    }
}

impl SolverConfig {
    /// Fill anything unspecified from the solver defaults.
    pub fn to_params(&self) -> Result<Params, ConfigError> {
        let defaults = Params::default();
        Ok(Params {
            model: match &self.model {
                Some(name) => name.parse()?,
                None => defaults.model,
            },
            lambda: self.lambda.unwrap_or(defaults.lambda),
            max_iter: self.max_iter.unwrap_or(defaults.max_iter),
            tolerance: self.tolerance.unwrap_or(defaults.tolerance),
            non_negative: self.non_negative.unwrap_or(defaults.non_negative),
            alpha: self.alpha.unwrap_or(defaults.alpha),
        })
    }
}

impl Config {
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::parse(&fs::read_to_string(path)?)
    }
}
