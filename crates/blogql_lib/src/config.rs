//! blogql configuration parsing and validation.

use std::fs::File;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQlConfig {
    /// The port on which the GraphQL API server should listen.
    #[serde(default = "Config::default_graphql_api_port")]
    pub port: u16,
}

impl Default for GraphQlConfig {
    fn default() -> Self {
        Self {
            port: Config::default_graphql_api_port(),
        }
    }
}

/// A [`serde`]-compatible representation of blogql's YAML configuration
/// file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// The URL of the PostgreSQL database to use.
    pub database_url: String,
    /// GraphQL API configuration.
    #[serde(default)]
    pub graphql: GraphQlConfig,
}

impl Config {
    pub fn read(path: &Path) -> anyhow::Result<Self> {
        let file = File::open(path)?;
        serde_yaml::from_reader(file).context("invalid config file")
    }

    fn default_graphql_api_port() -> u16 {
        8000
    }
}
