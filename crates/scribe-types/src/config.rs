//! Global configuration types for Scribe.
//!
//! `GlobalConfig` represents the top-level `config.toml` in the data
//! directory. Every field has a default, so an empty file is valid.

use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Number of posts on one listing page.
    #[serde(default = "default_posts_per_page")]
    pub posts_per_page: u32,

    /// Where `scribe serve` listens unless overridden on the command line.
    #[serde(default)]
    pub server: ServerConfig,
}

fn default_posts_per_page() -> u32 {
    10
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            posts_per_page: default_posts_per_page(),
            server: ServerConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}
