//! Process-level configuration for the HTTP service.

use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use crate::generator::GeneratorConfig;

/// Port the service listens on by default.
pub const DEFAULT_PORT: u16 = 5000;

/// Everything the service needs at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceConfig {
    pub bind: SocketAddr,
    pub generator: GeneratorConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from((Ipv4Addr::LOCALHOST, DEFAULT_PORT)),
            generator: GeneratorConfig::default(),
        }
    }
}

impl ServiceConfig {
    /// Sets the listen address and returns the updated config.
    pub fn with_bind(mut self, bind: SocketAddr) -> Self {
        self.bind = bind;
        self
    }

    /// Overrides the output directory when `output_dir` is set.
    pub fn with_output_dir(mut self, output_dir: Option<PathBuf>) -> Self {
        if let Some(output_dir) = output_dir {
            self.generator.output_dir = output_dir;
        }
        self
    }

    /// Overrides the logo path when `logo_path` is set.
    pub fn with_logo_path(mut self, logo_path: Option<PathBuf>) -> Self {
        if let Some(logo_path) = logo_path {
            self.generator.logo_path = logo_path;
        }
        self
    }
}
