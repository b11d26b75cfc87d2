//! Server configuration.

use std::path::PathBuf;

use clap::Parser;
use poster_core::{
    ConfigStore, FileBackend, LayoutEngine, MemoryBackend, StorageError, DEFAULT_NAMESPACE,
};

use crate::DynBackend;

/// Default port for the poster server.
pub const DEFAULT_PORT: u16 = 9474;

/// Command-line arguments for poster-server.
#[derive(Debug, Clone, Parser)]
#[command(name = "poster-server")]
#[command(about = "Poster layout engine dev-tuning server")]
#[command(version)]
pub struct CliArgs {
    /// Port to listen on (localhost only)
    #[arg(long, env = "POSTER_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Directory holding configs.json and configs_bw.json (built-in layouts if unset)
    #[arg(long, env = "POSTER_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    /// Directory for persisted overlay edits (kept in memory if unset)
    #[arg(long, env = "POSTER_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Storage namespace for overlay keys
    #[arg(long, env = "POSTER_NAMESPACE", default_value = DEFAULT_NAMESPACE)]
    pub namespace: String,

    /// Enable live layout editing
    #[arg(long, env = "POSTER_DEV_MODE")]
    pub dev_mode: bool,
}

/// Resolved server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen port.
    pub port: u16,
    /// Canonical configuration directory.
    pub config_dir: Option<PathBuf>,
    /// Overlay persistence directory.
    pub data_dir: Option<PathBuf>,
    /// Overlay storage namespace.
    pub namespace: String,
    /// Whether overlay edits are accepted.
    pub dev_mode: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            config_dir: None,
            data_dir: None,
            namespace: DEFAULT_NAMESPACE.to_string(),
            dev_mode: false,
        }
    }
}

impl From<CliArgs> for ServerConfig {
    fn from(args: CliArgs) -> Self {
        Self {
            port: args.port,
            config_dir: args.config_dir,
            data_dir: args.data_dir,
            namespace: args.namespace,
            dev_mode: args.dev_mode,
        }
    }
}

impl ServerConfig {
    /// Load the canonical documents.
    #[must_use]
    pub fn config_store(&self) -> ConfigStore {
        match &self.config_dir {
            Some(dir) => ConfigStore::from_dir(dir),
            None => ConfigStore::builtin(),
        }
    }

    /// Build the layout engine with its overlay backend.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the data directory cannot be created.
    pub fn build_engine(&self) -> Result<LayoutEngine<DynBackend>, StorageError> {
        let backend: DynBackend = match &self.data_dir {
            Some(dir) => {
                tracing::info!("Persisting overlay edits in {}", dir.display());
                Box::new(FileBackend::with_data_dir(dir)?)
            }
            None => {
                tracing::warn!("No data dir configured, overlay edits last until shutdown");
                Box::new(MemoryBackend::new())
            }
        };
        Ok(LayoutEngine::with_overlay(
            self.config_store(),
            backend,
            self.namespace.clone(),
            self.dev_mode,
        ))
    }
}
