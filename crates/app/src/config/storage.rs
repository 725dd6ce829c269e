//! Storage Config

use std::path::PathBuf;

use clap::Args;

/// Persistence backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum StorageBackend {
    /// One JSON file per key in the data directory.
    File,

    /// Nothing survives the process.
    Memory,
}

/// Storage settings.
#[derive(Debug, Clone, Args)]
pub struct StorageConfig {
    /// Storage backend (file, memory)
    #[arg(long, env = "PIZZERIA_STORAGE", value_enum, default_value_t = StorageBackend::File)]
    pub storage: StorageBackend,

    /// Directory holding the stored JSON documents
    #[arg(long, env = "PIZZERIA_DATA_DIR", default_value = ".pizzeria")]
    pub data_dir: PathBuf,
}
