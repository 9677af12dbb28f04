//! Inspector settings
//!
//! Values come from command-line flags first, then from the environment:
//!
//! - `BIT_MAX_PATH_LEN`: longest index entry path accepted by the decoder
//! - `NO_PAGER`: any value disables the pager
//!
//! Logging verbosity is read from `BIT_LOG` by `main` when it installs the subscriber.

use crate::artifacts::index::IndexDecodeOptions;
use anyhow::Context;
use std::path::{Path, PathBuf};

pub const MAX_PATH_LEN_ENV: &str = "BIT_MAX_PATH_LEN";
pub const NO_PAGER_ENV: &str = "NO_PAGER";

#[derive(Debug, Clone)]
pub struct RepositoryConfig {
    git_dir: PathBuf,
    index_options: IndexDecodeOptions,
    no_pager: bool,
}

impl RepositoryConfig {
    pub fn new(git_dir: impl Into<PathBuf>) -> Self {
        RepositoryConfig {
            git_dir: git_dir.into(),
            index_options: IndexDecodeOptions::default(),
            no_pager: false,
        }
    }

    /// Build from optional flag values, falling back to the environment
    pub fn load(git_dir: Option<PathBuf>, max_path_len: Option<usize>) -> anyhow::Result<Self> {
        let git_dir = match git_dir {
            Some(git_dir) => git_dir,
            None => std::env::current_dir()?.join(".git"),
        };

        let max_path_len = match max_path_len {
            Some(len) => Some(len),
            None => std::env::var(MAX_PATH_LEN_ENV)
                .ok()
                .map(|len| {
                    len.trim()
                        .parse::<usize>()
                        .context(format!("{MAX_PATH_LEN_ENV} must be a positive integer"))
                })
                .transpose()?,
        };

        let mut config = Self::new(git_dir).with_no_pager(std::env::var_os(NO_PAGER_ENV).is_some());
        if let Some(max_path_len) = max_path_len {
            config = config.with_max_path_len(max_path_len);
        }

        tracing::debug!(?config, "loaded configuration");

        Ok(config)
    }

    pub fn with_max_path_len(mut self, max_path_len: usize) -> Self {
        self.index_options.max_path_len = max_path_len;
        self
    }

    pub fn with_no_pager(mut self, no_pager: bool) -> Self {
        self.no_pager = no_pager;
        self
    }

    pub fn git_dir(&self) -> &Path {
        &self.git_dir
    }

    pub fn index_path(&self) -> PathBuf {
        self.git_dir.join("index")
    }

    pub fn objects_path(&self) -> PathBuf {
        self.git_dir.join("objects")
    }

    pub fn index_options(&self) -> &IndexDecodeOptions {
        &self.index_options
    }

    pub fn no_pager(&self) -> bool {
        self.no_pager
    }
}
