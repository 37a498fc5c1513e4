/*!
 * Common test utilities shared across the test suite
 */

#![allow(dead_code)]

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use lectura::app_config::Config;

/// Create a temporary directory for test artifacts
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Create a file with the given name and content inside `dir`
pub fn create_test_file(dir: &Path, name: &str, content: &str) -> Result<PathBuf> {
    let path = dir.join(name);
    fs::write(&path, content)?;
    Ok(path)
}

/// A config suitable for pipeline tests: dummy key, tiny retry backoff
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.synthesis.api_key = "test-api-key".to_string();
    config.synthesis.retry_backoff_ms = 1;
    config
}

/// A test config with a custom chunk size
pub fn test_config_with_chunk_size(chunk_size: usize) -> Config {
    let mut config = test_config();
    config.synthesis.max_chars_per_request = chunk_size;
    config
}
