use super::types::Store;
use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// Get the default store file path (<data dir>/sci-index/evaluations.json)
pub fn get_store_path() -> PathBuf {
    let data_dir = dirs::data_dir().expect("Could not determine data directory");
    data_dir.join("sci-index").join("evaluations.json")
}

/// Load the store from a JSON file
///
/// If the file doesn't exist, returns a new empty store.
/// If the file exists but has an unsupported version, returns an error.
pub fn load_store(path: &Path) -> Result<Store> {
    if !path.exists() {
        return Ok(Store::new());
    }

    let file = File::open(path)
        .with_context(|| format!("Failed to open store file at {}", path.display()))?;

    let store: Store = serde_json::from_reader(file).context("Failed to load evaluation store")?;

    // Version check
    if store.version != 1 {
        anyhow::bail!("Unsupported store version: {}", store.version);
    }

    Ok(store)
}

/// Save the store to a JSON file atomically
///
/// Uses atomic-write-file to ensure the file is never left in a corrupted
/// state. Creates the parent directory if it doesn't exist.
pub fn save_store(path: &Path, store: &Store) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create data directory at {}", parent.display())
            })?;
        }
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, store).context("Failed to serialize store")?;

    file.commit().context("Failed to save evaluation store")?;

    Ok(())
}
