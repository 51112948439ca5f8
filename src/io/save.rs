//! Checkpoint saving

use super::meta::CheckpointMeta;
use super::{meta_path, record_path, recorder};
use crate::error::{Error, Result};
use burn::module::Module;
use burn::tensor::backend::Backend;
use std::fs;
use std::path::Path;

/// Save model weights and metadata under `stem`, creating parent directories
///
/// An existing checkpoint with the same stem is overwritten.
pub fn save_checkpoint<B, M>(model: &M, meta: &CheckpointMeta, stem: &Path) -> Result<()>
where
    B: Backend,
    M: Module<B>,
{
    if let Some(dir) = stem.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .map_err(|e| Error::io(format!("creating checkpoint directory {}", dir.display()), e))?;
    }

    let record = record_path(stem);
    model
        .clone()
        .save_file(record.clone(), &recorder())
        .map_err(|e| Error::Checkpoint {
            path: record,
            message: e.to_string(),
        })?;

    let json = serde_json::to_string_pretty(meta)?;
    let path = meta_path(stem);
    fs::write(&path, json).map_err(|e| Error::io(format!("writing {}", path.display()), e))?;
    Ok(())
}
