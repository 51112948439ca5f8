//! Checkpoint loading

use super::meta::CheckpointMeta;
use super::{meta_path, record_path, recorder};
use crate::error::{Error, Result};
use burn::module::Module;
use burn::tensor::backend::Backend;
use std::fs;
use std::path::Path;

/// Whether both files of the checkpoint at `stem` exist
pub fn checkpoint_exists(stem: &Path) -> bool {
    record_path(stem).is_file() && meta_path(stem).is_file()
}

/// Read only the metadata of the checkpoint at `stem`
pub fn read_meta(stem: &Path) -> Result<CheckpointMeta> {
    let path = meta_path(stem);
    let json = fs::read_to_string(&path)
        .map_err(|e| Error::io(format!("reading checkpoint metadata {}", path.display()), e))?;
    Ok(serde_json::from_str(&json)?)
}

/// Load weights from `stem` into `model`, returning it with the metadata
///
/// `model` must have the architecture the checkpoint was saved from.
pub fn load_checkpoint<B, M>(model: M, stem: &Path, device: &B::Device) -> Result<(M, CheckpointMeta)>
where
    B: Backend,
    M: Module<B>,
{
    let record = record_path(stem);
    if !record.is_file() {
        return Err(Error::Checkpoint {
            path: record,
            message: "no model record found".to_string(),
        });
    }
    let meta = read_meta(stem)?;
    let model = model
        .load_file(record.clone(), &recorder(), device)
        .map_err(|e| Error::Checkpoint {
            path: record,
            message: e.to_string(),
        })?;
    Ok((model, meta))
}
