//! Checkpoint persistence
//!
//! A checkpoint is a pair of files sharing one stem:
//! - `<stem>.bin` - burn model record (full precision)
//! - `<stem>.json` - [`CheckpointMeta`]

mod load;
mod meta;
mod save;

pub use load::{checkpoint_exists, load_checkpoint, read_meta};
pub use meta::CheckpointMeta;
pub use save::save_checkpoint;

use burn::record::{BinFileRecorder, FullPrecisionSettings};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Recorder used for all model records
pub(crate) fn recorder() -> BinFileRecorder<FullPrecisionSettings> {
    BinFileRecorder::<FullPrecisionSettings>::new()
}

fn with_suffix(stem: &Path, suffix: &str) -> PathBuf {
    let mut path = OsString::from(stem.as_os_str());
    path.push(suffix);
    PathBuf::from(path)
}

/// Path of the model record for `stem`
pub fn record_path(stem: &Path) -> PathBuf {
    with_suffix(stem, ".bin")
}

/// Path of the metadata file for `stem`
pub fn meta_path(stem: &Path) -> PathBuf {
    with_suffix(stem, ".json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_keep_dots_in_stem() {
        let stem = Path::new("/ckpt/run.v2/bestCIFAR10");
        assert_eq!(record_path(stem), PathBuf::from("/ckpt/run.v2/bestCIFAR10.bin"));
        assert_eq!(meta_path(stem), PathBuf::from("/ckpt/run.v2/bestCIFAR10.json"));

        let dotted = Path::new("out/ckpt.3");
        assert_eq!(meta_path(dotted), PathBuf::from("out/ckpt.3.json"));
    }
}
