//! Fetch and unpack the official CIFAR binary archives

use super::cifar::{Dataset, Split};
use crate::error::{Error, Result};
use flate2::read::GzDecoder;
use std::fs;
use std::path::Path;

/// Make sure both splits of `dataset` exist under `root`.
///
/// Missing files are downloaded when `download` is set; otherwise the first
/// missing path is reported.
pub fn ensure_available(root: &Path, dataset: Dataset, download: bool) -> Result<()> {
    let missing = [Split::Train, Split::Test]
        .into_iter()
        .flat_map(|split| dataset.split_paths(root, split))
        .find(|path| !path.exists());

    let Some(path) = missing else {
        return Ok(());
    };
    if !download {
        return Err(Error::DatasetNotFound { path });
    }

    fetch_archive(root, dataset)?;

    match [Split::Train, Split::Test]
        .into_iter()
        .flat_map(|split| dataset.split_paths(root, split))
        .find(|path| !path.exists())
    {
        Some(path) => Err(Error::DatasetNotFound { path }),
        None => Ok(()),
    }
}

fn fetch_archive(root: &Path, dataset: Dataset) -> Result<()> {
    let url = dataset.archive_url();
    let download_err = |message: String| Error::Download {
        url: url.to_string(),
        message,
    };

    fs::create_dir_all(root)
        .map_err(|e| Error::io(format!("creating data root {}", root.display()), e))?;

    let client = reqwest::blocking::Client::builder()
        .user_agent("endurecer/0.1")
        .build()
        .map_err(|e| download_err(format!("Failed to create HTTP client: {e}")))?;

    let response = client
        .get(url)
        .send()
        .map_err(|e| download_err(format!("request failed: {e}")))?;
    if !response.status().is_success() {
        return Err(download_err(format!("server returned {}", response.status())));
    }

    let body = response
        .bytes()
        .map_err(|e| download_err(format!("reading body: {e}")))?;
    unpack(&body, root)
}

/// Unpack a gzipped tarball into `root`
pub fn unpack(archive: &[u8], root: &Path) -> Result<()> {
    tar::Archive::new(GzDecoder::new(archive))
        .unpack(root)
        .map_err(|e| Error::io(format!("unpacking archive into {}", root.display()), e))
}
