//! CIFAR-10 / CIFAR-100 binary format reader
//!
//! Each record is one label byte (CIFAR-10) or two label bytes (CIFAR-100,
//! coarse then fine) followed by 3072 pixel bytes in CHW order.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Image side length in pixels
pub const IMAGE_SIZE: usize = 32;

/// Colour channels per image
pub const CHANNELS: usize = 3;

/// Pixel bytes per image
pub const IMAGE_BYTES: usize = CHANNELS * IMAGE_SIZE * IMAGE_SIZE;

/// Supported datasets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Dataset {
    /// 10 classes, 50k train / 10k test
    #[default]
    #[serde(rename = "CIFAR10", alias = "cifar10")]
    Cifar10,
    /// 100 fine-grained classes, 50k train / 10k test
    #[serde(rename = "CIFAR100", alias = "cifar100")]
    Cifar100,
}

/// Dataset split
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Split {
    Train,
    Test,
}

impl Dataset {
    /// Number of output classes
    pub fn num_classes(self) -> usize {
        match self {
            Dataset::Cifar10 => 10,
            Dataset::Cifar100 => 100,
        }
    }

    /// Canonical name, as used in checkpoint file names
    pub fn name(self) -> &'static str {
        match self {
            Dataset::Cifar10 => "CIFAR10",
            Dataset::Cifar100 => "CIFAR100",
        }
    }

    /// Label bytes preceding each image record
    pub fn label_bytes(self) -> usize {
        match self {
            Dataset::Cifar10 => 1,
            Dataset::Cifar100 => 2,
        }
    }

    /// Size of one record in bytes
    pub fn record_bytes(self) -> usize {
        self.label_bytes() + IMAGE_BYTES
    }

    /// Directory the official archive unpacks into
    pub fn archive_dir(self) -> &'static str {
        match self {
            Dataset::Cifar10 => "cifar-10-batches-bin",
            Dataset::Cifar100 => "cifar-100-binary",
        }
    }

    /// Official binary archive location
    pub fn archive_url(self) -> &'static str {
        match self {
            Dataset::Cifar10 => "https://www.cs.toronto.edu/~kriz/cifar-10-binary.tar.gz",
            Dataset::Cifar100 => "https://www.cs.toronto.edu/~kriz/cifar-100-binary.tar.gz",
        }
    }

    /// Binary files making up a split
    pub fn split_files(self, split: Split) -> &'static [&'static str] {
        match (self, split) {
            (Dataset::Cifar10, Split::Train) => &[
                "data_batch_1.bin",
                "data_batch_2.bin",
                "data_batch_3.bin",
                "data_batch_4.bin",
                "data_batch_5.bin",
            ],
            (Dataset::Cifar10, Split::Test) => &["test_batch.bin"],
            (Dataset::Cifar100, Split::Train) => &["train.bin"],
            (Dataset::Cifar100, Split::Test) => &["test.bin"],
        }
    }

    /// Full paths of a split's files under `root`
    pub fn split_paths(self, root: &Path, split: Split) -> Vec<PathBuf> {
        let dir = root.join(self.archive_dir());
        self.split_files(split).iter().map(|f| dir.join(f)).collect()
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Dataset {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "").as_str() {
            "cifar10" => Ok(Dataset::Cifar10),
            "cifar100" => Ok(Dataset::Cifar100),
            _ => Err(format!(
                "Unknown dataset: {s}. Valid datasets: CIFAR10, CIFAR100"
            )),
        }
    }
}

/// Decoded images and labels held as raw bytes
#[derive(Debug, Clone, Default)]
pub struct ImageSet {
    pixels: Vec<u8>,
    labels: Vec<u8>,
}

impl ImageSet {
    /// Build an image set; `pixels` must hold `labels.len()` images
    pub fn new(pixels: Vec<u8>, labels: Vec<u8>) -> Result<Self> {
        if pixels.len() != labels.len() * IMAGE_BYTES {
            return Err(Error::InvalidState(format!(
                "{} pixel bytes do not match {} labels",
                pixels.len(),
                labels.len()
            )));
        }
        Ok(Self { pixels, labels })
    }

    /// Number of images
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Check if the set holds no images
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Raw CHW bytes of image `index`
    pub fn image(&self, index: usize) -> &[u8] {
        &self.pixels[index * IMAGE_BYTES..(index + 1) * IMAGE_BYTES]
    }

    /// Class label of image `index`
    pub fn label(&self, index: usize) -> u8 {
        self.labels[index]
    }

    /// Keep only the first `n` images
    pub fn truncate(&mut self, n: usize) {
        if n < self.len() {
            self.labels.truncate(n);
            self.pixels.truncate(n * IMAGE_BYTES);
        }
    }

    fn extend(&mut self, other: ImageSet) {
        self.pixels.extend(other.pixels);
        self.labels.extend(other.labels);
    }
}

/// Decode the records of one binary file
pub fn parse_records(bytes: &[u8], dataset: Dataset, path: &Path) -> Result<ImageSet> {
    let record = dataset.record_bytes();
    if bytes.len() % record != 0 {
        return Err(Error::DatasetFormat {
            path: path.to_path_buf(),
            message: format!(
                "{} bytes is not a multiple of the {record}-byte record size",
                bytes.len()
            ),
        });
    }

    let count = bytes.len() / record;
    let mut pixels = Vec::with_capacity(count * IMAGE_BYTES);
    let mut labels = Vec::with_capacity(count);
    let num_classes = dataset.num_classes();

    for chunk in bytes.chunks_exact(record) {
        // CIFAR-100 stores the fine label last
        let label = chunk[dataset.label_bytes() - 1];
        if usize::from(label) >= num_classes {
            return Err(Error::DatasetFormat {
                path: path.to_path_buf(),
                message: format!("label {label} out of range for {dataset}"),
            });
        }
        labels.push(label);
        pixels.extend_from_slice(&chunk[dataset.label_bytes()..]);
    }

    ImageSet::new(pixels, labels)
}

/// Load every file of a split from `root`
pub fn load_split(root: &Path, dataset: Dataset, split: Split) -> Result<ImageSet> {
    let mut set = ImageSet::default();
    for path in dataset.split_paths(root, split) {
        if !path.exists() {
            return Err(Error::DatasetNotFound { path });
        }
        let bytes =
            fs::read(&path).map_err(|e| Error::io(format!("reading {}", path.display()), e))?;
        set.extend(parse_records(&bytes, dataset, &path)?);
    }
    Ok(set)
}
