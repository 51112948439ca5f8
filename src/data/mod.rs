//! CIFAR data pipeline
//!
//! - `cifar` - binary format reader and dataset descriptors
//! - `download` - fetch and unpack the official archives
//! - `augment` - random crop / flip for training batches
//! - `loader` - seeded minibatch iteration producing burn tensors

mod augment;
pub mod cifar;
mod download;
mod loader;

pub use augment::{to_unit_range, Augmenter};
pub use cifar::{load_split, parse_records, Dataset, ImageSet, Split, IMAGE_BYTES, IMAGE_SIZE};
pub use download::{ensure_available, unpack};
pub use loader::{BatchLoader, EpochIter, ImageBatch};
