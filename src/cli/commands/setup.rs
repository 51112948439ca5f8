//! Pieces shared by the train and eval commands

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::AdvTrainSpec;
use crate::data::{ensure_available, load_split, BatchLoader, Dataset, ImageSet, Split};
use crate::error::Result;
use crate::model::{PreActResNet, PreActResNetConfig};
use burn::backend::{Autodiff, NdArray};
use burn::tensor::backend::Backend;

/// Backend the CLI trains and attacks on
pub type TrainBackend = Autodiff<NdArray<f32>>;

pub(super) type Device = <TrainBackend as Backend>::Device;

fn load(spec: &AdvTrainSpec, dataset: Dataset, split: Split, limit: Option<usize>) -> Result<ImageSet> {
    let mut set = load_split(&spec.data.root, dataset, split)?;
    if let Some(n) = limit {
        set.truncate(n);
    }
    Ok(set)
}

/// Make sure `dataset` is on disk, downloading it if the config allows
pub(super) fn prepare_data(spec: &AdvTrainSpec, dataset: Dataset, level: LogLevel) -> Result<()> {
    log(
        level,
        LogLevel::Verbose,
        &format!("  Data: {dataset} under {}", spec.data.root.display()),
    );
    ensure_available(&spec.data.root, dataset, spec.data.download)
}

/// Shuffled, optionally augmented training batches
pub(super) fn train_loader(spec: &AdvTrainSpec) -> Result<BatchLoader> {
    let set = load(spec, spec.data.dataset, Split::Train, spec.data.train_limit)?;
    Ok(BatchLoader::train(set, spec.data.batch_size, spec.data.augment))
}

/// Sequential test batches of `dataset`
pub(super) fn test_loader(spec: &AdvTrainSpec, dataset: Dataset) -> Result<BatchLoader> {
    let set = load(spec, dataset, Split::Test, spec.data.test_limit)?;
    Ok(BatchLoader::test(set, spec.data.eval_batch_size()))
}

/// Freshly initialized PreAct-ResNet18
pub(super) fn build_model(
    num_classes: usize,
    base_width: usize,
    device: &Device,
) -> PreActResNet<TrainBackend> {
    PreActResNetConfig::resnet18(num_classes)
        .with_base_width(base_width)
        .init(device)
}
