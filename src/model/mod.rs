//! Classifier architectures
//!
//! Models take an explicit [`Mode`] so that evaluation-mode forward passes
//! still work on the autodiff backend, where attacks need input gradients.

mod preact_resnet;

pub use preact_resnet::{batch_norm, PreActBlock, PreActResNet, PreActResNetConfig};

use burn::tensor::backend::Backend;
use burn::tensor::Tensor;

/// Forward-pass mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Batch statistics, running statistics updated
    #[default]
    Train,
    /// Running statistics, nothing updated
    Eval,
}

/// Anything producing class logits from a batch of images
pub trait Classifier<B: Backend> {
    /// Logits `[N, num_classes]` for images `[N, C, H, W]`
    fn logits(&self, images: Tensor<B, 4>, mode: Mode) -> Tensor<B, 2>;
}
