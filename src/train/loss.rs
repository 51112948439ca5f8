//! Classification losses over burn tensors

use burn::tensor::activation::log_softmax;
use burn::tensor::backend::Backend;
use burn::tensor::{ElementConversion, Int, Tensor};

/// How per-sample losses are combined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Reduction {
    /// Average over the batch
    #[default]
    Mean,
    /// Sum over the batch
    Sum,
}

/// Trait for loss functions
pub trait LossFn<B: Backend> {
    /// Scalar loss `[1]` for logits `[N, K]` and class indices `[N]`
    fn forward(&self, logits: Tensor<B, 2>, targets: Tensor<B, 1, Int>) -> Tensor<B, 1>;

    /// Name of the loss function
    fn name(&self) -> &str;
}

/// Softmax cross-entropy against integer class targets
///
/// L = -log(softmax(logits)[target])
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CrossEntropyLoss {
    pub reduction: Reduction,
}

impl CrossEntropyLoss {
    pub fn new(reduction: Reduction) -> Self {
        Self { reduction }
    }
}

impl<B: Backend> LossFn<B> for CrossEntropyLoss {
    fn forward(&self, logits: Tensor<B, 2>, targets: Tensor<B, 1, Int>) -> Tensor<B, 1> {
        let [n, _] = logits.dims();
        let picked = log_softmax(logits, 1)
            .gather(1, targets.reshape([n, 1]))
            .neg();
        match self.reduction {
            Reduction::Mean => picked.mean(),
            Reduction::Sum => picked.sum(),
        }
    }

    fn name(&self) -> &str {
        "CrossEntropy"
    }
}

/// Number of rows whose argmax equals the target class
pub fn count_correct<B: Backend>(logits: Tensor<B, 2>, targets: Tensor<B, 1, Int>) -> usize {
    let [n, _] = logits.dims();
    let hits = logits
        .argmax(1)
        .reshape([n])
        .equal(targets)
        .int()
        .sum()
        .into_scalar()
        .elem::<i64>();
    hits.max(0) as usize
}
