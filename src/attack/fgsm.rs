//! Fast gradient sign method

use super::{input_gradient, Attack, DEFAULT_EPSILON, PIXEL_RANGE};
use crate::model::{Classifier, Mode};
use crate::train::Reduction;
use burn::tensor::backend::AutodiffBackend;
use burn::tensor::{Int, Tensor};

/// Single step `x + eps * sign(∇x L)`, clipped to the pixel range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fgsm {
    pub eps: f32,
    pub clip_min: f32,
    pub clip_max: f32,
}

impl Fgsm {
    pub fn new(eps: f32) -> Self {
        Self {
            eps,
            clip_min: PIXEL_RANGE.0,
            clip_max: PIXEL_RANGE.1,
        }
    }
}

impl Default for Fgsm {
    fn default() -> Self {
        Self::new(DEFAULT_EPSILON)
    }
}

impl<B: AutodiffBackend> Attack<B> for Fgsm {
    fn perturb<M: Classifier<B>>(
        &self,
        model: &M,
        images: Tensor<B, 4>,
        labels: Tensor<B, 1, Int>,
    ) -> Tensor<B, 4> {
        let x = images.detach();
        let grad = input_gradient(model, x.clone(), labels, Mode::Eval, Reduction::Sum);
        (x + grad.sign().mul_scalar(self.eps))
            .clamp(self.clip_min, self.clip_max)
            .detach()
    }

    fn name(&self) -> String {
        "FGSM".to_string()
    }
}
