//! Stochastic Gradient Descent optimizer

use crate::config::OptimSpec;
use burn::module::AutodiffModule;
use burn::optim::decay::WeightDecayConfig;
use burn::optim::momentum::MomentumConfig;
use burn::optim::{Optimizer, SgdConfig};
use burn::tensor::backend::AutodiffBackend;

/// SGD with heavy-ball momentum and L2 weight decay folded into the gradient
///
/// `g ← g + wd·θ`, `v ← μ·v + g`, `θ ← θ − lr·v`. No dampening, no Nesterov.
pub fn sgd_config(spec: &OptimSpec) -> SgdConfig {
    let momentum = (spec.momentum > 0.0).then(|| {
        MomentumConfig::new()
            .with_momentum(spec.momentum)
            .with_dampening(0.0)
            .with_nesterov(false)
    });
    let weight_decay = (spec.weight_decay > 0.0).then(|| WeightDecayConfig::new(spec.weight_decay));
    SgdConfig::new()
        .with_momentum(momentum)
        .with_weight_decay(weight_decay)
}

/// Initialize the optimizer for a model of type `M`
pub fn build_sgd<B, M>(spec: &OptimSpec) -> impl Optimizer<M, B>
where
    B: AutodiffBackend,
    M: AutodiffModule<B>,
{
    sgd_config(spec).init::<B, M>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::{Autodiff, NdArray};
    use burn::nn::{Linear, LinearConfig};
    use burn::optim::GradientsParams;
    use burn::tensor::Tensor;

    type AB = Autodiff<NdArray<f32>>;

    fn weights(model: &Linear<AB>) -> Vec<f32> {
        model.weight.val().into_data().to_vec().unwrap()
    }

    /// One step on `sum(w·1)`, whose gradient w.r.t. every weight is 1
    fn step_once<O: Optimizer<Linear<AB>, AB>>(optim: &mut O, model: Linear<AB>) -> Linear<AB> {
        let x = Tensor::<AB, 2>::ones([1, 2], &Default::default());
        let loss = model.forward(x).sum();
        let grads = GradientsParams::from_grads(loss.backward(), &model);
        optim.step(0.1, model, grads)
    }

    fn linear() -> Linear<AB> {
        LinearConfig::new(2, 1)
            .with_bias(false)
            .init(&Default::default())
    }

    #[test]
    fn test_plain_step_moves_against_gradient() {
        let spec = OptimSpec {
            momentum: 0.0,
            weight_decay: 0.0,
            ..Default::default()
        };
        let model = linear();
        let before = weights(&model);
        let mut optim = build_sgd::<AB, Linear<AB>>(&spec);
        let after = weights(&step_once(&mut optim, model));
        for (b, a) in before.iter().zip(&after) {
            assert!((b - 0.1 - a).abs() < 1e-6);
        }
    }

    #[test]
    fn test_momentum_accumulates_without_dampening() {
        let spec = OptimSpec {
            momentum: 0.9,
            weight_decay: 0.0,
            ..Default::default()
        };
        let model = linear();
        let before = weights(&model);
        let mut optim = build_sgd::<AB, Linear<AB>>(&spec);
        let model = step_once(&mut optim, model);
        let after = weights(&step_once(&mut optim, model));
        // v1 = 1, v2 = 0.9 + 1; θ moves by 0.1 * (1 + 1.9)
        for (b, a) in before.iter().zip(&after) {
            assert!((b - 0.29 - a).abs() < 1e-5);
        }
    }

    #[test]
    fn test_weight_decay_is_added_to_gradient() {
        let spec = OptimSpec {
            momentum: 0.0,
            weight_decay: 0.5,
            ..Default::default()
        };
        let model = linear();
        let before = weights(&model);
        let mut optim = build_sgd::<AB, Linear<AB>>(&spec);
        let after = weights(&step_once(&mut optim, model));
        for (b, a) in before.iter().zip(&after) {
            let expected = b - 0.1 * (1.0 + 0.5 * b);
            assert!((expected - a).abs() < 1e-5);
        }
    }
}
