//! Accuracy under attack

use super::report::AttackReport;
use crate::attack::{Attack, AttackSpec};
use crate::data::BatchLoader;
use crate::model::{Classifier, Mode};
use crate::train::count_correct;
use burn::tensor::backend::AutodiffBackend;

/// Accuracy of `model` on `loader`'s batches after `attack` perturbs them
///
/// The model is queried in evaluation mode both inside the attack and for
/// the final prediction. The test loader is sequential, so `seed` only
/// affects loaders that shuffle or augment.
pub fn evaluate<B, M, A>(
    model: &M,
    loader: &BatchLoader,
    attack: &A,
    seed: u64,
    device: &B::Device,
) -> AttackReport
where
    B: AutodiffBackend,
    M: Classifier<B>,
    A: Attack<B>,
{
    let mut correct = 0;
    let mut total = 0;
    for batch in loader.epoch::<B>(seed, 0, device) {
        let n = batch.len();
        let adv = attack.perturb(model, batch.images, batch.labels.clone());
        let logits = model.logits(adv, Mode::Eval).detach();
        correct += count_correct(logits, batch.labels);
        total += n;
    }
    AttackReport::new(attack.name(), correct, total)
}

/// Run every attack in order, calling `on_report` as each finishes
pub fn evaluate_suite<B, M, F>(
    model: &M,
    loader: &BatchLoader,
    attacks: &[AttackSpec],
    seed: u64,
    device: &B::Device,
    mut on_report: F,
) -> Vec<AttackReport>
where
    B: AutodiffBackend,
    M: Classifier<B>,
    F: FnMut(&AttackReport),
{
    attacks
        .iter()
        .map(|attack| {
            let report = evaluate(model, loader, attack, seed, device);
            on_report(&report);
            report
        })
        .collect()
}

/// `attacks` with clean accuracy first, unless already requested
pub fn with_clean(attacks: &[AttackSpec]) -> Vec<AttackSpec> {
    if attacks.contains(&AttackSpec::Clean) {
        return attacks.to_vec();
    }
    std::iter::once(AttackSpec::Clean)
        .chain(attacks.iter().copied())
        .collect()
}
