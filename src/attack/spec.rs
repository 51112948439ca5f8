//! Serializable attack descriptions

use super::{Attack, Fgsm, LinfPgd, DEFAULT_EPSILON, DEFAULT_STEP_SIZE};
use crate::model::Classifier;
use burn::tensor::backend::AutodiffBackend;
use burn::tensor::{Int, Tensor};
use serde::{Deserialize, Serialize};
use std::fmt;

fn default_true() -> bool {
    true
}

/// Attack configuration as it appears in YAML
///
/// ```yaml
/// - kind: pgd
///   eps: 0.0313725
///   eps_iter: 0.0078431
///   nb_iter: 20
/// - kind: fgsm
///   eps: 0.0313725
/// - kind: clean
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AttackSpec {
    /// No perturbation; measures clean accuracy
    Clean,
    /// L∞ PGD
    Pgd {
        eps: f32,
        eps_iter: f32,
        nb_iter: usize,
        #[serde(default = "default_true")]
        rand_init: bool,
    },
    /// Single-step FGSM
    Fgsm { eps: f32 },
}

impl AttackSpec {
    pub fn pgd(nb_iter: usize) -> Self {
        AttackSpec::Pgd {
            eps: DEFAULT_EPSILON,
            eps_iter: DEFAULT_STEP_SIZE,
            nb_iter,
            rand_init: true,
        }
    }

    pub fn pgd20() -> Self {
        Self::pgd(20)
    }

    pub fn pgd50() -> Self {
        Self::pgd(50)
    }

    pub fn fgsm() -> Self {
        AttackSpec::Fgsm {
            eps: DEFAULT_EPSILON,
        }
    }

    /// The three attacks reported after training
    pub fn final_suite() -> Vec<Self> {
        vec![Self::pgd20(), Self::pgd50(), Self::fgsm()]
    }

    /// Display name, e.g. "PGD-20"
    pub fn label(&self) -> String {
        match self {
            AttackSpec::Clean => "Clean".to_string(),
            AttackSpec::Pgd { nb_iter, .. } => format!("PGD-{nb_iter}"),
            AttackSpec::Fgsm { .. } => "FGSM".to_string(),
        }
    }

    /// L∞ budget of the attack (0 for clean)
    pub fn epsilon(&self) -> f32 {
        match self {
            AttackSpec::Clean => 0.0,
            AttackSpec::Pgd { eps, .. } | AttackSpec::Fgsm { eps } => *eps,
        }
    }
}

impl fmt::Display for AttackSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl std::str::FromStr for AttackSpec {
    type Err = String;

    /// Accepts `clean`, `fgsm`, and `pgd<N>` / `pgd-<N>` presets
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        match lower.as_str() {
            "clean" => return Ok(AttackSpec::Clean),
            "fgsm" => return Ok(AttackSpec::fgsm()),
            _ => {}
        }
        lower
            .strip_prefix("pgd")
            .map(|rest| rest.trim_start_matches('-'))
            .and_then(|n| n.parse::<usize>().ok())
            .filter(|&n| n > 0)
            .map(AttackSpec::pgd)
            .ok_or_else(|| {
                format!("Unknown attack: {s}. Valid attacks: clean, fgsm, pgd20, pgd50, pgd<N>")
            })
    }
}

impl<B: AutodiffBackend> Attack<B> for AttackSpec {
    fn perturb<M: Classifier<B>>(
        &self,
        model: &M,
        images: Tensor<B, 4>,
        labels: Tensor<B, 1, Int>,
    ) -> Tensor<B, 4> {
        match self {
            AttackSpec::Clean => images.detach(),
            AttackSpec::Fgsm { eps } => Fgsm::new(*eps).perturb(model, images, labels),
            AttackSpec::Pgd {
                eps,
                eps_iter,
                nb_iter,
                rand_init,
            } => LinfPgd::new(*eps, *eps_iter, *nb_iter)
                .with_rand_init(*rand_init)
                .perturb(model, images, labels),
        }
    }

    fn name(&self) -> String {
        self.label()
    }
}
