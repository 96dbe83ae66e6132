//! Training run configuration consumed by model card generation.

use figment::{
    providers::{Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::CardError;

/// The hyperparameters and locations of a single training run.
///
/// Only `output_dir` is required; everything else falls back to the
/// defaults of the unconditional diffusion training script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Directory the trained pipeline and its `README.md` are written to.
    pub output_dir: PathBuf,
    /// Distributed rank of this process (-1 when not distributed).
    pub local_rank: i64,
    /// Token forwarded to the repository-name resolver.
    pub hub_token: Option<String>,
    pub dataset_name: Option<String>,
    pub learning_rate: f64,
    pub train_batch_size: u64,
    pub eval_batch_size: u64,
    pub gradient_accumulation_steps: f64,
    pub adam_beta1: f64,
    pub adam_beta2: f64,
    pub adam_weight_decay: f64,
    pub adam_epsilon: f64,
    pub lr_scheduler: String,
    pub lr_warmup_steps: u64,
    pub ema_inv_gamma: f64,
    pub ema_power: f64,
    pub ema_max_decay: f64,
    /// Mixed precision mode (`fp16`, `bf16`), `None` for full precision.
    pub mixed_precision: Option<String>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::new(),
            local_rank: -1,
            hub_token: None,
            dataset_name: None,
            learning_rate: 1e-4,
            train_batch_size: 16,
            eval_batch_size: 16,
            gradient_accumulation_steps: 1.0,
            adam_beta1: 0.95,
            adam_beta2: 0.999,
            adam_weight_decay: 1e-6,
            adam_epsilon: 1e-8,
            lr_scheduler: "cosine".to_string(),
            lr_warmup_steps: 500,
            ema_inv_gamma: 1.0,
            ema_power: 0.75,
            ema_max_decay: 0.9999,
            mixed_precision: None,
        }
    }
}

impl TrainingConfig {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            ..Self::default()
        }
    }

    /// Load a training configuration from a TOML file, layered over defaults.
    pub fn from_toml_file(path: &Path) -> Result<Self, CardError> {
        if !path.is_file() {
            return Err(CardError::io(
                path,
                std::io::Error::new(std::io::ErrorKind::NotFound, "training config not found"),
            ));
        }
        let config: Self = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(path))
            .extract()
            .map_err(Box::new)?;
        config.validate()?;
        Ok(config)
    }

    /// Only the main process of a distributed run writes the card.
    pub fn is_main_process(&self) -> bool {
        matches!(self.local_rank, -1 | 0)
    }

    pub fn validate(&self) -> Result<(), CardError> {
        if self.output_dir.as_os_str().is_empty() {
            return Err(CardError::config("output_dir must not be empty"));
        }
        Ok(())
    }
}
