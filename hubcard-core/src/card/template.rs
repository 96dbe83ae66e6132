//! Markdown body for cards generated from a training run.

use handlebars::Handlebars;
use serde_json::json;

use crate::error::CardError;
use crate::training::TrainingConfig;

const TRAINING_CARD: &str = "training_card";

const TRAINING_CARD_TEMPLATE: &str = r#"<!-- This model card was generated automatically from the configuration of the training run.
Proofread and complete it, then remove this comment. -->

# {{model_name}}

## Model description

This diffusion model was trained with the Diffusers library{{#if dataset_name}}
on the `{{dataset_name}}` dataset{{/if}}.

## Intended uses & limitations

#### How to use

```python
from diffusers import DiffusionPipeline

pipeline = DiffusionPipeline.from_pretrained("{{repo_name}}")
image = pipeline().images[0]
```

#### Limitations and bias

_Describe known failure modes and potential remediations._

## Training data

_Describe the data used to train the model._

### Training hyperparameters

The following hyperparameters were used during training:
- learning_rate: {{learning_rate}}
- train_batch_size: {{train_batch_size}}
- eval_batch_size: {{eval_batch_size}}
- gradient_accumulation_steps: {{gradient_accumulation_steps}}
- optimizer: AdamW with betas=({{adam_beta1}}, {{adam_beta2}}), weight_decay={{adam_weight_decay}} and epsilon={{adam_epsilon}}
- lr_scheduler: {{lr_scheduler}}
- lr_warmup_steps: {{lr_warmup_steps}}
- ema_inv_gamma: {{ema_inv_gamma}}
- ema_power: {{ema_power}}
- ema_max_decay: {{ema_max_decay}}
- mixed_precision: {{mixed_precision}}

### Training results

[TensorBoard logs](https://huggingface.co/{{repo_name}}/tensorboard?#scalars)
"#;

/// Render the card body for a training run.
pub fn render_training_body(
    model_name: &str,
    repo_name: &str,
    config: &TrainingConfig,
) -> Result<String, CardError> {
    let mut handlebars = Handlebars::new();
    handlebars.set_strict_mode(false);
    handlebars.register_escape_fn(handlebars::no_escape);
    handlebars
        .register_template_string(TRAINING_CARD, TRAINING_CARD_TEMPLATE)
        .map_err(|e| CardError::template(format!("Failed to register card template: {e}")))?;

    let variables = json!({
        "model_name": model_name,
        "repo_name": repo_name,
        "dataset_name": config.dataset_name,
        "learning_rate": config.learning_rate,
        "train_batch_size": config.train_batch_size,
        "eval_batch_size": config.eval_batch_size,
        "gradient_accumulation_steps": config.gradient_accumulation_steps,
        "adam_beta1": config.adam_beta1,
        "adam_beta2": config.adam_beta2,
        "adam_weight_decay": config.adam_weight_decay,
        "adam_epsilon": config.adam_epsilon,
        "lr_scheduler": config.lr_scheduler,
        "lr_warmup_steps": config.lr_warmup_steps,
        "ema_inv_gamma": config.ema_inv_gamma,
        "ema_power": config.ema_power,
        "ema_max_decay": config.ema_max_decay,
        "mixed_precision": config.mixed_precision.as_deref().unwrap_or("no"),
    });

    handlebars
        .render(TRAINING_CARD, &variables)
        .map_err(|e| CardError::template(format!("Failed to render card template: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> TrainingConfig {
        TrainingConfig {
            dataset_name: Some("dataset_name".into()),
            learning_rate: 0.01,
            train_batch_size: 100_000,
            eval_batch_size: 10_000,
            lr_scheduler: "constant".into(),
            lr_warmup_steps: 10,
            mixed_precision: Some("fp16".into()),
            ..TrainingConfig::new("out")
        }
    }

    #[test]
    fn test_body_mentions_run_details() {
        let body = render_training_body("model_name", "user/model_name", &config()).unwrap();
        assert!(body.contains("# model_name"));
        assert!(body.contains("on the `dataset_name` dataset"));
        assert!(body.contains("- learning_rate: 0.01"));
        assert!(body.contains("- train_batch_size: 100000"));
        assert!(body.contains("- eval_batch_size: 10000"));
        assert!(body.contains("- lr_scheduler: constant"));
        assert!(body.contains("- lr_warmup_steps: 10"));
        assert!(body.contains("- mixed_precision: fp16"));
        assert!(body.contains("https://huggingface.co/user/model_name/tensorboard"));
    }

    #[test]
    fn test_body_without_dataset() {
        let config = TrainingConfig::new("out");
        let body = render_training_body("m", "m", &config).unwrap();
        assert!(body.contains("with the Diffusers library."));
        assert!(!body.contains("dataset."));
        assert!(body.contains("- mixed_precision: no"));
    }

    #[test]
    fn test_names_are_not_html_escaped() {
        let body = render_training_body("a&b <model>", "org/a&b", &config()).unwrap();
        assert!(body.contains("# a&b <model>"));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let first = render_training_body("m", "org/m", &config()).unwrap();
        let second = render_training_body("m", "org/m", &config()).unwrap();
        assert_eq!(first, second);
    }
}
