//! # hubcard-core — model cards for diffusion training runs
//!
//! Writes the `README.md` model card that accompanies a trained pipeline in its
//! output directory. A card is YAML front matter (license, library name, tags,
//! datasets, ...) followed by a markdown body rendered from the run's
//! hyperparameters.
//!
//! Existing cards are updated rather than replaced: unknown metadata keys are
//! kept, and a file whose front matter cannot be read is treated as plain body
//! text. Every generated card carries `library_name: diffusers`.

pub mod card;
pub mod error;
pub mod generator;
pub mod hub;
pub mod settings;
pub mod training;

// Re-exports
pub use card::{ModelCard, ModelCardData};
pub use error::CardError;
pub use generator::{CardSource, LIBRARY_NAME, ModelCardGenerator, README_FILE, card_path};
pub use hub::{NamespaceResolver, RepoNameResolver};
pub use settings::{Settings, SettingsOverrides, load_settings};
pub use training::TrainingConfig;
