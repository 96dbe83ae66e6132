//! Generate or update the `README.md` model card of an output directory.

use std::path::{Path, PathBuf};

use crate::card::{ModelCard, render_training_body};
use crate::error::CardError;
use crate::hub::RepoNameResolver;
use crate::settings::Settings;
use crate::training::TrainingConfig;

/// File name of the model card inside an output directory.
pub const README_FILE: &str = "README.md";

/// Value written to the `library_name` metadata of every card.
pub const LIBRARY_NAME: &str = "diffusers";

/// What a card is generated from.
#[derive(Debug, Clone, Copy)]
pub enum CardSource<'a> {
    /// A finished training run; renders a fresh body from its hyperparameters.
    Training {
        config: &'a TrainingConfig,
        model_name: Option<&'a str>,
    },
    /// An existing output directory; only normalizes the metadata.
    Path(&'a Path),
}

impl<'a> CardSource<'a> {
    pub fn training(config: &'a TrainingConfig, model_name: &'a str) -> Self {
        Self::Training {
            config,
            model_name: Some(model_name),
        }
    }

    pub fn path(dir: &'a Path) -> Self {
        Self::Path(dir)
    }

    fn output_dir(&self) -> &'a Path {
        match *self {
            Self::Training { config, .. } => &config.output_dir,
            Self::Path(dir) => dir,
        }
    }
}

/// Path of the model card for `output_dir`.
pub fn card_path(output_dir: &Path) -> PathBuf {
    output_dir.join(README_FILE)
}

/// Writes model cards, resolving repository names through `R`.
pub struct ModelCardGenerator<R> {
    resolver: R,
    settings: Settings,
}

impl<R: RepoNameResolver> ModelCardGenerator<R> {
    pub fn new(resolver: R) -> Self {
        Self {
            resolver,
            settings: Settings::default(),
        }
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Create or update `<output_dir>/README.md` and return the written card.
    ///
    /// An existing card is loaded and its metadata kept; `library_name` is always
    /// reset to [`LIBRARY_NAME`]. A training source also replaces the body and
    /// records dataset, model and repository names.
    pub fn generate(&self, source: CardSource<'_>) -> Result<ModelCard, CardError> {
        let training = match source {
            CardSource::Training { config, model_name } => {
                let model_name = model_name
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .ok_or_else(|| {
                        CardError::config(
                            "a model name is required to generate a card from a training configuration",
                        )
                    })?;
                config.validate()?;
                Some((config, model_name))
            }
            CardSource::Path(_) => None,
        };

        let path = card_path(source.output_dir());
        let mut card = ModelCard::load_or_default(&path)?;
        card.data.set_library_name(LIBRARY_NAME);

        if let Some((config, model_name)) = training {
            self.apply_training(&mut card, config, model_name)?;
        }

        card.save(&path)?;
        tracing::info!(path = %path.display(), "Wrote model card");
        Ok(card)
    }

    /// Generate the card for a training run, on the main process only.
    ///
    /// Returns `Ok(None)` without touching the filesystem on other ranks.
    pub fn generate_for_run(
        &self,
        config: &TrainingConfig,
        model_name: &str,
    ) -> Result<Option<ModelCard>, CardError> {
        if !config.is_main_process() {
            tracing::debug!(
                local_rank = config.local_rank,
                "Skipping model card on non-main process"
            );
            return Ok(None);
        }
        self.generate(CardSource::training(config, model_name))
            .map(Some)
    }

    fn apply_training(
        &self,
        card: &mut ModelCard,
        config: &TrainingConfig,
        model_name: &str,
    ) -> Result<(), CardError> {
        let token = config
            .hub_token
            .as_deref()
            .or(self.settings.hub_token.as_deref());
        let repo_name = self.resolver.full_repo_name(model_name, token);
        tracing::debug!(model_name, repo_name = %repo_name, "Resolved repository name");

        card.content = render_training_body(model_name, &repo_name, config)?;

        let data = &mut card.data;
        data.fill_language(&self.settings.language);
        data.fill_license(&self.settings.license);
        if let Some(dataset) = &config.dataset_name {
            data.set_datasets(vec![dataset.clone()]);
        }
        data.set_model_name(model_name);
        data.set_repo_name(repo_name);
        data.add_tags(self.settings.tags.iter().cloned());
        Ok(())
    }
}
