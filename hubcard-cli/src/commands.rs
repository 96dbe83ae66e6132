//! Subcommand handlers.

use anyhow::Context;
use hubcard_core::{
    CardSource, ModelCard, ModelCardGenerator, NamespaceResolver, Settings, TrainingConfig,
    card_path,
};
use std::path::Path;

use crate::Commands;

pub(crate) fn run(command: Commands, settings: Settings) -> anyhow::Result<()> {
    let resolver = NamespaceResolver::new(settings.namespace.clone());
    let generator = ModelCardGenerator::new(resolver).with_settings(settings);

    match command {
        Commands::Generate {
            config,
            model_name,
            output_dir,
        } => {
            let mut training = TrainingConfig::from_toml_file(&config).with_context(|| {
                format!("Failed to load training config {}", config.display())
            })?;
            if let Some(dir) = output_dir {
                training.output_dir = dir;
            }
            match generator.generate_for_run(&training, &model_name)? {
                Some(card) => {
                    println!("Wrote {}", card_path(&training.output_dir).display());
                    if let Some(repo) = &card.data.repo_name {
                        println!("Repository: {repo}");
                    }
                }
                None => println!(
                    "Skipped: local_rank {} is not the main process",
                    training.local_rank
                ),
            }
        }
        Commands::Normalize { dir } => {
            generator
                .generate(CardSource::path(&dir))
                .with_context(|| format!("Failed to normalize card in {}", dir.display()))?;
            println!("Normalized {}", card_path(&dir).display());
        }
        Commands::Show { dir } => {
            print!("{}", show(&dir)?);
        }
    }
    Ok(())
}

/// Render the metadata of the card in `dir` as YAML.
fn show(dir: &Path) -> anyhow::Result<String> {
    let path = card_path(dir);
    let card = ModelCard::load(&path)?;
    if card.data.is_empty() {
        return Ok(format!("{} has no metadata\n", path.display()));
    }
    let yaml = serde_yaml::to_string(&serde_yaml::Value::Mapping(card.data.to_mapping()))?;
    Ok(yaml)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_generate_command_writes_card() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("ddpm-out");
        let config = dir.path().join("train.toml");
        std::fs::write(
            &config,
            format!("output_dir = {:?}\ndataset_name = \"butterflies\"\n", out.display().to_string()),
        )
        .unwrap();

        let settings = Settings {
            namespace: Some("fusing".into()),
            ..Settings::default()
        };
        run(
            Commands::Generate {
                config,
                model_name: "ddpm-butterflies".into(),
                output_dir: None,
            },
            settings,
        )
        .unwrap();

        let card = ModelCard::load(&card_path(&out)).unwrap();
        assert_eq!(card.data.repo_name.as_deref(), Some("fusing/ddpm-butterflies"));
        assert_eq!(card.data.datasets, vec!["butterflies"]);
    }

    #[test]
    fn test_generate_command_output_override() {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("train.toml");
        std::fs::write(&config, "output_dir = \"ignored\"\n").unwrap();
        let out = dir.path().join("override");

        run(
            Commands::Generate {
                config,
                model_name: "m".into(),
                output_dir: Some(out.clone()),
            },
            Settings::default(),
        )
        .unwrap();
        assert!(card_path(&out).is_file());
    }

    #[test]
    fn test_normalize_then_show() {
        let dir = TempDir::new().unwrap();
        std::fs::write(card_path(dir.path()), "hello").unwrap();

        run(
            Commands::Normalize {
                dir: dir.path().to_path_buf(),
            },
            Settings::default(),
        )
        .unwrap();
        assert_eq!(show(dir.path()).unwrap(), "library_name: diffusers\n");
    }

    #[test]
    fn test_show_plain_readme() {
        let dir = TempDir::new().unwrap();
        std::fs::write(card_path(dir.path()), "hello").unwrap();
        assert!(show(dir.path()).unwrap().contains("has no metadata"));
    }

    #[test]
    fn test_show_missing_card_fails() {
        let dir = TempDir::new().unwrap();
        assert!(show(dir.path()).is_err());
    }
}
