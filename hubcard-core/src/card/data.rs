//! Typed model card metadata with passthrough for unknown keys.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_yaml::{Mapping, Value};

/// Metadata block of a model card.
///
/// Known keys are typed. Every other key found in an existing card is kept in
/// `extra` and written back unchanged, after the known keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelCardData {
    pub language: Option<String>,
    pub license: Option<String>,
    pub library_name: Option<String>,
    pub tags: Vec<String>,
    pub datasets: Vec<String>,
    pub metrics: Vec<String>,
    pub base_model: Option<String>,
    pub model_name: Option<String>,
    pub repo_name: Option<String>,
    pub extra: Mapping,
}

/// HF metadata allows `tags: foo` as well as `tags: [foo, bar]`.
#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl ModelCardData {
    /// Build typed metadata from a parsed YAML mapping.
    ///
    /// A known key whose value has an unexpected shape stays in `extra`
    /// instead of failing the whole block.
    pub fn from_mapping(mut map: Mapping) -> Self {
        let language = take_scalar(&mut map, "language");
        let license = take_scalar(&mut map, "license");
        let library_name = take_scalar(&mut map, "library_name");
        let tags = take_list(&mut map, "tags");
        let datasets = take_list(&mut map, "datasets");
        let metrics = take_list(&mut map, "metrics");
        let base_model = take_scalar(&mut map, "base_model");
        let model_name = take_scalar(&mut map, "model_name");
        let repo_name = take_scalar(&mut map, "repo_name");
        Self {
            language,
            license,
            library_name,
            tags,
            datasets,
            metrics,
            base_model,
            model_name,
            repo_name,
            extra: map,
        }
    }

    /// Flatten back into a mapping in a stable key order.
    pub fn to_mapping(&self) -> Mapping {
        let mut map = Mapping::new();
        put_scalar(&mut map, "language", &self.language);
        put_scalar(&mut map, "license", &self.license);
        put_scalar(&mut map, "library_name", &self.library_name);
        put_list(&mut map, "tags", &self.tags);
        put_list(&mut map, "datasets", &self.datasets);
        put_list(&mut map, "metrics", &self.metrics);
        put_scalar(&mut map, "base_model", &self.base_model);
        put_scalar(&mut map, "model_name", &self.model_name);
        put_scalar(&mut map, "repo_name", &self.repo_name);
        for (key, value) in &self.extra {
            if !map.contains_key(key) {
                map.insert(key.clone(), value.clone());
            }
        }
        map
    }

    pub fn is_empty(&self) -> bool {
        self.language.is_none()
            && self.license.is_none()
            && self.library_name.is_none()
            && self.tags.is_empty()
            && self.datasets.is_empty()
            && self.metrics.is_empty()
            && self.base_model.is_none()
            && self.model_name.is_none()
            && self.repo_name.is_none()
            && self.extra.is_empty()
    }

    /// Whether `key` is set, either typed or as an untyped passthrough value.
    pub fn has_key(&self, key: &str) -> bool {
        let typed = match key {
            "language" => self.language.is_some(),
            "license" => self.license.is_some(),
            "library_name" => self.library_name.is_some(),
            "tags" => !self.tags.is_empty(),
            "datasets" => !self.datasets.is_empty(),
            "metrics" => !self.metrics.is_empty(),
            "base_model" => self.base_model.is_some(),
            "model_name" => self.model_name.is_some(),
            "repo_name" => self.repo_name.is_some(),
            _ => false,
        };
        typed || self.extra.contains_key(key)
    }

    pub fn set_library_name(&mut self, name: impl Into<String>) {
        self.extra.remove("library_name");
        self.library_name = Some(name.into());
    }

    pub fn set_model_name(&mut self, name: impl Into<String>) {
        self.extra.remove("model_name");
        self.model_name = Some(name.into());
    }

    pub fn set_repo_name(&mut self, name: impl Into<String>) {
        self.extra.remove("repo_name");
        self.repo_name = Some(name.into());
    }

    pub fn set_datasets(&mut self, datasets: Vec<String>) {
        self.extra.remove("datasets");
        self.datasets = datasets;
    }

    /// Set the language unless the card already declares one.
    pub fn fill_language(&mut self, language: &str) {
        if !self.has_key("language") {
            self.language = Some(language.to_string());
        }
    }

    /// Set the license unless the card already declares one.
    pub fn fill_license(&mut self, license: &str) {
        if !self.has_key("license") {
            self.license = Some(license.to_string());
        }
    }

    /// Append tags that are not present yet, keeping first-seen order.
    pub fn add_tags<I, S>(&mut self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if self.extra.contains_key("tags") {
            tracing::warn!("Existing `tags` entry is not a list of strings; leaving it untouched");
            return;
        }
        for tag in tags {
            let tag = tag.into();
            if !self.tags.contains(&tag) {
                self.tags.push(tag);
            }
        }
    }
}

fn take_scalar(map: &mut Mapping, key: &str) -> Option<String> {
    take_typed::<Option<String>>(map, key).flatten()
}

fn take_list(map: &mut Mapping, key: &str) -> Vec<String> {
    match take_typed::<Option<OneOrMany>>(map, key).flatten() {
        Some(OneOrMany::One(item)) => vec![item],
        Some(OneOrMany::Many(items)) => items,
        None => Vec::new(),
    }
}

/// Remove `key` from `map` only when its value deserializes as `T`.
fn take_typed<T: DeserializeOwned>(map: &mut Mapping, key: &str) -> Option<T> {
    let value = map.get(key)?.clone();
    match serde_yaml::from_value::<T>(value) {
        Ok(parsed) => {
            map.remove(key);
            Some(parsed)
        }
        Err(_) => None,
    }
}

fn put_scalar(map: &mut Mapping, key: &str, value: &Option<String>) {
    if let Some(value) = value {
        map.insert(Value::from(key), Value::from(value.as_str()));
    }
}

fn put_list(map: &mut Mapping, key: &str, values: &[String]) {
    if !values.is_empty() {
        let seq = values.iter().map(|v| Value::from(v.as_str())).collect();
        map.insert(Value::from(key), Value::Sequence(seq));
    }
}
