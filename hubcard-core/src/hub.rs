//! Repository-name resolution seam.
//!
//! Generation only needs the fully-qualified `namespace/name` of the repository a
//! card will be published to. How that name is obtained (a whoami call, a config
//! value, a test stub) is up to the caller.

/// Resolves a model name into a fully-qualified repository name.
pub trait RepoNameResolver {
    fn full_repo_name(&self, model_name: &str, token: Option<&str>) -> String;
}

impl<F> RepoNameResolver for F
where
    F: Fn(&str, Option<&str>) -> String,
{
    fn full_repo_name(&self, model_name: &str, token: Option<&str>) -> String {
        self(model_name, token)
    }
}

/// Network-free resolver that prefixes bare names with a configured namespace.
#[derive(Debug, Clone, Default)]
pub struct NamespaceResolver {
    namespace: Option<String>,
}

impl NamespaceResolver {
    pub fn new(namespace: Option<String>) -> Self {
        let namespace = namespace
            .map(|ns| ns.trim().trim_matches('/').to_string())
            .filter(|ns| !ns.is_empty());
        Self { namespace }
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }
}

impl RepoNameResolver for NamespaceResolver {
    fn full_repo_name(&self, model_name: &str, _token: Option<&str>) -> String {
        if model_name.contains('/') {
            return model_name.to_string();
        }
        match &self.namespace {
            Some(ns) => format!("{ns}/{model_name}"),
            None => model_name.to_string(),
        }
    }
}
