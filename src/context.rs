use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Context values keyed by their unqualified name (e.g. `current_path`).
pub type ContextMap = BTreeMap<String, ContextValue>;

/// Which of the two provider entry points is building values.
///
/// Configuration time must not touch anything that needs the routing system,
/// so URL-valued fields fall back to their route token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionMode {
    Configuration,
    Runtime,
}

impl ResolutionMode {
    pub fn is_runtime(self) -> bool {
        matches!(self, ResolutionMode::Runtime)
    }
}

impl fmt::Display for ResolutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionMode::Configuration => f.write_str("configuration"),
            ResolutionMode::Runtime => f.write_str("runtime"),
        }
    }
}

/// Machine name plus translated label of a context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContextDefinition {
    pub name: String,
    pub label: String,
}

impl ContextDefinition {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self { name: name.into(), label: label.into() }
    }
}

/// Cache contexts a downstream cache layer has to vary on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum CacheContext {
    #[serde(rename = "url.path")]
    UrlPath,
    #[serde(rename = "site")]
    Site,
}

impl CacheContext {
    pub fn as_str(self) -> &'static str {
        match self {
            CacheContext::UrlPath => "url.path",
            CacheContext::Site => "site",
        }
    }

    /// Human readable invalidation condition.
    pub fn describe(self) -> &'static str {
        match self {
            CacheContext::UrlPath => "varies by request path",
            CacheContext::Site => "varies by site configuration",
        }
    }
}

/// Cacheability annotation attached to every context value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheableMetadata {
    contexts: Vec<CacheContext>,
}

impl CacheableMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the cache contexts; kept sorted and free of duplicates.
    pub fn with_cache_contexts(mut self, contexts: impl IntoIterator<Item = CacheContext>) -> Self {
        let mut contexts: Vec<_> = contexts.into_iter().collect();
        contexts.sort();
        contexts.dedup();
        self.contexts = contexts;
        self
    }

    pub fn cache_contexts(&self) -> &[CacheContext] {
        &self.contexts
    }

    pub fn varies_by(&self, context: CacheContext) -> bool {
        self.contexts.contains(&context)
    }
}

/// A named, labelled, cache-annotated snapshot of ambient data.
///
/// Built fresh on every provider call and never mutated afterwards, hence no
/// setters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContextValue {
    #[serde(flatten)]
    definition: ContextDefinition,
    payload: Map<String, Value>,
    #[serde(rename = "cache")]
    cacheability: CacheableMetadata,
}

impl ContextValue {
    pub fn new(
        definition: ContextDefinition,
        payload: Map<String, Value>,
        cacheability: CacheableMetadata,
    ) -> Self {
        Self { definition, payload, cacheability }
    }

    pub fn name(&self) -> &str {
        &self.definition.name
    }

    pub fn label(&self) -> &str {
        &self.definition.label
    }

    pub fn definition(&self) -> &ContextDefinition {
        &self.definition
    }

    /// Payload fields in insertion order.
    pub fn payload(&self) -> &Map<String, Value> {
        &self.payload
    }

    /// Convenience lookup for string-valued payload fields.
    pub fn field(&self, key: &str) -> Option<&str> {
        self.payload.get(key).and_then(Value::as_str)
    }

    pub fn cacheability(&self) -> &CacheableMetadata {
        &self.cacheability
    }
}
