use crate::context::{ContextMap, ContextValue};
use crate::errors::{ContextError, Result};
use itertools::Itertools;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

pub mod current_path;
pub mod site;

pub use current_path::CurrentPathContext;
pub use site::SiteContext;

/// A source of ambient context values for rule evaluation.
pub trait ContextProvider: Send + Sync {
    /// Stable provider id, used as the first half of qualified context ids.
    fn id(&self) -> &'static str;

    /// Every context this provider can produce, with placeholder values where
    /// computing the real value needs the routing system.
    fn list_available(&self) -> Result<ContextMap>;

    /// Every context with live values. Only valid once routing is ready.
    fn resolve_runtime(&self) -> Result<ContextMap>;
}

/// Builds `@provider:name`.
pub fn qualified_id(provider: &str, name: &str) -> String {
    format!("@{provider}:{name}")
}

/// Splits `@provider:name` into its halves.
pub fn parse_qualified_id(id: &str) -> Result<(&str, &str)> {
    id.strip_prefix('@')
        .and_then(|rest| rest.split_once(':'))
        .filter(|(provider, name)| !provider.is_empty() && !name.is_empty())
        .ok_or_else(|| ContextError::InvalidContextId(id.to_string()))
}

/// Ordered collection of providers the rule engine iterates over.
#[derive(Default)]
pub struct Registry<'a> {
    providers: Vec<Box<dyn ContextProvider + 'a>>,
}

impl<'a> Registry<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a provider; an earlier provider with the same id is replaced.
    pub fn register<P: ContextProvider + 'a>(&mut self, provider: P) {
        match self.providers.iter().position(|p| p.id() == provider.id()) {
            Some(pos) => self.providers[pos] = Box::new(provider),
            None => self.providers.push(Box::new(provider)),
        }
    }

    pub fn get(&self, id: &str) -> Option<&(dyn ContextProvider + 'a)> {
        self.providers.iter().find(|p| p.id() == id).map(|p| p.as_ref())
    }

    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.providers.iter().map(|p| p.id())
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Configuration-time listing across all providers, keyed by qualified id.
    pub fn available_contexts(&self) -> Result<BTreeMap<String, ContextValue>> {
        let mut out = BTreeMap::new();
        for provider in &self.providers {
            for (name, value) in provider.list_available()? {
                out.insert(qualified_id(provider.id(), &name), value);
            }
        }
        debug!(count = out.len(), "listed available contexts");
        Ok(out)
    }

    /// Runtime values for every context of every provider.
    pub fn all_runtime_contexts(&self) -> Result<BTreeMap<String, ContextValue>> {
        let mut out = BTreeMap::new();
        for provider in &self.providers {
            for (name, value) in provider.resolve_runtime()? {
                out.insert(qualified_id(provider.id(), &name), value);
            }
        }
        debug!(count = out.len(), "resolved all runtime contexts");
        Ok(out)
    }

    /// Runtime values for the requested qualified ids only.
    ///
    /// Each provider is asked at most once, however many of its contexts are
    /// requested.
    pub fn runtime_contexts<S: AsRef<str>>(
        &self,
        ids: &[S],
    ) -> Result<BTreeMap<String, ContextValue>> {
        let wanted: Vec<(&str, &str)> = ids
            .iter()
            .map(|id| parse_qualified_id(id.as_ref()))
            .collect::<Result<_>>()?;

        let mut resolved: HashMap<&str, ContextMap> = HashMap::new();
        for provider_id in wanted.iter().map(|(provider, _)| *provider).unique() {
            let provider = self
                .get(provider_id)
                .ok_or_else(|| ContextError::UnknownContext(provider_id.to_string()))?;
            resolved.insert(provider_id, provider.resolve_runtime()?);
        }

        let mut out = BTreeMap::new();
        for (provider_id, name) in wanted {
            let value = resolved
                .get(provider_id)
                .and_then(|contexts| contexts.get(name))
                .cloned()
                .ok_or_else(|| ContextError::UnknownContext(qualified_id(provider_id, name)))?;
            out.insert(qualified_id(provider_id, name), value);
        }
        debug!(
            requested = %out.keys().join(", "),
            "resolved runtime contexts"
        );
        Ok(out)
    }
}
