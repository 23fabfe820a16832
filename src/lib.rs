pub mod errors;
pub mod context;
pub mod services;
pub mod providers;  // context sources + registry
pub mod memory;     // in-process collaborators
pub mod config;
pub mod logging;

use services::{PathResolver, SiteSettings, Translator, UrlResolver};

pub use context::{
    CacheContext, CacheableMetadata, ContextDefinition, ContextMap, ContextValue, ResolutionMode,
};
pub use errors::{ContextError, Result};
pub use providers::{ContextProvider, CurrentPathContext, Registry, SiteContext};

/// Registry holding the current path and site providers, both borrowing the
/// same collaborators.
pub fn default_registry<'a>(
    paths: &'a dyn PathResolver,
    settings: &'a dyn SiteSettings,
    urls: &'a dyn UrlResolver,
    translator: &'a dyn Translator,
) -> Registry<'a> {
    let mut registry = Registry::new();
    registry.register(CurrentPathContext::new(paths, urls, translator));
    registry.register(SiteContext::new(settings, urls, translator));
    registry
}
