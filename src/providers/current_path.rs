use super::ContextProvider;
use crate::context::{
    CacheContext, CacheableMetadata, ContextDefinition, ContextMap, ContextValue, ResolutionMode,
};
use crate::errors::Result;
use crate::services::{PathResolver, Route, Translator, UrlOptions, UrlResolver};
use serde_json::{Map, Value};
use tracing::{debug, trace};

/// Exposes the current request path as the `current_path` context.
pub struct CurrentPathContext<'a> {
    paths: &'a dyn PathResolver,
    urls: &'a dyn UrlResolver,
    translator: &'a dyn Translator,
}

impl<'a> CurrentPathContext<'a> {
    pub const ID: &'static str = "current_path_context";
    pub const CONTEXT: &'static str = "current_path";

    pub fn new(
        paths: &'a dyn PathResolver,
        urls: &'a dyn UrlResolver,
        translator: &'a dyn Translator,
    ) -> Self {
        Self { paths, urls, translator }
    }

    fn build(&self, mode: ResolutionMode) -> Result<ContextMap> {
        // The URL generator may itself need the current route, so asking it
        // for one at configuration time can recurse forever.
        let route = Route::Current;
        let url = if mode.is_runtime() {
            trace!(%route, "resolving absolute url");
            self.urls.resolve(&route, UrlOptions::absolute())?
        } else {
            route.name().to_string()
        };

        let mut payload = Map::new();
        payload.insert("path".into(), Value::String(self.paths.current_path()?));
        payload.insert("url".into(), Value::String(url));

        let value = ContextValue::new(
            ContextDefinition::new(Self::CONTEXT, self.translator.translate("Current path")),
            payload,
            CacheableMetadata::new().with_cache_contexts([CacheContext::UrlPath]),
        );
        debug!(%mode, context = Self::CONTEXT, "built context value");

        let mut out = ContextMap::new();
        out.insert(Self::CONTEXT.to_string(), value);
        Ok(out)
    }
}

impl ContextProvider for CurrentPathContext<'_> {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn list_available(&self) -> Result<ContextMap> {
        self.build(ResolutionMode::Configuration)
    }

    fn resolve_runtime(&self) -> Result<ContextMap> {
        self.build(ResolutionMode::Runtime)
    }
}
