//! In-process collaborators backing the `rctx` binary and the tests.

use crate::errors::{ContextError, Result};
use crate::services::{PathResolver, Route, SiteSettings, Translator, UrlOptions, UrlResolver};
use std::collections::HashMap;

/// Stack of request paths; sub-requests push, the top is current.
#[derive(Debug, Clone, Default)]
pub struct CurrentPathStack {
    paths: Vec<String>,
}

impl CurrentPathStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_path(path: impl Into<String>) -> Self {
        Self { paths: vec![path.into()] }
    }

    pub fn push(&mut self, path: impl Into<String>) {
        self.paths.push(path.into());
    }

    pub fn pop(&mut self) -> Option<String> {
        self.paths.pop()
    }
}

impl PathResolver for CurrentPathStack {
    fn current_path(&self) -> Result<String> {
        self.paths
            .last()
            .cloned()
            .ok_or_else(|| ContextError::Path("no active request".into()))
    }
}

/// Flat key/value site settings.
#[derive(Debug, Clone, Default)]
pub struct StaticSiteSettings {
    values: HashMap<String, String>,
}

impl StaticSiteSettings {
    pub fn new(values: HashMap<String, String>) -> Self {
        Self { values }
    }

    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl SiteSettings for StaticSiteSettings {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }
}

/// Generates URLs from a base URL and a route → path table.
#[derive(Debug, Clone)]
pub struct BaseUrlGenerator {
    base_url: String,
    current_path: Option<String>,
    routes: HashMap<String, String>,
}

impl BaseUrlGenerator {
    pub fn new(base_url: impl Into<String>) -> Self {
        let routes = [
            (Route::Front.name().to_string(), "/".to_string()),
            (Route::UserLogin.name().to_string(), "/user/login".to_string()),
        ]
        .into_iter()
        .collect();
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            current_path: None,
            routes,
        }
    }

    pub fn with_current_path(mut self, path: impl Into<String>) -> Self {
        self.current_path = Some(path.into());
        self
    }

    /// Adds or overrides a route's path.
    pub fn with_route(mut self, name: impl Into<String>, path: impl Into<String>) -> Self {
        self.routes.insert(name.into(), path.into());
        self
    }

    fn route_path(&self, route: &Route) -> Result<String> {
        let path = match route {
            Route::Current => self.current_path.clone(),
            other => self.routes.get(other.name()).cloned(),
        };
        let path = path.ok_or_else(|| ContextError::Url {
            route: route.name().to_string(),
            reason: "route not defined".into(),
        })?;
        Ok(if path.starts_with('/') { path } else { format!("/{path}") })
    }
}

impl UrlResolver for BaseUrlGenerator {
    fn resolve(&self, route: &Route, options: UrlOptions) -> Result<String> {
        let path = self.route_path(route)?;
        Ok(if options.absolute { format!("{}{}", self.base_url, path) } else { path })
    }
}

/// Returns label source strings untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityTranslator;

impl Translator for IdentityTranslator {
    fn translate(&self, source: &'static str) -> String {
        source.to_string()
    }
}

/// Source string → translation lookup; unknown strings pass through.
#[derive(Debug, Clone, Default)]
pub struct StringCatalog {
    entries: HashMap<String, String>,
}

impl StringCatalog {
    pub fn new(entries: HashMap<String, String>) -> Self {
        Self { entries }
    }
}

impl Translator for StringCatalog {
    fn translate(&self, source: &'static str) -> String {
        self.entries.get(source).cloned().unwrap_or_else(|| source.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn path_stack_reports_top() {
        let mut stack = CurrentPathStack::with_path("/node/3");
        stack.push("/node/3/edit");
        assert_eq!(stack.current_path().unwrap(), "/node/3/edit");
        stack.pop();
        assert_eq!(stack.current_path().unwrap(), "/node/3");
        stack.pop();
        assert!(stack.current_path().is_err());
    }

    #[test]
    fn absolute_urls_join_with_single_slash() {
        let urls = BaseUrlGenerator::new("https://acme.test/").with_current_path("node/3");
        assert_eq!(
            urls.resolve(&Route::Front, UrlOptions::absolute()).unwrap(),
            "https://acme.test/"
        );
        assert_eq!(
            urls.resolve(&Route::UserLogin, UrlOptions::absolute()).unwrap(),
            "https://acme.test/user/login"
        );
        assert_eq!(urls.resolve(&Route::Current, UrlOptions::default()).unwrap(), "/node/3");
    }

    #[test]
    fn unknown_routes_fail() {
        let urls = BaseUrlGenerator::new("https://acme.test");
        let err = urls.resolve(&Route::Named("node.add".into()), UrlOptions::absolute());
        assert!(matches!(err, Err(ContextError::Url { route, .. }) if route == "node.add"));
        assert!(urls.resolve(&Route::Current, UrlOptions::absolute()).is_err());
    }

    #[test]
    fn catalog_falls_back_to_source() {
        let catalog = StringCatalog::new(
            [("Site information".to_string(), "Informations du site".to_string())]
                .into_iter()
                .collect(),
        );
        assert_eq!(catalog.translate("Site information"), "Informations du site");
        assert_eq!(catalog.translate("Current path"), "Current path");
    }
}
