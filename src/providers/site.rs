//! The global `site` context.
//!
//! Carries the front page and login URLs plus the `name`, `slogan` and `mail`
//! settings. Extra fields can be registered up front with
//! [`SiteContext::with_setting_property`]; once built, the field set does not
//! change between calls or modes.

use super::ContextProvider;
use crate::context::{
    CacheContext, CacheableMetadata, ContextDefinition, ContextMap, ContextValue, ResolutionMode,
};
use crate::errors::Result;
use crate::services::{Route, SiteSettings, Translator, UrlOptions, UrlResolver};
use serde_json::{Map, Value};
use tracing::{debug, trace, warn};

/// Settings keys copied into the payload verbatim, in payload order.
const SETTINGS_FIELDS: [&str; 3] = ["name", "slogan", "mail"];

/// URL-valued fields and the route each one resolves.
const URL_FIELDS: [(&str, Route); 2] = [("url", Route::Front), ("login-url", Route::UserLogin)];

pub struct SiteContext<'a> {
    settings: &'a dyn SiteSettings,
    urls: &'a dyn UrlResolver,
    translator: &'a dyn Translator,
    extra: Vec<(String, String)>,
}

impl<'a> SiteContext<'a> {
    pub const ID: &'static str = "site_context";
    pub const CONTEXT: &'static str = "site";

    pub fn new(
        settings: &'a dyn SiteSettings,
        urls: &'a dyn UrlResolver,
        translator: &'a dyn Translator,
    ) -> Self {
        Self { settings, urls, translator, extra: Vec::new() }
    }

    /// Adds a payload field read from `settings_key` in the settings store.
    ///
    /// Built-in fields keep their meaning; trying to redefine one is ignored.
    pub fn with_setting_property(
        mut self,
        field: impl Into<String>,
        settings_key: impl Into<String>,
    ) -> Self {
        let field = field.into();
        if Self::is_builtin(&field) || self.extra.iter().any(|(f, _)| *f == field) {
            warn!(%field, "site property already defined, ignoring");
            return self;
        }
        self.extra.push((field, settings_key.into()));
        self
    }

    /// Payload keys in the order they are emitted.
    pub fn fields(&self) -> Vec<&str> {
        URL_FIELDS
            .iter()
            .map(|(field, _)| *field)
            .chain(SETTINGS_FIELDS)
            .chain(self.extra.iter().map(|(field, _)| field.as_str()))
            .collect()
    }

    fn is_builtin(field: &str) -> bool {
        URL_FIELDS.iter().any(|(f, _)| *f == field) || SETTINGS_FIELDS.contains(&field)
    }

    fn setting(&self, key: &str) -> Result<Value> {
        Ok(self.settings.get(key)?.map(Value::String).unwrap_or(Value::Null))
    }

    fn build(&self, mode: ResolutionMode) -> Result<ContextMap> {
        let mut payload = Map::new();

        // Same recursion hazard as the current path: route tokens only at
        // configuration time.
        for (field, route) in &URL_FIELDS {
            let url = if mode.is_runtime() {
                trace!(%route, "resolving absolute url");
                self.urls.resolve(route, UrlOptions::absolute())?
            } else {
                route.name().to_string()
            };
            payload.insert((*field).to_string(), Value::String(url));
        }

        for key in SETTINGS_FIELDS {
            payload.insert(key.to_string(), self.setting(key)?);
        }
        for (field, key) in &self.extra {
            payload.insert(field.clone(), self.setting(key)?);
        }

        let value = ContextValue::new(
            ContextDefinition::new(Self::CONTEXT, self.translator.translate("Site information")),
            payload,
            CacheableMetadata::new().with_cache_contexts([CacheContext::Site]),
        );
        debug!(%mode, context = Self::CONTEXT, "built context value");

        let mut out = ContextMap::new();
        out.insert(Self::CONTEXT.to_string(), value);
        Ok(out)
    }
}

impl ContextProvider for SiteContext<'_> {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{BaseUrlGenerator, IdentityTranslator, StaticSiteSettings};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn settings() -> StaticSiteSettings {
        StaticSiteSettings::from_pairs([
            ("name", "Acme"),
            ("slogan", "Quality goods"),
            ("mail", "info@acme.test"),
            ("default_langcode", "en"),
        ])
    }

    #[test]
    fn configuration_uses_route_tokens() {
        let settings = settings();
        let urls = BaseUrlGenerator::new("https://acme.test");
        let provider = SiteContext::new(&settings, &urls, &IdentityTranslator);

        let out = provider.list_available().unwrap();
        assert_eq!(
            serde_json::to_value(out["site"].payload()).unwrap(),
            json!({
                "url": "<front>",
                "login-url": "user.page",
                "name": "Acme",
                "slogan": "Quality goods",
                "mail": "info@acme.test"
            })
        );
    }

    #[test]
    fn missing_settings_become_null() {
        let settings = StaticSiteSettings::from_pairs([("name", "Acme")]);
        let urls = BaseUrlGenerator::new("https://acme.test");
        let provider = SiteContext::new(&settings, &urls, &IdentityTranslator);

        let out = provider.resolve_runtime().unwrap();
        assert_eq!(out["site"].payload()["slogan"], Value::Null);
        assert_eq!(out["site"].payload()["mail"], Value::Null);
    }

    #[test]
    fn extra_properties_follow_builtins() {
        let settings = settings();
        let urls = BaseUrlGenerator::new("https://acme.test");
        let provider = SiteContext::new(&settings, &urls, &IdentityTranslator)
            .with_setting_property("default-langcode", "default_langcode")
            .with_setting_property("name", "something_else");

        assert_eq!(
            provider.fields(),
            ["url", "login-url", "name", "slogan", "mail", "default-langcode"]
        );
        let out = provider.resolve_runtime().unwrap();
        assert_eq!(out["site"].field("default-langcode"), Some("en"));
        assert_eq!(out["site"].field("name"), Some("Acme"));
    }
}
