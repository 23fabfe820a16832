//! File + environment configuration for the `rctx` binary.
//!
//! Precedence: defaults (lowest) -> config file -> `RCTX_*` environment
//! variables, nested with `__` (e.g. `RCTX_SITE__NAME=Acme`).

use crate::errors::Result;
use crate::logging::LoggingConfig;
use crate::memory::{BaseUrlGenerator, StaticSiteSettings, StringCatalog};
use ::config::{Config, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RctxConfig {
    #[serde(default)]
    pub site: SiteSection,
    #[serde(default)]
    pub routes: Vec<RouteEntry>,
    #[serde(default)]
    pub translations: Vec<TranslationEntry>,
    #[serde(default)]
    pub extra_properties: Vec<ExtraProperty>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SiteSection {
    pub name: Option<String>,
    pub slogan: Option<String>,
    pub mail: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Any further settings keys, for use by extra properties.
    #[serde(default)]
    pub settings: HashMap<String, String>,
}

fn default_base_url() -> String {
    "http://localhost".to_string()
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            name: None,
            slogan: None,
            mail: None,
            base_url: default_base_url(),
            settings: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RouteEntry {
    pub name: String,
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranslationEntry {
    pub source: String,
    pub translation: String,
}

/// Extra `site` payload field read from a settings key.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtraProperty {
    pub field: String,
    pub key: String,
}

/// Configuration loader.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads from `path` (required when given) with the environment overlaid.
    pub fn load(path: Option<&Path>) -> Result<RctxConfig> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }
        let builder = builder.add_source(
            Environment::with_prefix("RCTX")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );
        Ok(builder.build()?.try_deserialize()?)
    }
}

impl RctxConfig {
    /// Settings store holding `name`, `slogan`, `mail` and any extra keys.
    pub fn site_settings(&self) -> StaticSiteSettings {
        let mut values = self.site.settings.clone();
        let named = [
            ("name", &self.site.name),
            ("slogan", &self.site.slogan),
            ("mail", &self.site.mail),
        ];
        for (key, value) in named {
            if let Some(value) = value {
                values.insert(key.to_string(), value.clone());
            }
        }
        StaticSiteSettings::new(values)
    }

    /// URL generator for `base_url` with the route table applied.
    pub fn url_generator(&self, current_path: &str) -> BaseUrlGenerator {
        self.routes.iter().fold(
            BaseUrlGenerator::new(self.site.base_url.clone()).with_current_path(current_path),
            |urls, route| urls.with_route(route.name.clone(), route.path.clone()),
        )
    }

    pub fn translator(&self) -> StringCatalog {
        StringCatalog::new(
            self.translations
                .iter()
                .map(|t| (t.source.clone(), t.translation.clone()))
                .collect(),
        )
    }
}
