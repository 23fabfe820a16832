use crate::errors::Result;
use std::fmt;

/// Symbolic routes the providers ask the URL resolver about.
///
/// The symbolic name is also what configuration-time listings put in place of
/// the URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    /// The route of the request being served.
    Current,
    /// The site front page.
    Front,
    /// The user login page.
    UserLogin,
    Named(String),
}

impl Route {
    pub fn name(&self) -> &str {
        match self {
            Route::Current => "<current>",
            Route::Front => "<front>",
            Route::UserLogin => "user.page",
            Route::Named(name) => name,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Options for URL generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UrlOptions {
    /// Include scheme and host.
    pub absolute: bool,
}

impl UrlOptions {
    pub fn absolute() -> Self {
        Self { absolute: true }
    }
}

/// Returns the path of the current request.
pub trait PathResolver: Send + Sync {
    fn current_path(&self) -> Result<String>;
}

/// Read access to the site configuration (`name`, `slogan`, `mail`, ...).
pub trait SiteSettings: Send + Sync {
    /// `Ok(None)` means the key is not set.
    fn get(&self, key: &str) -> Result<Option<String>>;
}

/// Turns symbolic routes into URLs.
///
/// Implementations may depend on the routing system being fully booted.
pub trait UrlResolver: Send + Sync {
    fn resolve(&self, route: &Route, options: UrlOptions) -> Result<String>;
}

/// Localizes static label strings.
pub trait Translator: Send + Sync {
    fn translate(&self, source: &'static str) -> String;
}
