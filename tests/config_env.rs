use pretty_assertions::assert_eq;
use rules_context::config::ConfigLoader;
use rules_context::services::SiteSettings;
use std::io::Write;

// Single test in this binary: it mutates process environment.
#[test]
fn test_environment_overrides_file() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    write!(
        file,
        r#"
[site]
name = "Acme"
slogan = "Quality goods"
base_url = "https://acme.test"

[logging]
level = "warn"
"#
    )
    .unwrap();

    std::env::set_var("RCTX_SITE__NAME", "FromEnv");
    std::env::set_var("RCTX_SITE__MAIL", "env@acme.test");
    std::env::set_var("RCTX_LOGGING__FORMAT", "json");
    let loaded = ConfigLoader::load(Some(file.path()));
    let without_file = ConfigLoader::load(None);
    std::env::remove_var("RCTX_SITE__NAME");
    std::env::remove_var("RCTX_SITE__MAIL");
    std::env::remove_var("RCTX_LOGGING__FORMAT");

    let config = loaded.unwrap();
    assert_eq!(config.site.name.as_deref(), Some("FromEnv"));
    assert_eq!(config.site.slogan.as_deref(), Some("Quality goods"));
    assert_eq!(config.logging.format, "json");
    assert_eq!(config.logging.level, "warn");

    let settings = config.site_settings();
    assert_eq!(settings.get("mail").unwrap().as_deref(), Some("env@acme.test"));

    let config = without_file.unwrap();
    assert_eq!(config.site.name.as_deref(), Some("FromEnv"));
    assert_eq!(config.site.base_url, "http://localhost");
}
