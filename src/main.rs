use clap::Parser;
use rules_context::config::ConfigLoader;
use rules_context::logging::init_logging;
use rules_context::memory::CurrentPathStack;
use rules_context::{CurrentPathContext, Registry, SiteContext};
use std::path::PathBuf;
use tracing::info;

/// Print the contexts a rule engine would see for a request.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// TOML configuration file (site settings, routes, translations).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Current request path.
    #[arg(long)]
    path: String,
    /// Resolve live values instead of listing placeholders.
    #[arg(long)]
    runtime: bool,
    /// Only resolve these qualified ids (e.g. `@site_context:site`); implies --runtime.
    #[arg(long = "context")]
    contexts: Vec<String>,
    /// Single-line JSON output.
    #[arg(long)]
    compact: bool,
}

fn fail(msg: impl std::fmt::Display) -> ! {
    eprintln!("{msg}");
    std::process::exit(1);
}

fn main() {
    let args = Args::parse();

    let config = ConfigLoader::load(args.config.as_deref()).unwrap_or_else(|e| fail(e));
    if let Err(e) = init_logging(&config.logging) {
        fail(e);
    }

    // Collaborators live for the whole run; providers borrow them.
    let paths = CurrentPathStack::with_path(args.path.clone());
    let settings = config.site_settings();
    let urls = config.url_generator(&args.path);
    let translator = config.translator();

    let site = config
        .extra_properties
        .iter()
        .fold(SiteContext::new(&settings, &urls, &translator), |site, extra| {
            site.with_setting_property(extra.field.clone(), extra.key.clone())
        });
    let mut registry = Registry::new();
    registry.register(CurrentPathContext::new(&paths, &urls, &translator));
    registry.register(site);

    let runtime = args.runtime || !args.contexts.is_empty();
    let result = if !args.contexts.is_empty() {
        registry.runtime_contexts(&args.contexts)
    } else if runtime {
        registry.all_runtime_contexts()
    } else {
        registry.available_contexts()
    };
    let out = result.unwrap_or_else(|e| fail(e));
    info!(count = out.len(), runtime, "contexts ready");

    let rendered = if args.compact {
        serde_json::to_string(&out)
    } else {
        serde_json::to_string_pretty(&out)
    };
    match rendered {
        Ok(s) => println!("{s}"),
        Err(e) => fail(format!("failed to render output: {e}")),
    }
}
