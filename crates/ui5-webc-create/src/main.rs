//! create-ui5-webc-lib - scaffold a UI5 library with Web Components enablement

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use ui5_webc_core::tui::CreateArgs;
use ui5_webc_core::{LibraryConfig, ProductConfig};

/// Environment variable controlling log output (e.g. `debug`)
const LOG_ENV: &str = "UI5_WEBC_LOG";

/// Generator product configuration
#[derive(Clone)]
pub struct Ui5WebcConfig;

impl ProductConfig for Ui5WebcConfig {
    fn name(&self) -> &'static str {
        "create-ui5-webc-lib"
    }

    fn display_name(&self) -> &'static str {
        "UI5 Library with Web Components"
    }

    fn welcome(&self) -> &'static str {
        "Create a new OpenUI5/SAPUI5 library with Web Components enablement support"
    }

    fn registry_url_env(&self) -> &'static str {
        "UI5_WEBC_REGISTRY_URL"
    }

    fn store_file_name(&self) -> &'static str {
        ".ui5-webc-lib.json"
    }

    fn commit_message(&self) -> &'static str {
        "Initialize repository with UI5 Library Generator"
    }

    fn next_steps(&self, config: &LibraryConfig) -> Vec<String> {
        let mut steps = Vec::new();
        let current = std::env::current_dir().ok();

        // Step 1: cd to directory if not current
        if current.as_ref() != Some(&config.destination) {
            steps.push(format!("cd {}", config.destination.display()).green().to_string());
        }

        // Step 2: Install dependencies and build the wrapped package
        for command in [
            "npm i",
            "npm run ui5:prebuild",
            "npm run generate",
            "npm run start",
        ] {
            steps.push(command.green().to_string());
        }

        steps
    }
}

#[derive(Parser, Debug)]
#[command(name = "create-ui5-webc-lib")]
#[command(about = "CLI for scaffolding UI5 libraries with Web Components enablement")]
#[command(version)]
pub struct Args {
    /// Suppress the welcome banner (when launched from another tool)
    #[arg(long)]
    pub embedded: bool,

    /// Local directory to use for templates instead of the built-in one (for development use)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Directory the library is created in
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// YAML file with answers to all prompts (non-interactive mode)
    #[arg(long)]
    pub answers: Option<PathBuf>,

    /// Accept the defaults for all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,

    /// Do not query the npm registry for the latest framework version
    #[arg(long)]
    pub offline: bool,
}

impl From<Args> for CreateArgs {
    fn from(args: Args) -> Self {
        CreateArgs {
            embedded: args.embedded,
            template_dir: args.template_dir,
            directory: args.directory,
            answers: args.answers,
            yes: args.yes,
            offline: args.offline,
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    init_logging();

    let args = Args::parse();
    let config = Ui5WebcConfig;

    let result = ui5_webc_core::run(&config, args.into()).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    if let Err(e) = &result {
        tracing::debug!(error = ?e, "generator failed");
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_flags_map_to_create_args() {
        let args = Args::parse_from([
            "create-ui5-webc-lib",
            "--embedded",
            "--offline",
            "-y",
            "--answers",
            "answers.yaml",
            "-d",
            "out",
        ]);
        let create: CreateArgs = args.into();
        assert!(create.embedded);
        assert!(create.offline);
        assert!(create.yes);
        assert_eq!(create.answers, Some(PathBuf::from("answers.yaml")));
        assert_eq!(create.directory, Some(PathBuf::from("out")));
        assert_eq!(create.template_dir, None);
    }

    #[test]
    fn test_next_steps_end_with_start() {
        let tmp = std::env::temp_dir().join("ui5-webc-next-steps");
        let lookup = ui5_webc_core::resolve::OfflineLookup;
        let library = ui5_webc_core::Resolver::new(&lookup, &tmp, "");
        let library = tokio::runtime::Runtime::new()
            .unwrap()
            .block_on(library.resolve(&ui5_webc_core::Answers {
                web_components_package: Some("my-pkg".to_string()),
                ..Default::default()
            }))
            .unwrap();

        let steps = Ui5WebcConfig.next_steps(&library);
        assert_eq!(steps.len(), 5);
        assert!(steps[0].contains("cd "));
        assert!(steps[1].contains("npm i"));
        assert!(steps[4].contains("npm run start"));
    }

    #[test]
    fn test_no_required_flags() {
        let args = Args::parse_from(["create-ui5-webc-lib"]);
        assert!(!args.embedded && !args.yes && !args.offline);
    }
}
