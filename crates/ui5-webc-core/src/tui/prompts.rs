//! Charm-style CLI prompts using cliclack

use crate::config::{
    framework_entries, namespace_entries, package_entries, Answers, ConfigStore, ConfigValue,
    LibraryConfig,
};
use crate::error::LookupError;
use crate::product::ProductConfig;
use crate::resolve::{
    destination_root, resolve_default_version, resolve_package_reference,
    validate_framework_version, validate_namespace, Framework, OfflineLookup, RegistryLookup,
    Resolver, VersionLookup, DEFAULT_NAMESPACE, DEFAULT_PACKAGE,
};
use crate::runtime::git;
use crate::templates::{generate_library, TemplateSource};
use anyhow::{Context, Result};
use semver::Version;
use std::future::Future;
use std::path::{Path, PathBuf};

/// CLI arguments for the create command
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Suppress the welcome banner (when launched from another tool)
    pub embedded: bool,

    /// Local directory to use for templates instead of the built-in one
    pub template_dir: Option<PathBuf>,

    /// Directory the library is created in (defaults to the current directory)
    pub directory: Option<PathBuf>,

    /// YAML file with pre-filled answers (non-interactive mode)
    pub answers: Option<PathBuf>,

    /// Accept the default for every unanswered prompt (non-interactive mode)
    pub yes: bool,

    /// Skip the registry lookup for the latest framework version
    pub offline: bool,
}

impl CreateArgs {
    fn interactive(&self) -> bool {
        !self.yes && self.answers.is_none()
    }
}

/// Registry lookup, or none at all in offline mode
enum Lookup {
    Registry(RegistryLookup),
    Offline(OfflineLookup),
}

impl VersionLookup for Lookup {
    fn latest_version(
        &self,
        package: &str,
    ) -> impl Future<Output = Result<Version, LookupError>> + Send {
        async move {
            match self {
                Lookup::Registry(registry) => registry.latest_version(package).await,
                Lookup::Offline(offline) => offline.latest_version(package).await,
            }
        }
    }
}

/// Run the CLI with interactive prompts
pub async fn run<C: ProductConfig>(config: &C, args: CreateArgs) -> Result<()> {
    cliclack::intro(config.display_name())?;
    if !args.embedded {
        cliclack::log::remark(config.welcome())?;
    }

    // Step 1: Resolve where the library goes and where templates come from
    let working_dir = select_working_dir(&args)?;
    let source = setup_source(&args)?;
    let lookup = setup_lookup(config, args.offline)?;

    // Step 2: Collect and validate answers, confirming a populated destination
    let library = if args.interactive() {
        prompt_library(config, &lookup, &working_dir).await?
    } else {
        let library = resolve_answers(&lookup, &args, &working_dir).await?;
        confirm_destination(&library.destination, false)?;
        library
    };

    // Step 3: Review
    print_summary(&library)?;

    // Step 4: Create project
    create_project(config, &source, &library).await?;

    // Step 5: Initialize git repository
    if library.initrepo {
        init_repository(config, &library).await?;
    }

    // Step 6: Show next steps
    print_next_steps(config, &library)?;

    Ok(())
}

fn select_working_dir(args: &CreateArgs) -> Result<PathBuf> {
    let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let path = match &args.directory {
        Some(dir) if dir.is_absolute() => dir.clone(),
        Some(dir) => current_dir.join(dir),
        None => current_dir,
    };

    if !path.is_dir() {
        anyhow::bail!("Directory does not exist: {}", path.display());
    }

    Ok(path)
}

fn setup_source(args: &CreateArgs) -> Result<TemplateSource> {
    let source = match &args.template_dir {
        Some(path) => {
            cliclack::log::info(format!("Using local templates from {}", path.display()))?;
            TemplateSource::local(path.clone())
        }
        None => TemplateSource::embedded(),
    };

    Ok(source)
}

fn setup_lookup<C: ProductConfig>(config: &C, offline: bool) -> Result<Lookup> {
    if offline {
        cliclack::log::info("Offline mode: using minimum framework versions as defaults")?;
        return Ok(Lookup::Offline(OfflineLookup));
    }

    match RegistryLookup::from_config(config) {
        Ok(registry) => Ok(Lookup::Registry(registry)),
        Err(e) => {
            cliclack::log::warning(format!("{}, version lookup disabled", e))?;
            Ok(Lookup::Offline(OfflineLookup))
        }
    }
}

/// Prompt for every answer, persisting each one once the destination is known
async fn prompt_library<C: ProductConfig>(
    config: &C,
    lookup: &Lookup,
    working_dir: &Path,
) -> Result<LibraryConfig> {
    let namespace: String = cliclack::input("Choose the technical name for this library")
        .placeholder(DEFAULT_NAMESPACE)
        .default_input(DEFAULT_NAMESPACE)
        .validate(|input: &String| validate_namespace(input).map(|_| ()))
        .interact()?;
    let namespace = validate_namespace(&namespace)?;

    let mut select = cliclack::select("Which framework do you want to use?");
    for framework in Framework::ALL {
        select = select.item(
            framework,
            framework.display_name(),
            format!("min. {}", framework.min_version()),
        );
    }
    let framework: Framework = select.initial_value(Framework::default()).interact()?;

    let spinner = cliclack::spinner();
    spinner.start(format!("Looking up the latest {} version...", framework));
    let default_version = resolve_default_version(lookup, framework).await;
    spinner.stop(format!("Suggested {} version: {}", framework, default_version));

    // The floor depends on the framework chosen above
    let min_version = framework.min_version();
    let framework_version: String =
        cliclack::input("Which framework version do you want to use?")
            .default_input(&default_version.to_string())
            .validate(move |input: &String| {
                validate_framework_version(input, &min_version).map(|_| ())
            })
            .interact()?;
    let framework_version =
        validate_framework_version(&framework_version, &framework.min_version())?;

    let newdir: bool =
        cliclack::confirm("Would you like to create a new directory for the library?")
            .initial_value(true)
            .interact()?;

    // The store lives in the destination, so earlier answers are written now
    let destination = destination_root(working_dir, &namespace, newdir);
    confirm_destination(&destination, true)?;
    let mut store = ConfigStore::in_dir(&destination, config.store_file_name())?;
    store.record_entries(namespace_entries(&namespace))?;
    store.record_entries(framework_entries(framework, &framework_version))?;
    store.record_entries([("newdir", ConfigValue::Flag(newdir))])?;

    // Local packages are resolved relative to the destination chosen above
    let root = destination.clone();
    let package_answer: String = cliclack::input(format!(
        "Choose a Web Components package (and optionally version) to integrate\n\
         e.g. some-package, @my/my-package (\"latest\" is used), some-package@2.0.1,\n\
         or ../my-package (a local folder relative to {})",
        destination.display()
    ))
    .default_input(DEFAULT_PACKAGE)
    .validate(move |input: &String| resolve_package_reference(input, &root).map(|_| ()))
    .interact()?;
    let package = resolve_package_reference(&package_answer, &destination)?;
    store.record_entries(package_entries(&package, &package_answer))?;

    let author: String = cliclack::input("Author")
        .default_input(&git::default_author())
        .required(false)
        .interact()?;
    store.record_entries([("author", ConfigValue::Text(author.clone()))])?;

    let initrepo: bool = cliclack::confirm("Initialize a git repository?")
        .initial_value(true)
        .interact()?;
    store.record_entries([("initrepo", ConfigValue::Flag(initrepo))])?;

    Ok(LibraryConfig {
        namespace,
        framework,
        framework_version,
        package,
        package_answer,
        author,
        newdir,
        initrepo,
        destination,
    })
}

async fn resolve_answers(
    lookup: &Lookup,
    args: &CreateArgs,
    working_dir: &Path,
) -> Result<LibraryConfig> {
    let answers = match &args.answers {
        Some(path) => {
            cliclack::log::info(format!("Using answers from {}", path.display()))?;
            Answers::from_yaml_file(path)?
        }
        None => Answers::default(),
    };

    let resolver = Resolver::new(lookup, working_dir, git::default_author());
    let library = resolver
        .resolve(&answers)
        .await
        .context("Invalid answer")?;

    Ok(library)
}

fn confirm_destination(destination: &Path, interactive: bool) -> Result<()> {
    // Warn if directory exists and has files
    if destination.is_dir() {
        if let Ok(entries) = std::fs::read_dir(destination) {
            let count = entries.count();
            if count > 0 {
                cliclack::log::warning(format!(
                    "{} has {} existing items, generated files will overwrite them",
                    destination.display(),
                    count
                ))?;

                let confirm = if interactive {
                    cliclack::confirm("Continue anyway?")
                        .initial_value(true)
                        .interact()?
                } else {
                    true
                };

                if !confirm {
                    anyhow::bail!("Setup cancelled.");
                }
            }
        }
    }

    Ok(())
}

fn print_summary(library: &LibraryConfig) -> Result<()> {
    cliclack::log::info(format!(
        "Library: {} ({})\nFramework: {} {}\nWeb Components: {}\nAuthor: {}",
        library.namespace,
        library.namespace.path_form(),
        library.framework,
        library.framework_version,
        library.package,
        if library.author.is_empty() { "-" } else { library.author.as_str() },
    ))?;
    Ok(())
}

async fn create_project<C: ProductConfig>(
    config: &C,
    source: &TemplateSource,
    library: &LibraryConfig,
) -> Result<()> {
    // Interactive runs already wrote each answer; answers files are recorded here
    let mut store = ConfigStore::in_dir(&library.destination, config.store_file_name())?;
    store.record(library)?;

    let spinner = cliclack::spinner();
    spinner.start(format!("Creating library from {}...", source.describe()));

    let written = match generate_library(source, library).await {
        Ok(written) => written,
        Err(e) => {
            spinner.stop("Failed to create library");
            return Err(e).context(
                "Library generation aborted, the destination may be partially written",
            );
        }
    };

    store.mark_setup_completed()?;

    spinner.stop(format!(
        "Created {} files in {}",
        written.len(),
        library.destination.display()
    ));

    Ok(())
}

async fn init_repository<C: ProductConfig>(config: &C, library: &LibraryConfig) -> Result<()> {
    if !git::is_installed() {
        cliclack::log::warning("git is not installed, skipping repository initialization")?;
        return Ok(());
    }

    match git::init_repository(&library.destination, config.commit_message()).await {
        Ok(()) => cliclack::log::success("Initialized git repository")?,
        Err(e) => cliclack::log::warning(format!(
            "Repository initialization failed, generated files are kept: {:#}",
            e
        ))?,
    }

    Ok(())
}

fn print_next_steps<C: ProductConfig>(config: &C, library: &LibraryConfig) -> Result<()> {
    let steps = config.next_steps(library);

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    cliclack::outro("Setup complete!")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interactive_unless_answers_or_yes() {
        assert!(CreateArgs::default().interactive());
        assert!(!CreateArgs {
            yes: true,
            ..CreateArgs::default()
        }
        .interactive());
        assert!(!CreateArgs {
            answers: Some(PathBuf::from("answers.yaml")),
            ..CreateArgs::default()
        }
        .interactive());
    }

    #[test]
    fn test_working_dir_must_exist() {
        let tmp = tempfile::TempDir::new().unwrap();
        let args = CreateArgs {
            directory: Some(tmp.path().join("missing")),
            ..CreateArgs::default()
        };
        assert!(select_working_dir(&args).is_err());

        let args = CreateArgs {
            directory: Some(tmp.path().to_path_buf()),
            ..CreateArgs::default()
        };
        assert_eq!(select_working_dir(&args).unwrap(), tmp.path());
    }

    #[tokio::test]
    async fn test_offline_lookup_variant_fails() {
        let lookup = Lookup::Offline(OfflineLookup);
        assert!(lookup.latest_version("@openui5/sap.ui.core").await.is_err());
    }
}
