//! gtestgen CLI: scaffold GoogleTest fixtures for a documented C++ class.
//!
//! Thin layer over `gtestgen-core`: finds the header, asks before
//! overwriting, writes the generated files and updates the Visual Studio
//! project.

mod prompt;

use clap::{CommandFactory, Parser, Subcommand};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

use gtestgen_core::config::{load_config, load_config_file, Config};
use gtestgen_core::extract::{extract_methods, public_section};
use gtestgen_core::overload::display_names;
use gtestgen_core::scan::{existing_tests, find_header};
use gtestgen_core::types::UNIT_TESTS_DIR;
use gtestgen_core::{generate, register_files, Error, FileSet, Result, SpliceOutcome};

/// gtestgen: GoogleTest scaffolding for documented C++ classes.
#[derive(Parser)]
#[command(name = "gtestgen", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON instead of human-readable text
    #[arg(long, global = true)]
    json: bool,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (default: .gtestgen.toml in the current directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate fixture and unit-test files for a class
    Generate {
        /// Class to generate tests for; its header must be named <Class>.h
        #[arg(short, long)]
        class: String,

        /// Fixture folder and project filter name
        #[arg(short, long)]
        app_group: Option<String>,

        /// Folder searched for the class header (default: current directory)
        #[arg(short, long)]
        source_path: Option<PathBuf>,

        /// Tests root receiving <AppGroup>/ and UnitTests/ (default: current directory)
        #[arg(short, long)]
        test_path: Option<PathBuf>,

        /// .vcxproj to register the new files in
        #[arg(short, long)]
        project_path: Option<PathBuf>,

        /// Overwrite existing tests without asking
        #[arg(short, long)]
        force: bool,

        /// Show what would be generated without writing anything
        #[arg(long)]
        dry_run: bool,
    },
    /// List the documented methods found in a header
    Methods {
        /// Header file to read
        header: PathBuf,

        /// Class the header declares
        #[arg(short, long)]
        class: String,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn main() {
    let cli = Cli::parse();

    let directive = if cli.verbose { "gtestgen=debug" } else { "gtestgen=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(directive.parse().unwrap()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        error!("{e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Generate {
            class,
            app_group,
            source_path,
            test_path,
            project_path,
            force,
            dry_run,
        } => {
            let mut config = match &cli.config {
                Some(path) => load_config_file(path)?,
                None => load_config(&current_dir()?),
            };
            if let Some(group) = app_group {
                config.app_group = group;
            }
            config.source_path = source_path.or(config.source_path);
            config.test_path = test_path.or(config.test_path);
            config.project_path = project_path.or(config.project_path);
            config.force |= force;

            run_generate(&class, &config, dry_run, cli.json)
        }
        Commands::Methods { header, class } => run_methods(&header, &class, cli.json),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "gtestgen", &mut std::io::stdout());
            Ok(())
        }
    }
}

fn current_dir() -> Result<PathBuf> {
    std::env::current_dir().map_err(|e| Error::io(".", e))
}

fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => error!("Could not serialize output: {e}"),
    }
}

// ---------------------------------------------------------------------------
// generate
// ---------------------------------------------------------------------------

fn run_generate(class: &str, config: &Config, dry_run: bool, json: bool) -> Result<()> {
    let source_root = match &config.source_path {
        Some(p) => p.clone(),
        None => current_dir()?,
    };
    let test_root = match &config.test_path {
        Some(p) => std::path::absolute(p).map_err(|e| Error::io(p, e))?,
        None => current_dir()?,
    };

    let header_path = find_header(&source_root, class)?;
    info!(path = %header_path.display(), "Found header");
    let header_text =
        std::fs::read_to_string(&header_path).map_err(|e| Error::io(&header_path, e))?;
    let files = generate(class, &header_text, &config.app_group);

    if !dry_run && !config.force {
        let existing = existing_tests(&test_root, class, &config.app_group);
        if !existing.is_empty() {
            let stdin = std::io::stdin();
            let proceed = prompt::confirm_overwrite(&existing, stdin.lock(), std::io::stdout())
                .map_err(|e| Error::io("<stdin>", e))?;
            if !proceed {
                eprintln!("Nothing written.");
                return Ok(());
            }
        }
    }

    let (written, update) = apply_generation(&files, &test_root, config, dry_run)?;
    let registered = update.as_ref().map(|u| u.report(dry_run));

    if json {
        let paths: Vec<String> = written.iter().map(|p| p.display().to_string()).collect();
        print_json(&serde_json::json!({
            "class": class,
            "header": header_path.display().to_string(),
            "dryRun": dry_run,
            "files": files,
            "paths": paths,
            "project": registered,
        }));
        return Ok(());
    }

    let verb = if dry_run { "Would write" } else { "Wrote" };
    for path in &written {
        println!("{verb} {}", path.display());
    }
    if let Some(report) = registered {
        println!("{}", report["message"].as_str().unwrap_or_default());
    }
    eprintln!("\n{} methods from {}", files.methods.len(), header_path.display());
    Ok(())
}

/// Destination of each generated file: fixtures under `<test_root>/<app_group>/`,
/// unit tests under `<test_root>/UnitTests/`.
fn target_paths<'a>(
    files: &'a FileSet,
    test_root: &Path,
    app_group: &str,
) -> Vec<(PathBuf, &'a str)> {
    files
        .files()
        .into_iter()
        .map(|(role, file)| {
            let folder = if role.is_unit_tests() { UNIT_TESTS_DIR } else { app_group };
            (test_root.join(folder).join(&file.file_name), file.file_text.as_str())
        })
        .collect()
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut s: OsString = path.as_os_str().to_owned();
    s.push(suffix);
    PathBuf::from(s)
}

/// Project and filters documents as read, plus the splice computed from them.
#[derive(Debug)]
struct ProjectUpdate {
    project_path: PathBuf,
    filters_path: PathBuf,
    project: String,
    filters: String,
    outcome: SpliceOutcome,
}

impl ProjectUpdate {
    fn report(&self, dry_run: bool) -> serde_json::Value {
        match &self.outcome {
            SpliceOutcome::AlreadyPresent { document, file_name } => serde_json::json!({
                "status": "alreadyPresent",
                "document": document,
                "message": format!("{file_name} is already in the {document}, project left unchanged"),
            }),
            SpliceOutcome::Applied(_) => {
                let verb = if dry_run { "Would update" } else { "Updated" };
                serde_json::json!({
                    "status": "applied",
                    "message": format!(
                        "{verb} {} and {}",
                        self.project_path.display(),
                        self.filters_path.display()
                    ),
                })
            }
        }
    }
}

/// Produce every output of one `generate` run.
///
/// The project splice is computed first; if it fails nothing is written.
/// Otherwise the scaffold files go to disk, then a `.bak` copy of both
/// documents, then both updated documents.
fn apply_generation(
    files: &FileSet,
    test_root: &Path,
    config: &Config,
    dry_run: bool,
) -> Result<(Vec<PathBuf>, Option<ProjectUpdate>)> {
    let targets = target_paths(files, test_root, &config.app_group);
    let update = match &config.project_path {
        Some(project_path) => Some(plan_project_update(project_path, files, test_root, config)?),
        None => None,
    };

    if !dry_run {
        for (path, text) in &targets {
            if let Some(dir) = path.parent() {
                std::fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
            }
            std::fs::write(path, text).map_err(|e| Error::io(path, e))?;
            debug!(path = %path.display(), "Wrote file");
        }
        if let Some(update) = &update {
            write_project_update(update)?;
        }
    }

    Ok((targets.into_iter().map(|(p, _)| p).collect(), update))
}

fn plan_project_update(
    project_path: &Path,
    files: &FileSet,
    test_root: &Path,
    config: &Config,
) -> Result<ProjectUpdate> {
    let filters_path = with_suffix(project_path, ".filters");
    let project = std::fs::read_to_string(project_path).map_err(|e| Error::io(project_path, e))?;
    let filters = std::fs::read_to_string(&filters_path).map_err(|e| Error::io(&filters_path, e))?;

    let outcome =
        register_files(files, &project, &filters, &test_root.to_string_lossy(), config)?;
    if let SpliceOutcome::AlreadyPresent { document, file_name } = &outcome {
        info!(%document, file = file_name.as_str(), "Project already lists the files");
    }
    Ok(ProjectUpdate { project_path: project_path.to_path_buf(), filters_path, project, filters, outcome })
}

/// Both backups are written before either document is replaced.
fn write_project_update(update: &ProjectUpdate) -> Result<()> {
    let SpliceOutcome::Applied(docs) = &update.outcome else {
        return Ok(());
    };
    let documents = [
        (update.project_path.as_path(), &update.project, &docs.project),
        (update.filters_path.as_path(), &update.filters, &docs.filters),
    ];
    for (path, original, _) in &documents {
        let backup = with_suffix(path, ".bak");
        std::fs::write(&backup, original).map_err(|e| Error::io(&backup, e))?;
    }
    for (path, _, updated) in &documents {
        std::fs::write(path, updated).map_err(|e| Error::io(path, e))?;
        debug!(path = %path.display(), "Updated project document");
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// methods
// ---------------------------------------------------------------------------

fn run_methods(header: &Path, class: &str, json: bool) -> Result<()> {
    let text = std::fs::read_to_string(header).map_err(|e| Error::io(header, e))?;
    let methods = extract_methods(public_section(&text));
    let names = display_names(class, &methods);

    if json {
        let items: Vec<serde_json::Value> = methods
            .iter()
            .zip(&names)
            .map(|(m, display)| {
                serde_json::json!({
                    "name": m.name,
                    "signature": m.signature,
                    "display": display,
                })
            })
            .collect();
        print_json(&serde_json::Value::Array(items));
        return Ok(());
    }

    if methods.is_empty() {
        eprintln!("No documented methods in {}", header.display());
        return Ok(());
    }
    for (m, display) in methods.iter().zip(&names) {
        println!("{:<32} {}", display, m.signature_or_placeholder());
    }
    eprintln!("\n{} methods", methods.len());
    Ok(())
}
