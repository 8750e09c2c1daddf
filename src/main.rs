//! CLI entry point for the AutoMaker utilities (amk).

use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;

use automaker_utils::cli::{Cli, Command, FeaturesCommand};
use automaker_utils::cli_probe::{detect_all, detect_cli, CliStatus};
use automaker_utils::config::{resolve_config, AutomakerConfig};
use automaker_utils::paths;
use automaker_utils::security::{self, fs::secure_read_to_string, fs::secure_write};
use automaker_utils::spec_xml::{
    extract_implemented_feature_names, extract_implemented_features, SpecXmlEditor,
};
use automaker_utils::utils::init_debug_logging;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse_args();

    // Initialize logging
    init_debug_logging(cli.debug);

    // Load configuration. An explicit settings path must exist.
    let loaded = resolve_config(cli.settings.as_deref()).with_context(|| match cli.settings {
        Some(ref path) => format!("Error loading config from {}", path.display()),
        None => "Error loading default config".to_string(),
    });
    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{:#}", e);
            return ExitCode::from(1);
        }
    };

    security::init_allowed_paths(&config);

    match run(&cli, &config).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

async fn run(cli: &Cli, config: &AutomakerConfig) -> anyhow::Result<ExitCode> {
    match cli.command {
        Command::Features(ref command) => {
            let project = cli.get_project_path().context("cannot determine project directory")?;
            run_features(&project, command)
        }
        Command::CheckCli { provider, json } => {
            let statuses = match provider {
                Some(provider) => vec![detect_cli(provider, config).await],
                None => detect_all(config).await,
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&statuses)?);
            } else {
                for status in &statuses {
                    print_status(status);
                }
            }

            let all_installed = statuses.iter().all(|s| s.installed);
            Ok(if all_installed {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            })
        }
        Command::Paths => {
            let project = cli.get_project_path().context("cannot determine project directory")?;
            println!("automaker dir:  {}", paths::automaker_dir(&project).display());
            println!("app spec:       {}", paths::app_spec_path(&project).display());
            println!("features dir:   {}", paths::features_dir(&project).display());
            println!("context dir:    {}", paths::context_dir(&project).display());
            println!("worktrees dir:  {}", paths::worktrees_dir(&project).display());
            if let Some(data_dir) = config
                .data_dir
                .as_ref()
                .map(std::path::PathBuf::from)
                .or_else(paths::default_data_dir)
            {
                println!("data dir:       {}", data_dir.display());
            }
            match security::allowed_root_directory() {
                Some(root) => println!("allowed root:   {}", root.display()),
                None => println!("allowed root:   (unrestricted)"),
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn run_features(project: &Path, command: &FeaturesCommand) -> anyhow::Result<ExitCode> {
    let spec_path = paths::app_spec_path(project);
    let document = secure_read_to_string(&spec_path)
        .with_context(|| format!("failed to read {}", spec_path.display()))?;
    let editor = SpecXmlEditor::new();

    let updated = match command {
        FeaturesCommand::List { json } => {
            let features = extract_implemented_features(&document);
            if *json {
                println!("{}", serde_json::to_string_pretty(&features)?);
            } else {
                for feature in &features {
                    println!("{}", feature.name);
                    if !feature.description.is_empty() {
                        println!("    {}", feature.description);
                    }
                    for location in feature.locations() {
                        println!("    - {}", location);
                    }
                }
            }
            return Ok(ExitCode::SUCCESS);
        }
        FeaturesCommand::Names => {
            for name in extract_implemented_feature_names(&document) {
                println!("{}", name);
            }
            return Ok(ExitCode::SUCCESS);
        }
        FeaturesCommand::Update(args) if args.to_update().is_empty() => {
            eprintln!("Nothing to update for '{}'", args.name);
            return Ok(ExitCode::from(1));
        }
        FeaturesCommand::Add(args) => editor.add_feature(&document, &args.to_feature()),
        FeaturesCommand::Remove { name } => editor.remove_feature(&document, name),
        FeaturesCommand::Update(args) => editor.update_feature(&document, &args.name, &args.to_update()),
    };

    if updated == document {
        eprintln!("No changes made to {}", spec_path.display());
        return Ok(ExitCode::from(1));
    }

    secure_write(&spec_path, &updated)
        .with_context(|| format!("failed to write {}", spec_path.display()))?;
    tracing::info!("Updated {}", spec_path.display());

    Ok(ExitCode::SUCCESS)
}

fn print_status(status: &CliStatus) {
    let installed = match (&status.path, &status.version) {
        (Some(path), Some(version)) => format!("installed at {} (v{})", path, version),
        (Some(path), None) => format!("installed at {}", path),
        _ => "not installed".to_string(),
    };
    let auth = if status.auth.authenticated {
        "authenticated"
    } else {
        "not authenticated"
    };
    println!("{:<8} {}, {}", status.provider.to_string(), installed, auth);
}
