//! CLI parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::cli_probe::CliProvider;
use crate::spec_xml::{FeatureUpdate, ImplementedFeature};

/// AutoMaker utilities - app spec editing and agent CLI checks
#[derive(Parser, Debug)]
#[command(name = "amk")]
#[command(about = "AutoMaker utilities - edit app spec features and check agent CLIs")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short = 'd', long = "debug", global = true)]
    pub debug: bool,

    /// Path to settings file (default: <data dir>/settings.json)
    #[arg(short = 's', long = "settings", global = true)]
    pub settings: Option<PathBuf>,

    /// Project directory (default: current directory)
    #[arg(short = 'p', long = "project", global = true)]
    pub project: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Read or edit the implemented features of the app spec
    #[command(subcommand)]
    Features(FeaturesCommand),

    /// Detect agent CLIs and their authentication status
    CheckCli {
        /// Only check this provider (claude, codex, cursor)
        provider: Option<CliProvider>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print the AutoMaker paths for the project
    Paths,
}

#[derive(Subcommand, Debug)]
pub enum FeaturesCommand {
    /// List implemented features
    List {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print implemented feature names, one per line
    Names,

    /// Add a feature (no-op if the name exists)
    Add(FeatureArgs),

    /// Remove a feature by name
    Remove {
        name: String,
    },

    /// Update fields of a feature
    Update(UpdateArgs),
}

#[derive(Args, Debug)]
pub struct FeatureArgs {
    /// Feature name
    #[arg(long)]
    pub name: String,

    /// Feature description
    #[arg(long, default_value = "")]
    pub description: String,

    /// File location (repeatable)
    #[arg(long = "location")]
    pub locations: Vec<String>,
}

impl FeatureArgs {
    pub fn to_feature(&self) -> ImplementedFeature {
        ImplementedFeature::new(self.name.clone(), self.description.clone())
            .with_file_locations(self.locations.iter().cloned())
    }
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Name of the feature to update
    pub name: String,

    /// Rename the feature
    #[arg(long)]
    pub new_name: Option<String>,

    /// New description
    #[arg(long)]
    pub description: Option<String>,

    /// Replace file locations (repeatable)
    #[arg(long = "location", conflicts_with = "clear_locations")]
    pub locations: Vec<String>,

    /// Remove all file locations
    #[arg(long)]
    pub clear_locations: bool,
}

impl UpdateArgs {
    pub fn to_update(&self) -> FeatureUpdate {
        let file_locations = if self.clear_locations {
            Some(Vec::new())
        } else if self.locations.is_empty() {
            None
        } else {
            Some(self.locations.clone())
        };

        FeatureUpdate {
            name: self.new_name.clone(),
            description: self.description.clone(),
            file_locations,
        }
    }
}

impl Cli {
    /// Parse CLI arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }


    /// Get the project directory.
    pub fn get_project_path(&self) -> std::io::Result<PathBuf> {
        match self.project {
            Some(ref project) => Ok(project.clone()),
            None => std::env::current_dir(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add() {
        let cli = Cli::try_parse_from([
            "amk", "-p", "/work/app", "features", "add", "--name", "Login", "--description",
            "Email auth", "--location", "src/a.rs", "--location", "src/b.rs",
        ])
        .unwrap();

        assert_eq!(cli.project, Some(PathBuf::from("/work/app")));
        match cli.command {
            Command::Features(FeaturesCommand::Add(args)) => {
                let feature = args.to_feature();
                assert_eq!(feature.name, "Login");
                assert_eq!(feature.locations().len(), 2);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_update() {
        let cli = Cli::try_parse_from([
            "amk", "features", "update", "Login", "--description", "OAuth", "--clear-locations",
        ])
        .unwrap();

        match cli.command {
            Command::Features(FeaturesCommand::Update(args)) => {
                let update = args.to_update();
                assert_eq!(update.name, None);
                assert_eq!(update.description.as_deref(), Some("OAuth"));
                assert_eq!(update.file_locations, Some(vec![]));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_names() {
        let cli = Cli::try_parse_from(["amk", "features", "names", "-p", "/work/app"]).unwrap();
        assert!(matches!(cli.command, Command::Features(FeaturesCommand::Names)));
        assert_eq!(cli.project, Some(PathBuf::from("/work/app")));
    }

    #[test]
    fn test_update_without_fields_is_empty() {
        let cli = Cli::try_parse_from(["amk", "features", "update", "Login"]).unwrap();
        match cli.command {
            Command::Features(FeaturesCommand::Update(args)) => {
                assert!(args.to_update().is_empty());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_check_cli() {
        let cli = Cli::try_parse_from(["amk", "check-cli", "codex", "--json", "-d"]).unwrap();
        assert!(cli.debug);
        match cli.command {
            Command::CheckCli { provider, json } => {
                assert_eq!(provider, Some(CliProvider::Codex));
                assert!(json);
            }
            other => panic!("unexpected command: {:?}", other),
        }

        assert!(Cli::try_parse_from(["amk", "check-cli", "gemini"]).is_err());
    }
}
