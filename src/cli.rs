use crate::config::types::GenerationOptions;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tfvars-atlantis")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Generate Atlantis config for tfvars backed Terraform projects")]
#[command(long_about = "Generates an Atlantis repo-level configuration for Terraform projects that use a tfvars file per environment. Every Terraform component and variable file pair becomes an Atlantis project with its own plan/apply workflow.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Enable debug logging, same as -vv
    #[arg(long, global = true)]
    pub debug: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output in JSON format where applicable
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate Atlantis config for the Terraform components under a directory
    Generate {
        /// Path to the root directory of the repo to build config for
        #[arg(long, value_name = "DIR", default_value = ".")]
        root: PathBuf,

        /// File to write the configuration to. Default is stdout
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Enable auto plan
        #[arg(long)]
        autoplan: bool,

        /// Enable auto merge
        #[arg(long)]
        automerge: bool,

        /// Run plans and applies in parallel
        #[arg(long)]
        parallel: bool,

        /// Inject environment specific environment variables into each workflow
        #[arg(long)]
        multienv: bool,

        /// Default Terraform version for every project
        #[arg(long, value_name = "VERSION")]
        terraform_version: Option<String>,

        /// Use a Terraform workspace per variable file
        #[arg(long)]
        use_workspaces: bool,
    },

    /// Print the multienv string for the workspace in $WORKSPACE
    ///
    /// Every variable prefixed with the workspace name is exported without
    /// the prefix, e.g. DEV_AWS_REGION=eu-west-1 becomes AWS_REGION=eu-west-1.
    Multienv,

    /// Print the version number
    Version,
}

/// Generation flags given on the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateFlags {
    pub autoplan: bool,
    pub automerge: bool,
    pub parallel: bool,
    pub multienv: bool,
    pub terraform_version: Option<String>,
    pub use_workspaces: bool,
}

impl GenerateFlags {
    /// Overlays the flags on options loaded from the config file.
    ///
    /// A toggle is on when either side enables it; a non-empty version
    /// replaces the configured one.
    pub fn apply_to(&self, mut options: GenerationOptions) -> GenerationOptions {
        options.autoplan |= self.autoplan;
        options.automerge |= self.automerge;
        options.parallel |= self.parallel;
        options.multi_env |= self.multienv;
        options.use_workspaces |= self.use_workspaces;

        if let Some(version) = self.terraform_version.as_ref().filter(|v| !v.is_empty()) {
            options.default_terraform_version = version.clone();
        }

        options
    }
}

impl Cli {
    /// Initialize logging based on verbosity level
    pub fn init_logging(&self) {
        if self.quiet {
            return;
        }

        let level = match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };
        let level = if self.debug {
            level.max(log::LevelFilter::Debug)
        } else {
            level
        };

        env_logger::Builder::from_default_env()
            .filter_level(level)
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_generate() {
        let cli = Cli::try_parse_from([
            "tfvars-atlantis",
            "generate",
            "--root",
            "infra",
            "--autoplan",
            "--terraform-version",
            "1.5.7",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Generate {
                root,
                autoplan,
                parallel,
                terraform_version,
                ..
            } => {
                assert_eq!(root, PathBuf::from("infra"));
                assert!(autoplan);
                assert!(!parallel);
                assert_eq!(terraform_version.as_deref(), Some("1.5.7"));
            }
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn test_parse_version_with_debug() {
        let cli = Cli::try_parse_from(["tfvars-atlantis", "version", "--debug"]).unwrap();

        assert!(cli.debug);
        assert_eq!(cli.verbose, 0);
        assert!(matches!(cli.command, Commands::Version));

        let cli = Cli::try_parse_from(["tfvars-atlantis", "--debug", "multienv"]).unwrap();
        assert!(cli.debug);
        assert!(matches!(cli.command, Commands::Multienv));
    }

    #[test]
    fn test_flags_overlay_config() {
        let configured = GenerationOptions {
            parallel: true,
            default_terraform_version: "1.4.0".to_string(),
            ..Default::default()
        };
        let flags = GenerateFlags {
            autoplan: true,
            terraform_version: Some("1.5.7".to_string()),
            ..Default::default()
        };

        let options = flags.apply_to(configured.clone());
        assert!(options.autoplan);
        assert!(options.parallel);
        assert_eq!(options.default_terraform_version, "1.5.7");

        let options = GenerateFlags::default().apply_to(configured);
        assert_eq!(options.default_terraform_version, "1.4.0");
    }
}
