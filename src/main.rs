use clap::Parser;
use std::fs;
use std::path::PathBuf;
use std::process;
use tfvars_atlantis::{
    cli::{Cli, Commands, GenerateFlags},
    config::{self, types::Config},
    discovery,
    error::GeneratorError,
    generator::{self, multienv, EnvSnapshot},
};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> tfvars_atlantis::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    cli.init_logging();

    // Load configuration
    let config = config::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Generate {
            root,
            output,
            autoplan,
            automerge,
            parallel,
            multienv,
            terraform_version,
            use_workspaces,
        } => {
            let flags = GenerateFlags {
                autoplan,
                automerge,
                parallel,
                multienv,
                terraform_version,
                use_workspaces,
            };
            handle_generate(config, root, output, flags, cli.json)
        }
        Commands::Multienv => handle_multienv(),
        Commands::Version => {
            println!("{}", tfvars_atlantis::VERSION);
            Ok(())
        }
    }
}

fn handle_generate(
    config: Config,
    root: PathBuf,
    output: Option<PathBuf>,
    flags: GenerateFlags,
    json: bool,
) -> tfvars_atlantis::Result<()> {
    let options = flags.apply_to(config.generation);
    log::debug!("Generating with options: {:?}", options);

    let associations = discovery::discover(&root, &config.discovery)?;

    let env = if options.multi_env {
        EnvSnapshot::capture()
    } else {
        EnvSnapshot::default()
    };
    let repo_config = generator::generate_repo_config(&associations, &options, &env)?;
    let rendered = generator::render(&repo_config, json)?;

    match output {
        Some(path) => {
            log::debug!("Writing config to {}", path.display());
            fs::write(&path, rendered)?;
        }
        None => print!("{}", rendered),
    }

    Ok(())
}

fn handle_multienv() -> tfvars_atlantis::Result<()> {
    let env = EnvSnapshot::capture();

    let workspace = env
        .get(multienv::WORKSPACE_ENV_VAR)
        .filter(|workspace| !workspace.is_empty())
        .ok_or_else(|| GeneratorError::MissingWorkspace(multienv::WORKSPACE_ENV_VAR.to_string()))?;

    match multienv::strip_prefixed(workspace, &env) {
        // Atlantis reads the multienv string from stdout
        Some(exports) => print!("{}", exports),
        None => log::debug!("No environment variables prefixed with {}", workspace),
    }

    Ok(())
}
