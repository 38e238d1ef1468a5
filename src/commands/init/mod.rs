mod error;
mod guards;
mod openpaas;
mod package_manager;
mod process;
mod services;
#[cfg(test)]
mod test_support;

pub use error::InitError;

use clap::Args;
use package_manager::PackageManager;
use process::{Invocation, Runner, SystemRunner};
use semver::VersionReq;
use std::path::{Path, PathBuf};

pub const REPO_URL: &str = "https://github.com/linagora/openpaas-esn.git";
const DEFAULT_DIR: &str = "openpaas";
const REQUIRED_NODE_VERSION: &str = ">=6";

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Destination directory
    #[arg(long, short = 'd', default_value = DEFAULT_DIR)]
    pub dir: String,

    /// Force npm instead of yarn to install dependencies
    #[arg(long)]
    pub with_npm: bool,

    /// Git repository to clone
    #[arg(long, default_value = REPO_URL)]
    pub repo_url: String,

    /// Node.js version requirement checked before anything else
    #[arg(long, default_value = REQUIRED_NODE_VERSION)]
    pub node_version: VersionReq,
}

/// Everything a single bootstrap run needs, fixed before the first step.
#[derive(Clone, Debug)]
pub struct RunConfig {
    /// Clone target as given on the command line.
    pub destination: String,
    /// `destination` resolved against the working directory.
    pub project_root: PathBuf,
    pub force_npm: bool,
    pub repo_url: String,
    pub required_node: VersionReq,
}

impl RunConfig {
    pub fn from_args(args: &InitArgs, cwd: &Path) -> Self {
        RunConfig {
            destination: args.dir.clone(),
            project_root: cwd.join(&args.dir),
            force_npm: args.with_npm,
            repo_url: args.repo_url.clone(),
            required_node: args.node_version.clone(),
        }
    }
}

pub fn run(args: &InitArgs) -> Result<(), InitError> {
    let cwd = std::env::current_dir().map_err(InitError::CurrentDir)?;
    let config = RunConfig::from_args(args, &cwd);
    bootstrap(&SystemRunner, &config)
}

/// Guards first, then clone, install, services and project setup. Stops at
/// the first failure and leaves whatever was already done in place.
pub fn bootstrap<R: Runner>(runner: &R, config: &RunConfig) -> Result<(), InitError> {
    guards::check_node_version(runner, &config.required_node)?;
    guards::check_docker(runner)?;

    log::info!("Cloning {} into {}...", config.repo_url, config.destination);
    runner.run(&Invocation::new(
        "git",
        &["clone", "--depth=1", "--", &config.repo_url, &config.destination],
    ))?;

    let manager = PackageManager::select(runner, config.force_npm);
    log::info!("Installing dependencies with {}...", manager.program());
    manager.install(runner, &config.project_root)?;

    log::info!("Starting services with Docker...");
    services::start(runner)?;

    log::info!("Initializing OpenPaaS...");
    openpaas::initialize(runner, &config.project_root)?;

    log::info!("OpenPaaS is ready in {}", config.project_root.display());
    Ok(())
}
