use super::error::InitError;
use super::process::{Invocation, Runner};
use super::services::{ELASTICSEARCH_PORT, MONGO_PORT, SERVICES_HOST};
use std::path::Path;

const PROJECT_CLI: &str = "./bin/cli";
const DATABASE_NAME: &str = "esn";
const ADMIN_EMAIL: &str = "admin@open-paas.org";

/// `node ./bin/cli <args>` run from the project root.
fn project_cli(project_dir: &Path, args: &[&str]) -> Invocation {
    let mut full = vec![PROJECT_CLI];
    full.extend_from_slice(args);
    Invocation::new("node", &full).in_dir(project_dir)
}

/// Database config, Elasticsearch indices, fixtures, then the platform admin.
fn setup_steps(project_dir: &Path) -> Vec<Invocation> {
    let mongo_port = MONGO_PORT.to_string();
    let es_port = ELASTICSEARCH_PORT.to_string();

    vec![
        project_cli(
            project_dir,
            &[
                "db",
                "--host",
                SERVICES_HOST,
                "--port",
                &mongo_port,
                "--database",
                DATABASE_NAME,
            ],
        ),
        project_cli(
            project_dir,
            &["elasticsearch", "--host", SERVICES_HOST, "--port", &es_port],
        ),
        project_cli(project_dir, &["populate"]),
        project_cli(
            project_dir,
            &["platformadmin", "init", "--email", ADMIN_EMAIL],
        ),
    ]
}

pub fn initialize<R: Runner>(runner: &R, project_dir: &Path) -> Result<(), InitError> {
    for step in setup_steps(project_dir) {
        runner.run(&step)?;
    }
    Ok(())
}
