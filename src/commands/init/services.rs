use super::error::InitError;
use super::process::{Invocation, Runner};
use serde::Serialize;
use std::collections::BTreeMap;

pub const SERVICES_HOST: &str = "localhost";
pub const MONGO_PORT: u16 = 27017;
pub const ELASTICSEARCH_PORT: u16 = 9200;
const REDIS_PORT: u16 = 6379;
const RABBITMQ_PORT: u16 = 5672;

const COMPOSE_PROJECT: &str = "openpaas";

#[derive(Debug, Serialize)]
struct ComposeFile {
    services: BTreeMap<&'static str, ComposeService>,
}

#[derive(Debug, Serialize)]
struct ComposeService {
    image: &'static str,
    container_name: String,
    ports: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    environment: BTreeMap<&'static str, &'static str>,
}

impl ComposeService {
    fn new(name: &str, image: &'static str, port: u16) -> Self {
        ComposeService {
            image,
            container_name: format!("{}-{}", COMPOSE_PROJECT, name),
            ports: vec![format!("{port}:{port}")],
            environment: BTreeMap::new(),
        }
    }
}

/// Render the compose manifest for the datastore, search engine, cache and
/// message broker OpenPaaS talks to.
fn compose_manifest() -> Result<String, serde_yaml::Error> {
    let mut elasticsearch = ComposeService::new(
        "elasticsearch",
        "linagora/esn-elasticsearch:latest",
        ELASTICSEARCH_PORT,
    );
    elasticsearch
        .environment
        .insert("ES_JAVA_OPTS", "-Xms512m -Xmx512m");

    let services = BTreeMap::from([
        ("mongo", ComposeService::new("mongo", "mongo:3.4", MONGO_PORT)),
        ("elasticsearch", elasticsearch),
        ("redis", ComposeService::new("redis", "redis:3", REDIS_PORT)),
        (
            "rabbitmq",
            ComposeService::new("rabbitmq", "rabbitmq:3.6-management", RABBITMQ_PORT),
        ),
    ]);

    serde_yaml::to_string(&ComposeFile { services })
}

/// Pipe the manifest into `docker compose ... up -d`.
pub fn start<R: Runner>(runner: &R) -> Result<(), InitError> {
    let manifest = compose_manifest()?;

    runner.run(
        &Invocation::new(
            "docker",
            &["compose", "-p", COMPOSE_PROJECT, "-f", "-", "up", "-d"],
        )
        .with_stdin(manifest),
    )
}
