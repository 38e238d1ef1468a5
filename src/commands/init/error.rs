use semver::VersionReq;
use std::io;
use thiserror::Error;

/// Node.js is missing or older than required.
pub const EXIT_NODE_VERSION: u8 = 1;
/// `docker ps` could not be run successfully.
pub const EXIT_DOCKER: u8 = 2;
/// A delegated program could not be launched at all.
pub const EXIT_LAUNCH_FAILED: u8 = 127;
/// Failure inside this tool rather than in a delegated program (`EX_SOFTWARE`).
pub const EXIT_INTERNAL: u8 = 70;

#[derive(Debug, Error)]
pub enum InitError {
    #[error(
        "You are currently running Node {detected} but OpenPaaS requires {required}. \
         Please use a supported version of Node."
    )]
    UnsupportedNode {
        detected: String,
        required: VersionReq,
    },

    #[error("Docker is not reachable, make sure the Docker daemon is running")]
    DockerUnavailable,

    #[error("`{command}` exited with code {code}")]
    StepFailed { command: String, code: u8 },

    #[error("failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to render services manifest: {0}")]
    Manifest(#[from] serde_yaml::Error),

    #[error("unable to determine current directory: {0}")]
    CurrentDir(#[source] io::Error),
}

impl InitError {
    pub fn exit_code(&self) -> u8 {
        match self {
            InitError::UnsupportedNode { .. } => EXIT_NODE_VERSION,
            InitError::DockerUnavailable => EXIT_DOCKER,
            InitError::StepFailed { code, .. } => *code,
            InitError::Launch { .. } => EXIT_LAUNCH_FAILED,
            InitError::Manifest(_) | InitError::CurrentDir(_) => EXIT_INTERNAL,
        }
    }

    /// Precondition failures get a diagnostic; everything else already
    /// printed its own output.
    pub fn is_guard(&self) -> bool {
        matches!(
            self,
            InitError::UnsupportedNode { .. } | InitError::DockerUnavailable
        )
    }
}
