use super::error::InitError;
use super::process::{Invocation, Runner};
use semver::{Version, VersionReq};

/// Checks the external `node` found on PATH via `node --version`; that probe
/// is the only call made when the guard fails.
pub fn check_node_version<R: Runner>(
    runner: &R,
    required: &VersionReq,
) -> Result<Version, InitError> {
    let raw = runner.probe(&Invocation::new("node", &["--version"]));
    let detected = raw.as_deref().map(str::trim).unwrap_or_default();

    match parse_node_version(detected) {
        Some(version) if required.matches(&version) => {
            log::debug!("Node {} satisfies {}", version, required);
            Ok(version)
        }
        _ => Err(InitError::UnsupportedNode {
            detected: if detected.is_empty() {
                "(not installed)".to_string()
            } else {
                detected.to_string()
            },
            required: required.clone(),
        }),
    }
}

pub fn check_docker<R: Runner>(runner: &R) -> Result<(), InitError> {
    runner
        .probe(&Invocation::new("docker", &["ps"]))
        .map(|_| ())
        .ok_or(InitError::DockerUnavailable)
}

/// `node --version` prints e.g. `v18.19.0`.
fn parse_node_version(raw: &str) -> Option<Version> {
    let trimmed = raw.trim();
    let bare = trimmed.strip_prefix('v').unwrap_or(trimmed);
    Version::parse(bare).ok()
}
