use super::error::InitError;
use super::process::{Invocation, Runner};
use std::path::Path;

/// Build tools OpenPaaS expects to find globally.
const GLOBAL_TOOLS: [&str; 2] = ["grunt-cli", "bower"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PackageManager {
    Yarn,
    Npm,
}

impl PackageManager {
    /// Yarn unless npm is forced or yarn doesn't answer `--version`.
    pub fn select<R: Runner>(runner: &R, force_npm: bool) -> Self {
        if !force_npm && yarn_available(runner) {
            PackageManager::Yarn
        } else {
            PackageManager::Npm
        }
    }

    pub fn program(self) -> &'static str {
        match self {
            PackageManager::Yarn => "yarn",
            PackageManager::Npm => "npm",
        }
    }

    fn global_install(self) -> Invocation {
        let mut args: Vec<&str> = match self {
            PackageManager::Yarn => vec!["global", "add"],
            PackageManager::Npm => vec!["i", "-g"],
        };
        args.extend(GLOBAL_TOOLS);
        Invocation::new(self.program(), &args)
    }

    fn local_install(self) -> Invocation {
        match self {
            PackageManager::Yarn => Invocation::new("yarn", &[]),
            PackageManager::Npm => Invocation::new("npm", &["i"]),
        }
    }

    pub fn install<R: Runner>(self, runner: &R, project_dir: &Path) -> Result<(), InitError> {
        runner.run(&self.global_install().in_dir(project_dir))?;
        runner.run(&self.local_install().in_dir(project_dir))
    }
}

fn yarn_available<R: Runner>(runner: &R) -> bool {
    runner
        .probe(&Invocation::new("yarn", &["--version"]))
        .is_some_and(|version| !version.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::super::test_support::FakeRunner;
    use super::*;

    #[test]
    fn prefers_yarn_when_available() {
        let runner = FakeRunner::healthy();
        assert_eq!(PackageManager::select(&runner, false), PackageManager::Yarn);
    }

    #[test]
    fn with_npm_forces_npm_even_if_yarn_is_present() {
        let runner = FakeRunner::healthy();
        assert_eq!(PackageManager::select(&runner, true), PackageManager::Npm);
    }

    #[test]
    fn falls_back_to_npm_without_yarn() {
        let runner = FakeRunner::healthy().without_probe("yarn");
        assert_eq!(PackageManager::select(&runner, false), PackageManager::Npm);

        let blank = FakeRunner::healthy().with_probe("yarn", "  \n");
        assert_eq!(PackageManager::select(&blank, false), PackageManager::Npm);
    }

    #[test]
    fn yarn_install_commands_run_in_project() {
        let runner = FakeRunner::default();
        let dir = Path::new("/work/openpaas");
        PackageManager::Yarn.install(&runner, dir).unwrap();

        assert_eq!(runner.runs(), vec!["yarn global add grunt-cli bower", "yarn"]);
        assert!(runner
            .calls()
            .iter()
            .all(|call| call.invocation().cwd.as_deref() == Some(dir)));
    }

    #[test]
    fn npm_install_commands() {
        let runner = FakeRunner::default();
        PackageManager::Npm
            .install(&runner, Path::new("/work/openpaas"))
            .unwrap();
        assert_eq!(runner.runs(), vec!["npm i -g grunt-cli bower", "npm i"]);
    }

    #[test]
    fn failed_global_install_skips_local_install() {
        let runner = FakeRunner::default().failing("npm i -g", 243);
        let err = PackageManager::Npm
            .install(&runner, Path::new("/work/openpaas"))
            .unwrap_err();
        assert_eq!(err.exit_code(), 243);
        assert_eq!(runner.runs(), vec!["npm i -g grunt-cli bower"]);
    }
}
