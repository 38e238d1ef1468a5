//! Test-only `Runner` that records invocations instead of spawning them.

use super::error::InitError;
use super::process::{Invocation, Runner};
use std::cell::RefCell;
use std::collections::HashMap;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    Run(Invocation),
    Probe(Invocation),
}

impl Call {
    pub fn invocation(&self) -> &Invocation {
        match self {
            Call::Run(inv) | Call::Probe(inv) => inv,
        }
    }
}

/// Probes answer from `probes` keyed by program name (missing = not
/// installed). Runs succeed unless their command line starts with a
/// prefix registered in `failures`.
#[derive(Default)]
pub struct FakeRunner {
    probes: HashMap<String, String>,
    failures: Vec<(String, u8)>,
    calls: RefCell<Vec<Call>>,
}

impl FakeRunner {
    /// Node, Docker and yarn all present.
    pub fn healthy() -> Self {
        FakeRunner::default()
            .with_probe("node", "v18.19.0\n")
            .with_probe("docker", "CONTAINER ID   IMAGE\n")
            .with_probe("yarn", "1.22.19\n")
    }

    pub fn with_probe(mut self, program: &str, stdout: &str) -> Self {
        self.probes.insert(program.to_string(), stdout.to_string());
        self
    }

    pub fn without_probe(mut self, program: &str) -> Self {
        self.probes.remove(program);
        self
    }

    pub fn failing(mut self, command_prefix: &str, code: u8) -> Self {
        self.failures.push((command_prefix.to_string(), code));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    /// Command lines of inherited-stdio runs, in order.
    pub fn runs(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                Call::Run(inv) => Some(inv.to_string()),
                Call::Probe(_) => None,
            })
            .collect()
    }
}

impl Runner for FakeRunner {
    fn run(&self, invocation: &Invocation) -> Result<(), InitError> {
        self.calls.borrow_mut().push(Call::Run(invocation.clone()));
        let command = invocation.to_string();
        match self
            .failures
            .iter()
            .find(|(prefix, _)| command.starts_with(prefix.as_str()))
        {
            Some((_, code)) => Err(InitError::StepFailed {
                command,
                code: *code,
            }),
            None => Ok(()),
        }
    }

    fn probe(&self, invocation: &Invocation) -> Option<String> {
        self.calls.borrow_mut().push(Call::Probe(invocation.clone()));
        self.probes.get(&invocation.program).cloned()
    }
}
