//! Subshell control seam and session bookkeeping.
//!
//! Some commands prepare environment state (start a server, export a
//! variable) before the next recording begins. The process control itself
//! is a collaborator behind [`SubshellController`]; its only contract with
//! the core is that each call completes before the next render starts.
//!
//! Session labels are tracked in a [`SessionTable`] owned by the pipeline,
//! so there is no process-wide registry of live subshells.

use std::collections::BTreeSet;

use thiserror::Error;

/// Errors from subshell control or session bookkeeping.
#[derive(Debug, Error)]
pub enum ShellError {
    /// A subshell with this label already exists.
    #[error("A subshell with label '{0}' already exists")]
    DuplicateSession(String),

    /// No subshell with this label was started.
    #[error("No subshell with label '{0}'")]
    UnknownSession(String),

    /// The controller failed to spawn, drive, or terminate the subshell.
    #[error("Subshell '{label}' failed: {message}")]
    Controller { label: String, message: String },
}

impl ShellError {
    pub fn controller(label: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Controller {
            label: label.into(),
            message: message.into(),
        }
    }
}

/// A collaborator that drives labelled subshell processes.
///
/// Every call blocks until the subshell has finished the requested action.
pub trait SubshellController {
    /// Start a new subshell under the given label.
    fn start(&mut self, label: &str) -> Result<(), ShellError>;

    /// Run a command in the labelled subshell, optionally waiting until the
    /// expected output appears.
    fn run(&mut self, label: &str, command: &str, expect: Option<&str>) -> Result<(), ShellError>;

    /// Terminate the labelled subshell.
    fn terminate(&mut self, label: &str) -> Result<(), ShellError>;
}

/// Labels of the subshells a run has started and not yet terminated.
///
/// Owned by the pipeline for the duration of one generation run.
#[derive(Debug, Default)]
pub struct SessionTable {
    labels: BTreeSet<String>,
}

impl SessionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a newly started subshell. Duplicate labels are an error.
    pub fn register(&mut self, label: &str) -> Result<(), ShellError> {
        if !self.labels.insert(label.to_string()) {
            return Err(ShellError::DuplicateSession(label.to_string()));
        }
        Ok(())
    }

    /// Check that a subshell with this label is live.
    pub fn ensure(&self, label: &str) -> Result<(), ShellError> {
        if !self.labels.contains(label) {
            return Err(ShellError::UnknownSession(label.to_string()));
        }
        Ok(())
    }

    /// Remove a terminated subshell. Unknown labels are an error.
    pub fn release(&mut self, label: &str) -> Result<(), ShellError> {
        if !self.labels.remove(label) {
            return Err(ShellError::UnknownSession(label.to_string()));
        }
        Ok(())
    }

    /// Labels still live at the end of a run.
    pub fn active(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_ensure_release_round_trip() {
        let mut table = SessionTable::new();
        table.register("server").unwrap();
        table.ensure("server").unwrap();
        table.release("server").unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn duplicate_label_rejected() {
        let mut table = SessionTable::new();
        table.register("server").unwrap();
        let err = table.register("server").unwrap_err();
        assert!(matches!(err, ShellError::DuplicateSession(_)));
    }

    #[test]
    fn unknown_label_rejected() {
        let mut table = SessionTable::new();
        assert!(matches!(
            table.ensure("nope").unwrap_err(),
            ShellError::UnknownSession(_)
        ));
        assert!(matches!(
            table.release("nope").unwrap_err(),
            ShellError::UnknownSession(_)
        ));
    }
}
