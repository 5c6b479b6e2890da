//! Progress reporting for a synchronisation run.
//!
//! The synchroniser reports its stages through the [`Progress`] trait instead of
//! printing, so the core stays testable without capturing console output.
//! Two renderings ship with the crate: [`TracingProgress`] (structured tracing
//! events) and [`ActionsProgress`] (GitHub Actions workflow commands, which
//! fold each stage into a collapsible log group).

use std::io::Write;

pub trait Progress: Send + Sync {
    /// Open a named section; sections do not nest.
    fn start_group(&self, title: &str);
    fn end_group(&self);
    fn info(&self, message: &str);
    fn debug(&self, message: &str);
    /// Report the failure that ends the run.
    fn error(&self, message: &str);
}

/// Emits every progress call as a tracing event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingProgress;

impl Progress for TracingProgress {
    fn start_group(&self, title: &str) {
        tracing::info!(group = %title, "[SYNC] >> {title}");
    }

    fn end_group(&self) {
        tracing::debug!("[SYNC] <<");
    }

    fn info(&self, message: &str) {
        tracing::info!("[SYNC] {message}");
    }

    fn debug(&self, message: &str) {
        tracing::debug!("[SYNC] {message}");
    }

    fn error(&self, message: &str) {
        tracing::error!("[SYNC][ERROR] {message}");
    }
}

/// Writes `::group::` / `::endgroup::` / `::debug::` / `::error::` workflow commands to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct ActionsProgress;

impl ActionsProgress {
    fn emit(&self, line: &str) {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        // A closed stdout must not abort the sync.
        let _ = writeln!(out, "{line}");
    }
}

impl Progress for ActionsProgress {
    fn start_group(&self, title: &str) {
        self.emit(&format!("::group::{title}"));
    }

    fn end_group(&self) {
        self.emit("::endgroup::");
    }

    fn info(&self, message: &str) {
        self.emit(message);
    }

    fn debug(&self, message: &str) {
        self.emit(&format!("::debug::{message}"));
    }

    fn error(&self, message: &str) {
        self.emit(&format!("::error::{message}"));
    }
}
