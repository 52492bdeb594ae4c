//! Faultkit - Friendly fault diagnosis for student scripts
//!
//! A launcher supervises one guarded script run. When the run faults,
//! Faultkit classifies the fault, prints guidance a student can act on,
//! resolves the best-guess source location, renders the surrounding code,
//! and appends a record to a capped on-device log. A tripped stop token
//! cancels the run and bypasses the whole pipeline.
//!
//! # Example
//!
//! ```rust
//! use faultkit::{Fault, FaultCategory, Launcher, Outcome, StackFrame, Supervision};
//!
//! let launcher = Launcher::new();
//! let supervision = launcher.supervise(|_stop| {
//!     Outcome::Faulted(
//!         Fault::new(FaultCategory::Name)
//!             .with_message("name 'undefined_symbol' isn't defined")
//!             .with_frame(StackFrame::new("v02.py", Some(3))),
//!     )
//! });
//! if let Supervision::Diagnosed(diagnosis) = supervision {
//!     print!("{}", diagnosis.text);
//! }
//! ```

mod config;
mod context;
mod error;
mod fault;
mod fs;
mod guidance;
mod locate;
mod logbook;
mod paths;
mod report;
mod stop;
mod trace;

pub use config::LaunchConfig;
pub use context::{PREFIX_WIDTH, SourceWindow, WindowRow};
pub use error::{Error, Result};
pub use fault::{Fault, FaultArg, FaultCategory, StackFrame};
pub use fs::{FileSystem, InMemoryFs, OsFs};
pub use locate::ResolvedLocation;
pub use report::Diagnosis;
pub use stop::StopToken;
pub use trace::parse_trace_locations;

use std::sync::Arc;

/// Banner printed when the stop signal cancels the guarded run.
pub const INTERRUPTED_BANNER: &str = "INTERRUPTED: stop signal received";

/// What the guarded run produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The script ran to completion.
    Completed,
    /// The run observed the stop token and cancelled itself.
    Cancelled,
    /// The script raised a fault.
    Faulted(Fault),
}

/// The launcher's verdict on a supervised run.
#[derive(Debug, Clone)]
pub enum Supervision {
    /// Nothing to report.
    Completed,
    /// Cancelled by the stop signal: print [`INTERRUPTED_BANNER`] and
    /// nothing else. No location work, no log record.
    Interrupted,
    /// The run faulted; the full diagnosis was produced and logged.
    Diagnosed(Diagnosis),
}

/// Main entry point for Faultkit.
///
/// Holds the immutable launch configuration, the filesystem the device
/// exposes, and the stop token wired to the stop button.
pub struct Launcher {
    fs: Arc<dyn FileSystem>,
    config: LaunchConfig,
    stop: StopToken,
}

impl Default for Launcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Launcher {
    /// Create a launcher with default settings over an in-memory
    /// filesystem.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Create a new LauncherBuilder for customized configuration.
    pub fn builder() -> LauncherBuilder {
        LauncherBuilder::default()
    }

    /// The launcher's configuration.
    pub fn config(&self) -> &LaunchConfig {
        &self.config
    }

    /// The stop token; hand its flag to a signal registration to wire
    /// the stop button.
    pub fn stop_token(&self) -> StopToken {
        self.stop.clone()
    }

    /// Run one guarded region and react to its outcome.
    ///
    /// The closure receives the stop token and must check it
    /// cooperatively. A fault is diagnosed in full; cancellation skips
    /// diagnosis and logging entirely.
    pub fn supervise<F>(&self, run: F) -> Supervision
    where
        F: FnOnce(&StopToken) -> Outcome,
    {
        match run(&self.stop) {
            Outcome::Completed => Supervision::Completed,
            Outcome::Cancelled => Supervision::Interrupted,
            Outcome::Faulted(fault) => Supervision::Diagnosed(self.diagnose(&fault)),
        }
    }

    /// Produce (and log) the full diagnosis for a fault.
    pub fn diagnose(&self, fault: &Fault) -> Diagnosis {
        report::diagnose(&self.fs, &self.config, fault)
    }
}

/// Builder for customized Launcher configuration.
#[derive(Default)]
pub struct LauncherBuilder {
    fs: Option<Arc<dyn FileSystem>>,
    config: Option<LaunchConfig>,
}

impl LauncherBuilder {
    /// Set a custom filesystem.
    pub fn fs(mut self, fs: Arc<dyn FileSystem>) -> Self {
        self.fs = Some(fs);
        self
    }

    /// Set the launch configuration.
    pub fn config(mut self, config: LaunchConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the Launcher instance.
    pub fn build(self) -> Launcher {
        Launcher {
            fs: self.fs.unwrap_or_else(|| Arc::new(InMemoryFs::new())),
            config: self.config.unwrap_or_default(),
            stop: StopToken::new(),
        }
    }
}
