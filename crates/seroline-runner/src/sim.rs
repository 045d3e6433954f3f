//! Invocation boundary to the external simulator.
//!
//! The simulator is an external process: it takes a finished configuration
//! file, a parallelism flag, and an RNG mode on its command line, reads its
//! seed from the environment, and prints its report to stdout/stderr while
//! writing the event log as a side effect. This module only launches it and
//! captures the report; it knows nothing about the simulation itself.

use std::path::PathBuf;
use std::process::Stdio;

use tokio::process::Command;

use crate::error::RunnerError;

/// Environment variable the simulator reads its random seed from.
pub const SEED_ENV: &str = "MNRM_DEBUG_SEED";

/// One simulator invocation.
#[derive(Debug, Clone)]
pub struct SimulatorCommand {
    /// Path to the simulator binary.
    pub binary: PathBuf,
    /// Finished configuration file handed to the simulator unchanged.
    pub config: PathBuf,
    /// Whether to request a parallel run.
    pub parallel: bool,
    /// RNG algorithm selector (the simulator's default is `opt`).
    pub rng_mode: String,
    /// Extra arguments appended verbatim.
    pub extra_args: Vec<String>,
    /// Seed to convey via [`SEED_ENV`], when the run is seeded.
    pub seed: Option<i64>,
}

impl SimulatorCommand {
    /// Command line arguments in the order the simulator expects:
    /// config file, parallel flag as `0`/`1`, RNG mode, then extras.
    pub fn args(&self) -> Vec<String> {
        let mut args = vec![
            self.config.display().to_string(),
            (if self.parallel { "1" } else { "0" }).to_owned(),
            self.rng_mode.clone(),
        ];
        args.extend(self.extra_args.iter().cloned());
        args
    }

    /// Launch the simulator and capture its combined stdout/stderr as the
    /// report text.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Io`] if the process cannot be spawned and
    /// [`RunnerError::SimulatorFailed`] if it exits nonzero.
    pub async fn run(&self) -> Result<String, RunnerError> {
        tracing::info!(
            binary = %self.binary.display(),
            config = %self.config.display(),
            parallel = self.parallel,
            rng_mode = self.rng_mode,
            seeded = self.seed.is_some(),
            "launching simulator"
        );

        let mut command = Command::new(&self.binary);
        command
            .args(self.args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(seed) = self.seed {
            command.env(SEED_ENV, seed.to_string());
        }

        let output = command.output().await?;

        // The simulator interleaves its report across both streams.
        let mut report = String::from_utf8_lossy(&output.stdout).into_owned();
        report.push_str(&String::from_utf8_lossy(&output.stderr));

        if !output.status.success() {
            tracing::error!(status = %output.status, "simulator failed");
            return Err(RunnerError::SimulatorFailed {
                status: output.status,
            });
        }

        tracing::info!(report_bytes = report.len(), "simulator finished");
        Ok(report)
    }
}
