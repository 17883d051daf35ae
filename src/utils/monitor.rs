//! Per-phase resource samples for a combination run.
//!
//! Each call to [`SystemMonitor::record`] takes one sample of this process and
//! logs what changed since the previous one; [`RunSummary`] folds the samples
//! into the numbers reported when the run ends.

use std::time::Duration;
#[cfg(feature = "cli")]
use std::sync::Mutex;
#[cfg(feature = "cli")]
use std::time::Instant;
#[cfg(feature = "cli")]
use sysinfo::{Pid, ProcessesToUpdate, System};

/// One process sample, taken right after `phase` finished.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseSample {
    pub phase: String,
    /// Time since the monitor was created.
    pub elapsed: Duration,
    pub memory_mb: u64,
    pub cpu_usage: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub total_time: Duration,
    pub peak_memory_mb: u64,
    pub slowest_phase: String,
    pub slowest_phase_time: Duration,
}

impl RunSummary {
    /// `None` when nothing was sampled.
    pub fn from_samples(samples: &[PhaseSample]) -> Option<Self> {
        let last = samples.last()?;
        let peak_memory_mb = samples.iter().map(|s| s.memory_mb).max().unwrap_or(0);

        let mut slowest = (&last.phase, Duration::ZERO);
        let mut previous = Duration::ZERO;
        for sample in samples {
            let spent = sample.elapsed.saturating_sub(previous);
            if spent > slowest.1 {
                slowest = (&sample.phase, spent);
            }
            previous = sample.elapsed;
        }

        Some(Self {
            total_time: last.elapsed,
            peak_memory_mb,
            slowest_phase: slowest.0.clone(),
            slowest_phase_time: slowest.1,
        })
    }
}

#[cfg(feature = "cli")]
pub struct SystemMonitor {
    system: Mutex<System>,
    pid: Option<Pid>,
    start_time: Instant,
    samples: Mutex<Vec<PhaseSample>>,
    enabled: bool,
}

#[cfg(feature = "cli")]
impl SystemMonitor {
    pub fn new(enabled: bool) -> Self {
        let pid = if enabled {
            sysinfo::get_current_pid()
                .map_err(|e| tracing::warn!("System monitoring unavailable: {}", e))
                .ok()
        } else {
            None
        };

        Self {
            system: Mutex::new(System::new()),
            pid,
            start_time: Instant::now(),
            samples: Mutex::new(Vec::new()),
            enabled: pid.is_some(),
        }
    }

    fn sample(&self, phase: &str) -> Option<PhaseSample> {
        let pid = self.pid?;
        let mut system = self.system.lock().ok()?;
        system.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);
        let process = system.process(pid)?;

        Some(PhaseSample {
            phase: phase.to_string(),
            elapsed: self.start_time.elapsed(),
            memory_mb: process.memory() / 1024 / 1024,
            cpu_usage: process.cpu_usage(),
        })
    }

    /// Samples the process after `phase` and logs the change since the last sample.
    pub fn record(&self, phase: &str) {
        if !self.enabled {
            return;
        }
        let Some(sample) = self.sample(phase) else {
            return;
        };
        let Ok(mut samples) = self.samples.lock() else {
            return;
        };

        let (since, memory_before) = samples
            .last()
            .map(|prev| (prev.elapsed, prev.memory_mb))
            .unwrap_or((Duration::ZERO, sample.memory_mb));
        tracing::info!(
            "📊 {} - took {:?}, CPU: {:.1}%, Memory: {}MB ({:+}MB)",
            sample.phase,
            sample.elapsed.saturating_sub(since),
            sample.cpu_usage,
            sample.memory_mb,
            sample.memory_mb as i64 - memory_before as i64
        );
        samples.push(sample);
    }

    pub fn samples(&self) -> Vec<PhaseSample> {
        self.samples
            .lock()
            .map(|samples| samples.clone())
            .unwrap_or_default()
    }

    pub fn summary(&self) -> Option<RunSummary> {
        RunSummary::from_samples(&self.samples())
    }

    pub fn log_summary(&self) {
        if let Some(summary) = self.summary() {
            tracing::info!(
                "📊 Final Stats - Total Time: {:?}, Peak Memory: {}MB, Slowest: {} ({:?})",
                summary.total_time,
                summary.peak_memory_mb,
                summary.slowest_phase,
                summary.slowest_phase_time
            );
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

#[cfg(feature = "cli")]
impl Default for SystemMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}

// 非 CLI 環境的空實現
#[cfg(not(feature = "cli"))]
#[derive(Default)]
pub struct SystemMonitor;

#[cfg(not(feature = "cli"))]
impl SystemMonitor {
    pub fn new(_enabled: bool) -> Self {
        Self
    }

    pub fn record(&self, _phase: &str) {}

    pub fn samples(&self) -> Vec<PhaseSample> {
        Vec::new()
    }

    pub fn summary(&self) -> Option<RunSummary> {
        None
    }

    pub fn log_summary(&self) {}

    pub fn is_enabled(&self) -> bool {
        false
    }
}
