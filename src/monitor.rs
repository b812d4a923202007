use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use log::debug;

use crate::constants::SAMPLE_INTERVAL_MS;
use crate::display::UsageSink;
use crate::error::StatError;
use crate::stats::StatSource;
use crate::usage::{UsageReading, calculate_usages};

/// Shared flag that ends a monitoring loop
#[derive(Debug, Clone, Default)]
pub struct StopSignal {
	stopped: Arc<AtomicBool>,
}

impl StopSignal {
	pub fn new() -> Self {
		Self::default()
	}

	/// A signal nobody holds a handle to stop, so the loop runs until the
	/// process is killed
	pub fn never() -> Self {
		Self::new()
	}

	/// Requests the loop to stop before its next iteration
	pub fn stop(&self) {
		self.stopped.store(true, Ordering::Relaxed);
	}

	pub fn is_stopped(&self) -> bool {
		self.stopped.load(Ordering::Relaxed)
	}
}

/// Samples CPU counters from a source and turns them into usage readings
#[derive(Debug)]
pub struct UsageMonitor<S: StatSource> {
	source: S,
}

impl<S: StatSource> UsageMonitor<S> {
	pub fn new(source: S) -> Self {
		Self { source }
	}

	pub fn source(&self) -> &S {
		&self.source
	}

	/// Takes two snapshots one interval apart and computes per-CPU usage
	pub fn sample(&mut self) -> Result<UsageReading, StatError> {
		let initial_snapshot = self.source.read_snapshot()?;
		thread::sleep(Duration::from_millis(SAMPLE_INTERVAL_MS));
		let final_snapshot = self.source.read_snapshot()?;

		let reading = calculate_usages(&initial_snapshot, &final_snapshot);
		debug!("Sampled {} CPUs", reading.len());

		Ok(reading)
	}

	/// Samples and emits readings until `stop` fires or an error occurs
	///
	/// Any read or display error ends the loop and is returned as is.
	pub fn run(&mut self, sink: &mut dyn UsageSink, stop: &StopSignal) -> Result<(), StatError> {
		loop {
			if stop.is_stopped() {
				debug!("Stop requested, ending monitoring loop");
				return Ok(());
			}

			let reading = self.sample()?;
			sink.emit(&reading)?;
		}
	}
}
