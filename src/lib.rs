pub mod constants;
pub mod display;
pub mod error;
pub mod monitor;
pub mod stats;
pub mod usage;

use log::info;

use crate::display::TerminalDisplay;
use crate::error::StatError;
use crate::monitor::{StopSignal, UsageMonitor};
use crate::stats::{ProcStat, clock_ticks_per_second};

/// Starts monitoring CPU usage and redraws the terminal after every sample
///
/// This is the main entry point for the usage monitor. It only returns when
/// reading the statistics source or writing the display fails.
pub fn monitor_cpu_usage(source: ProcStat) -> Result<(), StatError> {
	info!(
		"Monitoring {} every {} ms ({} logical CPUs, {} ticks/s)",
		source.path().display(),
		constants::SAMPLE_INTERVAL_MS,
		num_cpus::get(),
		clock_ticks_per_second().map_or_else(|| "unknown".to_string(), |ticks| ticks.to_string())
	);

	let mut monitor = UsageMonitor::new(source);
	let mut display = TerminalDisplay::stdout();

	monitor.run(&mut display, &StopSignal::never())
}
