use cpu_usage::constants::PROC_STAT_PATH;
use cpu_usage::error::StatError;
use cpu_usage::monitor_cpu_usage;
use cpu_usage::stats::ProcStat;
use log::error;

fn main() {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

	// Failures end the run with a message on stdout but a success exit status
	match monitor_cpu_usage(ProcStat::new(PROC_STAT_PATH)) {
		Ok(()) => {},
		Err(StatError::Display(e)) => {
			error!("Display error: {}", e);
		},
		Err(e) => {
			println!("Error reading CPU stats: {}", e);
		},
	}
}
