use std::collections::HashMap;
use std::fmt::Debug;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::constants::{COUNTER_FIELDS, CPU_LINE_PREFIX};
use crate::error::StatError;

/// Tick counters for a single CPU line of /proc/stat
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuStats {
	pub user: i64,
	pub nice: i64,
	pub system: i64,
	pub idle: i64,
	pub iowait: i64,
	pub irq: i64,
	pub softirq: i64,
	pub steal: i64,
	/// Sum of the eight counters above, wide enough that it cannot overflow
	pub total: i128,
}

impl CpuStats {
	/// Builds a record from counters in /proc/stat column order
	pub fn from_counters(counters: [i64; COUNTER_FIELDS]) -> Self {
		let [user, nice, system, idle, iowait, irq, softirq, steal] = counters;
		let total = counters.iter().map(|&value| i128::from(value)).sum();

		Self {
			user,
			nice,
			system,
			idle,
			iowait,
			irq,
			softirq,
			steal,
			total,
		}
	}
}

/// CPU identifier (`cpu`, `cpu0`, `cpu1`, ...) -> counters at one point in time
pub type Snapshot = HashMap<String, CpuStats>;

/// Anything that can produce a fresh snapshot of CPU counters
pub trait StatSource: Debug {
	/// Reads the source once and parses every CPU line in it
	fn read_snapshot(&mut self) -> Result<Snapshot, StatError>;
}

/// Reads counters from a file in /proc/stat format
#[derive(Debug, Clone)]
pub struct ProcStat {
	path: PathBuf,
}

impl ProcStat {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn path(&self) -> &Path {
		&self.path
	}
}

impl StatSource for ProcStat {
	fn read_snapshot(&mut self) -> Result<Snapshot, StatError> {
		let text = fs::read_to_string(&self.path).map_err(|source| StatError::Io {
			path: self.path.clone(),
			source,
		})?;

		parse_stat(&text)
	}
}

/// Parses /proc/stat text into a snapshot
///
/// Lines whose first token starts with `cpu` and carry at least eight
/// counters become records; shorter CPU lines are skipped. A non-integer
/// token on a qualifying line fails the whole parse, while a negative one is
/// kept as-is. Counters past the eighth (guest, guest_nice) must still be
/// integers but are not stored.
/// A repeated identifier keeps its last occurrence.
pub fn parse_stat(text: &str) -> Result<Snapshot, StatError> {
	let mut snapshot = Snapshot::with_capacity(num_cpus::get() + 1);

	for (index, line) in text.lines().enumerate() {
		let mut parts = line.split_whitespace();
		let Some(name) = parts.next() else {
			continue;
		};
		if !name.starts_with(CPU_LINE_PREFIX) {
			continue;
		}

		let fields: Vec<&str> = parts.collect();
		if fields.len() < COUNTER_FIELDS {
			debug!("Skipping {} on line {}: only {} counters", name, index + 1, fields.len());
			continue;
		}

		let mut counters = [0i64; COUNTER_FIELDS];
		for (position, token) in fields.iter().enumerate() {
			let value = token.parse::<i64>().map_err(|source| StatError::Parse {
				line: index + 1,
				token: (*token).to_string(),
				source,
			})?;

			if let Some(slot) = counters.get_mut(position) {
				*slot = value;
			}
		}

		snapshot.insert(name.to_string(), CpuStats::from_counters(counters));
	}

	Ok(snapshot)
}

/// Kernel scheduler tick rate, the unit of every counter in a snapshot
pub fn clock_ticks_per_second() -> Option<u64> {
	// SAFETY: sysconf has no preconditions and only reads system configuration
	let ticks = unsafe { libc::sysconf(libc::_SC_CLK_TCK) };
	u64::try_from(ticks).ok().filter(|&ticks| ticks > 0)
}
