use std::cmp::Ordering;
use std::io::{self, Stdout, Write};

use crate::constants::{CLEAR_SCREEN, CPU_LINE_PREFIX};
use crate::usage::UsageReading;

/// Receives one usage reading per sampling iteration
pub trait UsageSink {
	fn emit(&mut self, reading: &UsageReading) -> io::Result<()>;
}

/// Redraws the whole terminal with one line per CPU
#[derive(Debug)]
pub struct TerminalDisplay<W: Write> {
	out: W,
}

impl TerminalDisplay<Stdout> {
	pub fn stdout() -> Self {
		Self::new(io::stdout())
	}
}

impl<W: Write> TerminalDisplay<W> {
	pub fn new(out: W) -> Self {
		Self { out }
	}

	pub fn into_inner(self) -> W {
		self.out
	}
}

impl<W: Write> UsageSink for TerminalDisplay<W> {
	fn emit(&mut self, reading: &UsageReading) -> io::Result<()> {
		write!(self.out, "{CLEAR_SCREEN}")?;

		for (name, usage) in display_order(reading) {
			writeln!(self.out, "{}", format_usage_line(name, usage))?;
		}

		self.out.flush()
	}
}

/// Formats a single `<identifier>: <percentage>%` line
pub fn format_usage_line(name: &str, usage: f64) -> String {
	format!("{}: {:.2}%", name, usage)
}

/// Sorts a reading for display: aggregate first, then CPUs by number
pub fn display_order(reading: &UsageReading) -> Vec<(&str, f64)> {
	let mut cpu_list: Vec<(&str, f64)> = reading.iter().map(|(name, &usage)| (name.as_str(), usage)).collect();
	cpu_list.sort_by(|&(a, _), &(b, _)| compare_cpu_names(a, b));
	cpu_list
}

fn compare_cpu_names(a: &str, b: &str) -> Ordering {
	sort_key(a).cmp(&sort_key(b)).then_with(|| a.cmp(b))
}

// (0, _) aggregate, (1, n) cpuN, (2, _) anything else
fn sort_key(name: &str) -> (u8, u64) {
	match name.strip_prefix(CPU_LINE_PREFIX) {
		Some("") => (0, 0),
		Some(suffix) => match suffix.parse::<u64>() {
			Ok(cpu_id) => (1, cpu_id),
			Err(_) => (2, 0),
		},
		None => (2, 0),
	}
}
