use std::collections::HashMap;

use log::debug;

use crate::stats::{CpuStats, Snapshot};

/// CPU identifier -> utilization percentage over one sampling window
pub type UsageReading = HashMap<String, f64>;

/// Calculates the share of elapsed ticks that were not idle, as a percentage
///
/// # Arguments
///
/// * `prior` - Counters from the earlier snapshot
/// * `later` - Counters for the same CPU from the later snapshot
///
/// # Returns
///
/// `0.0` when no ticks elapsed. Counters that went backwards are not
/// corrected, so the result can fall outside 0..=100.
pub fn calculate_usage(prior: &CpuStats, later: &CpuStats) -> f64 {
	let total_difference = later.total - prior.total;
	let idle_difference = i128::from(later.idle) - i128::from(prior.idle);

	if total_difference == 0 {
		return 0.0;
	}

	100.0 * (total_difference - idle_difference) as f64 / total_difference as f64
}

/// Calculates usage for every CPU present in the initial snapshot
///
/// A CPU missing from the final snapshot is compared against all-zero counters.
pub fn calculate_usages(initial_snapshot: &Snapshot, final_snapshot: &Snapshot) -> UsageReading {
	initial_snapshot
		.iter()
		.map(|(name, start)| {
			let end = final_snapshot.get(name).copied().unwrap_or_else(|| {
				debug!("{} missing from second snapshot, using zero counters", name);
				CpuStats::default()
			});

			(name.clone(), calculate_usage(start, &end))
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::stats::parse_stat;
	use rstest::rstest;

	fn stats(user: i64, system: i64, idle: i64) -> CpuStats {
		CpuStats::from_counters([user, 0, system, idle, 0, 0, 0, 0])
	}

	#[test]
	fn test_usage_concrete_case() {
		let prior = stats(100, 50, 800);
		let later = stats(120, 50, 880);

		assert_eq!(prior.total, 950);
		assert_eq!(later.total, 1050);
		assert!((calculate_usage(&prior, &later) - 20.0).abs() < 1e-9);
	}

	#[rstest]
	#[case(0)]
	#[case(800)]
	#[case(i64::MAX)]
	fn test_zero_delta_is_zero(#[case] idle: i64) {
		let record = stats(100, 50, idle);
		assert_eq!(calculate_usage(&record, &record), 0.0);
	}

	#[rstest]
	#[case(stats(0, 0, 0), stats(0, 0, 100), 0.0)]
	#[case(stats(0, 0, 0), stats(50, 50, 0), 100.0)]
	#[case(stats(10, 10, 10), stats(35, 10, 85), 25.0)]
	fn test_usage_bounds(#[case] prior: CpuStats, #[case] later: CpuStats, #[case] expected: f64) {
		assert!((calculate_usage(&prior, &later) - expected).abs() < 1e-9);
	}

	#[test]
	fn test_non_monotonic_counters_are_not_clamped() {
		// idle grew by 100 while user went back by 60: total +40, idle +100
		let prior = stats(100, 0, 800);
		let later = stats(40, 0, 900);

		let usage = calculate_usage(&prior, &later);
		assert!((usage - (-150.0)).abs() < 1e-9, "got {usage}");
	}

	#[test]
	fn test_usages_end_to_end() {
		let first = parse_stat("cpu 100 0 50 800 0 0 0 0").unwrap();
		let second = parse_stat("cpu 120 0 50 880 0 0 0 0").unwrap();

		let reading = calculate_usages(&first, &second);

		assert_eq!(reading.len(), 1);
		assert!((reading["cpu"] - 20.0).abs() < 1e-9);
	}

	#[test]
	fn test_usages_per_identifier() {
		let first = parse_stat("cpu0 0 0 0 100 0 0 0 0\ncpu1 0 0 0 100 0 0 0 0\n").unwrap();
		let second = parse_stat("cpu0 50 0 0 150 0 0 0 0\ncpu1 0 0 0 200 0 0 0 0\n").unwrap();

		let reading = calculate_usages(&first, &second);

		assert_eq!(reading.len(), 2);
		assert!((reading["cpu0"] - 50.0).abs() < 1e-9);
		assert!(reading["cpu1"].abs() < 1e-9);
	}

	#[test]
	fn test_identifier_missing_from_second_snapshot_is_reported() {
		let first = parse_stat("cpu 100 0 50 800 0 0 0 0\ncpu7 10 0 10 80 0 0 0 0\n").unwrap();
		let second = parse_stat("cpu 120 0 50 880 0 0 0 0\n").unwrap();

		let reading = calculate_usages(&first, &second);

		assert_eq!(reading.len(), 2);
		// Against zero counters: total -100, idle -80
		assert!((reading["cpu7"] - 20.0).abs() < 1e-9);
	}

	#[test]
	fn test_identifier_only_in_second_snapshot_is_dropped() {
		let first = parse_stat("cpu 100 0 50 800 0 0 0 0\n").unwrap();
		let second = parse_stat("cpu 120 0 50 880 0 0 0 0\ncpu9 1 1 1 1 1 1 1 1\n").unwrap();

		let reading = calculate_usages(&first, &second);

		assert_eq!(reading.len(), 1);
		assert!(!reading.contains_key("cpu9"));
	}
}
