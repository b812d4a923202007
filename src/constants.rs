// Kernel time-accounting source
pub const PROC_STAT_PATH: &str = "/proc/stat";
pub const CPU_LINE_PREFIX: &str = "cpu";

// user, nice, system, idle, iowait, irq, softirq, steal
pub const COUNTER_FIELDS: usize = 8;

// Monitoring and display settings
pub const SAMPLE_INTERVAL_MS: u64 = 200;
pub const CLEAR_SCREEN: &str = "\x1B[H\x1B[2J";
