use std::io;
use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that end a monitoring run
#[derive(Error, Debug)]
pub enum StatError {
	/// The statistics source could not be read
	#[error("failed to read {}: {source}", .path.display())]
	Io {
		/// Path of the source that failed
		path: PathBuf,
		/// Underlying OS error
		source: io::Error,
	},

	/// A CPU line carried a token that is not an integer
	#[error("invalid counter {token:?} on line {line}: {source}")]
	Parse {
		/// 1-based line number within the source text
		line: usize,
		/// The offending token
		token: String,
		/// Integer parse failure
		source: ParseIntError,
	},

	/// Writing to the display failed
	#[error("display error: {0}")]
	Display(#[from] io::Error),
}
