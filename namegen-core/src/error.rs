use std::path::PathBuf;

use thiserror::Error;

/// Convenient result type used throughout the crate.
pub type Result<T, E = NameGenError> = std::result::Result<T, E>;

/// Failures surfaced by nameset management, chain building and name generation.
///
/// All variants are local to a single call: a failed generation or load never
/// corrupts the chain cache or affects other namesets.
#[derive(Debug, Error)]
pub enum NameGenError {
	/// A chain was requested for an identifier with no registered nameset.
	#[error("unknown nameset: {0}")]
	UnknownNameset(String),
	/// A nameset with this identifier is already registered.
	/// Namesets are immutable for the lifetime of the service.
	#[error("nameset already registered: {0}")]
	DuplicateNameset(String),
	/// The chain was built from a training set with no usable words,
	/// so there is nothing to sample from.
	#[error("chain is empty, nothing to sample from")]
	EmptyModel,
	/// Filesystem error with optional context path.
	#[error("io error while processing {path:?}: {source}")]
	Io {
		/// Underlying IO error returned by the standard library.
		source: std::io::Error,
		/// Path associated with the failure if available.
		path: Option<PathBuf>,
	},
	/// Chain snapshot serialization or deserialization failure.
	#[error("snapshot error: {0}")]
	Snapshot(String),
}

impl From<postcard::Error> for NameGenError {
	fn from(err: postcard::Error) -> Self {
		Self::Snapshot(err.to_string())
	}
}

impl NameGenError {
	/// Helper constructor that attaches an optional path when wrapping IO errors.
	pub fn io(source: std::io::Error, path: Option<PathBuf>) -> Self {
		Self::Io { source, path }
	}
}
