use std::io;
use std::process::ExitStatus;

use thiserror::Error;

/// Errors surfaced by the chain engine and its collaborators.
#[derive(Error, Debug)]
pub enum Error {
	/// The snapshot input failed to decode or validate.
	///
	/// The store that was asked to load it is left untouched. Starting over
	/// with an empty store is the caller's decision, never an implicit one.
	#[error("malformed snapshot: {0}")]
	MalformedSnapshot(String),

	/// Snapshot encoding failed.
	#[error("snapshot encoding failed: {0}")]
	SnapshotEncode(serde_json::Error),

	/// Generation was requested on a store with no sentence openers.
	#[error("model has no sentence openers; learn some text first")]
	EmptyModel,

	/// The tokenizer failed; passed through without interpretation.
	#[error("tokenizer: {0}")]
	Tokenizer(#[from] TokenizerError),

	/// Snapshot database file I/O.
	#[error(transparent)]
	Io(#[from] io::Error),
}

/// Failures of the external tokenizer process wrapper.
#[derive(Error, Debug)]
pub enum TokenizerError {
	/// The command could not be started (missing binary, permissions).
	#[error("could not run `{command}`: {source}")]
	Spawn { command: String, source: io::Error },

	/// Feeding the text in or collecting the output back failed.
	#[error("tokenizer pipe failure: {0}")]
	Pipe(io::Error),

	/// The command ran but exited unsuccessfully.
	#[error("`{command}` exited with {status}: {stderr}")]
	Failed {
		command: String,
		status: ExitStatus,
		stderr: String,
	},

	/// The command produced output that is not valid UTF-8.
	#[error("tokenizer output is not valid UTF-8: {0}")]
	InvalidUtf8(#[from] std::string::FromUtf8Error),
}
