//! Tokenizer collaborators for the text-level facade.
//!
//! The chain store only ever sees tokens; turning raw text into tokenized
//! lines is delegated to a [`Tokenizer`]. The crate ships two: a wrapper
//! around an external MeCab process for unsegmented Japanese, and a
//! whitespace splitter for corpora that already carry separators.

use std::io::{self, Write};
use std::process::{Command, Stdio};
use std::thread;

use crate::error::TokenizerError;

/// Splits raw text into tokenized lines.
///
/// One inner `Vec<String>` per input line; a line maps to a sentence when
/// learning. Implementations must pass tokens through verbatim, empty
/// fields included; filtering is the store's concern, not the tokenizer's.
pub trait Tokenizer {
	fn tokenize(&self, text: &str) -> Result<Vec<Vec<String>>, TokenizerError>;
}

impl<T: Tokenizer + ?Sized> Tokenizer for Box<T> {
	fn tokenize(&self, text: &str) -> Result<Vec<Vec<String>>, TokenizerError> {
		(**self).tokenize(text)
	}
}

/// Tokenizes through an external MeCab process in word-dividing mode.
///
/// # Behavior
/// - Spawns `<command> -Owakati [extra args]` once per call
/// - Feeds the trimmed input text on stdin from a separate thread, so large
///   inputs cannot deadlock the two pipes
/// - Splits each output line on single ASCII spaces, the separator wakati
///   output uses; trailing separators produce empty tokens, which the store
///   skips downstream
///
/// # Errors
/// See [`TokenizerError`]: spawn failures, pipe failures, non-zero exit
/// (stderr attached) and non-UTF-8 output are all reported, never hidden.
pub struct MecabTokenizer {
	command: String,
	args: Vec<String>,
}

impl MecabTokenizer {
	/// Wraps the `mecab` binary from `PATH`.
	pub fn new() -> Self {
		Self::with_command("mecab")
	}

	/// Wraps a specific binary, for installs outside `PATH` or wrappers.
	pub fn with_command(command: impl Into<String>) -> Self {
		Self {
			command: command.into(),
			args: Vec::new(),
		}
	}

	/// Appends an extra command-line argument (dictionary paths and the
	/// like), after `-Owakati`.
	pub fn arg(mut self, arg: impl Into<String>) -> Self {
		self.args.push(arg.into());
		self
	}
}

impl Default for MecabTokenizer {
	fn default() -> Self {
		Self::new()
	}
}

impl Tokenizer for MecabTokenizer {
	fn tokenize(&self, text: &str) -> Result<Vec<Vec<String>>, TokenizerError> {
		let mut child = Command::new(&self.command)
			.arg("-Owakati")
			.args(&self.args)
			.stdin(Stdio::piped())
			.stdout(Stdio::piped())
			.stderr(Stdio::piped())
			.spawn()
			.map_err(|e| TokenizerError::Spawn {
				command: self.command.clone(),
				source: e,
			})?;

		let mut stdin = match child.stdin.take() {
			Some(stdin) => stdin,
			None => {
				return Err(TokenizerError::Pipe(io::Error::other(
					"child stdin was not captured",
				)));
			}
		};
		let payload = text.trim().to_owned();
		let writer = thread::spawn(move || {
			let result = stdin.write_all(payload.as_bytes());
			// Dropping stdin closes the pipe so the child sees EOF.
			drop(stdin);
			result
		});

		let output = child.wait_with_output().map_err(TokenizerError::Pipe)?;
		let written = writer
			.join()
			.unwrap_or_else(|_| Err(io::Error::other("stdin writer thread panicked")));

		if !output.status.success() {
			return Err(TokenizerError::Failed {
				command: self.command.clone(),
				status: output.status,
				stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
			});
		}
		written.map_err(TokenizerError::Pipe)?;

		let stdout = String::from_utf8(output.stdout)?;
		Ok(stdout
			.lines()
			.map(|line| line.split(' ').map(str::to_owned).collect())
			.collect())
	}
}

/// Splits on lines and ASCII/Unicode whitespace.
///
/// For corpora that are already word-divided; needs no external process.
pub struct WhitespaceTokenizer;

impl Tokenizer for WhitespaceTokenizer {
	fn tokenize(&self, text: &str) -> Result<Vec<Vec<String>>, TokenizerError> {
		Ok(text
			.lines()
			.map(|line| line.split_whitespace().map(str::to_owned).collect())
			.collect())
	}
}
