use serde::{Deserialize, Serialize};

/// A single position in a learned triplet.
///
/// # Responsibilities
/// - Distinguish corpus words from the two sentence-boundary sentinels
/// - Keep that distinction structural: a corpus word spelled `"begin"` or
///   `"end"` is a `Word` and can never collide with a sentinel
///
/// # Notes
/// Serialized form is `"begin"`, `"end"` or `{"word": "..."}`, so the
/// distinction survives snapshots byte-for-byte.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Token {
	/// Start-of-sentence sentinel. Legal only as the first token of a triplet.
	Begin,
	/// End-of-sentence sentinel. Legal only as the last token of a triplet.
	End,
	/// A corpus word, carried verbatim (any delimiter or sentinel spelling
	/// included).
	Word(String),
}

impl Token {
	/// Wraps corpus text as a word token.
	pub fn word(text: impl Into<String>) -> Self {
		Token::Word(text.into())
	}

	pub fn is_begin(&self) -> bool {
		matches!(self, Token::Begin)
	}

	pub fn is_end(&self) -> bool {
		matches!(self, Token::End)
	}

	/// The word text, or `None` for a sentinel.
	pub fn as_word(&self) -> Option<&str> {
		match self {
			Token::Word(text) => Some(text),
			_ => None,
		}
	}
}
