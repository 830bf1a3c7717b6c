use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::chain::token::Token;

/// An ordered sequence of three tokens; the key of the chain store.
///
/// # Invariants
/// - `Begin` appears only in the first position
/// - `End` appears only in the last position
/// - The middle position is always a `Word`
///
/// The learner only ever produces triplets that satisfy these rules;
/// snapshot decoding re-checks them on untrusted input.
///
/// # Notes
/// Equality, hashing and ordering are structural over the three tokens, so
/// triplets are usable as map keys directly, with no joined-string encoding
/// that corpus delimiters could break.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Triplet([Token; 3]);

impl Triplet {
	pub fn new(first: Token, second: Token, third: Token) -> Self {
		Self([first, second, third])
	}

	/// Builds an all-word triplet, the common case for interior windows.
	pub fn words(
		first: impl Into<String>,
		second: impl Into<String>,
		third: impl Into<String>,
	) -> Self {
		Self([Token::word(first), Token::word(second), Token::word(third)])
	}

	pub fn tokens(&self) -> &[Token; 3] {
		&self.0
	}

	pub fn first(&self) -> &Token {
		&self.0[0]
	}

	pub fn second(&self) -> &Token {
		&self.0[1]
	}

	pub fn third(&self) -> &Token {
		&self.0[2]
	}

	/// Whether the sentinel placement rules hold.
	///
	/// Used when decoding snapshots, where the input is untrusted.
	pub fn is_well_formed(&self) -> bool {
		!self.0[0].is_end()
			&& matches!(self.0[1], Token::Word(_))
			&& !self.0[2].is_begin()
	}

	/// Whether any position is a word contained in `words`.
	///
	/// Sentinels never match, whatever the set contains.
	pub fn mentions_any(&self, words: &HashSet<String>) -> bool {
		self.0.iter().any(|token| match token {
			Token::Word(text) => words.contains(text),
			_ => false,
		})
	}
}
