use std::collections::{HashMap, HashSet};

use crate::chain::token::Token;
use crate::chain::triplet::Triplet;

/// Counted multiset of token triplets; the entire persistent state of a model.
///
/// # Responsibilities
/// - Map each observed triplet to its positive occurrence count
/// - Answer prefix queries for the generator, in a stable order
/// - Remove triplets outright when forgetting
/// - Merge partial stores built in parallel
///
/// # Invariants
/// - Stored counts are always >= 1; removal deletes the entry, it never
///   decrements
/// - A store owns its data: two stores never share state, and there is no
///   process-wide instance
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TripletStore {
	pub(crate) triplets: HashMap<Triplet, usize>,
}

impl TripletStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Records one more occurrence of `triplet`.
	pub fn increment(&mut self, triplet: Triplet) {
		*self.triplets.entry(triplet).or_insert(0) += 1;
	}

	/// Occurrence count of `triplet`, `0` if absent.
	pub fn count(&self, triplet: &Triplet) -> usize {
		self.triplets.get(triplet).copied().unwrap_or(0)
	}

	/// All triplets whose leading tokens equal `prefix`, with their counts.
	///
	/// # Parameters
	/// - `prefix`: one token (opener queries) or two tokens (continuation
	///   queries); any other length yields an empty list
	///
	/// # Returns
	/// Matches sorted by triplet, so that a seeded walk over the same store
	/// is reproducible regardless of hash-map iteration order.
	pub fn candidates(&self, prefix: &[Token]) -> Vec<(&Triplet, usize)> {
		if prefix.is_empty() || prefix.len() > 2 {
			return Vec::new();
		}

		let mut matches: Vec<(&Triplet, usize)> = self
			.triplets
			.iter()
			.filter(|(triplet, _)| triplet.tokens().starts_with(prefix))
			.map(|(triplet, count)| (triplet, *count))
			.collect();
		matches.sort_by(|a, b| a.0.cmp(b.0));
		matches
	}

	/// Deletes `triplet` entirely, whatever its count.
	///
	/// Returns whether it was present.
	pub fn remove(&mut self, triplet: &Triplet) -> bool {
		self.triplets.remove(triplet).is_some()
	}

	/// Deletes every triplet mentioning any word of `words`.
	///
	/// Sentinels never match. Returns the number of deleted triplets.
	pub fn remove_containing(&mut self, words: &HashSet<String>) -> usize {
		let before = self.triplets.len();
		self.triplets.retain(|triplet, _| !triplet.mentions_any(words));
		before - self.triplets.len()
	}

	/// Deletes every triplet mentioning any word of the tokenized `lines`.
	///
	/// Empty and whitespace-only tokens are skipped, the same way the
	/// learner skips them. Returns the number of deleted triplets.
	pub fn remove_containing_lines(&mut self, lines: &[Vec<String>]) -> usize {
		let words: HashSet<String> = lines
			.iter()
			.flatten()
			.filter(|token| !token.trim().is_empty())
			.cloned()
			.collect();
		self.remove_containing(&words)
	}

	/// Folds `other` into `self`, summing counts entry-wise.
	pub fn merge(&mut self, other: TripletStore) {
		for (triplet, count) in other.triplets {
			*self.triplets.entry(triplet).or_insert(0) += count;
		}
	}

	/// Number of distinct triplets.
	pub fn len(&self) -> usize {
		self.triplets.len()
	}

	pub fn is_empty(&self) -> bool {
		self.triplets.is_empty()
	}

	/// Number of distinct sentence openers (triplets starting with `Begin`).
	pub fn opener_count(&self) -> usize {
		self.triplets
			.keys()
			.filter(|triplet| triplet.first().is_begin())
			.count()
	}

	/// Iterates over `(triplet, count)` pairs in arbitrary order.
	pub fn iter(&self) -> impl Iterator<Item = (&Triplet, usize)> {
		self.triplets.iter().map(|(triplet, count)| (triplet, *count))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn increment_accumulates_per_triplet() {
		let mut store = TripletStore::new();
		let triplet = Triplet::words("a", "b", "c");
		for _ in 0..4 {
			store.increment(triplet.clone());
		}
		store.increment(Triplet::words("a", "b", "d"));

		assert_eq!(store.count(&triplet), 4);
		assert_eq!(store.count(&Triplet::words("a", "b", "d")), 1);
		assert_eq!(store.count(&Triplet::words("x", "y", "z")), 0);
		assert_eq!(store.len(), 2);
	}

	#[test]
	fn candidates_match_leading_tokens_only() {
		let mut store = TripletStore::new();
		store.increment(Triplet::new(Token::Begin, Token::word("a"), Token::word("b")));
		store.increment(Triplet::words("a", "b", "d"));
		store.increment(Triplet::words("a", "b", "c"));
		store.increment(Triplet::words("a", "x", "y"));
		store.increment(Triplet::words("z", "a", "b"));

		let openers = store.candidates(&[Token::Begin]);
		assert_eq!(openers.len(), 1);

		let continuations = store.candidates(&[Token::word("a"), Token::word("b")]);
		let thirds: Vec<&Token> = continuations.iter().map(|(t, _)| t.third()).collect();
		// Sorted by triplet, so "c" comes back before "d".
		assert_eq!(thirds, [&Token::word("c"), &Token::word("d")]);

		assert!(store.candidates(&[]).is_empty());
		let full = [Token::word("a"), Token::word("b"), Token::word("c")];
		assert!(store.candidates(&full).is_empty());
	}

	#[test]
	fn remove_deletes_the_entry_outright() {
		let mut store = TripletStore::new();
		let triplet = Triplet::words("a", "b", "c");
		store.increment(triplet.clone());
		store.increment(triplet.clone());

		assert!(store.remove(&triplet));
		assert_eq!(store.count(&triplet), 0);
		assert!(!store.remove(&triplet));
	}

	#[test]
	fn forgetting_a_word_removes_every_mention() {
		let mut store = TripletStore::new();
		store.increment(Triplet::words("x", "y", "z"));
		store.increment(Triplet::words("p", "q", "x"));
		store.increment(Triplet::words("y", "z", "w"));

		let words: HashSet<String> = ["x".to_owned()].into();
		assert_eq!(store.remove_containing(&words), 2);
		assert_eq!(store.len(), 1);
		assert_eq!(store.count(&Triplet::words("y", "z", "w")), 1);
	}

	#[test]
	fn merge_sums_counts_entry_wise() {
		let mut left = TripletStore::new();
		left.increment(Triplet::words("a", "b", "c"));
		left.increment(Triplet::words("a", "b", "c"));
		left.increment(Triplet::words("d", "e", "f"));

		let mut right = TripletStore::new();
		right.increment(Triplet::words("a", "b", "c"));
		right.increment(Triplet::words("g", "h", "i"));

		left.merge(right);
		assert_eq!(left.count(&Triplet::words("a", "b", "c")), 3);
		assert_eq!(left.count(&Triplet::words("d", "e", "f")), 1);
		assert_eq!(left.count(&Triplet::words("g", "h", "i")), 1);
		assert_eq!(left.len(), 3);
	}
}
