use rand::Rng;

use crate::chain::store::TripletStore;
use crate::chain::token::Token;
use crate::chain::triplet::Triplet;
use crate::error::Error;

/// Hard cap on tokens per generated sentence.
///
/// A store can describe a cycle with no reachable `End` (for example after
/// merging hand-built snapshots); the walk closes the sentence at the cap
/// instead of looping forever.
const MAX_SENTENCE_TOKENS: usize = 256;

impl TripletStore {
	/// Generates one sentence using thread-local randomness.
	pub fn generate_sentence(&self) -> Result<String, Error> {
		self.generate_sentence_with(&mut rand::rng())
	}

	/// Generates one sentence from the given random source.
	///
	/// Tokens are joined with no separator, matching corpora where the
	/// tokenizer carries any spacing inside the tokens themselves.
	pub fn generate_sentence_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<String, Error> {
		Ok(self.generate_tokens_with(rng)?.concat())
	}

	/// Generates one sentence as raw tokens, using thread-local randomness.
	pub fn generate_tokens(&self) -> Result<Vec<String>, Error> {
		self.generate_tokens_with(&mut rand::rng())
	}

	/// Generates one sentence as raw tokens from the given random source.
	///
	/// # Behavior
	/// - Starts from a weighted draw over the `Begin`-prefixed triplets
	/// - Extends by drawing among triplets whose first two tokens equal the
	///   last two emitted, weighted by occurrence counts
	/// - Stops when `End` is drawn, when no continuation exists, or at the
	///   token cap
	///
	/// A missing continuation closes the sentence exactly as if `End` had
	/// been drawn; only a model with no openers at all is an error.
	///
	/// # Errors
	/// [`Error::EmptyModel`] when the store holds no `Begin`-prefixed
	/// triplet.
	pub fn generate_tokens_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<String>, Error> {
		let openers = self.candidates(&[Token::Begin]);
		let first = match weighted_pick(&openers, rng) {
			Some(triplet) => triplet,
			None => return Err(Error::EmptyModel),
		};

		let mut words = Vec::new();
		let mut previous = first.second().clone();
		let mut current = first.third().clone();
		if let Token::Word(text) = &previous {
			words.push(text.clone());
		}

		loop {
			match &current {
				Token::Word(text) => words.push(text.clone()),
				// End reached (or a stray sentinel from a hand-built store).
				_ => break,
			}
			if words.len() >= MAX_SENTENCE_TOKENS {
				break;
			}

			let continuations = self.candidates(&[previous.clone(), current.clone()]);
			let next = match weighted_pick(&continuations, rng) {
				Some(triplet) => triplet,
				// Dead end: close the sentence as if End had been drawn.
				None => break,
			};
			previous = current;
			current = next.third().clone();
		}

		Ok(words)
	}

	/// Generates `count` independent sentences using thread-local randomness.
	pub fn generate(&self, count: usize) -> Result<Vec<String>, Error> {
		self.generate_with(count, &mut rand::rng())
	}

	/// Generates `count` independent sentences from the given random source.
	///
	/// `count == 0` yields an empty list without touching the store.
	pub fn generate_with<R: Rng + ?Sized>(
		&self,
		count: usize,
		rng: &mut R,
	) -> Result<Vec<String>, Error> {
		let mut sentences = Vec::with_capacity(count);
		for _ in 0..count {
			sentences.push(self.generate_sentence_with(rng)?);
		}
		Ok(sentences)
	}
}

/// Picks a triplet with probability proportional to its count.
///
/// Performs a single uniform draw in `0..total` followed by a cumulative
/// subtraction scan. Occurrence lists are never replicated.
///
/// Returns `None` when there is nothing to pick from.
fn weighted_pick<'a, R: Rng + ?Sized>(
	candidates: &[(&'a Triplet, usize)],
	rng: &mut R,
) -> Option<&'a Triplet> {
	if candidates.is_empty() {
		return None;
	}

	let total: usize = candidates.iter().map(|(_, count)| count).sum();
	if total == 0 {
		// Should not happen due to invariants, but kept for safety
		return None;
	}

	let mut r = rng.random_range(0..total);

	let mut fallback = None;
	for &(triplet, count) in candidates {
		if r < count {
			return Some(triplet);
		}
		r -= count;
		fallback = Some(triplet);
	}

	// Fallback: should not happen, but kept for safety.
	fallback
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;

	fn learned(lines: &[&[&str]]) -> TripletStore {
		let mut store = TripletStore::new();
		for tokens in lines {
			let line: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();
			store.learn_line(&line);
		}
		store
	}

	#[test]
	fn empty_store_reports_empty_model() {
		let store = TripletStore::new();
		assert!(matches!(store.generate_sentence(), Err(Error::EmptyModel)));
		assert!(matches!(store.generate(3), Err(Error::EmptyModel)));
	}

	#[test]
	fn zero_sentences_is_fine_even_when_empty() {
		let store = TripletStore::new();
		assert_eq!(store.generate(0).unwrap(), Vec::<String>::new());
	}

	#[test]
	fn single_chain_reproduces_the_training_line() {
		let store = learned(&[&["a", "b", "c", "d"]]);
		let mut rng = StdRng::seed_from_u64(1);
		assert_eq!(store.generate_tokens_with(&mut rng).unwrap(), ["a", "b", "c", "d"]);
		assert_eq!(store.generate_sentence().unwrap(), "abcd");
	}

	#[test]
	fn tokens_join_with_no_separator() {
		let store = learned(&[&["吾輩", "は", "猫"]]);
		assert_eq!(store.generate_sentence().unwrap(), "吾輩は猫");
	}

	#[test]
	fn dead_end_closes_the_sentence() {
		// Only an opener, no continuation for (a, b) and no closing triplet.
		let mut store = TripletStore::new();
		store.increment(Triplet::new(Token::Begin, Token::word("a"), Token::word("b")));
		assert_eq!(store.generate_tokens().unwrap(), ["a", "b"]);
	}

	#[test]
	fn cyclic_chain_stops_at_the_cap() {
		let mut store = TripletStore::new();
		store.increment(Triplet::new(Token::Begin, Token::word("a"), Token::word("b")));
		store.increment(Triplet::words("a", "b", "a"));
		store.increment(Triplet::words("b", "a", "b"));

		let tokens = store.generate_tokens().unwrap();
		assert_eq!(tokens.len(), MAX_SENTENCE_TOKENS);
	}

	#[test]
	fn seeded_walks_are_reproducible() {
		let store = learned(&[
			&["a", "b", "c", "d"],
			&["a", "b", "x", "y"],
			&["b", "c", "d", "e"],
			&["x", "y", "z", "w"],
		]);

		let mut left = StdRng::seed_from_u64(7);
		let mut right = StdRng::seed_from_u64(7);
		assert_eq!(
			store.generate_with(20, &mut left).unwrap(),
			store.generate_with(20, &mut right).unwrap()
		);
	}

	#[test]
	fn batch_generation_returns_count_sentences() {
		let store = learned(&[&["a", "b", "c"]]);
		assert_eq!(store.generate(5).unwrap().len(), 5);
	}

	#[test]
	fn picks_follow_occurrence_counts() {
		let heavy = Triplet::words("a", "b", "c");
		let light = Triplet::words("a", "b", "d");
		let candidates = [(&heavy, 3usize), (&light, 1usize)];

		let mut rng = StdRng::seed_from_u64(42);
		let draws = 4000;
		let mut heavy_hits = 0;
		for _ in 0..draws {
			if weighted_pick(&candidates, &mut rng) == Some(&heavy) {
				heavy_hits += 1;
			}
		}

		// Expected 3/4 of the draws; allow a generous band around it.
		assert!((2750..=3250).contains(&heavy_hits), "heavy_hits = {heavy_hits}");
	}

	#[test]
	fn nothing_to_pick_from_yields_none() {
		let mut rng = StdRng::seed_from_u64(0);
		assert_eq!(weighted_pick(&[], &mut rng), None);
	}
}
