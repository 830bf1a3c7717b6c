//! Text-in, text-out facade over a store and a tokenizer.

use crate::chain::store::TripletStore;
use crate::error::Error;
use crate::tokenizer::Tokenizer;

/// A trigram chain bound to a tokenizer.
///
/// # Responsibilities
/// - Tokenize raw text and feed the lines to the owned store
/// - Expose generation, forgetting and snapshot exchange at text level
///
/// # Notes
/// The store is owned, never shared or global; independent instances
/// coexist freely. Token-level access stays available through
/// [`Markov::store`] for callers that tokenize on their own.
pub struct Markov<T: Tokenizer> {
	tokenizer: T,
	store: TripletStore,
}

impl<T: Tokenizer> Markov<T> {
	/// An empty chain using `tokenizer`.
	pub fn new(tokenizer: T) -> Self {
		Self {
			tokenizer,
			store: TripletStore::new(),
		}
	}

	/// A chain over an existing store, typically one loaded from disk.
	pub fn with_store(tokenizer: T, store: TripletStore) -> Self {
		Self { tokenizer, store }
	}

	/// Tokenizes `text` and learns every resulting line.
	///
	/// # Errors
	/// Tokenizer failures only; learning itself cannot fail.
	pub fn learn(&mut self, text: &str) -> Result<(), Error> {
		let lines = self.tokenizer.tokenize(text)?;
		self.store.learn_lines(&lines);
		Ok(())
	}

	/// Tokenizes `text` and removes every triplet mentioning any of its
	/// words.
	///
	/// Returns the number of removed triplets.
	pub fn forget(&mut self, text: &str) -> Result<usize, Error> {
		let lines = self.tokenizer.tokenize(text)?;
		Ok(self.store.remove_containing_lines(&lines))
	}

	/// Generates `count` independent sentences.
	pub fn generate(&self, count: usize) -> Result<Vec<String>, Error> {
		self.store.generate(count)
	}

	/// Generates one sentence.
	pub fn generate_sentence(&self) -> Result<String, Error> {
		self.store.generate_sentence()
	}

	/// Replaces the store with the decoded `snapshot`.
	///
	/// # Errors
	/// [`Error::MalformedSnapshot`] on invalid input, in which case the
	/// current store is kept as it was.
	pub fn load_snapshot(&mut self, snapshot: &str) -> Result<(), Error> {
		self.store = TripletStore::from_snapshot(snapshot)?;
		Ok(())
	}

	/// Encodes the current store as a snapshot.
	pub fn to_snapshot(&self) -> Result<String, Error> {
		self.store.to_snapshot()
	}

	pub fn store(&self) -> &TripletStore {
		&self.store
	}

	pub fn store_mut(&mut self) -> &mut TripletStore {
		&mut self.store
	}

	/// Gives the store up, dropping the tokenizer.
	pub fn into_store(self) -> TripletStore {
		self.store
	}
}
