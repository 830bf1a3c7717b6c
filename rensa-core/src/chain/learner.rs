use std::sync::mpsc;
use std::thread;

use crate::chain::store::TripletStore;
use crate::chain::token::Token;
use crate::chain::triplet::Triplet;

impl TripletStore {
	/// Learns one tokenized sentence.
	///
	/// # Behavior
	/// - Empty and whitespace-only tokens are skipped
	/// - Every consecutive three-token window is counted
	/// - Two boundary triplets anchor the sentence: `(Begin, t0, t1)` and
	///   `(t(n-2), t(n-1), End)`
	///
	/// # Notes
	/// A line with fewer than three surviving tokens contributes nothing,
	/// boundary triplets included. Too short to carry a trigram, too short
	/// to open or close a generated sentence.
	pub fn learn_line(&mut self, tokens: &[String]) {
		let words: Vec<&str> = tokens
			.iter()
			.map(String::as_str)
			.filter(|token| !token.trim().is_empty())
			.collect();
		if words.len() < 3 {
			return;
		}

		for window in words.windows(3) {
			self.increment(Triplet::words(window[0], window[1], window[2]));
		}
		self.increment(Triplet::new(
			Token::Begin,
			Token::word(words[0]),
			Token::word(words[1]),
		));
		self.increment(Triplet::new(
			Token::word(words[words.len() - 2]),
			Token::word(words[words.len() - 1]),
			Token::End,
		));
	}

	/// Learns every line of an already tokenized text.
	pub fn learn_lines(&mut self, lines: &[Vec<String>]) {
		for line in lines {
			self.learn_line(line);
		}
	}

	/// Builds a store from tokenized lines using multiple threads.
	///
	/// Lines are sharded across workers; each worker learns its shard into
	/// a private store and the shards are merged sequentially. Counts are
	/// additive per line, so the result equals the sequential build.
	pub fn from_lines_parallel(lines: &[Vec<String>]) -> Self {
		let cpus = num_cpus::get();
		let factor = 8;
		let chunks = cpus * factor;
		let chunk_size = ((lines.len() + chunks - 1) / chunks).max(1);

		let (tx, rx) = mpsc::channel();
		for chunk in lines.chunks(chunk_size) {
			let tx = tx.clone();
			let chunk: Vec<Vec<String>> = chunk.to_vec();

			thread::spawn(move || {
				let mut partial = TripletStore::new();
				partial.learn_lines(&chunk);
				tx.send(partial).expect("Failed to send from thread");
			});
		}
		drop(tx);

		let mut store = TripletStore::new();
		for partial in rx.iter() {
			store.merge(partial);
		}
		store
	}
}
