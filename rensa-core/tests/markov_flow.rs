//! End-to-end flow over the public API: learn, generate, snapshot to disk,
//! reload, forget.

use std::fs;

use rensa_core::chain::store::TripletStore;
use rensa_core::error::Error;
use rensa_core::io::{load_snapshot_file, save_snapshot_file};
use rensa_core::markov::Markov;
use rensa_core::tokenizer::WhitespaceTokenizer;

const CORPUS: &str = "\
吾輩 は 猫 で ある 。
名前 は まだ 無い 。
吾輩 は ここ で 始め て 人間 という もの を 見 た 。";

#[test]
fn learn_generate_save_reload_forget() {
	let mut markov = Markov::new(WhitespaceTokenizer);
	markov.learn(CORPUS).unwrap();
	assert!(!markov.store().is_empty());
	assert_eq!(markov.store().opener_count(), 2);

	let sentences = markov.generate(5).unwrap();
	assert_eq!(sentences.len(), 5);
	for sentence in &sentences {
		assert!(!sentence.is_empty());
	}

	let dir = tempfile::tempdir().unwrap();
	let db = dir.path().join("chain.json");
	save_snapshot_file(&db, markov.store()).unwrap();

	let reloaded = load_snapshot_file(&db)
		.unwrap()
		.expect("database was just saved");
	assert_eq!(&reloaded, markov.store());

	// Both lines a sentence can open with mention 吾輩 or 名前; forgetting
	// them leaves continuations behind but no way in.
	let removed = markov.forget("吾輩 名前").unwrap();
	assert!(removed > 0);
	assert_eq!(markov.store().opener_count(), 0);
	assert!(!markov.store().is_empty());
	assert!(matches!(markov.generate_sentence(), Err(Error::EmptyModel)));
}

#[test]
fn generated_sentences_replay_learned_continuations() {
	let mut markov = Markov::new(WhitespaceTokenizer);
	markov.learn("a b c d e").unwrap();

	// A single line means a single possible walk.
	assert_eq!(markov.generate_sentence().unwrap(), "abcde");
}

#[test]
fn missing_database_is_a_fresh_start() {
	let dir = tempfile::tempdir().unwrap();
	let absent = dir.path().join("absent.json");
	assert!(load_snapshot_file(&absent).unwrap().is_none());
}

#[test]
fn corrupt_database_is_reported_not_reset() {
	let dir = tempfile::tempdir().unwrap();
	let db = dir.path().join("chain.json");
	fs::write(&db, "{ definitely not a snapshot").unwrap();

	match load_snapshot_file(&db) {
		Err(Error::MalformedSnapshot(_)) => {}
		other => panic!("expected MalformedSnapshot, got {other:?}"),
	}
}

#[test]
fn saving_overwrites_atomically() {
	let dir = tempfile::tempdir().unwrap();
	let db = dir.path().join("chain.json");

	let mut first = TripletStore::new();
	first.learn_line(&["a".to_owned(), "b".to_owned(), "c".to_owned()]);
	save_snapshot_file(&db, &first).unwrap();

	let mut second = TripletStore::new();
	second.learn_line(&["x".to_owned(), "y".to_owned(), "z".to_owned()]);
	save_snapshot_file(&db, &second).unwrap();

	let reloaded = load_snapshot_file(&db).unwrap().expect("saved twice");
	assert_eq!(reloaded, second);
}
