//! Trigram Markov-chain text generation library.
//!
//! This crate learns token continuations from pre-segmented text and
//! synthesizes new sentences from them:
//! - Counted token-triplet store with sentence-boundary sentinels
//! - Weighted random-walk generation with explicit failure on empty models
//! - Selective forgetting of everything that mentions a word
//! - Lossless JSON snapshots and atomic database files
//!
//! The store works on tokens and never tokenizes by itself. Tokenizers are
//! pluggable collaborators; a MeCab process wrapper and a whitespace splitter
//! ship with the crate, and the [`markov`] facade ties one of them to a store
//! for text-in, text-out usage.

/// Chain engine: token data model, learning, generation, snapshots.
pub mod chain;

/// Error taxonomy shared across the crate.
pub mod error;

/// Snapshot database files (load-if-present, atomic save).
pub mod io;

/// Text-level facade owning a tokenizer and a store.
pub mod markov;

/// Tokenizer collaborators (external MeCab process, whitespace splitter).
pub mod tokenizer;
