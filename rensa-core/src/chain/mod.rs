//! Top-level module for the trigram chain engine.
//!
//! The engine is a counted multiset of token triplets and everything that
//! operates on it:
//! - The token data model (`Token`, `Triplet`)
//! - The counted store itself (`TripletStore`)
//! - Ingestion of tokenized lines (`learner`)
//! - Weighted random-walk sentence generation (`generator`)
//! - Lossless JSON snapshot encode/decode (`codec`)
//!
//! Learning, generation, forgetting and snapshotting are all methods on
//! [`store::TripletStore`]; the private submodules only split the
//! implementation along those concerns.

/// Sentence tokens: corpus words plus the two boundary sentinels.
pub mod token;

/// Structural three-token key with sentinel placement rules.
pub mod triplet;

/// Counted multiset of triplets. The sole persistent state of a model.
pub mod store;

/// Folds tokenized lines into a store: sliding three-token windows plus
/// the two boundary triplets, with a parallel bulk builder.
mod learner;

/// Weighted random walk over stored continuations.
///
/// Draws are proportional to observed counts; dead ends close the
/// sentence instead of failing. This module is not exposed publicly.
mod generator;

/// JSON snapshot encode/decode with strict validation on the way in.
mod codec;
