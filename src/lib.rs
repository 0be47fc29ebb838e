//! Content-based song recommendation engine built on TF-IDF vectors
//! and cosine similarity.

pub mod codec;
pub mod config;
pub mod error;
pub mod matrix;
pub mod recommend;
pub mod recommender;
pub mod song;
pub mod utils;
pub mod vectorizer;

/// TF-IDF Vectorizer
/// Fits a vocabulary and IDF weights on an ordered collection of documents and
/// turns every document into a sparse, L2 normalized feature vector.
///
/// - tokens are lower-cased words of two or more characters, English stopwords removed
/// - the vocabulary keeps at most `max_features` tokens, highest document frequency first
/// - output vectors are aligned 1:1 with the input documents
///
/// Fitting is deterministic: the same documents and `max_features` always give
/// the same model and vectors.
pub use vectorizer::TFIDFVectorizer;

/// Fitted TF-IDF model
/// Vocabulary and IDF weights of one fit. It is an explicit value, never global state.
/// Recommendation does not need it; it is only used to vectorize new text
/// (`transform`) or to persist a fit (`to_bytes` / `from_bytes`).
pub use vectorizer::TFIDFModel;

/// Serializable form of `TFIDFModel`
pub use vectorizer::serde::TFIDFData;

/// TF IDF Calculation Engine Trait
/// Defines how IDF weights and document vectors are computed.
/// `DefaultTFIDFEngine` uses raw counts, smoothed IDF `ln((1 + n) / (1 + df)) + 1`
/// and unit-length rows.
pub use vectorizer::tfidf::{DefaultTFIDFEngine, TFIDFEngine};

/// Token Frequency structure
/// Occurrence counts of the tokens of one document.
pub use vectorizer::token::TokenFrequency;

/// Sparse feature vector
/// Only nonzero elements are stored, in ascending index order.
pub use utils::math::vector::ZeroSpVec;

/// Arithmetic over sparse vectors: elementwise add, scalar divide, dot, norm
pub use utils::math::vector::math::SparseVecOps;

/// Vector codec
/// `encode` / `decode` one feature vector to and from the stored byte blob.
pub use codec::{decode, encode};

/// Candidate Matrix
/// All feature vectors of the current corpus in one arena, row-aligned to their item ids.
pub use matrix::{CandidateMatrix, DecodePolicy};

/// Similarity ranking and taste profiles
/// - `rank`: cosine ranking of one query vector against a `CandidateMatrix`
/// - `recommend_for`: items similar to one item
/// - `aggregate`: mean vector of several liked items
/// - `recommend_from_likes`: items similar to that mean
pub use recommend::{aggregate, rank, recommend_for, recommend_from_likes, HitEntry, Hits};

/// Recommender facade over a `VectorStore`
pub use recommender::{IngestReport, MemoryStore, Recommender, VectorStore};

pub use config::{ConfigError, RecommenderConfig};
pub use error::{CodecError, Error, Result};
pub use song::SongRecord;
