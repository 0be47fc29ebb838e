pub mod corpus;
pub mod serde;
pub mod tfidf;
pub mod token;

use std::marker::PhantomData;

use indexmap::IndexSet;
use rayon::prelude::*;
use tracing::info;

use crate::config::{ConfigError, DEFAULT_MAX_FEATURES};
use crate::error::{Error, Result};
use crate::utils::math::vector::ZeroSpVec;
use crate::vectorizer::{
    corpus::Corpus,
    tfidf::{DefaultTFIDFEngine, TFIDFEngine},
    token::TokenFrequency,
};

/// Fitted vocabulary plus IDF weights.
/// Immutable once fitted; column `i` of every vector it produces
/// is the `i`-th vocabulary token.
#[derive(Debug, Clone, PartialEq)]
pub struct TFIDFModel<E = DefaultTFIDFEngine> {
    /// token -> column, lexicographic
    pub(crate) vocabulary: IndexSet<String>,
    pub(crate) idf: Vec<f64>,
    pub(crate) doc_num: u64,
    pub(crate) _marker: PhantomData<E>,
}

impl<E> TFIDFModel<E>
where
    E: TFIDFEngine<f64>,
{
    /// vector dimension
    #[inline]
    pub fn dim(&self) -> usize {
        self.vocabulary.len()
    }

    /// number of documents the model was fitted on
    #[inline]
    pub fn doc_num(&self) -> u64 {
        self.doc_num
    }

    /// vocabulary tokens in column order
    pub fn vocabulary(&self) -> impl Iterator<Item = &str> + '_ {
        self.vocabulary.iter().map(|s| s.as_str())
    }

    #[inline]
    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get_index_of(term)
    }

    #[inline]
    pub fn idf(&self) -> &[f64] {
        &self.idf
    }

    /// Vectorize new text with the fitted vocabulary.
    /// Unknown tokens are ignored; text with no known token gives an all-zero vector.
    pub fn transform(&self, text: &str) -> ZeroSpVec<f64> {
        self.transform_freq(&TokenFrequency::from_text(text))
    }

    pub fn transform_freq(&self, freq: &TokenFrequency) -> ZeroSpVec<f64> {
        E::tfidf_vec(freq, &self.vocabulary, &self.idf)
    }
}

/// TF-IDF vectorizer
/// Fits a `TFIDFModel` on an ordered document collection and emits one
/// feature vector per document, aligned with the input order.
///
/// `E` is the weighting engine, `DefaultTFIDFEngine` unless replaced.
#[derive(Debug, Clone)]
pub struct TFIDFVectorizer<E = DefaultTFIDFEngine> {
    max_features: usize,
    _marker: PhantomData<E>,
}

impl Default for TFIDFVectorizer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FEATURES)
    }
}

impl TFIDFVectorizer {
    /// Vectorizer with the default engine
    /// `max_features` caps the vocabulary size
    pub fn new(max_features: usize) -> Self {
        Self::with_engine(max_features)
    }
}

impl<E> TFIDFVectorizer<E>
where
    E: TFIDFEngine<f64> + Send + Sync,
{
    pub fn with_engine(max_features: usize) -> Self {
        Self {
            max_features,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub fn max_features(&self) -> usize {
        self.max_features
    }

    /// Fit a model on `documents` and vectorize each of them.
    /// Same documents and `max_features` always give the same model and vectors.
    ///
    /// # Errors
    /// `EmptyCorpus` for no documents, `Config(ZeroMaxFeatures)` when `max_features` is 0.
    pub fn fit_transform<S>(&self, documents: &[S]) -> Result<(TFIDFModel<E>, Vec<ZeroSpVec<f64>>)>
    where
        S: AsRef<str> + Sync,
    {
        if self.max_features == 0 {
            return Err(ConfigError::ZeroMaxFeatures.into());
        }
        if documents.is_empty() {
            return Err(Error::EmptyCorpus);
        }

        // par_iter collect keeps input order
        let freqs: Vec<TokenFrequency> = documents
            .par_iter()
            .map(|doc| TokenFrequency::from_text(doc.as_ref()))
            .collect();

        let corpus = Corpus::from_freqs(&freqs);
        let vocabulary: IndexSet<String> = corpus
            .select_vocabulary(self.max_features)
            .into_iter()
            .collect();
        let idf = E::idf_vec(&corpus, &vocabulary);
        let model = TFIDFModel {
            vocabulary,
            idf,
            doc_num: corpus.get_doc_num(),
            _marker: PhantomData,
        };

        let vectors: Vec<ZeroSpVec<f64>> = freqs
            .par_iter()
            .map(|freq| model.transform_freq(freq))
            .collect();

        info!(
            documents = documents.len(),
            distinct_terms = corpus.vocab_size(),
            vocabulary = model.dim(),
            "fitted tf-idf model"
        );
        Ok((model, vectors))
    }
}
