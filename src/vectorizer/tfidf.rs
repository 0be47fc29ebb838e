use indexmap::IndexSet;

use crate::utils::math::vector::math::SparseVecOps;
use crate::utils::math::vector::ZeroSpVec;
use crate::vectorizer::{corpus::Corpus, token::TokenFrequency};

/// Weighting scheme used by the vectorizer
pub trait TFIDFEngine<N>
where
    N: num::Num,
{
    /// IDF weight for every vocabulary column
    /// # Arguments
    /// * `corpus` - document frequencies of the fitted corpus
    /// * `vocabulary` - column order
    fn idf_vec(corpus: &Corpus, vocabulary: &IndexSet<String>) -> Vec<N>;

    /// Weighted vector of one document
    /// Tokens outside `vocabulary` are ignored.
    fn tfidf_vec(freq: &TokenFrequency, vocabulary: &IndexSet<String>, idf: &[N]) -> ZeroSpVec<N>;
}

/// Default engine
/// - tf: raw token count
/// - idf: `ln((1 + n) / (1 + df)) + 1`
/// - rows L2 normalized
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultTFIDFEngine;

impl DefaultTFIDFEngine {
    pub fn new() -> Self {
        DefaultTFIDFEngine
    }

    #[inline]
    pub fn idf_calc(doc_num: u64, doc_freq: u64) -> f64 {
        ((1.0 + doc_num as f64) / (1.0 + doc_freq as f64)).ln() + 1.0
    }
}

impl TFIDFEngine<f64> for DefaultTFIDFEngine {
    fn idf_vec(corpus: &Corpus, vocabulary: &IndexSet<String>) -> Vec<f64> {
        let doc_num = corpus.get_doc_num();
        vocabulary
            .iter()
            .map(|token| Self::idf_calc(doc_num, corpus.get_token_count(token)))
            .collect()
    }

    fn tfidf_vec(freq: &TokenFrequency, vocabulary: &IndexSet<String>, idf: &[f64]) -> ZeroSpVec<f64> {
        let pairs: Vec<(u32, f64)> = freq
            .iter()
            .filter_map(|(token, count)| {
                vocabulary
                    .get_index_of(token)
                    .map(|col| (col as u32, count as f64 * idf[col]))
            })
            .collect();
        let vec = ZeroSpVec::from_unsorted(vocabulary.len(), pairs);
        let norm = vec.norm();
        if norm > 0.0 {
            vec.div_scalar(norm)
        } else {
            vec
        }
    }
}
