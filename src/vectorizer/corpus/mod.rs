use indexmap::IndexMap;

use crate::vectorizer::token::TokenFrequency;

/// Document-frequency statistics of one fitted corpus
/// It does not keep document text, only:
/// - the number of documents
/// - the number of documents each token appears in
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    doc_num: u64,
    token_counts: IndexMap<Box<str>, u64>,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from per-document token frequencies
    pub fn from_freqs<'a, I>(freqs: I) -> Self
    where
        I: IntoIterator<Item = &'a TokenFrequency>,
    {
        let mut corpus = Self::new();
        for freq in freqs {
            corpus.add_set(&freq.token_set_ref_str());
        }
        corpus
    }

    /// Add one document's distinct tokens
    pub fn add_set<T>(&mut self, tokens: &[T])
    where
        T: AsRef<str>,
    {
        self.doc_num += 1;
        for token in tokens {
            *self.token_counts.entry(token.as_ref().into()).or_insert(0) += 1;
        }
    }

    #[inline]
    pub fn get_doc_num(&self) -> u64 {
        self.doc_num
    }

    /// number of documents containing `token`
    #[inline]
    pub fn get_token_count(&self, token: &str) -> u64 {
        self.token_counts.get(token).copied().unwrap_or(0)
    }

    /// number of distinct tokens seen
    #[inline]
    pub fn vocab_size(&self) -> usize {
        self.token_counts.len()
    }

    /// Pick at most `max_features` tokens with the highest document frequency.
    /// Ties break lexicographically; the result is in lexicographic order,
    /// which is the column order of the vocabulary.
    pub fn select_vocabulary(&self, max_features: usize) -> Vec<String> {
        let mut ranked: Vec<(&str, u64)> = self
            .token_counts
            .iter()
            .map(|(token, &df)| (token.as_ref(), df))
            .collect();
        ranked.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(max_features);
        let mut selected: Vec<String> = ranked.into_iter().map(|(token, _)| token.to_string()).collect();
        selected.sort_unstable();
        selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus_of(texts: &[&str]) -> Corpus {
        let freqs: Vec<TokenFrequency> = texts.iter().map(|t| TokenFrequency::from_text(t)).collect();
        Corpus::from_freqs(&freqs)
    }

    #[test]
    fn counts_documents_not_occurrences() {
        let corpus = corpus_of(&["rock rock rock", "rock pop", "jazz"]);
        assert_eq!(corpus.get_doc_num(), 3);
        assert_eq!(corpus.get_token_count("rock"), 2);
        assert_eq!(corpus.get_token_count("pop"), 1);
        assert_eq!(corpus.get_token_count("metal"), 0);
        assert_eq!(corpus.vocab_size(), 3);
    }

    #[test]
    fn selection_prefers_frequent_then_lexicographic() {
        let corpus = corpus_of(&["zeta beta alpha", "zeta beta", "zeta gamma"]);
        // df: zeta 3, beta 2, alpha 1, gamma 1
        assert_eq!(corpus.select_vocabulary(2), vec!["beta", "zeta"]);
        assert_eq!(corpus.select_vocabulary(3), vec!["alpha", "beta", "zeta"]);
        assert_eq!(corpus.select_vocabulary(10), vec!["alpha", "beta", "gamma", "zeta"]);
    }
}
