use std::collections::HashSet;

use tracing::{debug, info};

use crate::codec;
use crate::config::RecommenderConfig;
use crate::error::{Error, Result};
use crate::matrix::{CandidateMatrix, DecodePolicy};
use crate::recommend::{recommend_for, recommend_from_likes};
use crate::vectorizer::{TFIDFModel, TFIDFVectorizer};

/// Durable home of the encoded feature vectors.
///
/// Writes replace everything (clear, then insert); there is no incremental update.
/// A `replace_all` racing with `read_all` may expose a partially cleared store;
/// guarding that is up to the implementation's transaction boundary.
pub trait VectorStore {
    /// Drop prior contents and store `entries` in the given order
    fn replace_all(&mut self, entries: Vec<(u64, Vec<u8>)>) -> Result<()>;
    /// Every stored entry, in no particular order
    fn read_all(&self) -> Result<Vec<(u64, Vec<u8>)>>;
}

/// In-memory `VectorStore`
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Vec<(u64, Vec<u8>)>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl VectorStore for MemoryStore {
    fn replace_all(&mut self, entries: Vec<(u64, Vec<u8>)>) -> Result<()> {
        self.entries = entries;
        Ok(())
    }

    fn read_all(&self) -> Result<Vec<(u64, Vec<u8>)>> {
        Ok(self.entries.clone())
    }
}

/// Outcome of one ingest run
#[derive(Debug, Clone)]
pub struct IngestReport {
    /// number of items written to the store
    pub items: usize,
    pub vocabulary_size: usize,
    /// fitted model, for callers that want to persist it or vectorize free text
    pub model: TFIDFModel,
}

/// Recommender
/// Ties the vectorizer, codec and ranking together over a `VectorStore`.
/// Holds no state between queries besides the store itself:
/// every query reads a fresh `CandidateMatrix`.
#[derive(Debug, Clone)]
pub struct Recommender<S: VectorStore> {
    store: S,
    config: RecommenderConfig,
    policy: DecodePolicy,
}

impl<S: VectorStore> Recommender<S> {
    pub fn new(store: S, config: RecommenderConfig) -> Self {
        Self {
            store,
            config,
            policy: DecodePolicy::default(),
        }
    }

    /// How undecodable stored rows are handled at query time
    pub fn with_decode_policy(mut self, policy: DecodePolicy) -> Self {
        self.policy = policy;
        self
    }

    #[inline]
    pub fn config(&self) -> &RecommenderConfig {
        &self.config
    }

    #[inline]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[inline]
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Fit a model on `corpus`, encode one vector per item and replace the store contents.
    ///
    /// # Errors
    /// `Config` for an invalid config, `EmptyCorpus` for an empty corpus,
    /// `DuplicateItem` when an id repeats.
    pub fn ingest(&mut self, corpus: &[(u64, String)]) -> Result<IngestReport> {
        info!(items = corpus.len(), "ingest start");
        self.config.validate()?;
        let mut seen = HashSet::with_capacity(corpus.len());
        if let Some(&(dup, _)) = corpus.iter().find(|(id, _)| !seen.insert(*id)) {
            return Err(Error::DuplicateItem(dup));
        }

        let texts: Vec<&str> = corpus.iter().map(|(_, text)| text.as_str()).collect();
        let (model, vectors) = TFIDFVectorizer::new(self.config.max_features).fit_transform(&texts)?;

        let entries = corpus
            .iter()
            .zip(&vectors)
            .map(|((id, _), vec)| -> Result<(u64, Vec<u8>)> { Ok((*id, codec::encode(vec)?)) })
            .collect::<Result<Vec<_>>>()?;
        self.store.replace_all(entries)?;

        info!(items = corpus.len(), vocabulary = model.dim(), "ingest complete");
        Ok(IngestReport {
            items: corpus.len(),
            vocabulary_size: model.dim(),
            model,
        })
    }

    /// Assemble the Candidate Matrix from the store.
    /// `None` when nothing has been ingested.
    pub fn load_matrix(&self) -> Result<Option<CandidateMatrix>> {
        let entries = self.store.read_all()?;
        if entries.is_empty() {
            debug!("vector store is empty, ingest first");
            return Ok(None);
        }
        CandidateMatrix::from_encoded(entries, self.policy).map(Some)
    }

    /// Items similar to `item_id`; empty when the id or the store is unknown
    pub fn recommend(&self, item_id: u64, top_n: usize) -> Result<Vec<(u64, f64)>> {
        match self.load_matrix()? {
            Some(matrix) => recommend_for(item_id, &matrix, top_n),
            None => Ok(Vec::new()),
        }
    }

    /// `recommend` with the configured default result count
    pub fn recommend_default(&self, item_id: u64) -> Result<Vec<(u64, f64)>> {
        self.recommend(item_id, self.config.default_top_n)
    }

    /// Items matching the averaged taste of `liked_ids`, likes excluded
    pub fn recommend_from_likes(&self, liked_ids: &[u64], top_n: usize) -> Result<Vec<(u64, f64)>> {
        match self.load_matrix()? {
            Some(matrix) => recommend_from_likes(liked_ids, &matrix, top_n),
            None => Ok(Vec::new()),
        }
    }

    /// `recommend_from_likes` with the configured likes result count
    pub fn recommend_from_likes_default(&self, liked_ids: &[u64]) -> Result<Vec<(u64, f64)>> {
        self.recommend_from_likes(liked_ids, self.config.likes_top_n)
    }
}
