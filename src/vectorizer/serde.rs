use std::marker::PhantomData;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::vectorizer::{tfidf::TFIDFEngine, TFIDFModel};

/// Serializable form of a `TFIDFModel`
/// Holds no engine marker, so it can be stored and restored independently
/// of the engine type parameter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TFIDFData {
    /// vocabulary in column order
    pub vocabulary: Vec<String>,
    pub idf: Vec<f64>,
    pub doc_num: u64,
}

impl TFIDFData {
    /// Rebuild the model, checking that vocabulary and IDF line up
    pub fn into_model<E>(self) -> Result<TFIDFModel<E>>
    where
        E: TFIDFEngine<f64>,
    {
        if self.vocabulary.len() != self.idf.len() {
            return Err(Error::Model(format!(
                "{} vocabulary tokens but {} idf weights",
                self.vocabulary.len(),
                self.idf.len()
            )));
        }
        let vocab_len = self.vocabulary.len();
        let vocabulary: IndexSet<String> = self.vocabulary.into_iter().collect();
        if vocabulary.len() != vocab_len {
            return Err(Error::Model("duplicate vocabulary token".to_string()));
        }
        if let Some(w) = self.idf.iter().find(|w| !w.is_finite() || **w < 0.0) {
            return Err(Error::Model(format!("invalid idf weight {w}")));
        }
        Ok(TFIDFModel {
            vocabulary,
            idf: self.idf,
            doc_num: self.doc_num,
            _marker: PhantomData,
        })
    }
}

impl<E> From<&TFIDFModel<E>> for TFIDFData {
    fn from(model: &TFIDFModel<E>) -> Self {
        TFIDFData {
            vocabulary: model.vocabulary.iter().cloned().collect(),
            idf: model.idf.clone(),
            doc_num: model.doc_num,
        }
    }
}

impl<E> TFIDFModel<E>
where
    E: TFIDFEngine<f64>,
{
    /// CBOR bytes of this model
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        serde_cbor::to_vec(&TFIDFData::from(self)).map_err(|e| Error::Model(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let data: TFIDFData = serde_cbor::from_slice(bytes).map_err(|e| Error::Model(e.to_string()))?;
        data.into_model()
    }
}
