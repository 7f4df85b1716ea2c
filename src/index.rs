// The `index` module holds the document store the chat engine retrieves from.

use crate::document::Document;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum IndexError {
    /// Ingestion produced nothing to index.
    #[error("No documents to index. Please fetch emails first.")]
    Empty,
}

/// Document store built once from a full ingestion run.
///
/// There is no embedding model behind this index: a hash-based placeholder
/// vector gives no semantic signal, so retrieval is deliberately
/// non-selective. Every query gets documents in position order (newest
/// first) up to the requested breadth, and the chat session always asks for
/// all of them. A new document set needs a new index.
#[derive(Debug, Clone)]
pub struct DocumentIndex {
    documents: Vec<Document>,
}

impl DocumentIndex {
    /// Builds the index. Fails when `documents` is empty.
    pub fn build(documents: &[Document]) -> Result<Self, IndexError> {
        if documents.is_empty() {
            return Err(IndexError::Empty);
        }
        let mut documents = documents.to_vec();
        documents.sort_by_key(|d| d.metadata.email_position);
        info!(documents = documents.len(), "Index built");
        Ok(Self { documents })
    }

    /// Returns up to `top_k` documents, newest first. The query text does not affect ranking.
    pub fn retrieve(&self, _query: &str, top_k: usize) -> Vec<&Document> {
        self.documents.iter().take(top_k).collect()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
