//! In-memory knowledge store assembled from bundled data files

use std::path::Path;

use tracing::debug;
use tracing::info;

use crate::config::KnowledgeConfig;
use crate::config::KnowledgeSource;
use crate::errors::Result;
use crate::errors::ViaRagError;
use crate::models::KnowledgeRecord;
use crate::models::RawKnowledgeRecord;

/// Read-only list of knowledge records, shared across requests
#[derive(Debug, Clone, Default)]
pub struct KnowledgeStore {
    records: Vec<KnowledgeRecord>,
}

impl KnowledgeStore {
    /// Load every configured source, in declaration order
    pub fn load(config: &KnowledgeConfig) -> Result<Self> {
        let mut records = Vec::new();
        for source in &config.sources {
            let loaded = Self::load_source(source)?;
            debug!(
                "Loaded {} records from '{}' ({})",
                loaded.len(),
                source.name,
                source.path.display()
            );
            records.extend(loaded);
        }

        info!(
            "Knowledge store ready: {} records from {} sources",
            records.len(),
            config.sources.len()
        );
        Ok(Self { records })
    }

    fn load_source(source: &KnowledgeSource) -> Result<Vec<KnowledgeRecord>> {
        let raw = read_data_file(&source.path)?;
        Ok(raw
            .into_iter()
            .map(|r| KnowledgeRecord::new(r.title, r.content, source.name.clone()))
            .collect())
    }

    #[must_use]
    pub fn from_records(records: Vec<KnowledgeRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[KnowledgeRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record count per source tag, in first-seen order
    pub fn source_counts(&self) -> Vec<(String, usize)> {
        let mut counts: Vec<(String, usize)> = Vec::new();
        for record in &self.records {
            match counts.iter_mut().find(|(name, _)| *name == record.source) {
                Some((_, count)) => *count += 1,
                None => counts.push((record.source.clone(), 1)),
            }
        }
        counts
    }
}

fn read_data_file(path: &Path) -> Result<Vec<RawKnowledgeRecord>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        ViaRagError::KnowledgeError(format!("cannot read {}: {e}", path.display()))
    })?;

    serde_json::from_str(&content).map_err(|e| {
        ViaRagError::KnowledgeError(format!("invalid data file {}: {e}", path.display()))
    })
}
