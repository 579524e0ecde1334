mod parser;

use super::domain::VisaCase;
use super::repository::{CaseRepository, RepositoryError};
use async_trait::async_trait;
use std::io::{Cursor, Read};
use std::path::PathBuf;
use tracing::debug;

pub struct CaseImporter;

impl CaseImporter {
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<VisaCase>, RepositoryError> {
        parser::parse_cases(reader)
    }
}

#[derive(Debug, Clone)]
enum CsvSource {
    File(PathBuf),
    Embedded(&'static str),
}

/// CSV-backed repository. Every load re-reads the source, so edits show up on the next call.
#[derive(Debug, Clone)]
pub struct CsvCaseRepository {
    source: CsvSource,
}

impl CsvCaseRepository {
    pub fn from_path<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            source: CsvSource::File(path.into()),
        }
    }

    pub fn from_static(csv: &'static str) -> Self {
        Self {
            source: CsvSource::Embedded(csv),
        }
    }
}

#[async_trait]
impl CaseRepository for CsvCaseRepository {
    async fn load_cases(&self) -> Result<Vec<VisaCase>, RepositoryError> {
        let cases = match &self.source {
            CsvSource::File(path) => {
                let bytes = tokio::fs::read(path).await?;
                CaseImporter::from_reader(Cursor::new(bytes))?
            }
            CsvSource::Embedded(csv) => CaseImporter::from_reader(csv.as_bytes())?,
        };
        debug!(count = cases.len(), "loaded visa cases from csv");
        Ok(cases)
    }
}
