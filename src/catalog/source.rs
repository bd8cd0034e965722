//! Where catalog records come from: the HTTP API, a local JSON file, or one with the other as
//! fallback.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{debug, warn};

use crate::catalog::model::{CatalogResponse, PlantRecord};
use crate::foundation::error::{PlantfitError, PlantfitResult};

/// A source of plant records. Fetches are blocking and carry no timeout of their own.
pub trait CatalogSource {
    fn fetch(&self) -> PlantfitResult<Vec<PlantRecord>>;

    /// Short human-readable origin for logs.
    fn describe(&self) -> String;
}

/// Accepts `{"results": [...]}` or a bare array of records.
pub fn parse_catalog_json(text: &str) -> PlantfitResult<Vec<PlantRecord>> {
    #[derive(serde::Deserialize)]
    #[serde(untagged)]
    enum Shape {
        Wrapped(CatalogResponse),
        Bare(Vec<PlantRecord>),
    }

    let shape: Shape = serde_json::from_str(text)
        .map_err(|e| PlantfitError::serde(format!("catalog json: {e}")))?;
    Ok(match shape {
        Shape::Wrapped(resp) => resp.results,
        Shape::Bare(records) => records,
    })
}

/// `GET <base>/plants/` against the catalog API.
pub struct HttpCatalog {
    endpoint: String,
    agent: ureq::Agent,
}

impl HttpCatalog {
    pub fn new(api_base_url: &str) -> Self {
        Self {
            endpoint: format!("{}/plants/", api_base_url.trim_end_matches('/')),
            agent: ureq::AgentBuilder::new().build(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl CatalogSource for HttpCatalog {
    fn fetch(&self) -> PlantfitResult<Vec<PlantRecord>> {
        let response = match self.agent.get(&self.endpoint).call() {
            Ok(response) => response,
            Err(ureq::Error::Status(code, _)) => {
                return Err(PlantfitError::catalog(format!(
                    "API error: HTTP {code} from {}",
                    self.endpoint
                )));
            }
            Err(ureq::Error::Transport(err)) => {
                return Err(PlantfitError::catalog(format!(
                    "request to {} failed: {err}",
                    self.endpoint
                )));
            }
        };

        let mut body = String::new();
        response
            .into_reader()
            .read_to_string(&mut body)
            .with_context(|| format!("read catalog response from {}", self.endpoint))?;
        let records = parse_catalog_json(&body)?;
        debug!(endpoint = %self.endpoint, count = records.len(), "catalog fetched");
        Ok(records)
    }

    fn describe(&self) -> String {
        self.endpoint.clone()
    }
}

/// A JSON file in the same shape the API serves.
pub struct FileCatalog {
    path: PathBuf,
}

impl FileCatalog {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl CatalogSource for FileCatalog {
    fn fetch(&self) -> PlantfitResult<Vec<PlantRecord>> {
        let text = std::fs::read_to_string(&self.path)
            .with_context(|| format!("read catalog file {}", self.path.display()))?;
        parse_catalog_json(&text)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Tries `primary`, then `fallback` when the primary fails.
pub struct FallbackCatalog<P, F> {
    primary: P,
    fallback: F,
}

impl<P: CatalogSource, F: CatalogSource> FallbackCatalog<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

impl<P: CatalogSource, F: CatalogSource> CatalogSource for FallbackCatalog<P, F> {
    fn fetch(&self) -> PlantfitResult<Vec<PlantRecord>> {
        match self.primary.fetch() {
            Ok(records) => Ok(records),
            Err(err) => {
                warn!(
                    source = %self.primary.describe(),
                    fallback = %self.fallback.describe(),
                    error = %err,
                    "catalog source failed, using fallback"
                );
                self.fallback.fetch()
            }
        }
    }

    fn describe(&self) -> String {
        format!("{} (fallback {})", self.primary.describe(), self.fallback.describe())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/source.rs"]
mod tests;
