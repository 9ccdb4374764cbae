//! Multi-document manifest files

use crate::error::{ManifestError, ManifestResult};
use serde::Deserialize;
use serde_yaml::Value;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::debug;

const DOCUMENT_SEPARATOR: &str = "---\n";

/// Ordered YAML documents read from one manifest file
#[derive(Debug, Clone, PartialEq)]
pub struct ManifestDocuments {
    documents: Vec<Value>,
}

impl ManifestDocuments {
    /// Parse every non-empty document in `content`
    pub fn parse(content: &str) -> Result<Self, serde_yaml::Error> {
        let mut documents = Vec::new();
        for document in serde_yaml::Deserializer::from_str(content) {
            let value = Value::deserialize(document)?;
            if !value.is_null() {
                documents.push(value);
            }
        }
        Ok(Self { documents })
    }

    /// Load all documents from a file
    pub fn load(path: impl AsRef<Path>) -> ManifestResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let manifest = Self::parse(&content).map_err(|source| ManifestError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        if manifest.documents.is_empty() {
            return Err(ManifestError::Empty {
                path: path.to_path_buf(),
            });
        }

        debug!(
            path = %path.display(),
            documents = manifest.documents.len(),
            "Loaded manifest"
        );
        Ok(manifest)
    }

    /// Render the documents as a `---`-separated YAML stream
    pub fn to_yaml(&self) -> ManifestResult<String> {
        let rendered = self
            .documents
            .iter()
            .map(serde_yaml::to_string)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rendered.join(DOCUMENT_SEPARATOR))
    }

    /// Overwrite `path` with these documents and flush them to disk
    pub fn persist(&self, path: impl AsRef<Path>) -> ManifestResult<()> {
        let path = path.as_ref();
        let yaml = self.to_yaml()?;
        let io_err = |source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        };

        let mut file = File::create(path).map_err(io_err)?;
        file.write_all(yaml.as_bytes()).map_err(io_err)?;
        file.sync_all().map_err(io_err)?;

        debug!(path = %path.display(), bytes = yaml.len(), "Persisted manifest");
        Ok(())
    }

    pub fn documents(&self) -> &[Value] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// First document whose `kind` is one of `kinds`
    pub fn find_kind(&self, kinds: &[&str]) -> Option<&Value> {
        self.documents.iter().find(|doc| has_kind(doc, kinds))
    }

    pub(crate) fn find_kind_mut(&mut self, kinds: &[&str]) -> ManifestResult<&mut Value> {
        self.documents
            .iter_mut()
            .find(|doc| has_kind(doc, kinds))
            .ok_or_else(|| ManifestError::MissingDocument {
                kinds: kinds.join("/"),
            })
    }
}

fn has_kind(document: &Value, kinds: &[&str]) -> bool {
    document
        .get("kind")
        .and_then(Value::as_str)
        .is_some_and(|kind| kinds.contains(&kind))
}

/// The workload and job templates a sweep mutates every iteration
#[derive(Debug, Clone)]
pub struct ManifestSet {
    /// Service + StatefulSet
    pub workload: ManifestDocuments,
    /// Load-generating Job
    pub job: ManifestDocuments,
}

impl ManifestSet {
    pub fn load(
        workload_template: impl AsRef<Path>,
        job_template: impl AsRef<Path>,
    ) -> ManifestResult<Self> {
        Ok(Self {
            workload: ManifestDocuments::load(workload_template)?,
            job: ManifestDocuments::load(job_template)?,
        })
    }
}
