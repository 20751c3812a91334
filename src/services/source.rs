// src/services/source.rs

//! Fragment sources.
//!
//! A source exposes an ordered manifest of fragment names and the raw text of
//! each fragment. Two backends exist: [`HttpSource`] for a remote base URL and
//! [`DirSource`] for a local directory.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

use crate::error::{AppError, Result};
use crate::models::SourceConfig;
use crate::utils::http::{create_async_client, fetch_text};
use crate::utils::resolve_url;

/// Where register fragments are loaded from.
#[async_trait]
pub trait LoadSource: Send + Sync {
    /// Ordered fragment names from the manifest.
    async fn list_fragment_names(&self) -> Result<Vec<String>>;

    /// Raw text of one fragment.
    async fn fetch_fragment(&self, name: &str) -> Result<String>;
}

/// Manifest layouts: a bare array, or an object with a `files` array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Manifest {
    List(Vec<String>),
    Object { files: Vec<String> },
}

/// Parse manifest text into fragment names, dropping blanks.
pub fn parse_manifest(text: &str) -> Result<Vec<String>> {
    let manifest: Manifest = serde_json::from_str(text)
        .map_err(|e| AppError::load(format!("invalid manifest: {e}")))?;
    let names = match manifest {
        Manifest::List(files) | Manifest::Object { files } => files,
    };
    Ok(names
        .into_iter()
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect())
}

/// Fragments served over HTTP relative to a base URL.
pub struct HttpSource {
    client: reqwest::Client,
    base: Url,
    manifest: String,
}

impl HttpSource {
    pub fn new(config: &SourceConfig) -> Result<Self> {
        let client = create_async_client(config)?;
        Self::with_client(client, &config.location, &config.manifest)
    }

    pub fn with_client(client: reqwest::Client, location: &str, manifest: &str) -> Result<Self> {
        // A trailing slash makes relative names resolve inside the location.
        let location = if location.ends_with('/') {
            location.to_string()
        } else {
            format!("{location}/")
        };
        Ok(Self {
            client,
            base: Url::parse(&location)?,
            manifest: manifest.to_string(),
        })
    }

    fn url_for(&self, name: &str) -> String {
        resolve_url(&self.base, name)
    }
}

#[async_trait]
impl LoadSource for HttpSource {
    async fn list_fragment_names(&self) -> Result<Vec<String>> {
        let url = self.url_for(&self.manifest);
        log::debug!("Fetching manifest {}", url);
        let text = fetch_text(&self.client, &url).await?;
        parse_manifest(&text)
    }

    async fn fetch_fragment(&self, name: &str) -> Result<String> {
        let url = self.url_for(name);
        log::debug!("Fetching fragment {}", url);
        fetch_text(&self.client, &url).await
    }
}

/// Fragments stored as files in a local directory.
pub struct DirSource {
    root_dir: PathBuf,
    manifest: String,
}

impl DirSource {
    pub fn new(root_dir: impl Into<PathBuf>, manifest: impl Into<String>) -> Self {
        Self {
            root_dir: root_dir.into(),
            manifest: manifest.into(),
        }
    }

    async fn read(&self, name: &str) -> Result<String> {
        let path = self.root_dir.join(name);
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| AppError::load(format!("{}: {e}", path.display())))
    }
}

#[async_trait]
impl LoadSource for DirSource {
    async fn list_fragment_names(&self) -> Result<Vec<String>> {
        let text = self.read(&self.manifest).await?;
        parse_manifest(&text)
    }

    async fn fetch_fragment(&self, name: &str) -> Result<String> {
        self.read(name).await
    }
}

/// Build the source named by the configuration.
pub fn from_config(config: &SourceConfig) -> Result<Box<dyn LoadSource>> {
    if config.is_remote() {
        Ok(Box::new(HttpSource::new(config)?))
    } else {
        Ok(Box::new(DirSource::new(&config.location, &config.manifest)))
    }
}
