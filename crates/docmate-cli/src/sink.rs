//! Output sink for extracted documents.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;

/// Directory under the project root that receives generated data.
const OUTPUT_DIR: &str = ".fox";
/// File name of the extracted document.
const OUTPUT_FILE: &str = "doc-mate-data.json";

/// Writes extracted documents under a project root. The sink is owned by
/// the command that runs the extraction; nothing writes through global
/// state.
pub struct DocSink {
    root: PathBuf,
}

impl DocSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Path the next [`write`](Self::write) call will produce.
    pub fn output_path(&self) -> PathBuf {
        self.root.join(OUTPUT_DIR).join(OUTPUT_FILE)
    }

    /// Serializes the document as pretty JSON and writes it in full,
    /// creating the output directory if needed. Returns the written path.
    pub async fn write<T: Serialize>(&self, document: &T) -> Result<PathBuf> {
        let out_dir = self.root.join(OUTPUT_DIR);
        tokio::fs::create_dir_all(&out_dir)
            .await
            .with_context(|| format!("cannot create '{}'", out_dir.display()))?;

        let out_path = out_dir.join(OUTPUT_FILE);
        let mut json =
            serde_json::to_string_pretty(document).context("cannot serialize document")?;
        json.push('\n');
        tokio::fs::write(&out_path, json)
            .await
            .with_context(|| format!("cannot write '{}'", out_path.display()))?;
        Ok(out_path)
    }
}
