//! Project metadata from package.json.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Fields lifted from package.json into the document header. Every field
/// falls back to `"unknown"` when package.json is absent or silent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageInfo {
    pub name: String,
    pub author: String,
    pub github: String,
}

impl Default for PackageInfo {
    fn default() -> Self {
        Self {
            name: "unknown".to_string(),
            author: "unknown".to_string(),
            github: "unknown".to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawPackageJson {
    name: Option<String>,
    author: Option<serde_json::Value>,
    github: Option<String>,
    #[serde(rename = "docEntry")]
    doc_entry: Option<String>,
    main: Option<String>,
}

/// package.json contents relevant to extraction.
#[derive(Debug, Default)]
pub struct PackageJson {
    raw: RawPackageJson,
}

impl PackageJson {
    /// Loads `<root>/package.json`. A missing file is not an error; every
    /// lookup then falls back to its default.
    pub async fn load(root: &Path) -> Result<Self> {
        let path = root.join("package.json");
        match tokio::fs::read_to_string(&path).await {
            Ok(contents) => {
                let raw = serde_json::from_str(&contents)
                    .with_context(|| format!("invalid package.json at '{}'", path.display()))?;
                Ok(Self { raw })
            }
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(error) => {
                Err(error).with_context(|| format!("failed to read '{}'", path.display()))
            }
        }
    }

    /// Project metadata for the document header.
    pub fn info(&self) -> PackageInfo {
        let mut info = PackageInfo::default();
        if let Some(name) = &self.raw.name {
            info.name = name.clone();
        }
        if let Some(author) = &self.raw.author {
            // npm allows both a plain string and a person object here.
            match author {
                serde_json::Value::String(name) => info.author = name.clone(),
                serde_json::Value::Object(person) => {
                    if let Some(name) = person.get("name").and_then(|value| value.as_str()) {
                        info.author = name.to_string();
                    }
                }
                _ => {}
            }
        }
        if let Some(github) = &self.raw.github {
            info.github = github.clone();
        }
        info
    }

    /// Entry module advertised by the manifest: `docEntry` wins over `main`.
    pub fn entry(&self) -> Option<&str> {
        self.raw
            .doc_entry
            .as_deref()
            .or(self.raw.main.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(contents: &str) -> PackageJson {
        PackageJson {
            raw: serde_json::from_str(contents).expect("valid json"),
        }
    }

    #[test]
    fn missing_fields_default_to_unknown() {
        let info = parsed("{}").info();
        assert_eq!(info.name, "unknown");
        assert_eq!(info.author, "unknown");
        assert_eq!(info.github, "unknown");
    }

    #[test]
    fn author_object_uses_its_name() {
        let info = parsed(r#"{"author": {"name": "Ada", "email": "ada@example.com"}}"#).info();
        assert_eq!(info.author, "Ada");
    }

    #[test]
    fn doc_entry_wins_over_main() {
        let pkg = parsed(r#"{"main": "lib/index.js", "docEntry": "src/docs.js"}"#);
        assert_eq!(pkg.entry(), Some("src/docs.js"));
    }

    #[test]
    fn main_is_the_fallback_entry() {
        let pkg = parsed(r#"{"main": "lib/index.js"}"#);
        assert_eq!(pkg.entry(), Some("lib/index.js"));
    }
}
