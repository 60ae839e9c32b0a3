//! Command implementations.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Serialize;

use docmate_core::{extract, DeclarationRecord, DefaultExport, ExtractOptions, ParserConfig};
use docmate_graph::DependencyWalker;

use crate::cli::{DepsArgs, ExtractArgs};
use crate::package_json::{PackageInfo, PackageJson};
use crate::sink::DocSink;

/// Environment variable that overrides the package.json entry.
const ENTRY_ENV: &str = "DOCMATE_ENTRY";

/// Serialized shape of the output file. Field order is the on-disk key
/// order.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DocumentOutput {
    name: String,
    author: String,
    github: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    description: String,
    default_info: DefaultExport,
    common_export: Vec<DeclarationRecord>,
}

/// Runs `docmate extract`.
pub async fn extract_execute(args: ExtractArgs) -> Result<()> {
    let root = std::env::current_dir().context("cannot determine working directory")?;
    let package = PackageJson::load(&root).await?;
    let entry = resolve_entry(args.entry, &package, &root)?;
    tracing::info!(entry = %entry.display(), "extracting documentation metadata");

    let options = ExtractOptions {
        fail_on_unresolved: args.fail_on_unresolved,
    };
    let doc = extract(&entry, ParserConfig::default(), options)
        .await
        .with_context(|| format!("extraction failed for '{}'", entry.display()))?;

    for diagnostic in &doc.diagnostics {
        tracing::warn!("{diagnostic}; the export is omitted from the document");
    }

    let PackageInfo {
        name,
        author,
        github,
    } = package.info();
    let output = DocumentOutput {
        name,
        author,
        github,
        description: doc.description,
        default_info: doc.default_info,
        common_export: doc.common_export,
    };

    let sink = DocSink::new(&root);
    let out_path = sink.write(&output).await?;

    tracing::info!(path = %out_path.display(), "document written");
    Ok(())
}

/// Runs `docmate deps`.
pub async fn deps_execute(args: DepsArgs) -> Result<()> {
    let root = std::env::current_dir().context("cannot determine working directory")?;
    let package = PackageJson::load(&root).await?;
    let entry = resolve_entry(args.entry, &package, &root)?;
    tracing::info!(entry = %entry.display(), "walking dependency tree");

    let walker = DependencyWalker::new(ParserConfig::default());
    let tree = walker
        .walk(&entry)
        .await
        .with_context(|| format!("dependency walk failed for '{}'", entry.display()))?;

    println!("{}", serde_json::to_string_pretty(&tree)?);
    Ok(())
}

/// Settles the entry module: the --entry flag wins, then the DOCMATE_ENTRY
/// environment variable, then the package.json entry. Relative paths
/// resolve against the working directory and extensionless entries get
/// `.js` appended.
fn resolve_entry(
    flag: Option<PathBuf>,
    package: &PackageJson,
    root: &Path,
) -> Result<PathBuf> {
    let candidate = flag
        .or_else(|| std::env::var(ENTRY_ENV).ok().map(PathBuf::from))
        .or_else(|| package.entry().map(PathBuf::from));
    let Some(candidate) = candidate else {
        bail!(
            "no entry module: pass --entry, set {ENTRY_ENV}, \
             or add a docEntry or main field to package.json"
        );
    };

    let absolute = if candidate.is_absolute() {
        candidate
    } else {
        root.join(candidate)
    };
    Ok(with_script_extension(absolute))
}

fn with_script_extension(path: PathBuf) -> PathBuf {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("js" | "jsx") => path,
        _ => {
            let mut with_ext = path.into_os_string();
            with_ext.push(".js");
            PathBuf::from(with_ext)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_entry_is_resolved_against_root() {
        let entry = resolve_entry(
            Some(PathBuf::from("src/index")),
            &PackageJson::default(),
            Path::new("/project"),
        )
        .expect("entry");
        assert_eq!(entry, PathBuf::from("/project/src/index.js"));
    }

    #[test]
    fn absolute_flag_entry_is_kept() {
        let entry = resolve_entry(
            Some(PathBuf::from("/elsewhere/main.jsx")),
            &PackageJson::default(),
            Path::new("/project"),
        )
        .expect("entry");
        assert_eq!(entry, PathBuf::from("/elsewhere/main.jsx"));
    }

    #[test]
    fn missing_entry_is_an_error() {
        // The env fallback only fires when the variable is set for the
        // whole process, which tests must not do; an unset variable plus an
        // empty manifest leaves no candidate.
        if std::env::var(ENTRY_ENV).is_ok() {
            return;
        }
        let result = resolve_entry(None, &PackageJson::default(), Path::new("/project"));
        assert!(result.is_err());
    }
}
