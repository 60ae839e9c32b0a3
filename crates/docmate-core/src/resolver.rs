//! Import-specifier resolution.
//!
//! Specifiers resolve against the importing module's directory, `..`
//! segments are folded away, and extensionless specifiers are assumed to
//! mean `.js`. Whether the file actually carries `.jsx` on disk is settled
//! at read time.

use std::path::{Path, PathBuf};

use path_clean::PathClean;

use crate::error::{Error, Result};

/// Resolves an import specifier relative to the importing module.
pub fn resolve_specifier(from: &Path, specifier: &str) -> PathBuf {
    let base = from.parent().unwrap_or_else(|| Path::new("."));
    let joined = base.join(specifier).clean();
    if has_script_extension(&joined) {
        joined
    } else {
        let mut with_ext = joined.into_os_string();
        with_ext.push(".js");
        PathBuf::from(with_ext)
    }
}

/// Returns `true` for specifiers that name a local module rather than a
/// package: those starting with `./`, `../`, `/` or `~`.
pub fn is_relative_specifier(specifier: &str) -> bool {
    specifier.starts_with("./")
        || specifier.starts_with("../")
        || specifier.starts_with('/')
        || specifier.starts_with('~')
}

/// Reads a module, falling back from `.js` to `.jsx` when the inferred name
/// is absent. Returns the path that was actually read.
pub async fn read_source(path: &Path) -> Result<(PathBuf, String)> {
    match tokio::fs::read_to_string(path).await {
        Ok(source) => Ok((path.to_path_buf(), source)),
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
            if path.extension().and_then(|ext| ext.to_str()) == Some("js") {
                let sibling = path.with_extension("jsx");
                if let Ok(source) = tokio::fs::read_to_string(&sibling).await {
                    return Ok((sibling, source));
                }
            }
            Err(Error::Io {
                path: path.to_path_buf(),
                source: error,
            })
        }
        Err(error) => Err(Error::Io {
            path: path.to_path_buf(),
            source: error,
        }),
    }
}

fn has_script_extension(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("js" | "jsx")
    )
}
