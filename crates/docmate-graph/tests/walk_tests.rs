use std::path::PathBuf;

use docmate_core::ParserConfig;
use docmate_graph::{DependencyWalker, GraphError};
use tempfile::TempDir;

fn write_module(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).expect("write module");
    path
}

fn walker() -> DependencyWalker {
    DependencyWalker::new(ParserConfig::default())
}

#[tokio::test]
async fn walks_a_linear_chain() {
    let dir = TempDir::new().unwrap();
    write_module(&dir, "c.js", "export const END = true;\n");
    write_module(&dir, "b.js", "import './c';\n");
    let entry = write_module(&dir, "a.js", "import './b';\n");

    let tree = walker().walk(&entry).await.expect("walk");
    assert_eq!(tree.count(), 3);
    assert_eq!(tree.imports.len(), 1);
    assert!(tree.imports[0].path.ends_with("b.js"));
    assert!(tree.imports[0].imports[0].path.ends_with("c.js"));
}

#[tokio::test]
async fn package_imports_are_skipped() {
    let dir = TempDir::new().unwrap();
    write_module(&dir, "local.js", "export const X = 1;\n");
    let entry = write_module(
        &dir,
        "index.js",
        "import React from 'react';\nimport '@scope/pkg';\nimport './local';\n",
    );

    let tree = walker().walk(&entry).await.expect("walk");
    assert_eq!(tree.imports.len(), 1);
    assert!(tree.imports[0].path.ends_with("local.js"));
}

#[tokio::test]
async fn diamond_imports_share_the_leaf() {
    let dir = TempDir::new().unwrap();
    write_module(&dir, "shared.js", "export const S = 1;\n");
    write_module(&dir, "left.js", "import './shared';\n");
    write_module(&dir, "right.js", "import './shared';\n");
    let entry = write_module(&dir, "index.js", "import './left';\nimport './right';\n");

    let tree = walker().walk(&entry).await.expect("diamond is not a cycle");
    assert_eq!(tree.imports.len(), 2);
    // The second arrival at the shared module is recorded as a leaf.
    let right = &tree.imports[1];
    assert_eq!(right.imports.len(), 1);
    assert!(right.imports[0].path.ends_with("shared.js"));
    assert!(right.imports[0].imports.is_empty());
}

#[tokio::test]
async fn import_cycle_is_an_error() {
    let dir = TempDir::new().unwrap();
    write_module(&dir, "a.js", "import './b';\n");
    write_module(&dir, "b.js", "import './a';\n");
    let entry = write_module(&dir, "index.js", "import './a';\n");

    let error = walker().walk(&entry).await.expect_err("cycle must fail");
    match error {
        GraphError::CircularDependency { from, to } => {
            assert!(from.ends_with("b.js"));
            assert!(to.ends_with("a.js"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn jsx_modules_resolve_from_extensionless_specifiers() {
    let dir = TempDir::new().unwrap();
    write_module(&dir, "view.jsx", "export const View = 1;\n");
    let entry = write_module(&dir, "index.js", "import './view';\n");

    let tree = walker().walk(&entry).await.expect("walk");
    assert_eq!(tree.imports.len(), 1);
    assert!(tree.imports[0].path.ends_with("view.jsx"));
}

#[tokio::test]
async fn tree_serializes_with_camel_case_keys() {
    let dir = TempDir::new().unwrap();
    write_module(&dir, "dep.js", "export const D = 1;\n");
    let entry = write_module(&dir, "index.js", "import './dep';\n");

    let tree = walker().walk(&entry).await.expect("walk");
    let json = serde_json::to_value(&tree).expect("serialize");
    assert!(json.get("path").is_some());
    assert!(json["imports"].as_array().is_some());
}
