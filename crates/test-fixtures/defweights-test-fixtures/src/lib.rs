//! Shared JSON fixtures for defweights test suites.
//!
//! Fixtures live in the repository-root `fixtures/` directory and are listed
//! in `fixtures/manifest.json`; this crate only hands out their raw JSON.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    meshes: HashMap<String, String>,
}

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

fn read_to_string(rel: &str) -> Result<String> {
    let path = fixtures_root().join(rel);
    fs::read_to_string(&path)
        .with_context(|| format!("failed to read fixture at {}", path.display()))
}

/// Names of all stored-mesh fixtures, sorted.
pub fn list_meshes() -> Vec<String> {
    let mut names: Vec<String> = MANIFEST.meshes.keys().cloned().collect();
    names.sort();
    names
}

/// Raw StoredMesh JSON for a named fixture.
pub fn stored_mesh_json(name: &str) -> Result<String> {
    let rel = MANIFEST
        .meshes
        .get(name)
        .ok_or_else(|| anyhow!("unknown mesh fixture `{name}`"))?;
    read_to_string(rel)
}
