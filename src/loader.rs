use std::fs;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_sarif::sarif::{Artifact, ArtifactLocation, ArtifactRoles};
use tracing::debug;

use crate::model::CompilationUnit;

/// One type model dump file as exported by the host frontend.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ModelDump {
    pub(crate) units: Vec<CompilationUnit>,
}

/// Snapshot of loaded artifacts and compilation units for a run.
#[derive(Debug)]
pub(crate) struct LoadOutput {
    pub(crate) artifacts: Vec<Artifact>,
    pub(crate) units: Vec<CompilationUnit>,
}

pub(crate) fn load_inputs(input: &Path) -> Result<LoadOutput> {
    let mut artifacts = Vec::new();
    let mut units = Vec::new();

    load_path(input, true, &mut artifacts, &mut units)?;

    debug!(
        units = units.len(),
        artifacts = artifacts.len(),
        "loaded type model dumps"
    );
    Ok(LoadOutput { artifacts, units })
}

fn load_path(
    path: &Path,
    strict: bool,
    artifacts: &mut Vec<Artifact>,
    units: &mut Vec<CompilationUnit>,
) -> Result<()> {
    if path.is_dir() {
        return load_dir(path, artifacts, units);
    }

    let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");
    match extension {
        "json" => load_dump_file(path, artifacts, units),
        _ => {
            if strict {
                anyhow::bail!("unsupported input file: {}", path.display())
            } else {
                Ok(())
            }
        }
    }
}

fn load_dir(
    path: &Path,
    artifacts: &mut Vec<Artifact>,
    units: &mut Vec<CompilationUnit>,
) -> Result<()> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(path)
        .with_context(|| format!("failed to read directory {}", path.display()))?
    {
        let entry =
            entry.with_context(|| format!("failed to read entry under {}", path.display()))?;
        entries.push(entry.path());
    }

    // Keep deterministic ordering by sorting directory listings.
    entries.sort_by(|a, b| path_key(a).cmp(&path_key(b)));

    for entry in entries {
        if entry.is_dir() {
            load_dir(&entry, artifacts, units)?;
        } else {
            load_path(&entry, false, artifacts, units)?;
        }
    }
    Ok(())
}

fn load_dump_file(
    path: &Path,
    artifacts: &mut Vec<Artifact>,
    units: &mut Vec<CompilationUnit>,
) -> Result<()> {
    let file =
        fs::File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let mut deserializer = serde_json::Deserializer::from_reader(BufReader::new(file));
    let dump: ModelDump = serde_path_to_error::deserialize(&mut deserializer)
        .with_context(|| format!("failed to parse type model dump {}", path.display()))?;

    for mut unit in dump.units {
        unit.artifact_index = artifacts.len() as i64;
        artifacts.push(unit_artifact(&unit.path));
        units.push(unit);
    }
    Ok(())
}

pub(crate) fn unit_artifact(uri: &str) -> Artifact {
    let location = ArtifactLocation::builder().uri(uri.to_string()).build();
    let roles = vec![
        serde_json::to_value(ArtifactRoles::AnalysisTarget).expect("serialize artifact role"),
    ];
    Artifact::builder().location(location).roles(roles).build()
}

fn path_key(path: &Path) -> String {
    path.to_string_lossy().to_string()
}
