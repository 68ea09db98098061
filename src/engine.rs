use std::collections::BTreeMap;

use anyhow::Result;
use serde_sarif::sarif::{
    Artifact, MultiformatMessageString, ReportingDescriptor, Result as SarifResult,
};
use tracing::debug_span;

use crate::config::AnalysisConfig;
use crate::decl_index::DeclIndex;
use crate::model::CompilationUnit;
use crate::rules::{Rule, RuleMetadata, all_rules};

/// Inputs shared by analysis rules.
pub(crate) struct AnalysisContext {
    pub(crate) units: Vec<CompilationUnit>,
    pub(crate) declarations: DeclIndex,
    pub(crate) config: AnalysisConfig,
    artifact_uris: BTreeMap<i64, String>,
}

impl AnalysisContext {
    pub(crate) fn artifact_uri(&self, index: i64) -> Option<&str> {
        self.artifact_uris.get(&index).map(|value| value.as_str())
    }

    pub(crate) fn unit_uri<'a>(&'a self, unit: &'a CompilationUnit) -> &'a str {
        self.artifact_uri(unit.artifact_index)
            .unwrap_or(unit.path.as_str())
    }
}

/// Analysis engine that executes registered rules.
pub(crate) struct Engine {
    rules: Vec<Box<dyn Rule + Sync>>,
}

impl Engine {
    pub(crate) fn new() -> Self {
        let mut rules = all_rules();
        rules.sort_by(|a, b| a.metadata().id.cmp(b.metadata().id));
        Self { rules }
    }

    pub(crate) fn analyze(&self, context: AnalysisContext) -> Result<EngineOutput> {
        let mut rules = Vec::new();
        let mut results = Vec::new();

        for rule in &self.rules {
            let metadata = rule.metadata();
            rules.push(rule_descriptor(&metadata));
            let span = debug_span!("rule", id = metadata.id);
            let mut rule_results = span.in_scope(|| rule.run(&context))?;
            for result in &mut rule_results {
                if result.rule_id.is_none() {
                    result.rule_id = Some(metadata.id.to_string());
                }
            }
            results.extend(rule_results);
        }

        results.sort_by(|left, right| {
            let left_id = left.rule_id.as_deref().unwrap_or("");
            let right_id = right.rule_id.as_deref().unwrap_or("");
            let left_msg = left.message.text.as_deref().unwrap_or("").to_string();
            let right_msg = right.message.text.as_deref().unwrap_or("").to_string();
            left_id.cmp(right_id).then(left_msg.cmp(&right_msg))
        });

        Ok(EngineOutput { rules, results })
    }
}

/// Aggregated SARIF payload from rule execution.
pub(crate) struct EngineOutput {
    pub(crate) rules: Vec<ReportingDescriptor>,
    pub(crate) results: Vec<SarifResult>,
}

pub(crate) fn build_context(
    units: Vec<CompilationUnit>,
    declarations: DeclIndex,
    config: AnalysisConfig,
    artifacts: &[Artifact],
) -> AnalysisContext {
    let mut artifact_uris = BTreeMap::new();
    for (index, artifact) in artifacts.iter().enumerate() {
        if let Some(location) = artifact.location.as_ref() {
            if let Some(uri) = location.uri.as_ref() {
                artifact_uris.insert(index as i64, uri.clone());
            }
        }
    }
    AnalysisContext {
        units,
        declarations,
        config,
        artifact_uris,
    }
}

fn rule_descriptor(metadata: &RuleMetadata) -> ReportingDescriptor {
    ReportingDescriptor::builder()
        .id(metadata.id)
        .name(metadata.name)
        .short_description(
            MultiformatMessageString::builder()
                .text(metadata.description)
                .build(),
        )
        .build()
}
