use std::collections::BTreeSet;

/// Immutable check configuration, fixed before analysis starts and threaded
/// explicitly through every call.
#[derive(Clone, Debug)]
pub(crate) struct AnalysisConfig {
    /// Gates the whole generics core; when false every check is a no-op.
    pub(crate) strict_generics: bool,
    /// Fully qualified annotation names classified as the nullable marker.
    pub(crate) nullable_annotations: BTreeSet<String>,
    /// Package prefixes considered annotated code. Bound validation is
    /// skipped for declarations outside these packages; empty means every
    /// declaration is in scope.
    pub(crate) annotated_packages: Vec<String>,
}

pub(crate) const DEFAULT_NULLABLE_ANNOTATIONS: [&str; 2] = [
    "org.jspecify.annotations.Nullable",
    "org.jspecify.nullness.Nullable",
];

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            strict_generics: true,
            nullable_annotations: DEFAULT_NULLABLE_ANNOTATIONS
                .iter()
                .map(|name| name.to_string())
                .collect(),
            annotated_packages: Vec::new(),
        }
    }
}

impl AnalysisConfig {
    pub(crate) fn from_cli(
        strict_generics: bool,
        nullable_annotations: &[String],
        annotated_packages: &[String],
    ) -> Self {
        let defaults = Self::default();
        let nullable_annotations = if nullable_annotations.is_empty() {
            defaults.nullable_annotations
        } else {
            nullable_annotations.iter().cloned().collect()
        };
        Self {
            strict_generics,
            nullable_annotations,
            annotated_packages: annotated_packages.to_vec(),
        }
    }

    pub(crate) fn classifies_as_nullable(&self, annotation: &str) -> bool {
        self.nullable_annotations
            .contains(annotation.trim_start_matches('@'))
    }

    pub(crate) fn in_annotated_scope(&self, declaration: &str) -> bool {
        if self.annotated_packages.is_empty() {
            return true;
        }
        self.annotated_packages
            .iter()
            .any(|prefix| declaration.starts_with(prefix.as_str()))
    }
}
