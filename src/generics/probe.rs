use crate::config::AnalysisConfig;
use crate::model::{ResolvedType, TypeNode};

/// Capability interface over the two type representations the host
/// supplies. The resolved type is authoritative after elaboration
/// (variable declaration types, casts, return types); the syntax node is
/// authoritative for `new`-expressions, where resolution drops annotations
/// on explicit type arguments. When both are available for the same
/// position they agree; divergence would be an elaboration bug in the
/// host, not something handled here.
pub(crate) trait TypeSource: Sized {
    /// Qualified name of the declaration this type instantiates.
    fn declaration_name(&self) -> &str;

    /// Whether this position carries a nullable marker under `config`.
    fn nullable_marked(&self, config: &AnalysisConfig) -> bool;

    /// Ordered type arguments; empty for non-generic uses.
    fn arguments(&self) -> &[Self];
}

impl TypeSource for ResolvedType {
    fn declaration_name(&self) -> &str {
        &self.name
    }

    fn nullable_marked(&self, config: &AnalysisConfig) -> bool {
        self.annotations
            .iter()
            .any(|annotation| config.classifies_as_nullable(annotation))
    }

    fn arguments(&self) -> &[Self] {
        &self.type_arguments
    }
}

impl TypeSource for TypeNode {
    fn declaration_name(&self) -> &str {
        match self {
            TypeNode::Simple { name } | TypeNode::Parameterized { name, .. } => name,
            TypeNode::Annotated { underlying, .. } => underlying.declaration_name(),
        }
    }

    // Only an annotated-type node itself carries the marker; annotations
    // deeper in the wrapped node belong to other positions.
    fn nullable_marked(&self, config: &AnalysisConfig) -> bool {
        match self {
            TypeNode::Annotated { annotations, .. } => annotations
                .iter()
                .any(|annotation| config.classifies_as_nullable(annotation)),
            TypeNode::Simple { .. } | TypeNode::Parameterized { .. } => false,
        }
    }

    fn arguments(&self) -> &[Self] {
        match self {
            TypeNode::Simple { .. } => &[],
            TypeNode::Annotated { underlying, .. } => underlying.arguments(),
            TypeNode::Parameterized { arguments, .. } => arguments,
        }
    }
}
