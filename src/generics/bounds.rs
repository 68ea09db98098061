use crate::config::AnalysisConfig;
use crate::generics::probe::TypeSource;
use crate::model::GenericDecl;

/// Read-only view of a declaration's type parameters: whether each
/// parameter's upper bound permits nullable arguments. Empty for
/// non-generic declarations.
#[derive(Clone, Debug)]
pub(crate) struct BoundTable {
    allows_nullable: Vec<bool>,
}

impl BoundTable {
    pub(crate) fn of(declaration: &GenericDecl, config: &AnalysisConfig) -> Self {
        let allows_nullable = declaration
            .type_parameters
            .iter()
            .map(|parameter| parameter.upper_bound.nullable_marked(config))
            .collect();
        Self { allows_nullable }
    }

    /// Whether the bound at `position` permits a nullable argument.
    /// Positions past the declared parameters answer false.
    pub(crate) fn allows_nullable(&self, position: usize) -> bool {
        self.allows_nullable.get(position).copied().unwrap_or(false)
    }

    #[allow(dead_code)]
    pub(crate) fn is_empty(&self) -> bool {
        self.allows_nullable.is_empty()
    }
}
