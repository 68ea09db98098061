use crate::config::AnalysisConfig;
use crate::generics::probe::TypeSource;

/// A concrete use of a generic declaration: the declaration's qualified
/// name plus one occurrence per supplied type argument, in order. Argument
/// and parameter counts matching is a precondition guaranteed by the
/// host's elaboration and is not re-validated here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Instantiation {
    pub(crate) declaration: String,
    pub(crate) arguments: Vec<TypeArgument>,
}

/// One type-argument slot of an instantiation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct TypeArgument {
    pub(crate) position: usize,
    pub(crate) nullable: bool,
    pub(crate) nested: Option<Instantiation>,
}

/// Builds the instantiation tree for `source`, recursing into every
/// argument that is itself parameterized. Returns `None` for non-generic
/// uses. Terminates because source trees are finite.
pub(crate) fn instantiation_of<S: TypeSource>(
    source: &S,
    config: &AnalysisConfig,
) -> Option<Instantiation> {
    let arguments = source.arguments();
    if arguments.is_empty() {
        return None;
    }
    let arguments = arguments
        .iter()
        .enumerate()
        .map(|(position, argument)| TypeArgument {
            position,
            nullable: argument.nullable_marked(config),
            nested: instantiation_of(argument, config),
        })
        .collect();
    Some(Instantiation {
        declaration: source.declaration_name().to_string(),
        arguments,
    })
}
