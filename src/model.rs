use serde::{Deserialize, Serialize};

/// One compilation unit from a type model dump, as exported by the host
/// compiler frontend after elaboration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub(crate) struct CompilationUnit {
    /// Source path of the unit, used as the SARIF artifact URI.
    pub(crate) path: String,
    #[serde(default)]
    pub(crate) declarations: Vec<GenericDecl>,
    #[serde(default)]
    pub(crate) type_uses: Vec<TypeUse>,
    #[serde(default)]
    pub(crate) assignments: Vec<Assignment>,
    #[serde(skip)]
    pub(crate) artifact_index: i64,
}

/// A generic class or interface declaration with its type parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub(crate) struct GenericDecl {
    /// Fully qualified name, e.g. `com.example.Box`.
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) type_parameters: Vec<TypeParameter>,
}

/// A declared type parameter and its upper bound. The bound is a resolved
/// type; a nullable marker on it means arguments for this slot may be
/// nullable too.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub(crate) struct TypeParameter {
    pub(crate) name: String,
    pub(crate) upper_bound: ResolvedType,
}

/// A fully elaborated semantic type. Annotation names are fully qualified.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub(crate) struct ResolvedType {
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) annotations: Vec<String>,
    #[serde(default)]
    pub(crate) type_arguments: Vec<ResolvedType>,
}

/// A syntax-tree type node. The host's resolution step drops source-level
/// annotations for some expression forms, so raw syntax is kept alongside
/// the resolved type where it is the faithful representation.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub(crate) enum TypeNode {
    Simple {
        name: String,
    },
    Annotated {
        annotations: Vec<String>,
        underlying: Box<TypeNode>,
    },
    Parameterized {
        name: String,
        arguments: Vec<TypeNode>,
    },
}

/// Expression kinds the checker dispatches on, decided once by the host
/// when the dump is produced. Each variant carries the representation that
/// is authoritative for it: raw syntax for `new`-expressions (resolution
/// erases type-argument annotations there), the resolved type elsewhere.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "form", rename_all = "snake_case")]
pub(crate) enum TypeExpr {
    SimpleUse {
        #[serde(default)]
        resolved: Option<ResolvedType>,
    },
    ParameterizedUse {
        #[serde(default)]
        resolved: Option<ResolvedType>,
    },
    NewExpression {
        syntax: TypeNode,
    },
    CastExpression {
        #[serde(default)]
        resolved: Option<ResolvedType>,
    },
}

/// A type-use site selected by the host driver for instantiation checks:
/// variable declaration types, `new`-expressions, casts, supertype and
/// interface clauses, return types.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub(crate) struct TypeUse {
    pub(crate) span: SourceSpan,
    pub(crate) expr: TypeExpr,
}

/// An assignment whose sides may be generic-typed expressions.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub(crate) struct Assignment {
    pub(crate) span: SourceSpan,
    pub(crate) lhs: TypeExpr,
    pub(crate) rhs: TypeExpr,
}

/// 1-based source position within a compilation unit.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub(crate) struct SourceSpan {
    pub(crate) line: u32,
    pub(crate) column: u32,
}

impl TypeExpr {
    /// The resolved type of this expression, when the host supplied one.
    pub(crate) fn resolved(&self) -> Option<&ResolvedType> {
        match self {
            TypeExpr::SimpleUse { resolved }
            | TypeExpr::ParameterizedUse { resolved }
            | TypeExpr::CastExpression { resolved } => resolved.as_ref(),
            TypeExpr::NewExpression { .. } => None,
        }
    }
}
