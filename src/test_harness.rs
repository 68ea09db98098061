//! Fixture harness that assembles type model dumps programmatically and
//! runs the full engine over them, standing in for a host frontend.

use crate::config::AnalysisConfig;
use crate::decl_index::{DeclIndex, build_decl_index};
use crate::engine::{Engine, EngineOutput, build_context};
use crate::loader::unit_artifact;
use crate::model::{
    Assignment, CompilationUnit, GenericDecl, ResolvedType, SourceSpan, TypeExpr, TypeNode,
    TypeParameter, TypeUse,
};

pub(crate) const NULLABLE: &str = "org.jspecify.annotations.Nullable";

pub(crate) fn resolved(name: &str) -> ResolvedType {
    ResolvedType {
        name: name.to_string(),
        annotations: Vec::new(),
        type_arguments: Vec::new(),
    }
}

pub(crate) fn resolved_nullable(name: &str) -> ResolvedType {
    ResolvedType {
        name: name.to_string(),
        annotations: vec![NULLABLE.to_string()],
        type_arguments: Vec::new(),
    }
}

pub(crate) fn resolved_generic(name: &str, type_arguments: Vec<ResolvedType>) -> ResolvedType {
    ResolvedType {
        name: name.to_string(),
        annotations: Vec::new(),
        type_arguments,
    }
}

pub(crate) fn simple(name: &str) -> TypeNode {
    TypeNode::Simple {
        name: name.to_string(),
    }
}

pub(crate) fn annotated(underlying: TypeNode) -> TypeNode {
    TypeNode::Annotated {
        annotations: vec![NULLABLE.to_string()],
        underlying: Box::new(underlying),
    }
}

pub(crate) fn parameterized(name: &str, arguments: Vec<TypeNode>) -> TypeNode {
    TypeNode::Parameterized {
        name: name.to_string(),
        arguments,
    }
}

pub(crate) fn declaration(name: &str, type_parameters: Vec<TypeParameter>) -> GenericDecl {
    GenericDecl {
        name: name.to_string(),
        type_parameters,
    }
}

pub(crate) fn nullable_bound(name: &str) -> TypeParameter {
    TypeParameter {
        name: name.to_string(),
        upper_bound: resolved_nullable("java.lang.Object"),
    }
}

pub(crate) fn non_null_bound(name: &str) -> TypeParameter {
    TypeParameter {
        name: name.to_string(),
        upper_bound: resolved("java.lang.Object"),
    }
}

pub(crate) fn unit(path: &str, declarations: Vec<GenericDecl>) -> CompilationUnit {
    CompilationUnit {
        path: path.to_string(),
        declarations,
        type_uses: Vec::new(),
        assignments: Vec::new(),
        artifact_index: 0,
    }
}

pub(crate) fn type_use(line: u32, expr: TypeExpr) -> TypeUse {
    TypeUse {
        span: SourceSpan { line, column: 1 },
        expr,
    }
}

pub(crate) fn assignment(line: u32, lhs: TypeExpr, rhs: TypeExpr) -> Assignment {
    Assignment {
        span: SourceSpan { line, column: 1 },
        lhs,
        rhs,
    }
}

pub(crate) fn parameterized_use(resolved: ResolvedType) -> TypeExpr {
    TypeExpr::ParameterizedUse {
        resolved: Some(resolved),
    }
}

pub(crate) fn new_expression(syntax: TypeNode) -> TypeExpr {
    TypeExpr::NewExpression { syntax }
}

pub(crate) fn decl_index(declarations: Vec<GenericDecl>) -> DeclIndex {
    let units = vec![unit("Decls.java", declarations)];
    build_decl_index(&units).expect("build declaration index")
}

pub(crate) fn analyze(mut units: Vec<CompilationUnit>, config: AnalysisConfig) -> EngineOutput {
    let mut artifacts = Vec::new();
    for unit in &mut units {
        unit.artifact_index = artifacts.len() as i64;
        artifacts.push(unit_artifact(&unit.path));
    }
    let declarations = build_decl_index(&units).expect("build declaration index");
    let context = build_context(units, declarations, config, &artifacts);
    Engine::new().analyze(context).expect("run analysis")
}
