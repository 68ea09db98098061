use std::collections::BTreeSet;

use anyhow::Result;
use rayon::prelude::*;
use serde_sarif::sarif::{Location, Result as SarifResult};

use crate::config::AnalysisConfig;
use crate::engine::AnalysisContext;
use crate::generics::shape::{ShapePath, shape_of};
use crate::generics::validate::check_instantiation;
use crate::generics::walk::{Instantiation, instantiation_of};
use crate::model::{Assignment, CompilationUnit, SourceSpan, TypeExpr, TypeUse};
use crate::register_rule;
use crate::rules::{
    Rule, RuleMetadata, declaration_logical_location, result_message, span_location,
};

// Fixed message for every finding of this rule, whichever check fired.
const MESSAGE: &str = "Generic type parameter cannot be @Nullable";

/// Rule that checks nullability consistency of generic type
/// instantiations: nullable type arguments are only valid for type
/// parameters whose declared upper bound is itself nullable, and both
/// sides of an assignment must agree on which nested positions are
/// nullable.
#[derive(Default)]
pub(crate) struct GenericNullabilityRule;

register_rule!(GenericNullabilityRule);

impl Rule for GenericNullabilityRule {
    fn metadata(&self) -> RuleMetadata {
        RuleMetadata {
            id: "TYPE_PARAMETER_CANNOT_BE_NULLABLE",
            name: "Generic type parameter nullability",
            description: "Nullable type arguments must instantiate nullable-bounded type parameters",
        }
    }

    fn run(&self, context: &AnalysisContext) -> Result<Vec<SarifResult>> {
        if !context.config.strict_generics {
            return Ok(Vec::new());
        }
        // Units share no mutable state, so they are checked in parallel;
        // collecting per unit keeps result order deterministic.
        let per_unit: Vec<Vec<SarifResult>> = context
            .units
            .par_iter()
            .map(|unit| check_unit(unit, context))
            .collect();
        Ok(per_unit.into_iter().flatten().collect())
    }
}

fn check_unit(unit: &CompilationUnit, context: &AnalysisContext) -> Vec<SarifResult> {
    let uri = context.unit_uri(unit);
    let mut results = Vec::new();
    for use_site in &unit.type_uses {
        results.extend(check_type_use(use_site, uri, context));
    }
    for assignment in &unit.assignments {
        results.extend(check_assignment(assignment, uri, &context.config));
    }
    results
}

fn check_type_use(
    use_site: &TypeUse,
    uri: &str,
    context: &AnalysisContext,
) -> Vec<SarifResult> {
    let Some(instantiation) = instantiation_for(&use_site.expr, &context.config) else {
        return Vec::new();
    };
    check_instantiation(&instantiation, &context.declarations, &context.config)
        .into_iter()
        .map(|violation| {
            let location = violation_location(uri, use_site.span, Some(&violation.declaration));
            SarifResult::builder()
                .message(result_message(MESSAGE))
                .locations(vec![location])
                .build()
        })
        .collect()
}

fn check_assignment(
    assignment: &Assignment,
    uri: &str,
    config: &AnalysisConfig,
) -> Option<SarifResult> {
    let lhs = shape_for(&assignment.lhs, config);
    let rhs = shape_for(&assignment.rhs, config);
    // Non-generic sides produce empty shapes, which trivially match.
    if lhs == rhs {
        return None;
    }
    let location = violation_location(uri, assignment.span, None);
    Some(
        SarifResult::builder()
            .message(result_message(MESSAGE))
            .locations(vec![location])
            .build(),
    )
}

/// Picks the faithful representation per expression kind: raw syntax for
/// `new`-expressions, the resolved type for everything else. An absent
/// resolved type yields no instantiation to check.
fn instantiation_for(expr: &TypeExpr, config: &AnalysisConfig) -> Option<Instantiation> {
    match expr {
        TypeExpr::NewExpression { syntax } => instantiation_of(syntax, config),
        TypeExpr::SimpleUse { .. }
        | TypeExpr::ParameterizedUse { .. }
        | TypeExpr::CastExpression { .. } => expr
            .resolved()
            .and_then(|resolved| instantiation_of(resolved, config)),
    }
}

fn shape_for(expr: &TypeExpr, config: &AnalysisConfig) -> BTreeSet<ShapePath> {
    match expr {
        TypeExpr::NewExpression { syntax } => shape_of(syntax, config),
        TypeExpr::SimpleUse { .. }
        | TypeExpr::ParameterizedUse { .. }
        | TypeExpr::CastExpression { .. } => expr
            .resolved()
            .map(|resolved| shape_of(resolved, config))
            .unwrap_or_default(),
    }
}

fn violation_location(uri: &str, span: SourceSpan, declaration: Option<&str>) -> Location {
    let mut location = span_location(uri, span);
    if let Some(declaration) = declaration {
        location.logical_locations = Some(vec![declaration_logical_location(declaration)]);
    }
    location
}
