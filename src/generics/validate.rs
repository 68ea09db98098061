use crate::config::AnalysisConfig;
use crate::decl_index::DeclIndex;
use crate::generics::bounds::BoundTable;
use crate::generics::walk::Instantiation;

/// A nullable type argument supplied for a parameter whose bound forbids
/// nullable values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct BoundViolation {
    pub(crate) declaration: String,
    pub(crate) position: usize,
}

/// Validates every occurrence of `instantiation` against the declared
/// bounds, recursing into nested instantiations. One violation is recorded
/// per offending slot at any depth; a violation at one level never stops
/// checking of siblings or deeper levels. Declarations missing from the
/// index or outside annotated scope are skipped at that level only.
pub(crate) fn check_instantiation(
    instantiation: &Instantiation,
    declarations: &DeclIndex,
    config: &AnalysisConfig,
) -> Vec<BoundViolation> {
    let mut violations = Vec::new();
    collect_violations(instantiation, declarations, config, &mut violations);
    violations
}

fn collect_violations(
    instantiation: &Instantiation,
    declarations: &DeclIndex,
    config: &AnalysisConfig,
    violations: &mut Vec<BoundViolation>,
) {
    if config.in_annotated_scope(&instantiation.declaration) {
        if let Some(declaration) = declarations.lookup(&instantiation.declaration) {
            let bounds = BoundTable::of(declaration, config);
            for argument in &instantiation.arguments {
                if argument.nullable && !bounds.allows_nullable(argument.position) {
                    violations.push(BoundViolation {
                        declaration: instantiation.declaration.clone(),
                        position: argument.position,
                    });
                }
            }
        }
    }
    for argument in &instantiation.arguments {
        if let Some(nested) = &argument.nested {
            collect_violations(nested, declarations, config, violations);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generics::walk::instantiation_of;
    use crate::test_harness::{
        decl_index, declaration, non_null_bound, nullable_bound, resolved, resolved_generic,
        resolved_nullable,
    };

    fn box_decls() -> DeclIndex {
        decl_index(vec![
            declaration("com.example.NonNullBox", vec![non_null_bound("E")]),
            declaration("com.example.NullableBox", vec![nullable_bound("E")]),
        ])
    }

    #[test]
    fn nullable_argument_against_forbidding_bound_is_one_violation() {
        let config = AnalysisConfig::default();
        let ty = resolved_generic(
            "com.example.NonNullBox",
            vec![resolved_nullable("java.lang.String")],
        );
        let instantiation = instantiation_of(&ty, &config).expect("generic");
        let violations = check_instantiation(&instantiation, &box_decls(), &config);
        assert_eq!(
            violations,
            vec![BoundViolation {
                declaration: "com.example.NonNullBox".to_string(),
                position: 0,
            }]
        );
    }

    #[test]
    fn nullable_bound_permits_nullable_and_plain_arguments() {
        let config = AnalysisConfig::default();
        for argument in [
            resolved_nullable("java.lang.String"),
            resolved("java.lang.String"),
        ] {
            let ty = resolved_generic("com.example.NullableBox", vec![argument]);
            let instantiation = instantiation_of(&ty, &config).expect("generic");
            assert!(check_instantiation(&instantiation, &box_decls(), &config).is_empty());
        }
    }

    #[test]
    fn nested_violation_is_attributed_to_the_inner_declaration() {
        let config = AnalysisConfig::default();
        // NullableBox<NonNullBox<@Nullable String>>: the outer slot is
        // fine, the inner one violates NonNullBox's bound.
        let ty = resolved_generic(
            "com.example.NullableBox",
            vec![resolved_generic(
                "com.example.NonNullBox",
                vec![resolved_nullable("java.lang.String")],
            )],
        );
        let instantiation = instantiation_of(&ty, &config).expect("generic");
        let violations = check_instantiation(&instantiation, &box_decls(), &config);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].declaration, "com.example.NonNullBox");
    }

    #[test]
    fn independent_violations_each_get_reported() {
        let config = AnalysisConfig::default();
        let declarations = decl_index(vec![declaration(
            "com.example.Mixed",
            vec![
                non_null_bound("E1"),
                nullable_bound("E2"),
                nullable_bound("E3"),
                non_null_bound("E4"),
            ],
        )]);
        // Mixed<@Nullable A, B, C, @Nullable D> against (forbid, allow,
        // allow, forbid): exactly positions 0 and 3 violate.
        let ty = resolved_generic(
            "com.example.Mixed",
            vec![
                resolved_nullable("A"),
                resolved("B"),
                resolved("C"),
                resolved_nullable("D"),
            ],
        );
        let instantiation = instantiation_of(&ty, &config).expect("generic");
        let violations = check_instantiation(&instantiation, &declarations, &config);
        let positions: Vec<usize> = violations.iter().map(|v| v.position).collect();
        assert_eq!(positions, vec![0, 3]);
    }

    #[test]
    fn validation_is_idempotent() {
        let config = AnalysisConfig::default();
        let ty = resolved_generic(
            "com.example.NonNullBox",
            vec![resolved_nullable("java.lang.String")],
        );
        let instantiation = instantiation_of(&ty, &config).expect("generic");
        let declarations = box_decls();
        let first = check_instantiation(&instantiation, &declarations, &config);
        let second = check_instantiation(&instantiation, &declarations, &config);
        assert_eq!(first, second);
    }

    #[test]
    fn unknown_declaration_is_skipped_but_nested_levels_still_checked() {
        let config = AnalysisConfig::default();
        let ty = resolved_generic(
            "com.example.Unknown",
            vec![resolved_generic(
                "com.example.NonNullBox",
                vec![resolved_nullable("java.lang.String")],
            )],
        );
        let instantiation = instantiation_of(&ty, &config).expect("generic");
        let violations = check_instantiation(&instantiation, &box_decls(), &config);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].declaration, "com.example.NonNullBox");
    }

    #[test]
    fn out_of_scope_declaration_is_not_validated() {
        let config = AnalysisConfig::from_cli(true, &[], &["com.uber".to_string()]);
        let ty = resolved_generic(
            "com.example.NonNullBox",
            vec![resolved_nullable("java.lang.String")],
        );
        let instantiation = instantiation_of(&ty, &config).expect("generic");
        assert!(check_instantiation(&instantiation, &box_decls(), &config).is_empty());
    }
}
