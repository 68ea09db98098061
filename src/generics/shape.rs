use std::collections::BTreeSet;
use std::fmt;

use crate::config::AnalysisConfig;
use crate::generics::probe::TypeSource;

/// Position of one nullable type argument within an instantiation tree:
/// nesting depth, index of the enclosing argument within its parent, and
/// ordinal position at that level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct ShapePath {
    pub(crate) depth: u32,
    pub(crate) parent_index: u32,
    pub(crate) position: u32,
}

impl fmt::Display for ShapePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.depth, self.parent_index, self.position)
    }
}

/// The canonical set of nullable positions in `source`, computed fresh per
/// check. Empty for non-generic or fully non-null expressions. Two
/// expressions are assignment-compatible under the structural check iff
/// their shapes are equal as sets; the concrete base declarations are
/// intentionally not compared.
pub(crate) fn shape_of<S: TypeSource>(
    source: &S,
    config: &AnalysisConfig,
) -> BTreeSet<ShapePath> {
    let mut shape = BTreeSet::new();
    collect_shape(source, 0, 0, config, &mut shape);
    shape
}

fn collect_shape<S: TypeSource>(
    source: &S,
    depth: u32,
    parent_index: u32,
    config: &AnalysisConfig,
    shape: &mut BTreeSet<ShapePath>,
) {
    for (position, argument) in source.arguments().iter().enumerate() {
        if argument.nullable_marked(config) {
            shape.insert(ShapePath {
                depth,
                parent_index,
                position: position as u32,
            });
        }
    }
    for (position, argument) in source.arguments().iter().enumerate() {
        if !argument.arguments().is_empty() {
            collect_shape(argument, depth + 1, position as u32, config, shape);
        }
    }
}
