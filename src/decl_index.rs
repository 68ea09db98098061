use std::collections::BTreeMap;

use anyhow::Result;

use crate::model::{CompilationUnit, GenericDecl};

/// Global index of generic declarations keyed by qualified name.
#[derive(Debug)]
pub(crate) struct DeclIndex {
    declarations: BTreeMap<String, GenericDecl>,
}

pub(crate) fn build_decl_index(units: &[CompilationUnit]) -> Result<DeclIndex> {
    let mut by_name: BTreeMap<String, Vec<&GenericDecl>> = BTreeMap::new();
    for unit in units {
        for declaration in &unit.declarations {
            by_name
                .entry(declaration.name.clone())
                .or_default()
                .push(declaration);
        }
    }

    let mut duplicates = Vec::new();
    for (name, found) in &by_name {
        if found.len() > 1 {
            duplicates.push(format!("{name} ({} definitions)", found.len()));
        }
    }
    if !duplicates.is_empty() {
        anyhow::bail!("duplicate declarations found: {}", duplicates.join(", "));
    }

    let declarations = by_name
        .into_iter()
        .map(|(name, mut found)| {
            (
                name,
                found.pop().expect("declaration list not empty").clone(),
            )
        })
        .collect();

    Ok(DeclIndex { declarations })
}

impl DeclIndex {
    /// Missing declarations are tolerated; checks skip what they cannot
    /// resolve.
    pub(crate) fn lookup(&self, name: &str) -> Option<&GenericDecl> {
        self.declarations.get(name)
    }

    pub(crate) fn len(&self) -> usize {
        self.declarations.len()
    }
}
