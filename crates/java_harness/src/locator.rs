//! Top-level declaration lookup: package, imports, and the target class.

use crate::accessor;
use tree_sitter::Node;
use tracing::{debug, error, warn};

/// Name of the first package declaration, or an empty string for the
/// default package.
pub fn find_package(root: Node, source: &str) -> String {
    let Some(package_decl) = accessor::children_of_kind(root, "package_declaration")
        .into_iter()
        .next()
    else {
        return String::new();
    };

    let children = accessor::children(package_decl);
    match children
        .iter()
        .find(|c| matches!(c.kind(), "scoped_identifier" | "identifier"))
    {
        Some(name) => accessor::text(*name, source).to_string(),
        None => {
            let kinds: Vec<&str> = children.iter().map(|c| c.kind()).collect();
            error!(
                "Package declaration node is not as expected. Expected a scoped_identifier child, got: {:?}",
                kinds
            );
            String::new()
        }
    }
}

pub fn find_imports(root: Node, source: &str) -> Vec<String> {
    accessor::children_of_kind(root, "import_declaration")
        .into_iter()
        .map(|n| accessor::text(n, source).to_string())
        .collect()
}

/// Picks the class a compilation unit is "about".
///
/// With a target name, that is the top-level class declared under exactly
/// that name. Without one, it is the first top-level class that is public
/// and not abstract. Interfaces, enums and records never qualify.
pub fn find_target_class<'t>(
    root: Node<'t>,
    source: &str,
    target_class_name: Option<&str>,
) -> Option<Node<'t>> {
    let class_decls = accessor::children_of_kind(root, "class_declaration");

    let found = match target_class_name {
        Some(target) => class_decls.into_iter().find(|node| {
            accessor::field_text(*node, "name", source)
                .map(|name| name == target)
                .unwrap_or(false)
        }),
        None => class_decls.into_iter().find(|node| {
            let modifiers = accessor::modifiers(*node, source);
            modifiers.contains("public") && !modifiers.contains("abstract")
        }),
    };

    if found.is_none() {
        warn!(
            "Class declaration not found (target: {:?}). See debug output for the source.",
            target_class_name
        );
        debug!("{}", source);
    }

    found
}
