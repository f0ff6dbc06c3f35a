//! Method invocations inside a declaration.

use crate::{accessor, JavaHarness};
use streaming_iterator::StreamingIterator;
use tree_sitter::{Node, Query, QueryCursor};
use tracing::debug;

pub(crate) const INVOCATION_QUERY: &str = "(method_invocation name: (identifier) @name)";

/// Name nodes of every invocation under `node`, ordered by start offset.
pub fn invocation_name_nodes<'t>(query: &Query, node: Node<'t>, source: &str) -> Vec<Node<'t>> {
    let Some(name_index) = query.capture_index_for_name("name") else {
        return Vec::new();
    };

    let mut cursor = QueryCursor::new();
    let mut nodes = Vec::new();
    let mut matches = cursor.matches(query, node, source.as_bytes());
    while let Some(query_match) = matches.next() {
        nodes.extend(
            query_match
                .captures
                .iter()
                .filter(|c| c.index == name_index)
                .map(|c| c.node),
        );
    }

    // Outer calls start before the calls nested in their arguments.
    nodes.sort_by_key(|n| n.start_byte());
    nodes
}

impl JavaHarness {
    /// Names of all methods invoked under `node`, duplicates retained.
    pub fn list_invocations(&self, node: Node, source: &str) -> Vec<String> {
        invocation_name_nodes(&self.invocation_query, node, source)
            .into_iter()
            .map(|n| accessor::text(n, source).to_string())
            .collect()
    }

    /// Invocations in the first method named `method_name` of the target
    /// class. Empty when either cannot be found.
    pub fn invocations_in_method(
        &mut self,
        source: &str,
        target_class_name: Option<&str>,
        method_name: &str,
    ) -> Vec<String> {
        let unit = match self.parse(source) {
            Ok(unit) => unit,
            Err(e) => {
                debug!("Could not parse compilation unit: {}", e);
                return Vec::new();
            }
        };

        let Some(class_decl) = crate::find_target_class(unit.root(), source, target_class_name)
        else {
            return Vec::new();
        };
        let Some(body) = class_decl.child_by_field_name("body") else {
            return Vec::new();
        };

        let method = accessor::children_of_kind(body, "method_declaration")
            .into_iter()
            .find(|m| {
                accessor::field_text(*m, "name", source)
                    .map(|name| name == method_name)
                    .unwrap_or(false)
            });

        match method {
            Some(method) => self.list_invocations(method, source),
            None => {
                debug!("Method {} not found", method_name);
                Vec::new()
            }
        }
    }
}
