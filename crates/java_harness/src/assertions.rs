//! Assertion utilities for generated unit tests.
//!
//! Test fragments are rarely valid compilation units on their own, so the
//! parsing helpers here wrap them in a synthetic class before handing them
//! to the parser.

use crate::invocations::invocation_name_nodes;
use crate::{accessor, AssertionConfig, JavaHarness, ParsedUnit};
use protocol::{ExtractError, ExtractResult};
use tree_sitter::Node;
use tracing::{debug, error};

const SYNTHETIC_CLASS: &str = "ABC";
const SYNTHETIC_METHOD: &str = "testA";

/// Collects assertion lines from the first fenced block of a free-form
/// response, joined by newlines.
///
/// An unclosed fence is scanned to the end of the input.
pub fn extract_assertions(text: &str, config: &AssertionConfig) -> String {
    let mut in_block = false;
    let mut candidates = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if is_fence(line, &config.fence) {
            if in_block {
                break;
            }
            in_block = true;
            continue;
        }
        if !in_block {
            continue;
        }

        if line.starts_with(config.strip_prefix.as_str()) {
            candidates.push(line.chars().skip(config.strip_len).collect::<String>());
        } else if line.starts_with("assert") {
            candidates.push(line.to_string());
        }
    }

    candidates.join("\n")
}

/// A fence line is the marker alone, or the marker followed by a language tag.
fn is_fence(line: &str, marker: &str) -> bool {
    line.strip_prefix(marker).is_some_and(|info| {
        info.chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '+'))
    })
}

/// The statement whose expression is the call named by `name`. Calls nested
/// in arguments, lambdas or receivers of other calls have none.
fn own_statement(name: Node) -> Option<Node> {
    let invocation = name
        .parent()
        .filter(|parent| parent.kind() == "method_invocation")?;
    invocation
        .parent()
        .filter(|parent| parent.kind() == "expression_statement")
}

fn synthetic_class_body<'t>(unit: &'t ParsedUnit) -> ExtractResult<Node<'t>> {
    let class_decl = accessor::first_child_of_kind(unit.root(), "class_declaration")?;
    accessor::field(class_decl, "body")
}

impl JavaHarness {
    pub fn extract_assertions(&self, text: &str) -> String {
        extract_assertions(text, &self.config)
    }

    /// Replaces the first statement calling the configured assertion with
    /// `new_assertion`.
    ///
    /// `test_prefix` is a test method (or a class containing one). Returns an
    /// empty string when no such statement exists. The statement is located
    /// in a placeholder-substituted copy and then replaced textually in the
    /// original; if the substitution changed the statement's text, the
    /// original is returned unchanged.
    pub fn replace_assertion(&mut self, test_prefix: &str, new_assertion: &str) -> String {
        let substituted =
            test_prefix.replace(&self.config.placeholder, &self.config.placeholder_stand_in);
        let wrapped = format!("public class {}{{{}}}", SYNTHETIC_CLASS, substituted);

        let statement = match self.find_assertion_statement(&wrapped) {
            Ok(Some(statement)) => statement,
            Ok(None) => {
                error!("No {} statement found in {}", self.config.target_call, test_prefix);
                return String::new();
            }
            Err(e) => {
                error!("Could not inspect test prefix: {}", e);
                return String::new();
            }
        };

        if !test_prefix.contains(&statement) {
            debug!("Statement {:?} does not occur verbatim in the original prefix", statement);
        }
        test_prefix.replacen(&statement, new_assertion, 1)
    }

    fn find_assertion_statement(&mut self, wrapped: &str) -> ExtractResult<Option<String>> {
        let unit = self.parse(wrapped)?;
        let body = synthetic_class_body(&unit)?;

        let statement = invocation_name_nodes(&self.invocation_query, body, wrapped)
            .into_iter()
            .filter(|name| accessor::text(*name, wrapped) == self.config.target_call)
            .find_map(own_statement);

        Ok(statement.map(|statement| accessor::text(statement, wrapped).to_string()))
    }

    /// Source text of each argument of a single assertion call, left to right.
    ///
    /// `assertion_source` must be exactly one expression statement whose
    /// expression is a method invocation; anything else is a caller error.
    pub fn extract_arguments(&mut self, assertion_source: &str) -> ExtractResult<Vec<String>> {
        let wrapped = format!(
            "public class {} {{\nvoid {}(){{\n{}\n}}\n}}",
            SYNTHETIC_CLASS, SYNTHETIC_METHOD, assertion_source
        );
        let unit = self.parse(&wrapped)?;
        let class_body = synthetic_class_body(&unit)?;
        let method = accessor::first_child_of_kind(class_body, "method_declaration")?;
        let block = accessor::field(method, "body")?;

        let statements = accessor::named_children(block);
        if statements.len() != 1 {
            return Err(ExtractError::Precondition(format!(
                "expected exactly one statement, found {} in {:?}",
                statements.len(),
                assertion_source
            )));
        }

        let invocation = accessor::expect_kind(statements[0], "expression_statement")
            .and_then(|statement| {
                statement.named_child(0).ok_or(ExtractError::MissingField {
                    kind: statement.kind().to_string(),
                    field: "expression",
                })
            })
            .and_then(|expression| accessor::expect_kind(expression, "method_invocation"))
            .map_err(|e| {
                ExtractError::Precondition(format!(
                    "{:?} is not a method invocation statement: {}",
                    assertion_source, e
                ))
            })?;

        let arguments = accessor::field(invocation, "arguments")?;
        Ok(accessor::children(arguments)
            .into_iter()
            .filter(|arg| !accessor::is_punctuation(*arg))
            .map(|arg| accessor::text(arg, &wrapped).to_string())
            .collect())
    }
}
