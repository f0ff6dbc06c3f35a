use anyhow::{Context, Result};
use protocol::{Class, ExtractError, ExtractResult};
use tree_sitter::{Language, Node, Parser, Query, Tree};
use tracing::error;

pub mod accessor;
pub mod assertions;
pub mod builder;
pub mod config;
pub mod invocations;
pub mod locator;

pub use assertions::extract_assertions;
pub use builder::{build_class, build_parameters};
pub use config::AssertionConfig;
pub use locator::{find_imports, find_package, find_target_class};

pub fn get_language() -> Language {
    tree_sitter_java::LANGUAGE.into()
}

/// A parsed compilation unit together with the text it was parsed from.
pub struct ParsedUnit<'s> {
    tree: Tree,
    source: &'s str,
}

impl<'s> ParsedUnit<'s> {
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    pub fn source(&self) -> &'s str {
        self.source
    }
}

/// Owns a Java parser and the compiled queries the extractors share.
///
/// A harness is not meant to be shared across threads; give each worker
/// its own instance.
pub struct JavaHarness {
    parser: Parser,
    invocation_query: Query,
    config: AssertionConfig,
}

impl JavaHarness {
    pub fn new() -> Result<Self> {
        Self::with_config(AssertionConfig::default())
    }

    pub fn with_config(config: AssertionConfig) -> Result<Self> {
        let mut parser = Parser::new();
        let language = get_language();
        parser
            .set_language(&language)
            .context("Failed to set Java language")?;
        let invocation_query = Query::new(&language, invocations::INVOCATION_QUERY)
            .context("Failed to compile method invocation query")?;
        Ok(Self {
            parser,
            invocation_query,
            config,
        })
    }

    pub fn config(&self) -> &AssertionConfig {
        &self.config
    }

    pub fn parse<'s>(&mut self, source: &'s str) -> ExtractResult<ParsedUnit<'s>> {
        let tree = self.parser.parse(source, None).ok_or(ExtractError::Parse)?;
        Ok(ParsedUnit { tree, source })
    }

    /// Parses `source` and builds the target class in one step.
    pub fn parse_class(&mut self, source: &str, target_class_name: Option<&str>) -> Option<Class> {
        match self.parse(source) {
            Ok(unit) => build_class(&unit, target_class_name),
            Err(e) => {
                error!("Could not parse compilation unit: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod edge_cases;
