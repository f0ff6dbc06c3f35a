use thiserror::Error;

/// Failures surfaced by the extraction engine.
///
/// Most lookups that fail are soft: the engine logs them and degrades to a
/// sentinel value. These variants exist for the lookups that need to carry
/// the failure one step further, and for caller bugs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("`{kind}` node has no `{field}` field")]
    MissingField { kind: String, field: &'static str },

    #[error("`{parent}` node has no `{kind}` child")]
    MissingChild { parent: String, kind: &'static str },

    #[error("expected `{expected}` node, found `{found}`")]
    UnexpectedKind { expected: &'static str, found: String },

    #[error("precondition violated: {0}")]
    Precondition(String),

    #[error("parser produced no tree")]
    Parse,
}

pub type ExtractResult<T> = std::result::Result<T, ExtractError>;
