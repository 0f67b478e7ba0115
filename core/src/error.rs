//! The fatal-error taxonomy. Soft column-resolution failure (taxonomy kind 5)
//! is not represented here: it is recovered locally and embedded in the
//! output as `ColumnDefinition::UnknownExpression`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// Kind 1: the parser rejected the SQL text.
    #[error("invalid SQL: {0}")]
    InvalidInput(#[from] pg_query::Error),

    /// Kind 2: parsed successfully but not exactly one statement.
    #[error("expected exactly one statement, got {statement_count}")]
    UnsupportedShape { statement_count: usize },

    /// Kind 2: parsed successfully but the one statement is not a `SELECT`.
    #[error("the parsed statement is not a SELECT")]
    NotASelect,

    /// Kind 3: a recognized node with an unhandled variant.
    #[error("unsupported construct: {0}")]
    UnsupportedConstruct(String),

    /// Kind 4: a `RangeVar` could not be resolved to any known relation.
    #[error("could not resolve relation `{relation}`")]
    RelationNotFound { relation: String },

    /// Kind 6: `current_schema` is not a key of `schemas`.
    #[error("current_schema `{current_schema}` is not present in schemas")]
    Configuration { current_schema: String },
}
