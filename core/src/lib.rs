//! Static semantic analysis of a single PostgreSQL `SELECT` statement against
//! a supplied database structure snapshot.
//!
//! Given a [`structure::DatabaseStructure`] and a SQL text, [`analyze_sql`]
//! produces a [`model::RelationStructure`]: the ordered, classified,
//! provenance-traced output columns of the statement, together with the
//! primary-key mappings that survive the projection.

pub mod analyzer;
pub mod error;
pub mod model;
pub mod structure;

pub use analyzer::analyze_sql;
pub use error::AnalyzeError;
pub use model::{
    ColumnDefinition, ColumnReference, LocalColumnReference, NamedRelation, PkMapping,
    RelationReference, RelationStructure, ResultColumn, SchemaReference, TableReference,
};
pub use structure::{Column, DatabaseStructure, LookupColumnSet, Schema, Table};
