//! The immutable database structure snapshot the analyzer runs against.
//!
//! `DatabaseStructure` is supplied by the caller (typically deserialized from
//! JSON) and is never mutated during analysis.

use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::AnalyzeError;

/// A single physical column of a [`Table`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Column {
    pub name: String,
    pub attnum: i32,
    #[serde(rename = "type")]
    pub r#type: String,
    pub mutable: bool,
}

/// A UNIQUE NOT NULL key on a [`Table`], possibly composite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LookupColumnSet {
    pub column_names: Vec<String>,
}

/// A table (or view) within a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Table {
    pub name: String,
    pub oid: i64,
    pub columns: IndexMap<String, Column>,
    pub lookup_column_sets: Vec<LookupColumnSet>,
}

impl Table {
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }
}

/// A named collection of tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Schema {
    pub name: String,
    pub oid: i64,
    pub tables: IndexMap<String, Table>,
}

impl Schema {
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }
}

/// A full snapshot of the database's structural metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DatabaseStructure {
    pub schemas: IndexMap<String, Schema>,
    pub current_schema: String,
}

impl DatabaseStructure {
    pub fn schema(&self, name: &str) -> Option<&Schema> {
        self.schemas.get(name)
    }

    /// Resolves `current_schema`, failing with the configuration error kind
    /// if it does not name a key of `schemas`.
    pub fn current_schema(&self) -> Result<&Schema, AnalyzeError> {
        self.schema(&self.current_schema)
            .ok_or_else(|| AnalyzeError::Configuration {
                current_schema: self.current_schema.clone(),
            })
    }
}
