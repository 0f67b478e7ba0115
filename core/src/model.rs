//! The analysis output model: provenance references, tagged column
//! definitions, and the recontextualization operation that propagates
//! provenance across query scope boundaries.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::structure::{Column, Schema, Table};

/// A snapshot of a [`Schema`]'s identity at analysis time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SchemaReference {
    pub name: String,
    pub oid: i64,
}

impl SchemaReference {
    pub fn from_schema(schema: &Schema) -> Self {
        Self {
            name: schema.name.clone(),
            oid: schema.oid,
        }
    }
}

/// A snapshot of a [`Table`]'s identity, including its owning schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TableReference {
    pub name: String,
    pub oid: i64,
    pub schema_reference: SchemaReference,
}

impl TableReference {
    pub fn from_table(schema: &Schema, table: &Table) -> Self {
        Self {
            name: table.name.clone(),
            oid: table.oid,
            schema_reference: SchemaReference::from_schema(schema),
        }
    }
}

/// Full physical provenance of a piece of data: invariant across query
/// nesting. Context-independent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ColumnReference {
    pub table_reference: TableReference,
    pub column: Column,
}

impl ColumnReference {
    pub fn new(schema: &Schema, table: &Table, column: &Column) -> Self {
        Self {
            table_reference: TableReference::from_table(schema, table),
            column: column.clone(),
        }
    }
}

/// Identifies a relation as referenced in a query: the alias if aliased,
/// otherwise the actual relation name. `schema_name` is null for CTEs and
/// aliased references, and the schema name as written for an explicitly
/// schema-qualified, unaliased reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct RelationReference {
    pub name: String,
    pub schema_name: Option<String>,
}

/// Identifies a column inside the current query's local scope.
/// Context-dependent: rewritten by [`ResultColumn::recontextualize`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct LocalColumnReference {
    pub relation: RelationReference,
    pub column_name: String,
}

/// A `SELECT` target's classified definition. Discriminated on
/// `classification`; the tag is preserved verbatim across serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "classification")]
pub enum ColumnDefinition {
    #[serde(rename = "constant")]
    ConstantValue {
        #[serde(rename = "type")]
        r#type: String,
    },
    #[serde(rename = "data")]
    DataReference {
        ultimate_source: ColumnReference,
        local_source: Option<LocalColumnReference>,
    },
    #[serde(rename = "unknown")]
    UnknownExpression { reason: Option<String> },
}

/// One entry of a [`RelationStructure`]'s output column list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ResultColumn {
    pub definition: ColumnDefinition,
    pub name: Option<String>,
}

impl ResultColumn {
    /// Lifts this column's provenance across a query scope boundary:
    /// replaces `local_source` (preserving `ultimate_source`) on a
    /// `DataReference`, and replaces `name` with `alias` when given.
    pub fn recontextualize(&self, local_source: LocalColumnReference, alias: Option<&str>) -> ResultColumn {
        let definition = match &self.definition {
            ColumnDefinition::DataReference { ultimate_source, .. } => ColumnDefinition::DataReference {
                ultimate_source: ultimate_source.clone(),
                local_source: Some(local_source),
            },
            other => other.clone(),
        };
        let name = alias.map(str::to_string).or_else(|| self.name.clone());
        ResultColumn { definition, name }
    }
}

/// Describes which output columns identify a row-portion (`pk_columns`) and
/// which output columns on that same row-portion are updatable through it
/// (`data_columns`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PkMapping {
    pub pk_columns: Vec<String>,
    pub data_columns: Vec<String>,
}

/// The analysis output: an ordered, classified projection plus the
/// primary-key mappings that survive it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RelationStructure {
    pub result_columns: Vec<ResultColumn>,
    pub pk_mappings: Vec<PkMapping>,
}

impl RelationStructure {
    /// Builds the `RelationStructure` of a physical table: one `ResultColumn`
    /// per column in declaration order, and one `PkMapping` per lookup
    /// column set with `data_columns` holding every other column, in table
    /// order.
    pub fn from_table(schema: &Schema, table: &Table) -> Self {
        let result_columns = table
            .columns
            .values()
            .map(|column| ResultColumn {
                definition: ColumnDefinition::DataReference {
                    ultimate_source: ColumnReference::new(schema, table, column),
                    local_source: None,
                },
                name: Some(column.name.clone()),
            })
            .collect();

        let pk_mappings = table
            .lookup_column_sets
            .iter()
            .map(|lookup_column_set| {
                let pk_columns = lookup_column_set.column_names.clone();
                let data_columns = table
                    .columns
                    .keys()
                    .filter(|name| !pk_columns.contains(name))
                    .cloned()
                    .collect();
                PkMapping {
                    pk_columns,
                    data_columns,
                }
            })
            .collect();

        RelationStructure {
            result_columns,
            pk_mappings,
        }
    }
}

/// One relation bound in a `FROM`/`JOIN` clause: its reference as written in
/// the query, plus the `RelationStructure` it resolved to.
#[derive(Debug, Clone)]
pub struct NamedRelation {
    pub reference: RelationReference,
    pub structure: RelationStructure,
}
