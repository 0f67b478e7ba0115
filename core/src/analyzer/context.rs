//! Per-statement name-resolution scope. Built once per `analyze_sql` call
//! from a `DatabaseStructure` and a `SelectStmt`, consulted while classifying
//! the target list, and discarded on return.

use indexmap::IndexMap;
use pg_query::protobuf;

use crate::analyzer::from_clause::collect_named_relations;
use crate::error::AnalyzeError;
use crate::model::{NamedRelation, RelationReference, RelationStructure, ResultColumn};
use crate::structure::DatabaseStructure;

/// The result of resolving a column reference: which relation furnished it
/// (as named in the query) and the `ResultColumn` it resolved to.
pub(crate) struct ColumnResolution {
    pub relation_reference: RelationReference,
    pub result_column: ResultColumn,
}

pub(crate) struct Context {
    current_schema: String,
    relations: Vec<NamedRelation>,
    /// schema-name? -> relation-name -> index into `relations`. CTEs (and
    /// unqualified, unaliased relations) live under the `None` key.
    schemas_map: IndexMap<Option<String>, IndexMap<String, usize>>,
    flat_columns: IndexMap<String, ColumnResolution>,
}

impl Context {
    pub(crate) fn new(structure: &DatabaseStructure, select: &protobuf::SelectStmt) -> Result<Self, AnalyzeError> {
        let current_schema = structure.current_schema()?.name.clone();

        // Placeholder: CTEs are not populated from `WITH` clauses yet, but
        // the bucket shape is reserved so support can be added later without
        // changing the resolution contract.
        let ctes: IndexMap<String, RelationStructure> = IndexMap::new();

        let relations = collect_named_relations(structure, &ctes, &select.from_clause)?;

        let mut schemas_map: IndexMap<Option<String>, IndexMap<String, usize>> = IndexMap::new();
        for (index, relation) in relations.iter().enumerate() {
            schemas_map
                .entry(relation.reference.schema_name.clone())
                .or_default()
                .entry(relation.reference.name.clone())
                .or_insert(index);
        }

        let mut flat_columns: IndexMap<String, ColumnResolution> = IndexMap::new();
        for relation in &relations {
            for result_column in &relation.structure.result_columns {
                let Some(name) = &result_column.name else {
                    continue;
                };
                flat_columns.entry(name.clone()).or_insert_with(|| ColumnResolution {
                    relation_reference: relation.reference.clone(),
                    result_column: result_column.clone(),
                });
            }
        }

        Ok(Context {
            current_schema,
            relations,
            schemas_map,
            flat_columns,
        })
    }

    pub(crate) fn relations(&self) -> &[NamedRelation] {
        &self.relations
    }

    /// `resolve_column(schema_name?, relation_name?, column_name)`: an
    /// unqualified name (`relation_name` absent) consults the flat columns
    /// map; otherwise the schema-bucket is chosen by `schema_name`, falling
    /// back from the current schema's bucket to the CTE bucket when absent.
    pub(crate) fn resolve_column(
        &self,
        schema_name: Option<&str>,
        relation_name: Option<&str>,
        column_name: &str,
    ) -> Option<ColumnResolution> {
        let relation_name = match relation_name {
            None => {
                return self.flat_columns.get(column_name).map(|resolution| ColumnResolution {
                    relation_reference: resolution.relation_reference.clone(),
                    result_column: resolution.result_column.clone(),
                })
            }
            Some(relation_name) => relation_name,
        };

        let bucket = if let Some(schema_name) = schema_name {
            self.schemas_map.get(&Some(schema_name.to_string())).or_else(|| {
                if schema_name == self.current_schema {
                    self.schemas_map.get(&None)
                } else {
                    None
                }
            })
        } else {
            self.schemas_map
                .get(&Some(self.current_schema.clone()))
                .or_else(|| self.schemas_map.get(&None))
        }?;

        let index = *bucket.get(relation_name)?;
        let relation = &self.relations[index];
        let result_column = relation
            .structure
            .result_columns
            .iter()
            .find(|result_column| result_column.name.as_deref() == Some(column_name))?;

        Some(ColumnResolution {
            relation_reference: RelationReference {
                name: relation_name.to_string(),
                schema_name: schema_name.map(str::to_string),
            },
            result_column: result_column.clone(),
        })
    }
}
