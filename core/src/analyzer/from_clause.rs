//! Resolves `FROM`/`JOIN` items into the left-to-right ordered list of
//! [`NamedRelation`]s a `Context` is built from.

use indexmap::IndexMap;
use pg_query::protobuf;
use pg_query::NodeEnum;

use crate::error::AnalyzeError;
use crate::model::{NamedRelation, RelationReference, RelationStructure};
use crate::structure::DatabaseStructure;

/// Walks `from_clause`, yielding one `NamedRelation` per leaf table
/// reference, in left-to-right order. An empty `from_clause` (constant-only
/// select) yields nothing.
pub(super) fn collect_named_relations(
    structure: &DatabaseStructure,
    ctes: &IndexMap<String, RelationStructure>,
    from_clause: &[protobuf::Node],
) -> Result<Vec<NamedRelation>, AnalyzeError> {
    let mut relations = Vec::new();
    for node in from_clause {
        relations.extend(walk_from_item(structure, ctes, node)?);
    }
    Ok(relations)
}

fn walk_from_item(
    structure: &DatabaseStructure,
    ctes: &IndexMap<String, RelationStructure>,
    node: &protobuf::Node,
) -> Result<Vec<NamedRelation>, AnalyzeError> {
    match node.node.as_ref() {
        Some(NodeEnum::RangeVar(range_var)) => {
            Ok(vec![resolve_range_var(structure, ctes, range_var)?])
        }
        Some(NodeEnum::JoinExpr(join_expr)) => resolve_join(structure, ctes, join_expr),
        _ => Err(AnalyzeError::UnsupportedConstruct(
            "FROM item must be a table reference or JOIN".to_string(),
        )),
    }
}

fn resolve_range_var(
    structure: &DatabaseStructure,
    ctes: &IndexMap<String, RelationStructure>,
    range_var: &protobuf::RangeVar,
) -> Result<NamedRelation, AnalyzeError> {
    if let Some(alias) = &range_var.alias {
        if !alias.colnames.is_empty() {
            return Err(AnalyzeError::UnsupportedConstruct(
                "column-list alias on a relation reference".to_string(),
            ));
        }
    }

    // Schema name as written in the query, not the schema it ultimately
    // resolves against: this is what identifies the relation inside the
    // enclosing query's scope.
    let written_schema_name = if range_var.schemaname.is_empty() {
        None
    } else {
        Some(range_var.schemaname.as_str())
    };

    let relation_structure = resolve_relation(structure, ctes, written_schema_name, &range_var.relname)?;

    let alias_name = range_var.alias.as_ref().map(|alias| alias.aliasname.clone());
    let name = alias_name
        .clone()
        .unwrap_or_else(|| range_var.relname.clone());
    let schema_name = if alias_name.is_some() {
        None
    } else {
        written_schema_name.map(str::to_string)
    };

    Ok(NamedRelation {
        reference: RelationReference { name, schema_name },
        structure: relation_structure,
    })
}

fn resolve_relation(
    structure: &DatabaseStructure,
    ctes: &IndexMap<String, RelationStructure>,
    schema_name: Option<&str>,
    relation_name: &str,
) -> Result<RelationStructure, AnalyzeError> {
    if let Some(schema_name) = schema_name {
        let schema = structure.schema(schema_name).ok_or_else(|| AnalyzeError::RelationNotFound {
            relation: format!("{schema_name}.{relation_name}"),
        })?;
        let table = schema.table(relation_name).ok_or_else(|| AnalyzeError::RelationNotFound {
            relation: format!("{schema_name}.{relation_name}"),
        })?;
        tracing::trace!(schema = schema_name, relation = relation_name, "resolved qualified relation");
        Ok(RelationStructure::from_table(schema, table))
    } else if let Some(cte) = ctes.get(relation_name) {
        Ok(cte.clone())
    } else {
        let schema = structure.current_schema()?;
        let table = schema.table(relation_name).ok_or_else(|| AnalyzeError::RelationNotFound {
            relation: relation_name.to_string(),
        })?;
        tracing::trace!(relation = relation_name, "resolved relation via current schema");
        Ok(RelationStructure::from_table(schema, table))
    }
}

fn resolve_join(
    structure: &DatabaseStructure,
    ctes: &IndexMap<String, RelationStructure>,
    join_expr: &protobuf::JoinExpr,
) -> Result<Vec<NamedRelation>, AnalyzeError> {
    if join_expr.alias.is_some() {
        return Err(AnalyzeError::UnsupportedConstruct("alias on a JOIN".to_string()));
    }
    if join_expr.join_using_alias.is_some() {
        return Err(AnalyzeError::UnsupportedConstruct(
            "USING alias on a JOIN".to_string(),
        ));
    }
    if join_expr.is_natural {
        return Err(AnalyzeError::UnsupportedConstruct("NATURAL JOIN".to_string()));
    }
    if !join_expr.using_clause.is_empty() {
        return Err(AnalyzeError::UnsupportedConstruct(
            "USING clause on a JOIN".to_string(),
        ));
    }

    let join_type = protobuf::JoinType::try_from(join_expr.jointype)
        .map_err(|_| AnalyzeError::UnsupportedConstruct("unrecognized join type".to_string()))?;
    if !matches!(
        join_type,
        protobuf::JoinType::JoinInner | protobuf::JoinType::JoinLeft
    ) {
        return Err(AnalyzeError::UnsupportedConstruct(format!(
            "join type {join_type:?}, only INNER and LEFT are supported"
        )));
    }

    let larg = join_expr
        .larg
        .as_deref()
        .ok_or_else(|| AnalyzeError::UnsupportedConstruct("JOIN missing left side".to_string()))?;
    let rarg = join_expr
        .rarg
        .as_deref()
        .ok_or_else(|| AnalyzeError::UnsupportedConstruct("JOIN missing right side".to_string()))?;

    let mut relations = walk_from_item(structure, ctes, larg)?;
    relations.extend(walk_from_item(structure, ctes, rarg)?);
    Ok(relations)
}
