//! The analyzer: parses a single SQL `SELECT` statement, resolves its
//! `FROM`/`JOIN` items and target list against a `DatabaseStructure`, and
//! lifts primary-key mappings through the projection.

mod context;
mod expression;
mod from_clause;
mod pk_lift;

use pg_query::NodeEnum;

use crate::error::AnalyzeError;
use crate::model::{ColumnDefinition, RelationStructure};
use crate::structure::DatabaseStructure;
use context::Context;

/// Parses `sql`, resolves it against `structure`, and returns the resulting
/// `RelationStructure`. See the crate's module docs for the full pipeline.
pub fn analyze_sql(structure: &DatabaseStructure, sql: &str) -> Result<RelationStructure, AnalyzeError> {
    structure.current_schema()?;

    let parsed = pg_query::parse(sql)?;
    let statement_count = parsed.protobuf.stmts.len();
    if statement_count != 1 {
        return Err(AnalyzeError::UnsupportedShape { statement_count });
    }

    let raw_stmt = &parsed.protobuf.stmts[0];
    let stmt_node = raw_stmt.stmt.as_ref().ok_or(AnalyzeError::NotASelect)?;
    let select = match stmt_node.node.as_ref() {
        Some(NodeEnum::SelectStmt(select)) => select.as_ref(),
        _ => return Err(AnalyzeError::NotASelect),
    };

    tracing::debug!(targets = select.target_list.len(), "analyzing SELECT statement");

    let context = Context::new(structure, select)?;

    let mut result_columns = Vec::with_capacity(select.target_list.len());
    for target in &select.target_list {
        let res_target = match target.node.as_ref() {
            Some(NodeEnum::ResTarget(res_target)) => res_target.as_ref(),
            _ => {
                return Err(AnalyzeError::UnsupportedConstruct(
                    "unexpected SELECT target node".to_string(),
                ))
            }
        };

        if !res_target.indirection.is_empty() {
            return Err(AnalyzeError::UnsupportedConstruct(
                "indirection on a SELECT target is not supported".to_string(),
            ));
        }

        let expr = res_target.val.as_deref().ok_or_else(|| {
            AnalyzeError::UnsupportedConstruct("SELECT target has no expression".to_string())
        })?;

        let alias = if res_target.name.is_empty() {
            None
        } else {
            Some(res_target.name.as_str())
        };

        let result_column = expression::analyze_result_column(&context, expr, alias)?;
        if matches!(result_column.definition, ColumnDefinition::UnknownExpression { .. }) {
            tracing::debug!(name = ?result_column.name, "soft column resolution failure");
        }
        result_columns.push(result_column);
    }

    let pk_mappings = pk_lift::lift_pk_mappings(&result_columns, context.relations());

    Ok(RelationStructure {
        result_columns,
        pk_mappings,
    })
}
