//! Classifies a single `SELECT` target expression into a `ResultColumn`.

use pg_query::protobuf;
use pg_query::NodeEnum;

use crate::analyzer::context::Context;
use crate::error::AnalyzeError;
use crate::model::{ColumnDefinition, LocalColumnReference, ResultColumn};

/// Deduces a name (alias, else the trailing identifier of a column
/// reference, else none) and classifies `expr` via `context`'s resolver.
pub(super) fn analyze_result_column(
    context: &Context,
    expr: &protobuf::Node,
    alias: Option<&str>,
) -> Result<ResultColumn, AnalyzeError> {
    let name = alias.map(str::to_string).or_else(|| deduce_name(expr));

    match expr.node.as_ref() {
        Some(NodeEnum::AConst(_)) => Ok(ResultColumn {
            definition: ColumnDefinition::ConstantValue {
                r#type: "unknown".to_string(),
            },
            name,
        }),
        Some(NodeEnum::ColumnRef(column_ref)) => analyze_column_ref(context, column_ref, name),
        _ => Err(AnalyzeError::UnsupportedConstruct(
            "target expression must be a constant literal or column reference".to_string(),
        )),
    }
}

fn deduce_name(expr: &protobuf::Node) -> Option<String> {
    match expr.node.as_ref() {
        Some(NodeEnum::ColumnRef(column_ref)) => column_ref.fields.last().and_then(field_string),
        _ => None,
    }
}

fn field_string(field: &protobuf::Node) -> Option<String> {
    match field.node.as_ref() {
        Some(NodeEnum::String(s)) => Some(s.sval.clone()),
        _ => None,
    }
}

fn analyze_column_ref(
    context: &Context,
    column_ref: &protobuf::ColumnRef,
    name: Option<String>,
) -> Result<ResultColumn, AnalyzeError> {
    let unknown = |reason: &str| ResultColumn {
        definition: ColumnDefinition::UnknownExpression {
            reason: Some(reason.to_string()),
        },
        name: name.clone(),
    };

    let fields = &column_ref.fields;
    let (schema_field, relation_field, column_field) = match fields.len() {
        1 => (None, None, &fields[0]),
        2 => (None, Some(&fields[0]), &fields[1]),
        3 => (Some(&fields[0]), Some(&fields[1]), &fields[2]),
        n => {
            return Ok(unknown(&format!(
                "Unsupported number of ColumnRef fields. Expected 1-3. Got {n}."
            )));
        }
    };

    let Some(column_name) = field_string(column_field) else {
        return Ok(unknown("Unable to identify string column in within AST."));
    };
    let schema_name = schema_field.and_then(field_string);
    let relation_name = relation_field.and_then(field_string);

    let Some(resolution) = context.resolve_column(schema_name.as_deref(), relation_name.as_deref(), &column_name)
    else {
        return Ok(unknown("Unable to resolve column."));
    };

    let local_source = LocalColumnReference {
        relation: resolution.relation_reference,
        column_name,
    };

    Ok(resolution
        .result_column
        .recontextualize(local_source, name.as_deref()))
}
