//! The concrete seed scenarios from the specification's testable
//! properties section.

mod common;

use relshape_core::{analyze_sql, AnalyzeError, ColumnDefinition};

#[test]
fn constant_only() {
    let structure = common::issues_structure();
    let result = analyze_sql(&structure, "SELECT 1").unwrap();

    assert_eq!(result.result_columns.len(), 1);
    assert_eq!(result.result_columns[0].name, None);
    assert!(matches!(
        result.result_columns[0].definition,
        ColumnDefinition::ConstantValue { ref r#type } if r#type == "unknown"
    ));
    assert!(result.pk_mappings.is_empty());
}

#[test]
fn bare_table_star() {
    let structure = common::issues_structure();
    let result = analyze_sql(&structure, "SELECT id, title FROM issues").unwrap();

    assert_eq!(result.result_columns.len(), 2);
    for result_column in &result.result_columns {
        assert!(matches!(
            result_column.definition,
            ColumnDefinition::DataReference { .. }
        ));
    }
    assert_eq!(result.pk_mappings.len(), 1);
    assert_eq!(result.pk_mappings[0].pk_columns, vec!["id"]);
    assert_eq!(result.pk_mappings[0].data_columns, vec!["title"]);
}

#[test]
fn alias_propagation() {
    let structure = common::issues_structure();
    let result = analyze_sql(&structure, "SELECT id AS key, title FROM issues").unwrap();

    assert_eq!(result.result_columns[0].name.as_deref(), Some("key"));
    assert_eq!(result.pk_mappings.len(), 1);
    assert_eq!(result.pk_mappings[0].pk_columns, vec!["key"]);
    assert_eq!(result.pk_mappings[0].data_columns, vec!["title"]);
}

#[test]
fn unresolvable_column_is_soft_failed() {
    let structure = common::issues_structure();
    let result = analyze_sql(&structure, "SELECT nonexistent FROM issues").unwrap();

    assert_eq!(result.result_columns.len(), 1);
    assert_eq!(result.result_columns[0].name.as_deref(), Some("nonexistent"));
    match &result.result_columns[0].definition {
        ColumnDefinition::UnknownExpression { reason } => {
            assert_eq!(reason.as_deref(), Some("Unable to resolve column."));
        }
        other => panic!("expected UnknownExpression, got {other:?}"),
    }
    assert!(result.pk_mappings.is_empty());
}

#[test]
fn qualified_reference_via_alias() {
    let structure = common::issues_structure();
    let result = analyze_sql(&structure, "SELECT i.id FROM issues AS i").unwrap();

    match &result.result_columns[0].definition {
        ColumnDefinition::DataReference {
            ultimate_source,
            local_source,
        } => {
            assert_eq!(ultimate_source.table_reference.name, "issues");
            let local_source = local_source.as_ref().unwrap();
            assert_eq!(local_source.relation.name, "i");
            assert_eq!(local_source.relation.schema_name, None);
        }
        other => panic!("expected DataReference, got {other:?}"),
    }
    assert_eq!(result.pk_mappings.len(), 1);
    assert_eq!(result.pk_mappings[0].pk_columns, vec!["id"]);
    assert!(result.pk_mappings[0].data_columns.is_empty());
}

#[test]
fn unsupported_statement_is_fatal() {
    let structure = common::issues_structure();
    let err = analyze_sql(&structure, "INSERT INTO issues VALUES (1, 'x')").unwrap_err();
    assert!(matches!(err, AnalyzeError::NotASelect));
}

#[test]
fn inner_join_with_key_not_projected() {
    let structure = common::join_structure();
    let result = analyze_sql(&structure, "SELECT a.x, b.y FROM a JOIN b ON a.id = b.id").unwrap();

    assert_eq!(result.result_columns.len(), 2);
    for result_column in &result.result_columns {
        assert!(matches!(
            result_column.definition,
            ColumnDefinition::DataReference { .. }
        ));
    }
    assert!(result.pk_mappings.is_empty());
}

#[test]
fn natural_join_is_rejected() {
    let structure = common::join_structure();
    let err = analyze_sql(&structure, "SELECT a.x FROM a NATURAL JOIN b").unwrap_err();
    assert!(matches!(err, AnalyzeError::UnsupportedConstruct(_)));
}

#[test]
fn using_join_is_rejected() {
    let structure = common::join_structure();
    let err = analyze_sql(&structure, "SELECT a.x FROM a JOIN b USING (id)").unwrap_err();
    assert!(matches!(err, AnalyzeError::UnsupportedConstruct(_)));
}
