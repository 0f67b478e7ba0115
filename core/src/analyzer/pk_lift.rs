//! Projects each underlying relation's lookup column sets through the outer
//! `SELECT`'s output columns, yielding the subset that survives as usable
//! keys at the outer level.

use crate::model::{ColumnDefinition, NamedRelation, PkMapping, RelationReference, ResultColumn};

/// Order matches the order relations were encountered in `FROM`, sub-ordered
/// by each relation's own mapping order.
pub(super) fn lift_pk_mappings(outer_columns: &[ResultColumn], relations: &[NamedRelation]) -> Vec<PkMapping> {
    let mut mappings = Vec::new();

    for relation in relations {
        for sub_mapping in &relation.structure.pk_mappings {
            let mut pk_columns = Vec::with_capacity(sub_mapping.pk_columns.len());
            let mut lifted = true;

            for pk_column_name in &sub_mapping.pk_columns {
                match find_representative(outer_columns, &relation.reference, pk_column_name) {
                    Some(outer_name) => pk_columns.push(outer_name),
                    None => {
                        lifted = false;
                        break;
                    }
                }
            }

            if !lifted {
                continue;
            }

            let data_columns = outer_columns
                .iter()
                .filter_map(|outer_column| {
                    let name = outer_column.name.as_ref()?;
                    match &outer_column.definition {
                        ColumnDefinition::DataReference {
                            local_source: Some(local_source),
                            ..
                        } if local_source.relation == relation.reference
                            && sub_mapping.data_columns.contains(&local_source.column_name) =>
                        {
                            Some(name.clone())
                        }
                        _ => None,
                    }
                })
                .collect();

            mappings.push(PkMapping {
                pk_columns,
                data_columns,
            });
        }
    }

    mappings
}

/// Searches outer columns left-to-right for a representative of
/// `pk_column_name` sourced from `relation`. Preserves the reference
/// behavior documented as an open question: the search gives up at the
/// *first* outer column whose `local_source` is null (rather than
/// continuing past it), not merely at a mismatched one.
fn find_representative(
    outer_columns: &[ResultColumn],
    relation: &RelationReference,
    pk_column_name: &str,
) -> Option<String> {
    for outer_column in outer_columns {
        let local_source = match &outer_column.definition {
            ColumnDefinition::DataReference { local_source, .. } => local_source.as_ref(),
            _ => None,
        };
        match local_source {
            Some(local_source)
                if local_source.relation == *relation && local_source.column_name == pk_column_name =>
            {
                return outer_column.name.clone();
            }
            Some(_) => continue,
            None => return None,
        }
    }
    None
}
