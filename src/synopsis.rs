//! Column synopsis aggregation: missing-value accounting, type-aware
//! extrema, and frequency tabulation over a materialized column.

use indexmap::IndexMap;
use serde::Serialize;

use crate::column::{ScalarType, classify, is_missing};

/// Summary record for one column. Constructed once from a materialized
/// column and immutable afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct ColumnSynopsis {
    pub name: String,
    pub scalar_type: ScalarType,
    /// Original column, unmodified: same length and order as the input,
    /// `None` where the record carried no field.
    pub values: Vec<Option<String>>,
    /// Order-preserving subsequence of `values` that is not missing.
    pub non_empty_values: Vec<String>,
    /// Smallest non-missing value under the inferred type's ordering;
    /// absent when the column holds nothing but missing values.
    pub minimum: Option<String>,
    pub maximum: Option<String>,
    /// Occurrence count per distinct non-missing value, keyed in
    /// first-occurrence order.
    pub counts: IndexMap<String, usize>,
}

impl ColumnSynopsis {
    pub fn row_count(&self) -> usize {
        self.values.len()
    }

    pub fn missing_count(&self) -> usize {
        self.values.len() - self.non_empty_values.len()
    }

    pub fn distinct_count(&self) -> usize {
        self.counts.len()
    }
}

/// Tallies occurrences of each distinct value, keyed by exact string
/// content in first-occurrence order.
pub fn value_counts<S: AsRef<str>>(values: &[S]) -> IndexMap<String, usize> {
    let mut counts = IndexMap::new();
    for value in values {
        *counts.entry(value.as_ref().to_string()).or_insert(0) += 1;
    }
    counts
}

/// Builds the synopsis for one named column.
///
/// Total over every input shape: an all-missing column yields `TEXT` with
/// empty counts and absent extrema, a singleton column reports that value
/// as both extrema. Ties under the comparator may sort in either relative
/// position.
pub fn synopsize(name: &str, values: Vec<Option<String>>) -> ColumnSynopsis {
    let non_empty_values: Vec<String> = values
        .iter()
        .filter(|value| !is_missing(value.as_deref()))
        .flatten()
        .cloned()
        .collect();

    let scalar_type = classify(&non_empty_values);

    let mut sorted = non_empty_values.clone();
    sorted.sort_by(|left, right| scalar_type.compare(left, right));
    let minimum = sorted.first().cloned();
    let maximum = sorted.last().cloned();

    let counts = value_counts(&non_empty_values);

    ColumnSynopsis {
        name: name.to_string(),
        scalar_type,
        values,
        non_empty_values,
        minimum,
        maximum,
        counts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(values: &[&str]) -> Vec<Option<String>> {
        values.iter().map(|v| Some(v.to_string())).collect()
    }

    #[test]
    fn integer_column_uses_numeric_extrema() {
        let synopsis = synopsize("goals", column(&["9", "10", "2"]));
        assert_eq!(synopsis.scalar_type, ScalarType::Integer);
        assert_eq!(synopsis.minimum.as_deref(), Some("2"));
        assert_eq!(synopsis.maximum.as_deref(), Some("10"));
    }

    #[test]
    fn eight_digit_dates_stay_dates() {
        let synopsis = synopsize("traded_on", column(&["20160118", "20151224"]));
        assert_eq!(synopsis.scalar_type, ScalarType::Date);
        assert_eq!(synopsis.minimum.as_deref(), Some("20151224"));
        assert_eq!(synopsis.maximum.as_deref(), Some("20160118"));
    }

    #[test]
    fn all_missing_column_degrades_to_text() {
        let synopsis = synopsize(
            "notes",
            vec![Some(String::new()), Some("  ".to_string()), None],
        );
        assert_eq!(synopsis.scalar_type, ScalarType::Text);
        assert!(synopsis.non_empty_values.is_empty());
        assert_eq!(synopsis.minimum, None);
        assert_eq!(synopsis.maximum, None);
        assert!(synopsis.counts.is_empty());
        assert_eq!(synopsis.row_count(), 3);
        assert_eq!(synopsis.missing_count(), 3);
    }

    #[test]
    fn singleton_value_is_both_extrema() {
        let synopsis = synopsize("status", column(&["a", "a", "a"]));
        assert_eq!(synopsis.scalar_type, ScalarType::Text);
        assert_eq!(synopsis.minimum.as_deref(), Some("a"));
        assert_eq!(synopsis.maximum.as_deref(), Some("a"));
        assert_eq!(synopsis.counts.get("a"), Some(&3));
        assert_eq!(synopsis.distinct_count(), 1);
    }

    #[test]
    fn one_nonconforming_value_forces_text() {
        let synopsis = synopsize("mixed", column(&["1", "2", "hello", "3"]));
        assert_eq!(synopsis.scalar_type, ScalarType::Text);
        // Lexical order once the column is text.
        assert_eq!(synopsis.minimum.as_deref(), Some("1"));
        assert_eq!(synopsis.maximum.as_deref(), Some("hello"));
    }

    #[test]
    fn values_field_preserves_input_verbatim() {
        let input = vec![Some("1".to_string()), None, Some(" ".to_string())];
        let synopsis = synopsize("raw", input.clone());
        assert_eq!(synopsis.values, input);
        assert_eq!(synopsis.non_empty_values, vec!["1".to_string()]);
        assert_eq!(synopsis.missing_count(), 2);
    }

    #[test]
    fn counts_follow_first_occurrence_order() {
        let synopsis = synopsize("status", column(&["b", "a", "b", "c", "a", "b"]));
        let keys: Vec<&String> = synopsis.counts.keys().collect();
        assert_eq!(keys, ["b", "a", "c"]);
        assert_eq!(synopsis.counts.get("b"), Some(&3));
        assert_eq!(synopsis.counts.get("a"), Some(&2));
        assert_eq!(synopsis.counts.get("c"), Some(&1));
    }

    #[test]
    fn unique_column_has_one_count_per_value() {
        let synopsis = synopsize("id", column(&["1", "2", "3"]));
        assert_eq!(synopsis.distinct_count(), synopsis.non_empty_values.len());
        assert!(synopsis.counts.values().all(|count| *count == 1));
    }

    mod properties {
        use proptest::prelude::*;

        use super::*;
        use crate::column::is_missing;

        proptest! {
            #[test]
            fn partition_and_count_totals_hold(
                raw in proptest::collection::vec(
                    proptest::option::of("[ a-z0-9:.-]{0,6}"),
                    0..48,
                )
            ) {
                let missing = raw
                    .iter()
                    .filter(|value| is_missing(value.as_deref()))
                    .count();
                let synopsis = synopsize("prop", raw.clone());

                prop_assert_eq!(
                    synopsis.non_empty_values.len() + missing,
                    raw.len()
                );
                prop_assert_eq!(
                    synopsis.counts.values().sum::<usize>(),
                    synopsis.non_empty_values.len()
                );
                prop_assert_eq!(
                    synopsis.minimum.is_some(),
                    !synopsis.non_empty_values.is_empty()
                );
                prop_assert_eq!(synopsis.minimum.is_some(), synopsis.maximum.is_some());
            }
        }
    }
}
