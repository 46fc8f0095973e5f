//! Property-based tests for importance resolution using proptest.

use proptest::prelude::*;
use serde_json::json;

use featrank_core::{
    ImportanceRecord, ImportanceResolver, Metadata, MlVector, PredictionModel, SortOrder,
    StructField, StructType, TreeModel,
};

fn model_for(scores: &[f64]) -> PredictionModel {
    PredictionModel::RandomForestClassification(TreeModel::new(
        "rfc_prop",
        "features",
        MlVector::dense(scores.to_vec()),
    ))
}

/// Schema naming every even slot below `n`; odd slots stay unresolved.
fn schema_for(n: usize) -> StructType {
    let numeric: Vec<_> = (0..n)
        .step_by(2)
        .map(|i| json!({"idx": i, "name": format!("col_{i}")}))
        .collect();
    let meta = Metadata::from_value(json!({"ml_attr": {"attrs": {"numeric": numeric}}})).unwrap();
    StructType::new(vec![StructField::new("features", "vector").with_metadata(meta)])
}

fn resolve(scores: &[f64], order: SortOrder) -> Vec<ImportanceRecord> {
    let model = model_for(scores);
    let schema = schema_for(scores.len());
    ImportanceResolver::new(&model, &schema)
        .with_sort_order(order)
        .resolve()
        .unwrap()
}

fn sort_orders() -> impl Strategy<Value = SortOrder> {
    prop_oneof![
        Just(SortOrder::Ascending),
        Just(SortOrder::Descending),
        Just(SortOrder::Unsorted),
    ]
}

// Coarse scores so ties show up often.
fn score_vectors() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec((0u8..8).prop_map(|s| f64::from(s) / 8.0), 0..60)
}

proptest! {
    #[test]
    fn one_record_per_slot(scores in score_vectors(), order in sort_orders()) {
        let records = resolve(&scores, order);
        prop_assert_eq!(records.len(), scores.len());
        let mut indices: Vec<usize> = records.iter().map(|r| r.raw_index).collect();
        indices.sort_unstable();
        prop_assert_eq!(indices, (0..scores.len()).collect::<Vec<_>>());
        for r in &records {
            prop_assert_eq!(r.score, scores[r.raw_index]);
        }
    }

    #[test]
    fn ranks_follow_descending_score(scores in score_vectors(), order in sort_orders()) {
        let mut records = resolve(&scores, order);
        records.sort_by_key(|r| r.rank);
        let ranks: Vec<usize> = records.iter().map(|r| r.rank).collect();
        prop_assert_eq!(ranks, (0..scores.len()).collect::<Vec<_>>());
        for pair in records.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
            if pair[0].score == pair[1].score {
                prop_assert!(pair[0].raw_index < pair[1].raw_index);
            }
        }
    }

    #[test]
    fn output_order_matches_sort_order(scores in score_vectors(), order in sort_orders()) {
        let records = resolve(&scores, order);
        for pair in records.windows(2) {
            match order {
                SortOrder::Descending => {
                    prop_assert!(pair[0].score >= pair[1].score);
                }
                SortOrder::Ascending => {
                    prop_assert!(pair[0].score <= pair[1].score);
                }
                SortOrder::Unsorted => {
                    prop_assert!(pair[0].raw_index < pair[1].raw_index);
                }
            }
        }
    }

    #[test]
    fn ranks_do_not_depend_on_sort_order(scores in score_vectors()) {
        let rank_of = |order| {
            let mut ranks = vec![0; scores.len()];
            for r in resolve(&scores, order) {
                ranks[r.raw_index] = r.rank;
            }
            ranks
        };
        let desc = rank_of(SortOrder::Descending);
        prop_assert_eq!(&rank_of(SortOrder::Ascending), &desc);
        prop_assert_eq!(&rank_of(SortOrder::Unsorted), &desc);
    }

    #[test]
    fn resolve_is_idempotent(scores in score_vectors(), order in sort_orders()) {
        prop_assert_eq!(resolve(&scores, order), resolve(&scores, order));
    }

    #[test]
    fn odd_slots_are_unresolved(scores in score_vectors()) {
        for r in resolve(&scores, SortOrder::Unsorted) {
            if r.raw_index % 2 == 0 {
                let expected = format!("col_{}", r.raw_index);
                prop_assert_eq!(r.name.as_deref(), Some(expected.as_str()));
            } else {
                prop_assert!(r.name.is_none());
            }
        }
    }
}
