//! Resolve a tree model's importance vector to named, ranked records.
//!
//! The model only knows importances by slot position. The slot-to-column mapping
//! lives in the `ml_attr` metadata of the feature column the model reads, so the
//! resolver needs both the model and the schema of a dataset carrying that column.
//!
//! ```ignore
//! use featrank_core::{ImportanceResolver, SortOrder};
//!
//! let records = ImportanceResolver::new(&model, &predictions_schema)
//!     .with_sort_order(SortOrder::Descending)
//!     .resolve()?;
//! for r in &records {
//!     println!("{r}");
//! }
//! ```

use std::cmp::Ordering;

use crate::attribute::AttributeTable;
use crate::config::{ResolverConfig, SortOrder};
use crate::error::{ImportanceError, Result};
use crate::model::{FeatureImportances, PredictionModel};
use crate::record::ImportanceRecord;
use crate::schema::StructType;

/// Links a model's feature importances to the column names in a schema.
#[derive(Debug, Clone, Copy)]
pub struct ImportanceResolver<'a> {
    model: &'a PredictionModel,
    schema: &'a StructType,
    sort_order: SortOrder,
}

impl<'a> ImportanceResolver<'a> {
    pub fn new(model: &'a PredictionModel, schema: &'a StructType) -> Self {
        Self {
            model,
            schema,
            sort_order: SortOrder::default(),
        }
    }

    pub fn builder() -> ImportanceResolverBuilder<'a> {
        ImportanceResolverBuilder::default()
    }

    pub fn with_sort_order(mut self, sort_order: SortOrder) -> Self {
        self.sort_order = sort_order;
        self
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    /// Produce one record per importance slot, ordered by the configured sort order.
    ///
    /// Ranks always reflect descending score order, whatever order is returned.
    pub fn resolve(&self) -> Result<Vec<ImportanceRecord>> {
        let scores = self.model.feature_importances()?;
        let features_col = self.model.features_col();

        let field = self
            .schema
            .field(features_col)
            .ok_or_else(|| ImportanceError::column_not_found(features_col))?;
        let table = AttributeTable::from_field(field)?;

        if let Some(declared) = table.num_attrs() {
            if declared != scores.len() {
                tracing::debug!(
                    column = features_col,
                    declared,
                    actual = scores.len(),
                    "Attribute count differs from importance vector length"
                );
            }
        }

        if let Some(declared) = self.model.num_features() {
            if declared != scores.len() {
                tracing::debug!(
                    model = %self.model,
                    declared,
                    actual = scores.len(),
                    "Model feature count differs from importance vector length"
                );
            }
        }

        let mut records: Vec<ImportanceRecord> = scores
            .iter()
            .enumerate()
            .map(|(i, &score)| {
                ImportanceRecord::new(i, table.get(i).map(str::to_string), score, 0)
            })
            .collect();

        let descending = assign_ranks(&mut records);

        let unresolved = records.iter().filter(|r| r.name.is_none()).count();
        tracing::debug!(
            model = %self.model,
            column = features_col,
            features = records.len(),
            unresolved,
            sort_order = ?self.sort_order,
            "Resolved feature importances"
        );

        let ordered: Vec<ImportanceRecord> = match self.sort_order {
            SortOrder::Descending => descending.iter().map(|&i| records[i].clone()).collect(),
            SortOrder::Ascending => {
                let mut ascending = descending;
                ascending.sort_by(|&a, &b| score_cmp(records[a].score, records[b].score));
                ascending.iter().map(|&i| records[i].clone()).collect()
            }
            SortOrder::Unsorted => records,
        };
        Ok(ordered)
    }
}

/// Rank `records` by descending score, returning their indices in that order.
///
/// Ties keep vector order.
fn assign_ranks(records: &mut [ImportanceRecord]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..records.len()).collect();
    order.sort_by(|&a, &b| score_cmp(records[b].score, records[a].score));
    for (rank, &i) in order.iter().enumerate() {
        records[i].rank = rank;
    }
    order
}

/// Total order on scores where every NaN, whatever its sign bit, sorts above all
/// other values and compares equal to any other NaN.
fn score_cmp(a: f64, b: f64) -> Ordering {
    let canonical = |s: f64| if s.is_nan() { f64::NAN } else { s };
    canonical(a).total_cmp(&canonical(b))
}

/// Builder for [`ImportanceResolver`] when the inputs are gathered piecemeal.
#[derive(Debug, Default)]
pub struct ImportanceResolverBuilder<'a> {
    model: Option<&'a PredictionModel>,
    schema: Option<&'a StructType>,
    sort_order: SortOrder,
}

impl<'a> ImportanceResolverBuilder<'a> {
    pub fn model(mut self, model: &'a PredictionModel) -> Self {
        self.model = Some(model);
        self
    }

    pub fn schema(mut self, schema: &'a StructType) -> Self {
        self.schema = Some(schema);
        self
    }

    pub fn sort(mut self, sort_order: SortOrder) -> Self {
        self.sort_order = sort_order;
        self
    }

    pub fn with_config(mut self, config: &ResolverConfig) -> Self {
        self.sort_order = config.sort_order;
        self
    }

    pub fn build(self) -> Result<ImportanceResolver<'a>> {
        let model = self
            .model
            .ok_or_else(|| ImportanceError::invalid_configuration("model is not set"))?;
        let schema = self
            .schema
            .ok_or_else(|| ImportanceError::invalid_configuration("schema is not set"))?;
        Ok(ImportanceResolver::new(model, schema).with_sort_order(self.sort_order))
    }
}
