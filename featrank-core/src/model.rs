//! Fitted prediction models as seen by importance resolution.
//!
//! Only the parts of a model that matter here are carried: its identity, the
//! name of the feature-vector column it reads, and (for tree-based models) the
//! importance vector computed at fit time.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ImportanceError, Result};

/// Flat numeric vector, stored dense or sparse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MlVector {
    Dense {
        values: Vec<f64>,
    },
    Sparse {
        size: usize,
        indices: Vec<usize>,
        values: Vec<f64>,
    },
}

impl MlVector {
    pub fn dense(values: Vec<f64>) -> Self {
        Self::Dense { values }
    }

    pub fn sparse(size: usize, indices: Vec<usize>, values: Vec<f64>) -> Self {
        Self::Sparse {
            size,
            indices,
            values,
        }
    }

    /// Logical length of the vector.
    pub fn len(&self) -> usize {
        match self {
            Self::Dense { values } => values.len(),
            Self::Sparse { size, .. } => *size,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Expand into a dense array of length [`len`](Self::len).
    ///
    /// A sparse vector must pair every index with a value, and every index must
    /// fall below `size`.
    pub fn to_array(&self) -> Result<Vec<f64>> {
        match self {
            Self::Dense { values } => Ok(values.clone()),
            Self::Sparse {
                size,
                indices,
                values,
            } => {
                if indices.len() != values.len() {
                    return Err(ImportanceError::invalid_input(format!(
                        "sparse vector has {} indices but {} values",
                        indices.len(),
                        values.len()
                    )));
                }
                let mut out = vec![0.0; *size];
                for (&i, &v) in indices.iter().zip(values) {
                    let slot = out.get_mut(i).ok_or_else(|| {
                        ImportanceError::invalid_input(format!(
                            "sparse index {i} out of bounds for size {size}"
                        ))
                    })?;
                    *slot = v;
                }
                Ok(out)
            }
        }
    }
}

/// Tag identifying the concrete model variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    GbtRegression,
    GbtClassification,
    RandomForestRegression,
    RandomForestClassification,
    DecisionTreeRegression,
    DecisionTreeClassification,
    LinearRegression,
    LogisticRegression,
    NaiveBayes,
}

impl ModelKind {
    /// Kinds that expose a feature importance vector.
    pub const SUPPORTED: [ModelKind; 6] = [
        ModelKind::GbtRegression,
        ModelKind::GbtClassification,
        ModelKind::RandomForestRegression,
        ModelKind::RandomForestClassification,
        ModelKind::DecisionTreeRegression,
        ModelKind::DecisionTreeClassification,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::GbtRegression => "GBTRegressionModel",
            Self::GbtClassification => "GBTClassificationModel",
            Self::RandomForestRegression => "RandomForestRegressionModel",
            Self::RandomForestClassification => "RandomForestClassificationModel",
            Self::DecisionTreeRegression => "DecisionTreeRegressionModel",
            Self::DecisionTreeClassification => "DecisionTreeClassificationModel",
            Self::LinearRegression => "LinearRegressionModel",
            Self::LogisticRegression => "LogisticRegressionModel",
            Self::NaiveBayes => "NaiveBayesModel",
        }
    }

    pub fn is_tree_based(&self) -> bool {
        Self::SUPPORTED.contains(self)
    }

    /// Comma-separated names of the supported kinds.
    pub fn supported_list() -> String {
        Self::SUPPORTED
            .iter()
            .map(|k| k.display_name())
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Payload shared by the single-tree and ensemble variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeModel {
    pub uid: String,
    #[serde(default = "default_features_col")]
    pub features_col: String,
    pub feature_importances: MlVector,
    /// Feature count the model was fit on, when known.
    #[serde(default)]
    pub num_features: Option<usize>,
}

impl TreeModel {
    pub fn new(
        uid: impl Into<String>,
        features_col: impl Into<String>,
        importances: MlVector,
    ) -> Self {
        Self {
            uid: uid.into(),
            features_col: features_col.into(),
            feature_importances: importances,
            num_features: None,
        }
    }

    pub fn with_num_features(mut self, num_features: usize) -> Self {
        self.num_features = Some(num_features);
        self
    }
}

/// Payload for the linear variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub uid: String,
    #[serde(default = "default_features_col")]
    pub features_col: String,
    #[serde(default)]
    pub coefficients: Vec<f64>,
    #[serde(default)]
    pub intercept: f64,
}

/// Payload for models that carry nothing beyond their inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlainModel {
    pub uid: String,
    #[serde(default = "default_features_col")]
    pub features_col: String,
}

fn default_features_col() -> String {
    "features".to_string()
}

/// A fitted prediction model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model_type", rename_all = "snake_case")]
pub enum PredictionModel {
    GbtRegression(TreeModel),
    GbtClassification(TreeModel),
    RandomForestRegression(TreeModel),
    RandomForestClassification(TreeModel),
    DecisionTreeRegression(TreeModel),
    DecisionTreeClassification(TreeModel),
    LinearRegression(LinearModel),
    LogisticRegression(LinearModel),
    NaiveBayes(PlainModel),
}

impl PredictionModel {
    /// Parse a model description from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn kind(&self) -> ModelKind {
        match self {
            Self::GbtRegression(_) => ModelKind::GbtRegression,
            Self::GbtClassification(_) => ModelKind::GbtClassification,
            Self::RandomForestRegression(_) => ModelKind::RandomForestRegression,
            Self::RandomForestClassification(_) => ModelKind::RandomForestClassification,
            Self::DecisionTreeRegression(_) => ModelKind::DecisionTreeRegression,
            Self::DecisionTreeClassification(_) => ModelKind::DecisionTreeClassification,
            Self::LinearRegression(_) => ModelKind::LinearRegression,
            Self::LogisticRegression(_) => ModelKind::LogisticRegression,
            Self::NaiveBayes(_) => ModelKind::NaiveBayes,
        }
    }

    pub fn uid(&self) -> &str {
        match self {
            Self::GbtRegression(m)
            | Self::GbtClassification(m)
            | Self::RandomForestRegression(m)
            | Self::RandomForestClassification(m)
            | Self::DecisionTreeRegression(m)
            | Self::DecisionTreeClassification(m) => &m.uid,
            Self::LinearRegression(m) | Self::LogisticRegression(m) => &m.uid,
            Self::NaiveBayes(m) => &m.uid,
        }
    }

    /// Feature count declared by a tree model.
    pub fn num_features(&self) -> Option<usize> {
        self.tree().and_then(|m| m.num_features)
    }

    fn tree(&self) -> Option<&TreeModel> {
        match self {
            Self::GbtRegression(m)
            | Self::GbtClassification(m)
            | Self::RandomForestRegression(m)
            | Self::RandomForestClassification(m)
            | Self::DecisionTreeRegression(m)
            | Self::DecisionTreeClassification(m) => Some(m),
            Self::LinearRegression(_) | Self::LogisticRegression(_) | Self::NaiveBayes(_) => None,
        }
    }
}

impl fmt::Display for PredictionModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(uid={})", self.kind(), self.uid())
    }
}

/// Capability set needed to resolve importances against a schema.
pub trait FeatureImportances {
    /// Dense importance vector indexed by feature slot.
    fn feature_importances(&self) -> Result<Vec<f64>>;

    /// Name of the feature-vector input column.
    fn features_col(&self) -> &str;
}

impl FeatureImportances for PredictionModel {
    fn feature_importances(&self) -> Result<Vec<f64>> {
        let tree = self
            .tree()
            .ok_or_else(|| ImportanceError::unsupported_model(self.to_string()))?;
        tree.feature_importances.to_array()
    }

    fn features_col(&self) -> &str {
        match self {
            Self::GbtRegression(m)
            | Self::GbtClassification(m)
            | Self::RandomForestRegression(m)
            | Self::RandomForestClassification(m)
            | Self::DecisionTreeRegression(m)
            | Self::DecisionTreeClassification(m) => &m.features_col,
            Self::LinearRegression(m) | Self::LogisticRegression(m) => &m.features_col,
            Self::NaiveBayes(m) => &m.features_col,
        }
    }
}
