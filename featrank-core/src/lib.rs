//! # featrank-core — named, ranked feature importances for tree models
//!
//! Tree models (gradient-boosted trees, random forests, single decision trees)
//! report feature importances as a bare vector indexed by feature slot. The names
//! of those slots live in the `ml_attr` metadata of the assembled feature column.
//! This crate joins the two and returns one [`ImportanceRecord`] per slot, ranked
//! by descending score.
//!
//! ```ignore
//! use featrank_core::{ImportanceResolver, PredictionModel, SortOrder, StructType};
//!
//! let model = PredictionModel::from_json(&model_json)?;
//! let schema = StructType::from_json(&schema_json)?;
//! let records = ImportanceResolver::builder()
//!     .model(&model)
//!     .schema(&schema)
//!     .sort(SortOrder::Descending)
//!     .build()?
//!     .resolve()?;
//! ```

pub mod attribute;
pub mod config;
pub mod error;
pub mod model;
pub mod record;
pub mod report;
pub mod resolver;
pub mod schema;

// Re-exports
pub use attribute::{AttributeFamily, AttributeTable};
pub use config::{ResolverConfig, SortOrder, load_config};
pub use error::{ImportanceError, Result};
pub use model::{
    FeatureImportances, LinearModel, MlVector, ModelKind, PlainModel, PredictionModel, TreeModel,
};
pub use record::ImportanceRecord;
pub use report::ImportanceReport;
pub use resolver::{ImportanceResolver, ImportanceResolverBuilder};
pub use schema::{Metadata, StructField, StructType};
