//! Attribute metadata written by feature assembly (`ml_attr.attrs`).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{ImportanceError, Result};
use crate::schema::{Metadata, StructField};

/// Metadata key holding the attribute group of a vector column.
pub const ML_ATTR: &str = "ml_attr";
/// Key under [`ML_ATTR`] holding the per-family attribute lists.
pub const ATTRS: &str = "attrs";
/// Key under [`ML_ATTR`] holding the declared slot count.
pub const NUM_ATTRS: &str = "num_attrs";

/// How a source column was encoded into vector slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeFamily {
    Nominal,
    Numeric,
    Binary,
}

impl AttributeFamily {
    /// Families in the order they are merged. Later entries win on index collision.
    pub const MERGE_ORDER: [AttributeFamily; 3] = [
        AttributeFamily::Nominal,
        AttributeFamily::Numeric,
        AttributeFamily::Binary,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Self::Nominal => "nominal",
            Self::Numeric => "numeric",
            Self::Binary => "binary",
        }
    }
}

/// Slot index to column name lookup built from a vector column's metadata.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeTable {
    names: HashMap<usize, String>,
    num_attrs: Option<usize>,
    collisions: usize,
}

impl AttributeTable {
    /// Build the table from `ml_attr.attrs` of `field`.
    pub fn from_field(field: &StructField) -> Result<Self> {
        let ml_attr = field.metadata.get_metadata(ML_ATTR).ok_or_else(|| {
            ImportanceError::missing_metadata(&field.name, format!("no '{ML_ATTR}' object"))
        })?;
        let attrs = ml_attr.get_metadata(ATTRS).ok_or_else(|| {
            ImportanceError::missing_metadata(&field.name, format!("no '{ML_ATTR}.{ATTRS}' object"))
        })?;

        let mut table = Self::from_attrs(&field.name, &attrs)?;
        table.num_attrs = ml_attr
            .get_long(NUM_ATTRS)
            .and_then(|n| usize::try_from(n).ok());
        Ok(table)
    }

    fn from_attrs(column: &str, attrs: &Metadata) -> Result<Self> {
        let mut table = Self::default();
        let mut owner: HashMap<usize, AttributeFamily> = HashMap::new();

        for family in AttributeFamily::MERGE_ORDER {
            let Some(entries) = attrs.get_metadata_array(family.key()) else {
                continue;
            };
            for entry in entries {
                let idx = entry
                    .get_long("idx")
                    .and_then(|i| usize::try_from(i).ok())
                    .ok_or_else(|| {
                        ImportanceError::missing_metadata(
                            column,
                            format!("'{}' attribute without a valid 'idx'", family.key()),
                        )
                    })?;
                if let Some(previous) = owner.insert(idx, family) {
                    if previous != family {
                        table.collisions += 1;
                        tracing::warn!(
                            column,
                            idx,
                            previous = previous.key(),
                            family = family.key(),
                            "Attribute index claimed by more than one family; keeping the later one"
                        );
                    }
                }
                match entry.get_string("name") {
                    Some(name) => {
                        table.names.insert(idx, name.to_string());
                    }
                    None => {
                        // A nameless later entry still owns the slot.
                        tracing::debug!(column, idx, family = family.key(), "Attribute has no name");
                        table.names.remove(&idx);
                    }
                }
            }
        }

        Ok(table)
    }

    pub fn get(&self, idx: usize) -> Option<&str> {
        self.names.get(&idx).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Slot count declared by the metadata, if any.
    pub fn num_attrs(&self) -> Option<usize> {
        self.num_attrs
    }

    /// Number of indices overwritten by a later family.
    pub fn collisions(&self) -> usize {
        self.collisions
    }
}
