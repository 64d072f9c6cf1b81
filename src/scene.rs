//! Display metadata for handing solids to an external viewer or exporter.
//!
//! Name and color are opaque hints with no geometric meaning; `reference`
//! marks visualization-only geometry (the grinder itself) that is not meant
//! to be fabricated.

use crate::solid::Solid;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartMeta {
    pub name: String,
    pub color: String,
    pub reference: bool,
}

impl PartMeta {
    /// A part to be fabricated.
    pub fn solid(name: &str, color: &str) -> Self {
        PartMeta {
            name: name.to_string(),
            color: color.to_string(),
            reference: false,
        }
    }

    /// Visualization-only reference geometry.
    pub fn reference(name: &str, color: &str) -> Self {
        PartMeta {
            name: name.to_string(),
            color: color.to_string(),
            reference: true,
        }
    }
}

/// A solid carrying its display metadata — the unit of the output contract.
pub type Part = Solid<PartMeta>;
