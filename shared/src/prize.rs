use serde::{Deserialize, Serialize};

/// One segment on a wheel, board or card grid: what the prize is and how
/// many times it may ever be awarded within one pool lifetime.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PrizeDefinition {
    /// Stable index, equal to the entry's position in its catalog.
    pub id: usize,
    pub label: String,
    /// Display value as decimal text, precision preserved ("787.5", "114.125").
    pub value: String,
    pub capacity: u32,
}

#[derive(Debug, PartialEq, Eq)]
pub enum CatalogError {
    /// An entry's id does not match its position in the catalog.
    IdMismatch { position: usize, id: usize },
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::IdMismatch { position, id } => {
                write!(f, "catalog entry at position {} carries id {}", position, id)
            }
        }
    }
}

impl std::error::Error for CatalogError {}

/// Ordered, immutable list of prize definitions. Validated once at load;
/// a bad catalog is a configuration defect and fails fast here rather
/// than producing a corrupt pool later.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<PrizeDefinition>,
}

impl Catalog {
    pub fn new(entries: Vec<PrizeDefinition>) -> Result<Self, CatalogError> {
        for (position, entry) in entries.iter().enumerate() {
            if entry.id != position {
                return Err(CatalogError::IdMismatch {
                    position,
                    id: entry.id,
                });
            }
        }
        Ok(Self { entries })
    }

    /// Builds a catalog from `(label, value, capacity)` rows, assigning ids
    /// from row positions. Cannot produce an invalid catalog.
    pub fn from_rows(rows: &[(&str, &str, u32)]) -> Self {
        let entries = rows
            .iter()
            .enumerate()
            .map(|(id, (label, value, capacity))| PrizeDefinition {
                id,
                label: label.to_string(),
                value: value.to_string(),
                capacity: *capacity,
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[PrizeDefinition] {
        &self.entries
    }

    pub fn get(&self, id: usize) -> Option<&PrizeDefinition> {
        self.entries.get(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Length of the draw pool this catalog expands into.
    pub fn total_capacity(&self) -> usize {
        self.entries.iter().map(|e| e.capacity as usize).sum()
    }
}
