// ⚠️ Catalog Errors - raised once, while the constant table is validated
// After a successful load nothing in the catalog can fail.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("duplicate pokemon id {0}")]
    DuplicateId(u32),

    #[error("pokemon #{id:03} ({name}) has no categories")]
    EmptyCategories { id: u32, name: String },

    #[error("evolution chain {chain} is empty")]
    EmptyChain { chain: usize },

    #[error("evolution chain {chain} references unknown pokemon id {id}")]
    UnknownChainMember { chain: usize, id: u32 },

    #[error("category \"{label}\" has no color mapping")]
    UnmappedCategory { label: String },

    #[error("pokemon #{id:03} evolution link \"{label}\" does not name a catalog entry")]
    DanglingEvolution { id: u32, label: String },
}
