pub mod catalogs;
pub mod constants;
pub mod prize;

pub use catalogs::GameKind;
pub use constants::SESSION_TTL_MS;
pub use prize::{Catalog, CatalogError, PrizeDefinition};
