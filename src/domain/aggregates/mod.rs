//! Aggregates module
pub mod product;
pub mod order;
pub mod session;

pub use product::{category_label, CatalogQuery, PriceRange, ProductCard, SortKey};
pub use order::ConsultationRequest;
pub use session::{AdminSession, FileTokenStore, MemoryTokenStore, TokenStore};
