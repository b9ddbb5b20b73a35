//! Storefront domain: catalog queries, site settings, measurements and the admin session.
pub mod aggregates;
pub mod events;
pub mod settings;
pub mod silhouette;
pub mod value_objects;
