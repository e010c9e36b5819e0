//! The article catalog: a fixed, read-only collection of news articles loaded
//! once at startup, and the queries the site's pages are built from.

mod error;
mod query;
pub mod schema;

pub use self::{
    error::CatalogError,
    query::{Catalog, DEFAULT_RELATED_LIMIT},
    schema::{parse_date, Article, Category},
};
