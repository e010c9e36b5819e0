use super::Configuration;

/// Location of the article dataset, relative to the site root.
pub struct CatalogPath;

impl Configuration for CatalogPath {
    type Type = String;

    fn default() -> Option<Self::Type> {
        Some(String::from("data/news.json"))
    }

    fn key() -> &'static str {
        "catalog-path"
    }
}
