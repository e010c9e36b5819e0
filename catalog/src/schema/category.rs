use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::CatalogError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Politics,
    Sports,
    Business,
    Entertainment,
    Tech,
    Trending,
}

impl Category {
    /// Every category, in navigation order.
    pub const ALL: [Category; 6] = [
        Category::Politics,
        Category::Sports,
        Category::Business,
        Category::Entertainment,
        Category::Tech,
        Category::Trending,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Category::Politics => "Politics",
            Category::Sports => "Sports",
            Category::Business => "Business",
            Category::Entertainment => "Entertainment",
            Category::Tech => "Tech",
            Category::Trending => "Trending",
        }
    }

    /// Lowercase form used for anchors and URL segments.
    pub fn slug(self) -> &'static str {
        match self {
            Category::Politics => "politics",
            Category::Sports => "sports",
            Category::Business => "business",
            Category::Entertainment => "entertainment",
            Category::Tech => "tech",
            Category::Trending => "trending",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Category::ALL
            .iter()
            .copied()
            .find(|category| category.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| CatalogError::UnknownCategory(s.to_owned()))
    }
}
