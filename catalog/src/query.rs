use std::{collections::HashSet, path::Path};

use crate::{Article, CatalogError, Category};

/// How many related articles an article page shows.
pub const DEFAULT_RELATED_LIMIT: usize = 3;

/// An immutable, ordered collection of articles.
///
/// The order of the source data is the editorial order: newest first, with
/// the first article being the featured one. Nothing here sorts, and every
/// query scans the collection again. Once built a `Catalog` is never
/// modified, so a single instance can be shared between any number of
/// readers.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    articles: Vec<Article>,
}

impl Catalog {
    pub fn new(articles: Vec<Article>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(articles.len());
        for article in &articles {
            if !seen.insert(article.slug.as_str()) {
                return Err(CatalogError::DuplicateSlug(article.slug.clone()));
            }
        }

        Ok(Self { articles })
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let articles: Vec<Article> = serde_json::from_str(json)?;
        Self::new(articles)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json(&json)?;

        log::info!(
            "loaded {} articles from {}",
            catalog.len(),
            path.display()
        );

        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    pub fn all(&self) -> &[Article] {
        &self.articles
    }

    pub fn by_slug(&self, slug: &str) -> Option<&Article> {
        self.articles.iter().find(|article| article.slug == slug)
    }

    pub fn by_category(&self, category: Category) -> Vec<&Article> {
        self.articles
            .iter()
            .filter(|article| article.category == category)
            .collect()
    }

    /// Looks up a category by name. Names that aren't a known category
    /// match nothing.
    pub fn by_category_name(&self, name: &str) -> Vec<&Article> {
        match name.parse::<Category>() {
            Ok(category) => self.by_category(category),
            Err(_) => Vec::new(),
        }
    }

    /// The first article in catalog order, or `None` when the catalog is
    /// empty.
    pub fn featured(&self) -> Option<&Article> {
        self.articles.first()
    }

    pub fn latest(&self, limit: usize) -> &[Article] {
        &self.articles[..limit.min(self.articles.len())]
    }

    pub fn related(&self, exclude_slug: &str, category: Category, limit: usize) -> Vec<&Article> {
        self.articles
            .iter()
            .filter(|article| article.category == category && article.slug != exclude_slug)
            .take(limit)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::Catalog;
    use crate::{Article, CatalogError, Category};

    fn article(slug: &str, category: Category) -> Article {
        Article {
            id: format!("id-{}", slug),
            slug: slug.to_owned(),
            title: format!("Title {}", slug),
            summary: String::from("summary"),
            content: String::from("content"),
            image: format!("/images/{}.jpg", slug),
            date: String::from("2024-01-15T10:30:00Z"),
            category,
            author: String::from("Staff"),
            reading_time: String::from("3 min read"),
        }
    }

    fn scenario() -> Catalog {
        Catalog::new(vec![
            article("a", Category::Tech),
            article("b", Category::Tech),
            article("c", Category::Sports),
        ])
        .unwrap()
    }

    fn bundled() -> Catalog {
        Catalog::from_json(include_str!("../../data/news.json")).unwrap()
    }

    fn slugs<'a, I: IntoIterator<Item = &'a Article>>(articles: I) -> Vec<&'a str> {
        articles
            .into_iter()
            .map(|article| article.slug.as_str())
            .collect()
    }

    #[test]
    fn scenario_queries() {
        let catalog = scenario();
        assert_eq!(slugs(catalog.related("a", Category::Tech, 5)), vec!["b"]);
        assert_eq!(slugs(catalog.by_category(Category::Sports)), vec!["c"]);
        assert_eq!(slugs(catalog.latest(2)), vec!["a", "b"]);
        assert!(catalog.by_slug("z").is_none());
    }

    #[test]
    fn by_slug_finds_every_article() {
        let catalog = bundled();
        assert!(!catalog.is_empty());
        for article in catalog.all() {
            assert_eq!(catalog.by_slug(&article.slug), Some(article));
        }
    }

    #[test]
    fn by_slug_is_exact() {
        let catalog = scenario();
        assert!(catalog.by_slug("A").is_none());
        assert!(catalog.by_slug(" a").is_none());
        assert!(catalog.by_slug("").is_none());
    }

    #[test]
    fn by_category_preserves_order() {
        fn ids(catalog: &Catalog, category: Category) -> Vec<&str> {
            catalog
                .by_category(category)
                .into_iter()
                .map(|article| article.id.as_str())
                .collect()
        }

        let catalog = bundled();
        assert_eq!(ids(&catalog, Category::Politics), vec!["1", "7", "12"]);
        assert_eq!(ids(&catalog, Category::Sports), vec!["2", "9"]);
        assert_eq!(ids(&catalog, Category::Business), vec!["3", "8"]);
        assert_eq!(ids(&catalog, Category::Entertainment), vec!["6", "11"]);
        assert_eq!(ids(&catalog, Category::Tech), vec!["5", "10"]);
        assert_eq!(ids(&catalog, Category::Trending), vec!["4"]);
    }

    #[test]
    fn by_category_name() {
        let catalog = scenario();
        assert_eq!(slugs(catalog.by_category_name("tech")), vec!["a", "b"]);
        assert_eq!(slugs(catalog.by_category_name("Sports")), vec!["c"]);
        assert!(catalog.by_category_name("Weather").is_empty());
        assert!(catalog.by_category_name("Politics").is_empty());
    }

    #[test]
    fn featured_is_first() {
        let catalog = bundled();
        assert_eq!(catalog.featured(), catalog.all().first());
        assert_eq!(scenario().featured().map(|a| a.slug.as_str()), Some("a"));
        assert!(Catalog::default().featured().is_none());
    }

    #[test]
    fn latest_is_bounded() {
        let catalog = scenario();
        assert!(catalog.latest(0).is_empty());
        assert_eq!(slugs(catalog.latest(1)), vec!["a"]);
        assert_eq!(catalog.latest(3), catalog.all());
        assert_eq!(catalog.latest(100), catalog.all());
        assert!(Catalog::default().latest(5).is_empty());
    }

    #[test]
    fn related_excludes_current_article() {
        let catalog = bundled();
        for article in catalog.all() {
            for limit in 0..5 {
                let related = catalog.related(&article.slug, article.category, limit);
                assert!(related.len() <= limit);
                assert!(related.iter().all(|other| other.slug != article.slug));
                assert!(related
                    .iter()
                    .all(|other| other.category == article.category));
            }
        }
    }

    #[test]
    fn related_does_not_pad() {
        let catalog = scenario();
        assert!(catalog.related("c", Category::Sports, 3).is_empty());
        assert!(catalog.related("a", Category::Politics, 3).is_empty());
        assert!(catalog.related("a", Category::Tech, 0).is_empty());
        // A slug outside the category excludes nothing.
        assert_eq!(slugs(catalog.related("c", Category::Tech, 3)), vec!["a", "b"]);
    }

    #[test]
    fn rejects_duplicate_slugs() {
        let result = Catalog::new(vec![
            article("a", Category::Tech),
            article("a", Category::Sports),
        ]);
        match result {
            Err(CatalogError::DuplicateSlug(slug)) => assert_eq!(slug, "a"),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn from_json_reads_camel_case_fields() {
        let catalog = Catalog::from_json(
            r#"[{
                "id": "1",
                "slug": "budget",
                "title": "Budget",
                "summary": "Summary",
                "content": "Body",
                "image": "/images/budget.jpg",
                "date": "2024-02-01T09:00:00Z",
                "category": "Business",
                "author": "Desk",
                "readingTime": "4 min read"
            }]"#,
        )
        .unwrap();
        let article = catalog.by_slug("budget").unwrap();
        assert_eq!(article.reading_time, "4 min read");
        assert_eq!(article.category, Category::Business);
    }

    #[test]
    fn from_json_rejects_unknown_categories() {
        let result = Catalog::from_json(
            r#"[{"id":"1","slug":"x","title":"","summary":"","content":"","image":"",
                "date":"","category":"Weather","author":"","readingTime":""}]"#,
        );
        assert!(matches!(result, Err(CatalogError::Json(_))));
    }

    #[test]
    fn load_reports_missing_files() {
        match Catalog::load("does/not/exist.json") {
            Err(CatalogError::Io { path, .. }) => {
                assert_eq!(path, std::path::Path::new("does/not/exist.json"))
            }
            other => panic!("unexpected result {:?}", other),
        }
    }
}
