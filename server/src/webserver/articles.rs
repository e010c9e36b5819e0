use catalog::{Article, Catalog, Category, DEFAULT_RELATED_LIMIT};
use rocket::{Request, State};
use rocket_dyn_templates::Template;
use serde::Serialize;
use serde_json::json;

use super::{localization::UserLanguage, Failure, RequestData};
use crate::configuration::{Configuration, SiteName};

/// Articles the home page pulls from the top of the catalog.
const HOME_LATEST_LIMIT: usize = 8;
/// Positions within the latest articles shown beside the featured article.
const TOP_NEWS_SIDE: (usize, usize) = (1, 4);
/// Positions within the latest articles shown in the sidebar.
const SIDEBAR: (usize, usize) = (4, 8);
const CATEGORY_SECTION_LIMIT: usize = 3;

fn window(articles: &[Article], (start, end): (usize, usize)) -> &[Article] {
    let end = end.min(articles.len());
    &articles[start.min(end)..end]
}

#[derive(Serialize)]
struct CategorySection<'a> {
    category: Category,
    articles: Vec<&'a Article>,
}

#[derive(Serialize)]
struct HomeContext<'a> {
    request: RequestData,
    featured: Option<&'a Article>,
    side_articles: &'a [Article],
    sidebar_articles: &'a [Article],
    sections: Vec<CategorySection<'a>>,
}

fn category_sections(catalog: &Catalog) -> Vec<CategorySection<'_>> {
    Category::ALL
        .iter()
        .filter_map(|&category| {
            let mut articles = catalog.by_category(category);
            if articles.is_empty() {
                None
            } else {
                articles.truncate(CATEGORY_SECTION_LIMIT);
                Some(CategorySection { category, articles })
            }
        })
        .collect()
}

#[get("/")]
pub fn home(catalog: &State<Catalog>, language: UserLanguage) -> Template {
    let latest = catalog.latest(HOME_LATEST_LIMIT);

    Template::render(
        "home",
        HomeContext {
            request: RequestData::new(language),
            featured: catalog.featured(),
            side_articles: window(latest, TOP_NEWS_SIDE),
            sidebar_articles: window(latest, SIDEBAR),
            sections: category_sections(catalog),
        },
    )
}

#[derive(Serialize)]
struct ArticleContext<'a> {
    request: RequestData,
    article: &'a Article,
    permalink: String,
    related: Vec<&'a Article>,
    json_ld: String,
}

/// `NewsArticle` structured data for search engines, ready to be embedded in
/// a `<script>` element.
fn structured_data(article: &Article) -> serde_json::Result<String> {
    let site_name = SiteName::get().unwrap_or_default();
    let data = json!({
        "@context": "https://schema.org",
        "@type": "NewsArticle",
        "url": article.permalink(),
        "headline": article.title,
        "description": article.summary,
        "image": article.image,
        "datePublished": article.date,
        "author": {
            "@type": "Person",
            "name": article.author,
        },
        "publisher": {
            "@type": "Organization",
            "name": site_name,
            "logo": {
                "@type": "ImageObject",
                "url": "/static/logo.png",
            },
        },
    });

    // A literal "</" would end the script element early.
    Ok(serde_json::to_string(&data)?.replace("</", "<\\/"))
}

#[get("/news/<slug>")]
pub fn article_by_slug(
    slug: &str,
    catalog: &State<Catalog>,
    language: UserLanguage,
) -> Result<Template, Failure> {
    let article = catalog.by_slug(slug).ok_or_else(Failure::not_found)?;
    let related = catalog.related(&article.slug, article.category, DEFAULT_RELATED_LIMIT);

    Ok(Template::render(
        "article",
        ArticleContext {
            request: RequestData::new(language),
            article,
            permalink: article.permalink(),
            related,
            json_ld: structured_data(article)?,
        },
    ))
}

#[derive(Serialize)]
struct NotFoundContext {
    request: RequestData,
}

#[catch(404)]
pub fn not_found(request: &Request<'_>) -> Template {
    Template::render(
        "not_found",
        NotFoundContext {
            request: RequestData::for_request(request),
        },
    )
}
