use std::{
    collections::HashMap,
    env,
    marker::PhantomData,
    path::{Path, PathBuf},
};

use catalog::Catalog;
use rocket::{
    figment::Figment,
    fs::FileServer,
    http::Status,
    Build, Request, Rocket,
};
use rocket_dyn_templates::{tera, tera::Value, Template};
use serde::{Deserialize, Serialize};

use localization::UserLanguage;

use crate::configuration::{CatalogPath, Configuration, ConfigurationManager, SiteName};

mod articles;
mod categories;
mod localization;

/// The workspace root, which holds `templates/`, `static/` and the dataset.
fn root_path() -> PathBuf {
    match env::var("CARGO_MANIFEST_DIR") {
        Ok(value) => {
            let path = PathBuf::from(value);
            path.parent().map(Path::to_path_buf).unwrap_or(path)
        }
        Err(_) => env::current_dir().unwrap_or_default(),
    }
}

pub fn rocket_server(figment: Figment, catalog: Catalog) -> Rocket<Build> {
    let root_path = root_path();
    let figment = figment.merge(("template_dir", root_path.join("templates")));

    rocket::custom(figment)
        .attach(Template::custom(|engines| {
            engines
                .tera
                .register_filter("paragraphs", ParagraphsFilter);
            engines
                .tera
                .register_filter("language_code", localization::LanguageCode);
            engines
                .tera
                .register_filter("localized_date", localization::LocalizedDate);
            engines
                .tera
                .register_filter("category_slug", categories::CategorySlug);
            engines
                .tera
                .register_filter("category_color", categories::CategoryColor);
            engines
                .tera
                .register_function("localize", localization::Localize);
            engines
                .tera
                .register_function("categories", categories::CategoryNames);
            engines
                .tera
                .register_function("site_name", TeraConfiguration::<SiteName>::default());
        }))
        .manage(catalog)
        .mount(
            "/",
            routes![
                articles::home,
                articles::article_by_slug,
                categories::category,
            ],
        )
        .mount("/static", FileServer::from(root_path.join("static")))
        .register("/", catchers![articles::not_found])
}

pub async fn main() -> anyhow::Result<()> {
    let figment = rocket::Config::figment();
    let overrides = ConfigurationManager::shared().load(&figment)?;
    log::info!("loaded {} site configuration overrides", overrides);

    let catalog_path = CatalogPath::get()
        .ok_or_else(|| anyhow::anyhow!("no catalog path configured"))?;
    let catalog = Catalog::load(root_path().join(catalog_path))?;
    if catalog.is_empty() {
        log::warn!("the article catalog is empty");
    }

    rocket_server(figment, catalog).launch().await?;

    Ok(())
}

pub struct TeraConfiguration<T> {
    _phantom: PhantomData<T>,
}

impl<T> Default for TeraConfiguration<T> {
    fn default() -> Self {
        Self {
            _phantom: Default::default(),
        }
    }
}

impl<T> tera::Function for TeraConfiguration<T>
where
    T: Configuration + Send + Sync,
    T::Type: ToString,
{
    fn call(&self, _args: &HashMap<String, tera::Value>) -> tera::Result<tera::Value> {
        let value = T::get().ok_or_else(|| tera::Error::msg("no value found"))?;
        Ok(tera::Value::String(value.to_string()))
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RequestData {
    pub language: String,
}

impl RequestData {
    pub fn new(language: UserLanguage) -> Self {
        Self {
            language: language.0,
        }
    }

    pub fn for_request(request: &Request<'_>) -> Self {
        Self::new(UserLanguage::for_request(request))
    }
}

/// Renders plain article text as HTML paragraphs. Blank lines separate
/// paragraphs and single newlines become line breaks. Everything else is
/// escaped and shown as written.
fn paragraphs_to_html(text: &str) -> String {
    let text = text.replace("\r\n", "\n");
    let mut html = String::new();
    for paragraph in text.split("\n\n") {
        let paragraph = paragraph.trim();
        if paragraph.is_empty() {
            continue;
        }

        let lines = paragraph
            .lines()
            .map(|line| tera::escape_html(line.trim()))
            .collect::<Vec<_>>();
        html += "<p>";
        html += &lines.join("<br>\n");
        html += "</p>\n";
    }
    html
}

struct ParagraphsFilter;

impl tera::Filter for ParagraphsFilter {
    fn filter(&self, text: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
        let text = text.as_str().ok_or_else(|| {
            tera::Error::msg("Value passed to paragraphs filter needs to be a string")
        })?;
        Ok(Value::String(paragraphs_to_html(text)))
    }

    fn is_safe(&self) -> bool {
        true
    }
}

#[derive(Responder)]
pub enum Failure {
    Status(Status),
}

impl<E> From<E> for Failure
where
    E: std::error::Error,
{
    fn from(error: E) -> Self {
        log::error!("error processing request: {:?}", error);

        Failure::Status(Status::InternalServerError)
    }
}

impl Failure {
    pub fn not_found() -> Self {
        Self::Status(Status::NotFound)
    }
}
