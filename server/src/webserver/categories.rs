use std::collections::HashMap;

use catalog::{Article, Catalog, Category};
use rocket::State;
use rocket_dyn_templates::{tera, tera::Value, Template};
use serde::Serialize;

use super::{localization::UserLanguage, Failure, RequestData};

/// Colour of the badge shown next to articles in `category`. Matches the
/// `badge-*` classes in `site.css`.
pub fn badge_color(category: Category) -> &'static str {
    match category {
        Category::Politics => "blue",
        Category::Sports => "green",
        Category::Business => "purple",
        Category::Entertainment => "pink",
        Category::Tech => "cyan",
        Category::Trending => "orange",
    }
}

fn category_value(value: &Value) -> tera::Result<Category> {
    let name = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("category must be a string"))?;
    name.parse()
        .map_err(|_| tera::Error::msg(format!("unknown category '{}'", name)))
}

pub struct CategorySlug;

impl tera::Filter for CategorySlug {
    fn filter(&self, value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
        Ok(Value::from(category_value(value)?.slug()))
    }
}

pub struct CategoryColor;

impl tera::Filter for CategoryColor {
    fn filter(&self, value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
        Ok(Value::from(badge_color(category_value(value)?)))
    }
}

/// Every category name, in navigation order.
pub struct CategoryNames;

impl tera::Function for CategoryNames {
    fn call(&self, _args: &HashMap<String, Value>) -> tera::Result<Value> {
        Ok(Value::Array(
            Category::ALL
                .iter()
                .map(|category| Value::from(category.name()))
                .collect(),
        ))
    }
}

#[derive(Serialize)]
struct CategoryContext<'a> {
    request: RequestData,
    category: Category,
    articles: Vec<&'a Article>,
}

#[get("/category/<name>")]
pub fn category(
    name: &str,
    catalog: &State<Catalog>,
    language: UserLanguage,
) -> Result<Template, Failure> {
    // An unknown name is a missing page, not an empty listing, so this
    // can't go through `Catalog::by_category_name`.
    let category = name
        .parse::<Category>()
        .map_err(|_| Failure::not_found())?;

    Ok(Template::render(
        "category",
        CategoryContext {
            request: RequestData::new(language),
            category,
            articles: catalog.by_category(category),
        },
    ))
}
