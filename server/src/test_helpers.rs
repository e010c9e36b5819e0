use catalog::{Article, Catalog, Category};
use rocket::{figment::Figment, local::blocking::Client};

use crate::webserver::rocket_server;

pub fn article(slug: &str, title: &str, category: Category) -> Article {
    Article {
        id: format!("test-{}", slug),
        slug: slug.to_owned(),
        title: title.to_owned(),
        summary: format!("Summary of {}.", slug),
        content: format!("Body of {}.", slug),
        image: format!("/static/images/{}.jpg", slug),
        date: String::from("2024-01-14T09:00:00+05:30"),
        category,
        author: String::from("Test Desk"),
        reading_time: String::from("2 min read"),
    }
}

/// A small catalog in editorial order. Sports has more articles than a home
/// page section shows, and Trending has a single article with nothing related.
pub fn test_catalog() -> Catalog {
    Catalog::new(vec![
        article("budget-session-opens", "Budget session opens", Category::Politics),
        article("cup-final-tonight", "Cup final tonight", Category::Sports),
        article("markets-close-higher", "Markets close higher", Category::Business),
        article("chip-plant-approved", "Chip plant approved", Category::Tech),
        article("film-awards-announced", "Film awards announced", Category::Entertainment),
        article("new-phone-launch", "New phone launch", Category::Tech),
        article("rain-alert-issued", "Rain alert issued", Category::Trending),
        article("coalition-talks-continue", "Coalition talks continue", Category::Politics),
        article("league-season-starts", "League season starts", Category::Sports),
        article("test-match-drawn", "Test match drawn", Category::Sports),
        article("transfer-window-opens", "Transfer window opens", Category::Sports),
    ])
    .expect("test catalog slugs are unique")
}

pub fn client_with(catalog: Catalog) -> Client {
    let figment = Figment::from(rocket::Config::debug_default()).merge(("log_level", "off"));
    Client::tracked(rocket_server(figment, catalog)).expect("valid rocket instance")
}

pub fn client() -> Client {
    client_with(test_catalog())
}
