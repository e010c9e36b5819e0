use chrono::{DateTime, Datelike, FixedOffset};
use fluent_templates::{
    fluent_bundle::{types::FluentNumber, FluentValue},
    Loader,
};
use rocket::{
    request::{FromRequest, Outcome},
    Request,
};
use rocket_dyn_templates::tera;
use std::{borrow::Cow, collections::HashMap, str::FromStr};
use tera::Value;
use unic_langid::LanguageIdentifier;

use crate::configuration::{ConfigurationManager, SiteDefaultTimezone, SitePrimaryLocale};

fluent_templates::static_loader! {
    pub static LOCALES = {
        locales: "../strings",
        fallback_language: "en-US",
        customise: |bundle| bundle.set_use_isolating(false),
    };
}

fn language_argument(args: &HashMap<String, Value>) -> tera::Result<LanguageIdentifier> {
    let language = args
        .get("language")
        .ok_or_else(|| tera::Error::msg("language parameter required"))?
        .as_str()
        .ok_or_else(|| tera::Error::msg("language must be a string"))?;
    parse_language(language)
}

fn parse_language(language: &str) -> tera::Result<LanguageIdentifier> {
    LanguageIdentifier::from_str(language)
        .map_err(|_| tera::Error::msg(format!("invalid language code '{}'", language)))
}

pub struct Localize;

impl tera::Function for Localize {
    fn call(&self, args: &HashMap<String, Value>) -> tera::Result<Value> {
        let key = args
            .get("key")
            .ok_or_else(|| tera::Error::msg("key parameter required"))?
            .as_str()
            .ok_or_else(|| tera::Error::msg("key must be a string"))?;
        let lang = language_argument(args)?;

        let mut fluent_args = HashMap::new();
        for (name, value) in args {
            if name == "language" || name == "key" {
                continue;
            }

            let value = match value {
                Value::Number(number) => FluentValue::Number(FluentNumber::new(
                    number.as_f64().unwrap_or_default(),
                    Default::default(),
                )),
                Value::String(string) => FluentValue::String(Cow::Owned(string.clone())),
                other => FluentValue::String(Cow::Owned(other.to_string())),
            };

            fluent_args.insert(name.clone(), value);
        }

        let message = LOCALES
            .lookup_with_args(&lang, key, &fluent_args)
            .unwrap_or_else(|| {
                log::warn!("no message for key '{}' in {}", key, lang);
                key.to_string()
            });

        Ok(Value::String(message))
    }
}

pub struct LanguageCode;

impl tera::Filter for LanguageCode {
    fn filter(
        &self,
        language_identifier: &Value,
        _: &HashMap<String, Value>,
    ) -> tera::Result<Value> {
        let lang = parse_language(
            language_identifier
                .as_str()
                .ok_or_else(|| tera::Error::msg("language must be a string"))?,
        )?;

        Ok(Value::from(lang.language.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DateStyle {
    /// Numeric day, month and year.
    Short,
    /// Day, spelled-out month and year.
    Long,
}

/// Formats an article timestamp for `lang`, in the site's time zone.
/// Strings that aren't a recognizable date, or that `lang` has no date
/// pattern for, are returned unchanged.
pub fn format_date(raw: &str, lang: &LanguageIdentifier, style: DateStyle) -> String {
    catalog::parse_date(raw)
        .and_then(|date| format_parsed_date(date, lang, style))
        .unwrap_or_else(|| raw.to_string())
}

fn format_parsed_date(
    date: DateTime<FixedOffset>,
    lang: &LanguageIdentifier,
    style: DateStyle,
) -> Option<String> {
    let local = match SiteDefaultTimezone::get_for_chrono() {
        Some(timezone) => date.with_timezone(&timezone).naive_local(),
        None => date.naive_local(),
    };

    let (key, month) = match style {
        DateStyle::Short => ("date-short", local.month().to_string()),
        DateStyle::Long => (
            "date-long",
            LOCALES.lookup(lang, &format!("month-{}", local.month()))?,
        ),
    };

    let mut args = HashMap::new();
    args.insert(
        String::from("day"),
        FluentValue::String(Cow::Owned(local.day().to_string())),
    );
    args.insert(String::from("month"), FluentValue::String(Cow::Owned(month)));
    args.insert(
        String::from("year"),
        FluentValue::String(Cow::Owned(local.year().to_string())),
    );

    LOCALES.lookup_with_args(lang, key, &args)
}

pub struct LocalizedDate;

impl tera::Filter for LocalizedDate {
    fn filter(&self, value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
        let raw = value
            .as_str()
            .ok_or_else(|| tera::Error::msg("localized_date needs a string"))?;
        let lang = language_argument(args)?;
        let style = match args.get("style").and_then(Value::as_str) {
            None | Some("short") => DateStyle::Short,
            Some("long") => DateStyle::Long,
            Some(other) => {
                return Err(tera::Error::msg(format!("unknown date style '{}'", other)))
            }
        };

        Ok(Value::String(format_date(raw, &lang, style)))
    }
}

#[derive(Debug)]
pub struct UserLanguage(pub String);

impl UserLanguage {
    pub fn for_request(request: &Request<'_>) -> Self {
        let default_locale = ConfigurationManager::shared()
            .get::<SitePrimaryLocale>()
            .unwrap_or_else(|| String::from("en-US"));
        let best_language = pick_best_language(
            &default_locale,
            request.headers().get_one("Accept-Language"),
            &LOCALES.locales().cloned().collect::<Vec<_>>(),
        );

        UserLanguage(best_language)
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for UserLanguage {
    type Error = std::convert::Infallible;

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        Outcome::Success(UserLanguage::for_request(request))
    }
}

#[derive(Debug, PartialEq)]
struct AcceptableLanguage {
    code: String,
    weight: f32,
}

fn parse_accept_language_header(header: &str) -> Vec<AcceptableLanguage> {
    let mut languages = Vec::new();
    for possible_language in header.split(',') {
        let possible_language = possible_language.trim();
        let mut parts = possible_language.split(";q=");
        if let Some(code) = parts.next() {
            let qfactor = if let Some(qfactor) = parts.next() {
                qfactor.parse::<f32>().unwrap_or_default()
            } else {
                1f32
            };
            languages.push(AcceptableLanguage {
                code: code.to_string(),
                weight: qfactor,
            })
        }
    }
    languages
}

fn pick_best_language(
    default_code: &str,
    accept_language_header: Option<&str>,
    available_locales: &[LanguageIdentifier],
) -> String {
    let mut best_language = None;
    let mut best_language_weight = 0f32;

    if let Some(accept_language_header) = accept_language_header {
        for language in parse_accept_language_header(accept_language_header) {
            if language.weight > best_language_weight {
                let language_identifier = match LanguageIdentifier::from_str(&language.code) {
                    Ok(identifier) => identifier,
                    Err(_) => continue,
                };
                for supported_locale in available_locales.iter() {
                    if language_identifier.matches(supported_locale, true, false) {
                        best_language_weight = language.weight;
                        best_language = Some(supported_locale.to_string());
                        break;
                    }
                }
            }
        }
    }

    best_language.unwrap_or_else(|| default_code.to_string())
}
