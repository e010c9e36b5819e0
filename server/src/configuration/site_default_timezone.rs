use super::Configuration;

pub struct SiteDefaultTimezone;

impl Configuration for SiteDefaultTimezone {
    type Type = String;

    fn default() -> Option<Self::Type> {
        Some(String::from("Asia/Kolkata"))
    }

    fn key() -> &'static str {
        "site-default-timezone"
    }
}

impl SiteDefaultTimezone {
    pub fn get_for_chrono() -> Option<chrono_tz::Tz> {
        let name = Self::get()?;
        match name.parse() {
            Ok(timezone) => Some(timezone),
            Err(_) => {
                log::warn!("invalid time zone identifier '{}', using UTC offsets", name);
                None
            }
        }
    }
}
