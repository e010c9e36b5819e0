mod catalog_path;
mod site_default_timezone;
mod site_name;
mod site_primary_locale;

pub use self::{
    catalog_path::CatalogPath, site_default_timezone::SiteDefaultTimezone, site_name::SiteName,
    site_primary_locale::SitePrimaryLocale,
};

use once_cell::sync::OnceCell;
use rocket::figment::Figment;
use serde::{de::DeserializeOwned, Serialize};
use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

/// The table in `Rocket.toml` holding site settings.
const SITE_TABLE: &str = "site";

pub trait Configuration {
    type Type: Serialize + DeserializeOwned;

    fn default() -> Option<Self::Type>;
    fn key() -> &'static str;

    fn get() -> Option<Self::Type>
    where
        Self: Sized,
    {
        ConfigurationManager::shared().get::<Self>()
    }
}

static SHARED_MANAGER: OnceCell<ConfigurationManager> = OnceCell::new();

#[derive(Clone, Debug)]
pub struct ConfigurationManager {
    active_configuration: Arc<RwLock<HashMap<String, serde_json::Value>>>,
}

impl ConfigurationManager {
    pub fn shared() -> Self {
        SHARED_MANAGER
            .get_or_init(|| {
                let active_configuration = Arc::new(RwLock::new(HashMap::new()));

                Self {
                    active_configuration,
                }
            })
            .clone()
    }

    pub fn get<T: Configuration>(&self) -> Option<T::Type> {
        let configuration = self.active_configuration.read().ok()?;
        configuration
            .get(T::key())
            .and_then(|v| serde_json::value::from_value(v.clone()).ok())
            .or_else(T::default)
    }

    /// Replaces the active settings with the `site` table of `figment`.
    /// A missing table leaves every setting at its default.
    pub fn load(&self, figment: &Figment) -> anyhow::Result<usize> {
        let values = match figment.extract_inner::<HashMap<String, serde_json::Value>>(SITE_TABLE)
        {
            Ok(values) => values,
            Err(error) if error.missing() => HashMap::new(),
            Err(error) => return Err(error.into()),
        };

        let loaded = values.len();
        let mut configuration = self
            .active_configuration
            .write()
            .map_err(|_| anyhow::anyhow!("configuration lock poisoned"))?;
        *configuration = values;

        Ok(loaded)
    }
}
