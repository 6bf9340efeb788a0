use crate::error::{AbiquoError, PaginationError, Result};
use crate::link::Links;
use crate::rest::AbiquoClient;
use serde::{Deserialize, Serialize};

pub const SYSTEM_PROPERTIES_MEDIA_TYPE: &str = "application/vnd.abiquo.systemproperties+json";

/// A platform configuration property
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigProperty {
    pub(crate) links: Links,
    pub id: i64,
    pub name: String,
    pub value: String,
    pub description: String,
}

crate::impl_dto!(ConfigProperty);

impl AbiquoClient {
    /// Fetch all configuration properties, keeping the ones already read on failure
    pub fn get_config_properties(
        &self,
    ) -> std::result::Result<Vec<ConfigProperty>, PaginationError<ConfigProperty>> {
        self.fetch_all("config/properties", SYSTEM_PROPERTIES_MEDIA_TYPE)
    }

    /// Fetch a configuration property by name
    pub fn get_config_property(&self, name: &str) -> Result<ConfigProperty> {
        self.get_config_properties()
            .map_err(AbiquoError::from)?
            .into_iter()
            .find(|p| p.name == name)
            .ok_or_else(|| AbiquoError::PropertyNotFound(name.to_string()))
    }
}
