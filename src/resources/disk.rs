use crate::error::Result;
use crate::link::Links;
use crate::resources::{is_false, is_zero};
use crate::rest::{require_link, AbiquoClient};
use serde::{Deserialize, Serialize};

/// A virtual machine hard disk
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Disk {
    #[serde(skip_serializing_if = "Links::is_empty")]
    pub(crate) links: Links,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub disk_controller: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub disk_controller_type: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub bus: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub unit: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub id: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub label: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub sequence: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub size_in_mb: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub uuid: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub allocation: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub path: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub disk_format_type: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub disk_file_size: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub hd_required: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub state: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub creation_date: String,
    #[serde(skip_serializing_if = "is_false")]
    pub bootable: bool,
}

crate::impl_dto!(Disk);

impl Disk {
    /// Save this disk through its `edit` link.
    ///
    /// The link's media type is used as both Accept and Content-Type.
    pub fn update(&self, client: &AbiquoClient) -> Result<()> {
        let edit = require_link(self, "edit")?;
        let body = serde_json::to_vec(self)?;
        client.put(&edit.href, &edit.media_type, body)?;
        Ok(())
    }
}
