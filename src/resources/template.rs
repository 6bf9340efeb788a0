use crate::link::Links;
use serde::{Deserialize, Serialize};

pub const TEMPLATES_MEDIA_TYPE: &str = "application/vnd.abiquo.virtualmachinetemplates+json";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VirtualMachineTemplate {
    pub(crate) links: Links,
    pub id: i64,
    pub name: String,
    pub description: String,
    pub disk_format_type: String,
    pub disk_file_size: i64,
    pub cpu_required: i64,
    pub ram_required: i64,
    pub state: String,
    pub creation_date: String,
}

crate::impl_dto!(VirtualMachineTemplate);
