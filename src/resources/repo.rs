use crate::error::PaginationError;
use crate::link::Links;
use crate::resources::template::VirtualMachineTemplate;
use crate::rest::AbiquoClient;
use serde::{Deserialize, Serialize};

/// Relation from a repository to its templates collection
pub const TEMPLATES_REL: &str = "virtualmachinetemplates";

/// A datacenter template repository
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Repo {
    pub(crate) links: Links,
    pub name: String,
    pub repository_location: String,
}

crate::impl_dto!(Repo);

impl Repo {
    /// Fetch every template stored in this repository
    pub fn get_templates(
        &self,
        client: &AbiquoClient,
    ) -> Result<Vec<VirtualMachineTemplate>, PaginationError<VirtualMachineTemplate>> {
        client.fetch_all_from_link(self, TEMPLATES_REL)
    }
}
