use crate::error::PaginationError;
use crate::link::Links;
use crate::rest::AbiquoClient;
use serde::{Deserialize, Serialize};

pub const VDCS_MEDIA_TYPE: &str = "application/vnd.abiquo.virtualdatacenters+json";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VirtualDatacenter {
    pub(crate) links: Links,
    pub id: i64,
    pub name: String,
    pub hypervisor_type: String,
}

crate::impl_dto!(VirtualDatacenter);

impl AbiquoClient {
    /// Fetch all virtual datacenters visible to the current user.
    ///
    /// On failure the datacenters from the pages already read are kept in
    /// the error.
    pub fn get_vdcs(
        &self,
    ) -> std::result::Result<Vec<VirtualDatacenter>, PaginationError<VirtualDatacenter>> {
        self.fetch_all("cloud/virtualdatacenters", VDCS_MEDIA_TYPE)
    }
}
