use crate::error::{AbiquoError, PaginationError, Result};
use crate::link::Links;
use crate::resources::disk::Disk;
use crate::rest::AbiquoClient;
use reqwest::header::ACCEPT;
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};

pub const VM_MEDIA_TYPE: &str = "application/vnd.abiquo.virtualmachine+json";

/// Relation from a virtual machine to its hard disks
pub const DISKS_REL: &str = "harddisks";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VirtualMachine {
    pub(crate) links: Links,
    pub id: i64,
    pub uuid: String,
    pub name: String,
    pub label: String,
    pub description: String,
    pub state: String,
    pub cpu: i64,
    pub ram: i64,
}

crate::impl_dto!(VirtualMachine);

impl VirtualMachine {
    /// Fetch the hard disks attached to this virtual machine
    pub fn get_disks(&self, client: &AbiquoClient) -> std::result::Result<Vec<Disk>, PaginationError<Disk>> {
        client.fetch_all_from_link(self, DISKS_REL)
    }
}

impl AbiquoClient {
    /// Fetch a virtual machine by its URL.
    ///
    /// A 404 answer is reported as [`AbiquoError::NotFound`].
    pub fn get_vm_by_url(&self, url: &str) -> Result<VirtualMachine> {
        let builder = self.request(Method::GET, url)?.header(ACCEPT, VM_MEDIA_TYPE);
        let response = self.send_unchecked(builder)?;
        if response.status == StatusCode::NOT_FOUND {
            return Err(AbiquoError::NotFound {
                url: url.to_string(),
            });
        }
        response.check()?.json()
    }
}
