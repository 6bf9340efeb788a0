use crate::error::PaginationError;
use crate::link::Links;
use crate::rest::AbiquoClient;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const EVENTS_MEDIA_TYPE: &str = "application/vnd.abiquo.events+json";

/// An audit event
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Event {
    pub(crate) links: Links,
    pub id: i64,
    pub action_performed: String,
    pub component: String,
    pub datacenter: String,
    pub enterprise: String,
    pub id_datacenter: i64,
    pub id_enterprise: i64,
    pub id_network: i64,
    pub id_physical_machine: i64,
    pub id_rack: i64,
    pub id_storage_pool: String,
    pub id_storage_system: i64,
    pub id_subnet: i64,
    pub id_user: i64,
    pub id_virtual_app: i64,
    pub id_virtual_datacenter: i64,
    pub id_virtual_machine: i64,
    pub id_volume: String,
    pub network: String,
    pub performed_by: String,
    pub physical_machine: String,
    pub rack: String,
    pub severity: String,
    pub stacktrace: String,
    pub storage_pool: String,
    pub storage_system: String,
    pub subnet: String,
    pub timestamp: String,
    pub user: String,
    pub virtual_app: String,
    pub virtual_datacenter: String,
    pub virtual_machine: String,
    pub volume: String,
}

crate::impl_dto!(Event);

impl AbiquoClient {
    /// Fetch all events matching the given filters.
    ///
    /// Filters are sent as query parameters on the first page only; the
    /// `next` links already carry them afterwards.
    pub fn get_events(
        &self,
        params: &HashMap<String, String>,
    ) -> Result<Vec<Event>, PaginationError<Event>> {
        let mut query: Vec<(&str, &str)> = params
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        query.sort();
        self.fetch_all_with("events", EVENTS_MEDIA_TYPE, &query)
    }
}
