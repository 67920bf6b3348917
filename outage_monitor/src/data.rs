use serde::{Deserialize, Serialize};
use shared_kernel::warsaw_date_time::WarsawTZDateTime;

pub type OutageId = i64;

/// Administrative names of an affected address, as published by the outage API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Teryt {
    pub voivodeship_name: Option<String>,
    pub county_name: Option<String>,
    pub commune_name: Option<String>,
    pub city_name: Option<String>,
    pub street_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub numbers: Option<String>,
    pub teryt: Option<Teryt>,
}

impl Address {
    pub fn city_name(&self) -> Option<&str> {
        self.teryt.as_ref()?.city_name.as_deref()
    }
}

/// A raw outage record. Kept verbatim, including the timestamp strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outage {
    pub id: OutageId,
    pub region_name: Option<String>,
    pub description: Option<String>,
    pub start_at: String,
    pub stop_at: String,
    #[serde(default)]
    pub revoked: bool,
    pub addresses: Option<Vec<Address>>,
}

impl Outage {
    pub fn addresses(&self) -> &[Address] {
        self.addresses.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayOutage {
    pub id: OutageId,
    pub region: Option<String>,
    pub description: Option<String>,
    pub start_at: String,
    pub start_at_relative: String,
    pub stop_at: String,
    pub stop_at_relative: String,
    pub total_duration: String,
    pub revoked: bool,
    pub affected_addresses: Vec<String>,
}

/// Outage status of the monitored place at `checked_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutageStatus {
    pub has_outage: bool,
    pub outages: Vec<DisplayOutage>,
    pub checked_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredOutage {
    pub id: OutageId,
    pub start_at: String,
    pub stop_at: String,
}

impl From<&DisplayOutage> for StoredOutage {
    fn from(outage: &DisplayOutage) -> Self {
        Self {
            id: outage.id,
            start_at: outage.start_at.clone(),
            stop_at: outage.stop_at.clone(),
        }
    }
}

/// The last known status of a place. Always written as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedStatus {
    pub has_outage: bool,
    pub outages: Vec<StoredOutage>,
    pub last_checked: String,
}

impl PersistedStatus {
    pub fn from_resolved(status: &OutageStatus, last_checked: &WarsawTZDateTime) -> Self {
        Self {
            has_outage: status.has_outage,
            outages: status.outages.iter().map(StoredOutage::from).collect(),
            last_checked: last_checked.to_utc_rfc3339(),
        }
    }
}
