//! Polling station record, embedded inside its election.

use serde::{Deserialize, Serialize};

use crate::clients::civic::{AddressPayload, PollingLocationPayload};

/// Which voter-info array a station was listed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocationType {
    #[serde(rename = "earlyVoteSites")]
    EarlyVoteSite,
    #[serde(rename = "dropOffLocations")]
    DropOffLocation,
    #[serde(rename = "pollingLocations")]
    PollingLocation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollingStation {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub polling_hours: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    pub location_type: LocationType,
    /// Names of the official sources that list this station.
    #[serde(default)]
    pub sources: Vec<String>,
}

impl PollingStation {
    pub fn from_payload(payload: &PollingLocationPayload, location_type: LocationType) -> Self {
        Self {
            name: payload.name.clone().unwrap_or_default(),
            address: payload
                .address
                .as_ref()
                .map(flatten_address)
                .unwrap_or_default(),
            polling_hours: payload.polling_hours.clone().unwrap_or_default(),
            start_date: payload.start_date.clone().unwrap_or_default(),
            end_date: payload.end_date.clone().unwrap_or_default(),
            location_type,
            sources: payload
                .sources
                .iter()
                .filter(|source| source.official)
                .filter_map(|source| source.name.clone())
                .collect(),
        }
    }
}

/// Join the non-blank address parts with single spaces, in the fixed order
/// location name, line 1-3, city, state, zip.
pub fn flatten_address(address: &AddressPayload) -> String {
    [
        &address.location_name,
        &address.line1,
        &address.line2,
        &address.line3,
        &address.city,
        &address.state,
        &address.zip,
    ]
    .into_iter()
    .filter_map(|part| part.as_deref())
    .map(str::trim)
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join(" ")
}
