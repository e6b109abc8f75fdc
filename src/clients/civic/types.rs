//! Response payloads of the Google Civic Information API.
//!
//! Every optional key decodes to `None` or an empty list; a key holding the
//! wrong JSON type fails the decode.

use serde::{Deserialize, Deserializer};
use serde_aux::field_attributes::deserialize_string_from_number;

/// Body of `GET /elections`.
#[derive(Debug, Clone, Deserialize)]
pub struct ElectionsResponse {
    pub elections: Vec<ElectionPayload>,
}

/// One entry of the `elections` array.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElectionPayload {
    /// Sent as a string by the API, accepted as a number too.
    #[serde(default, deserialize_with = "deserialize_string_from_number")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub election_day: Option<String>,
    #[serde(default)]
    pub ocd_division_id: Option<String>,
}

/// Body of `GET /voterinfo` for one address and election.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoterInfoResponse {
    #[serde(default)]
    pub contests: Vec<ContestPayload>,
    #[serde(default)]
    pub early_vote_sites: Vec<PollingLocationPayload>,
    #[serde(default)]
    pub drop_off_locations: Vec<PollingLocationPayload>,
    #[serde(default)]
    pub polling_locations: Vec<PollingLocationPayload>,
}

/// A ballot entry: either an office race or, when `type` is
/// `"Referendum"`, a ballot measure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContestPayload {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub office: Option<String>,
    #[serde(default)]
    pub ballot_title: Option<String>,
    #[serde(default)]
    pub candidates: Vec<CandidatePayload>,
    #[serde(default)]
    pub sources: Vec<SourcePayload>,
    #[serde(default)]
    pub referendum_title: Option<String>,
    #[serde(default)]
    pub referendum_subtitle: Option<String>,
    #[serde(default)]
    pub referendum_url: Option<String>,
    #[serde(default)]
    pub district: Option<DistrictPayload>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidatePayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub party: Option<String>,
    #[serde(default)]
    pub candidate_url: Option<String>,
    #[serde(default)]
    pub channels: Vec<ChannelPayload>,
}

/// Social media channel, e.g. `{"type": "Twitter", "id": "handle"}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChannelPayload {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourcePayload {
    #[serde(default)]
    pub name: Option<String>,
    /// Some feeds send `"true"` instead of `true`.
    #[serde(default, deserialize_with = "deserialize_official_flag")]
    pub official: bool,
}

fn deserialize_official_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => b,
        Flag::Text(s) => s.trim().eq_ignore_ascii_case("true"),
    })
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DistrictPayload {
    #[serde(default)]
    pub id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollingLocationPayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<AddressPayload>,
    #[serde(default)]
    pub polling_hours: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub sources: Vec<SourcePayload>,
}

/// Multi-line postal address as sent by the API.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressPayload {
    #[serde(default)]
    pub location_name: Option<String>,
    #[serde(default)]
    pub line1: Option<String>,
    #[serde(default)]
    pub line2: Option<String>,
    #[serde(default)]
    pub line3: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub zip: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_election_id_accepts_string_or_number() {
        let body = r#"{"elections": [
            {"id": "2000", "name": "VIP Test Election"},
            {"id": 4953, "name": "Texas Runoff"}
        ]}"#;
        let response: ElectionsResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.elections[0].id, "2000");
        assert_eq!(response.elections[1].id, "4953");
    }

    #[test]
    fn test_voter_info_optional_arrays_default_empty() {
        let response: VoterInfoResponse = serde_json::from_str("{}").unwrap();
        assert!(response.contests.is_empty());
        assert!(response.early_vote_sites.is_empty());
        assert!(response.drop_off_locations.is_empty());
        assert!(response.polling_locations.is_empty());
    }

    #[test]
    fn test_type_mismatch_fails_decode() {
        let body = r#"{"contests": [{"office": {"name": "Governor"}}]}"#;
        assert!(serde_json::from_str::<VoterInfoResponse>(body).is_err());
    }

    #[test]
    fn test_official_flag_accepts_string() {
        let source: SourcePayload =
            serde_json::from_str(r#"{"name": "sourceOne", "official": "true"}"#).unwrap();
        assert!(source.official);
    }
}
