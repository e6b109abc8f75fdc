//! Voter deadline as published by FVAP.

use serde::{Deserialize, Serialize};

/// One deadline, keyed the way the FVAP feed names its elements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Deadline {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub election_type: String,
    #[serde(default)]
    pub rule: String,
    #[serde(default)]
    pub voting_request_type: String,
}
