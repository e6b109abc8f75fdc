//! Ballot aggregation for one voter-info lookup.
//!
//! The whole response is mapped first, so a malformed payload writes nothing.
//! Candidates are then stored before their contest, and contests and
//! referendums before the election that references them.

use crate::clients::civic::VoterInfoResponse;
use crate::clients::WeVoteApiClient;
use crate::db::Repository;
use crate::errors::AppError;
use crate::models::{
    Candidate, Contest, Election, LocationType, MappingError, PollingStation, Referendum,
};

/// A contest with its candidates, not yet stored.
#[derive(Debug, Clone)]
pub struct ContestDraft {
    pub contest: Contest,
    pub candidates: Vec<Candidate>,
}

/// Every record produced by one voter-info response.
#[derive(Debug, Clone, Default)]
pub struct BallotDraft {
    pub contests: Vec<ContestDraft>,
    pub referendums: Vec<Referendum>,
    pub polling_stations: Vec<PollingStation>,
}

impl BallotDraft {
    pub fn from_voter_info(response: &VoterInfoResponse) -> Result<Self, MappingError> {
        let mut draft = BallotDraft::default();

        for payload in &response.contests {
            if Referendum::is_referendum(payload) {
                draft.referendums.push(Referendum::from_payload(payload)?);
                continue;
            }

            let candidates = payload
                .candidates
                .iter()
                .map(Candidate::from_payload)
                .collect::<Result<Vec<_>, _>>()?;
            draft.contests.push(ContestDraft {
                contest: Contest::from_payload(payload)?,
                candidates,
            });
        }

        let station_lists = [
            (&response.early_vote_sites, LocationType::EarlyVoteSite),
            (&response.drop_off_locations, LocationType::DropOffLocation),
            (&response.polling_locations, LocationType::PollingLocation),
        ];
        for (payloads, location_type) in station_lists {
            draft.polling_stations.extend(
                payloads
                    .iter()
                    .map(|payload| PollingStation::from_payload(payload, location_type)),
            );
        }

        Ok(draft)
    }

    /// Fill in candidate platform descriptions. Lookups that fail leave the
    /// description empty.
    pub async fn enrich_candidates(&mut self, wevote: &dyn WeVoteApiClient) {
        for draft in &mut self.contests {
            for candidate in &mut draft.candidates {
                match wevote.platform_description(&candidate.name).await {
                    Ok(description) => candidate.platform_description = description,
                    Err(e) => {
                        tracing::warn!(
                            candidate = %candidate.name,
                            error = %e,
                            "Could not retrieve platform description"
                        );
                    }
                }
            }
        }
    }
}

/// Persist a drafted ballot and attach it to `election`, which must already
/// be stored. Returns the updated election.
pub async fn record_ballot(
    repo: &Repository,
    mut election: Election,
    draft: BallotDraft,
) -> Result<Election, AppError> {
    let election_key = election.key.ok_or_else(|| {
        AppError::Internal(format!("Election {} has no store key", election.id))
    })?;

    let mut contest_keys = Vec::with_capacity(draft.contests.len());
    for ContestDraft {
        contest,
        candidates,
    } in draft.contests
    {
        let mut candidate_keys = Vec::with_capacity(candidates.len());
        for candidate in &candidates {
            candidate_keys.push(repo.insert(candidate).await?);
        }
        contest_keys.push(repo.insert(&contest.with_candidates(candidate_keys)).await?);
    }

    let mut referendum_keys = Vec::with_capacity(draft.referendums.len());
    for referendum in &draft.referendums {
        referendum_keys.push(repo.insert(referendum).await?);
    }

    tracing::info!(
        election = %election.id,
        contests = contest_keys.len(),
        referendums = referendum_keys.len(),
        polling_stations = draft.polling_stations.len(),
        "Recorded ballot"
    );

    election.extend_ballot(contest_keys, referendum_keys, draft.polling_stations);
    repo.save(election_key, &election).await?;

    Ok(election)
}
