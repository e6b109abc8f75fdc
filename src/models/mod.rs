//! Domain records of the gVote backend.
//!
//! Each record maps from its provider payload and to/from its stored document.
//! Nothing in this module performs I/O.

mod candidate;
mod contest;
mod deadline;
mod document;
mod election;
mod polling_station;
#[allow(dead_code)]
mod proposition;
mod referendum;
mod state;

pub use candidate::*;
pub use contest::*;
pub use deadline::*;
pub use document::{Document, MappingError, StoredEntity};
pub use election::*;
pub use polling_station::*;
#[allow(unused_imports)]
pub use proposition::*;
pub use referendum::*;
pub use state::*;

use crate::clients::civic::SourcePayload;

/// Comma-join the names of a payload's sources.
fn join_source_names(sources: &[SourcePayload]) -> String {
    sources
        .iter()
        .filter_map(|source| source.name.as_deref())
        .filter(|name| !name.trim().is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}
