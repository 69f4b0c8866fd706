//! The entity catalog: one schema per API object kind.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

mod source;
pub use self::source::Source;

mod state;
pub use self::state::{State, Term};

mod bill;
pub use self::bill::{Action, Bill, Document, Sponsor, SpecificVote, Version, Vote};

mod legislator;
pub use self::legislator::{Legislator, Role};

mod committee;
pub use self::committee::{Committee, CommitteeMember};

mod event;
pub use self::event::{Event, EventParticipant};

/// Renders a loosely typed scalar such as a district (`"15"` or `15`).
pub fn value_text(value: Option<Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s,
        Some(other) => other.to_string(),
    }
}

/// Legislative chamber as used in paths and filters.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Chamber {
    /// Senate in most states.
    #[serde(rename = "upper")]
    Upper,

    /// House or Assembly in most states.
    #[serde(rename = "lower")]
    Lower,

    /// Joint committees of both chambers.
    #[serde(rename = "joint")]
    Joint,
}
impl std::fmt::Display for Chamber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Chamber::Upper => "upper",
                Chamber::Lower => "lower",
                Chamber::Joint => "joint",
            }
        )
    }
}
impl FromStr for Chamber {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upper" => Ok(Chamber::Upper),
            "lower" => Ok(Chamber::Lower),
            "joint" => Ok(Chamber::Joint),
            _ => Err(()),
        }
    }
}
