use serde_json::Value;

use crate::{entity::entity, fetchable::Fetchable, Client, Error};

entity! {
    /// A legislative term and the sessions held during it.
    pub struct Term = "term" {
        start_year: scalar<i64>,
        end_year: scalar<i64>,
        name: scalar<String>,
        sessions: scalars<String>,
    }
}

entity! {
    /// State metadata: legislature naming, chamber terms and sessions.
    pub struct State = "state" {
        name: scalar<String>,
        abbreviation: scalar<String>,
        legislature_name: scalar<String>,
        upper_chamber_name: scalar<String>,
        lower_chamber_name: scalar<String>,
        /// Length of an upper chamber term in years.
        upper_chamber_term: scalar<Value>,
        /// Length of a lower chamber term in years.
        lower_chamber_term: scalar<Value>,
        upper_chamber_title: scalar<String>,
        lower_chamber_title: scalar<String>,
        level: scalar<String>,
        terms: nested_list<Term>,
        latest_update: timestamp,
    }
}

impl Fetchable for State {
    const COLLECTION: &'static str = "metadata";
}

impl Term {
    /// The term's name, e.g. `20092010`.
    pub async fn summary(&self) -> Result<String, Error> {
        Ok(self.name().await?.unwrap_or_default())
    }
}

impl State {
    /// The state's name.
    pub async fn summary(&self) -> Result<String, Error> {
        Ok(self.name().await?.unwrap_or_default())
    }

    /// Metadata for the state with the given two-letter abbreviation.
    pub fn get(client: &Client, abbrev: &str) -> Result<Self, Error> {
        Self::get_at(client, &[abbrev])
    }
}
