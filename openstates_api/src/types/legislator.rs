use serde_json::Value;

use crate::{
    entity::entity,
    fetchable::{search_at, Fetchable, Searchable},
    query::{GeoQuery, LegislatorQuery},
    types::{value_text, Source},
    Client, Error,
};

entity! {
    /// A position a legislator holds: a seat in a chamber or a committee
    /// membership.
    pub struct Role = "role" {
        state: scalar<String>,
        /// `member` or `committee member`.
        kind: scalar<String> = "type",
        /// Position held, e.g. `chair` on a committee role.
        role: scalar<String>,
        session: scalar<String>,
        term: scalar<String>,
        chamber: scalar<String>,
        district: scalar<Value>,
        committee: scalar<String>,
        party: scalar<String>,
        contact_info: mappings,
        start_date: timestamp,
        end_date: timestamp,
    }
}

entity! {
    pub struct Legislator = "legislator" {
        leg_id: scalar<String>,
        full_name: scalar<String>,
        first_name: scalar<String>,
        last_name: scalar<String>,
        middle_name: scalar<String>,
        suffix: scalar<String>,
        /// Newer payloads carry `suffixes` instead of `suffix`.
        suffixes: scalar<String>,
        party: scalar<String>,
        state: scalar<String>,
        chamber: scalar<String>,
        district: scalar<Value>,
        active: scalar<bool>,
        photo_url: scalar<String>,
        votesmart_id: scalar<Value>,
        transparencydata_id: scalar<String>,
        roles: nested_list<Role>,
        sources: nested_list<Source>,
        created_at: timestamp,
        updated_at: timestamp,
    }
}

impl Fetchable for Legislator {
    const COLLECTION: &'static str = "legislators";
}

impl Searchable for Legislator {
    type Params = LegislatorQuery;
}

impl Role {
    /// `state chamber session district N`.
    pub async fn summary(&self) -> Result<String, Error> {
        Ok(format!(
            "{} {} {} district {}",
            self.state().await?.unwrap_or_default(),
            self.chamber().await?.unwrap_or_default(),
            self.session().await?.unwrap_or_default(),
            value_text(self.district().await?)
        ))
    }
}

impl Legislator {
    /// The legislator's full name.
    pub async fn summary(&self) -> Result<String, Error> {
        Ok(self.full_name().await?.unwrap_or_default())
    }

    /// A specific legislator by Open States ID (e.g. `TXL000139`).
    pub fn get(client: &Client, id: &str) -> Result<Self, Error> {
        Self::get_at(client, &[id])
    }

    /// All state legislators whose districts contain the given point.
    pub async fn geo(client: &Client, lat: f64, long: f64) -> Result<Vec<Self>, Error> {
        search_at::<Self, _>(client, &[Self::COLLECTION, "geo"], &GeoQuery::new(lat, long)).await
    }
}
