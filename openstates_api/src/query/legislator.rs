use url::Url;

use crate::types::Chamber;

use super::{
    common::{append, append_opt, Filters},
    Query,
};

/// Filters for the `legislators` search endpoint.
#[derive(Clone, Debug, Default)]
pub struct LegislatorQuery {
    pub common: Filters,
    pub states: Vec<String>,
    pub chamber: Option<Chamber>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub party: Option<String>,
    pub district: Option<String>,
    pub active: Option<bool>,
}

impl Query for LegislatorQuery {
    fn get_common(&mut self) -> &mut Filters {
        &mut self.common
    }
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        for state in self.states.iter() {
            append(&mut url, "state", state);
        }
        if let Some(chamber) = self.chamber {
            append(&mut url, "chamber", chamber.to_string().as_str());
        }
        append_opt(&mut url, "first_name", self.first_name.as_deref());
        append_opt(&mut url, "last_name", self.last_name.as_deref());
        append_opt(&mut url, "party", self.party.as_deref());
        append_opt(&mut url, "district", self.district.as_deref());
        if let Some(active) = self.active {
            append(&mut url, "active", if active { "true" } else { "false" });
        }
        self.common.add_to_url(&url)
    }
}

impl LegislatorQuery {
    pub fn with_state(mut self, state: &str) -> Self {
        self.states.push(state.to_string());
        self
    }
    pub fn with_states(mut self, states: &[&str]) -> Self {
        self.states.extend(states.iter().map(|s| s.to_string()));
        self
    }

    pub fn with_chamber(mut self, chamber: Chamber) -> Self {
        self.chamber = Some(chamber);
        self
    }

    pub fn with_first_name(mut self, first_name: &str) -> Self {
        self.first_name = Some(first_name.to_string());
        self
    }

    pub fn with_last_name(mut self, last_name: &str) -> Self {
        self.last_name = Some(last_name.to_string());
        self
    }

    pub fn with_party(mut self, party: &str) -> Self {
        self.party = Some(party.to_string());
        self
    }

    pub fn with_district(mut self, district: &str) -> Self {
        self.district = Some(district.to_string());
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }
}

/// Point lookup for the `legislators/geo` endpoint.
#[derive(Clone, Debug, Default)]
pub struct GeoQuery {
    pub common: Filters,
    pub lat: f64,
    pub long: f64,
}

impl GeoQuery {
    pub fn new(lat: f64, long: f64) -> Self {
        Self {
            common: Filters::default(),
            lat,
            long,
        }
    }
}

impl Query for GeoQuery {
    fn get_common(&mut self) -> &mut Filters {
        &mut self.common
    }
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        url.query_pairs_mut()
            .append_pair("lat", &self.lat.to_string())
            .append_pair("long", &self.long.to_string());
        self.common.add_to_url(&url)
    }
}
