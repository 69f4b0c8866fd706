use url::Url;

use crate::types::Chamber;

use super::{
    common::{append, append_opt, Filters},
    Query,
};

/// Filters for the `committees` search endpoint.
#[derive(Clone, Debug, Default)]
pub struct CommitteeQuery {
    pub common: Filters,
    pub states: Vec<String>,
    pub chamber: Option<Chamber>,
    pub committee: Option<String>,
    pub subcommittee: Option<String>,
}

impl Query for CommitteeQuery {
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
        append_opt(&mut url, "committee", self.committee.as_deref());
        append_opt(&mut url, "subcommittee", self.subcommittee.as_deref());
        self.common.add_to_url(&url)
    }
}

impl CommitteeQuery {
    pub fn with_state(mut self, state: &str) -> Self {
        self.states.push(state.to_string());
        self
    }

    pub fn with_chamber(mut self, chamber: Chamber) -> Self {
        self.chamber = Some(chamber);
        self
    }

    pub fn with_committee(mut self, committee: &str) -> Self {
        self.committee = Some(committee.to_string());
        self
    }

    pub fn with_subcommittee(mut self, subcommittee: &str) -> Self {
        self.subcommittee = Some(subcommittee.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use url::Url;

    use crate::{
        query::{CommitteeQuery, Query},
        types::Chamber,
    };

    #[test]
    fn test_committee_query() {
        let url = Url::parse("https://example.com/").unwrap();

        insta::assert_snapshot!(CommitteeQuery::default()
            .with_state("ca")
            .add_to_url(&url)
            .to_string(), @"https://example.com/?state=ca");

        insta::assert_snapshot!(CommitteeQuery::default()
            .with_state("ca")
            .with_chamber(Chamber::Joint)
            .with_committee("Budget")
            .with_subcommittee("Education")
            .add_to_url(&url)
            .to_string(), @"https://example.com/?state=ca&chamber=joint&committee=Budget&subcommittee=Education");
    }
}
