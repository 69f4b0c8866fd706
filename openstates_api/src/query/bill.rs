use chrono::NaiveDate;
use url::Url;

use crate::types::Chamber;

use super::{
    common::{append, append_opt, Filters},
    Query,
};

/// Filters for the `bills` search endpoint.
#[derive(Clone, Debug, Default)]
pub struct BillQuery {
    pub common: Filters,
    pub query: Option<String>,
    pub states: Vec<String>,
    pub chamber: Option<Chamber>,
    pub session: Option<String>,
    pub subjects: Vec<String>,
    pub search_window: Option<String>,
    pub sponsor_id: Option<String>,
    pub bill_type: Option<String>,
    pub updated_since: Option<NaiveDate>,
}

impl Query for BillQuery {
    fn get_common(&mut self) -> &mut Filters {
        &mut self.common
    }
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        append_opt(&mut url, "q", self.query.as_deref());
        for state in self.states.iter() {
            append(&mut url, "state", state);
        }
        if let Some(chamber) = self.chamber {
            append(&mut url, "chamber", chamber.to_string().as_str());
        }
        append_opt(&mut url, "session", self.session.as_deref());
        for subject in self.subjects.iter() {
            append(&mut url, "subject", subject);
        }
        append_opt(&mut url, "search_window", self.search_window.as_deref());
        append_opt(&mut url, "sponsor_id", self.sponsor_id.as_deref());
        append_opt(&mut url, "type", self.bill_type.as_deref());
        if let Some(updated_since) = self.updated_since {
            append(
                &mut url,
                "updated_since",
                updated_since.format("%Y-%m-%d").to_string().as_str(),
            );
        }
        self.common.add_to_url(&url)
    }
}

impl BillQuery {
    /// Free-text search over bill titles.
    pub fn with_query(mut self, query: &str) -> Self {
        self.query = Some(query.to_string());
        self
    }

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

    pub fn with_session(mut self, session: &str) -> Self {
        self.session = Some(session.to_string());
        self
    }

    pub fn with_subject(mut self, subject: &str) -> Self {
        self.subjects.push(subject.to_string());
        self
    }

    /// Restricts results to a time window such as `session`, `term` or `all`.
    pub fn with_search_window(mut self, window: &str) -> Self {
        self.search_window = Some(window.to_string());
        self
    }

    pub fn with_sponsor_id(mut self, sponsor_id: &str) -> Self {
        self.sponsor_id = Some(sponsor_id.to_string());
        self
    }

    pub fn with_bill_type(mut self, bill_type: &str) -> Self {
        self.bill_type = Some(bill_type.to_string());
        self
    }

    pub fn with_updated_since(mut self, date: NaiveDate) -> Self {
        self.updated_since = Some(date);
        self
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use url::Url;

    use crate::{
        query::{BillQuery, Query},
        types::Chamber,
    };

    #[test]
    fn test_bill_query() {
        let url = Url::parse("https://example.com/").unwrap();

        insta::assert_snapshot!(BillQuery::default().add_to_url(&url).to_string(), @"https://example.com/");

        insta::assert_snapshot!(BillQuery::default()
            .with_query("agriculture")
            .add_to_url(&url)
            .to_string(), @"https://example.com/?q=agriculture");

        insta::assert_snapshot!(BillQuery::default()
            .with_query("agriculture")
            .with_states(&["ca", "ny"])
            .with_chamber(Chamber::Upper)
            .add_to_url(&url)
            .to_string(), @"https://example.com/?q=agriculture&state=ca&state=ny&chamber=upper");

        insta::assert_snapshot!(BillQuery::default()
            .with_state("tx")
            .with_session("81")
            .with_subject("Education")
            .with_subject("Health")
            .with_search_window("session")
            .with_sponsor_id("TXL000139")
            .with_bill_type("resolution")
            .with_updated_since(NaiveDate::from_ymd_opt(2010, 7, 1).unwrap())
            .add_to_url(&url)
            .to_string(), @"https://example.com/?state=tx&session=81&subject=Education&subject=Health&search_window=session&sponsor_id=TXL000139&type=resolution&updated_since=2010-07-01");

        insta::assert_snapshot!(BillQuery::default()
            .with_query("")
            .with_filter("status", "passed_upper")
            .add_to_url(&url)
            .to_string(), @"https://example.com/?status=passed_upper");
    }
}
