use url::Url;

use super::{
    common::{append, append_opt, Filters},
    Query,
};

/// Filters for the `events` search endpoint.
#[derive(Clone, Debug, Default)]
pub struct EventQuery {
    pub common: Filters,
    pub states: Vec<String>,
    pub event_type: Option<String>,
}

impl Query for EventQuery {
    fn get_common(&mut self) -> &mut Filters {
        &mut self.common
    }
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        for state in self.states.iter() {
            append(&mut url, "state", state);
        }
        append_opt(&mut url, "type", self.event_type.as_deref());
        self.common.add_to_url(&url)
    }
}

impl EventQuery {
    pub fn with_state(mut self, state: &str) -> Self {
        self.states.push(state.to_string());
        self
    }

    /// Event type such as `committee:meeting` or `bill:action`.
    pub fn with_event_type(mut self, event_type: &str) -> Self {
        self.event_type = Some(event_type.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use url::Url;

    use crate::query::{EventQuery, Query};

    #[test]
    fn test_event_query() {
        let url = Url::parse("https://example.com/").unwrap();

        insta::assert_snapshot!(EventQuery::default()
            .with_state("tx")
            .with_event_type("committee:meeting")
            .add_to_url(&url)
            .to_string(), @"https://example.com/?state=tx&type=committee%3Ameeting");
    }
}
