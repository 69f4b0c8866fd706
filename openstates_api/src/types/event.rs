use crate::{
    entity::entity,
    fetchable::{Fetchable, Searchable},
    query::EventQuery,
    types::Source,
};

entity! {
    pub struct EventParticipant = "event participant" {
        /// `chair`, `host`, `participant`, ...
        kind: scalar<String> = "type",
        participant: scalar<String>,
        chamber: scalar<String>,
    }
}

entity! {
    /// A scheduled hearing, floor session or other legislative event.
    pub struct Event = "event" {
        id: scalar<String>,
        state: scalar<String>,
        session: scalar<String>,
        kind: scalar<String> = "type",
        description: scalar<String>,
        location: scalar<String>,
        link: scalar<String>,
        notes: scalar<String>,
        when: timestamp,
        end: timestamp,
        participants: nested_list<EventParticipant>,
        sources: nested_list<Source>,
        created_at: timestamp,
        updated_at: timestamp,
    }
}

impl Fetchable for Event {
    const COLLECTION: &'static str = "events";
}

impl Searchable for Event {
    type Params = EventQuery;
}
