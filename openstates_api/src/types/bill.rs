use crate::{
    entity::entity,
    fetchable::{Fetchable, Searchable},
    query::BillQuery,
    types::Source,
    Client, Error,
};

entity! {
    /// One step in a bill's history.
    pub struct Action = "action" {
        date: timestamp,
        actor: scalar<String>,
        action: scalar<String>,
        /// Normalized action categories, e.g. `bill:introduced`.
        kind: scalars<String> = "type",
    }
}

entity! {
    pub struct Sponsor = "sponsor" {
        leg_id: scalar<String>,
        name: scalar<String>,
        /// `primary` or `cosponsor`.
        kind: scalar<String> = "type",
        chamber: scalar<String>,
    }
}

entity! {
    /// A single legislator's position in a roll call.
    pub struct SpecificVote = "specific vote" {
        leg_id: scalar<String>,
        name: scalar<String>,
    }
}

entity! {
    /// A roll call on a motion.
    pub struct Vote = "vote" {
        date: timestamp,
        chamber: scalar<String>,
        committee: scalar<String>,
        motion: scalar<String>,
        yes_count: scalar<i64>,
        no_count: scalar<i64>,
        other_count: scalar<i64>,
        passed: scalar<bool>,
        kind: scalar<String> = "type",
        yes_votes: nested_list<SpecificVote>,
        no_votes: nested_list<SpecificVote>,
        other_votes: nested_list<SpecificVote>,
        sources: nested_list<Source>,
    }
}

entity! {
    /// A version of the bill text.
    pub struct Version = "version" {
        url: scalar<String>,
        name: scalar<String>,
        retrieved: timestamp,
    }
}

entity! {
    /// A supporting document such as a fiscal note.
    pub struct Document = "document" {
        url: scalar<String>,
        name: scalar<String>,
        retrieved: timestamp,
    }
}

entity! {
    /// A bill or resolution with its full history.
    pub struct Bill = "bill" {
        title: scalar<String>,
        state: scalar<String>,
        session: scalar<String>,
        chamber: scalar<String>,
        bill_id: scalar<String>,
        kind: scalars<String> = "type",
        subjects: scalars<String>,
        alternate_titles: scalars<String>,
        actions: nested_list<Action>,
        sponsors: nested_list<Sponsor>,
        votes: nested_list<Vote>,
        versions: nested_list<Version>,
        documents: nested_list<Document>,
        sources: nested_list<Source>,
        created_at: timestamp,
        updated_at: timestamp,
    }
}

impl Fetchable for Bill {
    const COLLECTION: &'static str = "bills";
}

impl Searchable for Bill {
    type Params = BillQuery;
}

impl Action {
    /// `actor: action`.
    pub async fn summary(&self) -> Result<String, Error> {
        Ok(format!(
            "{}: {}",
            self.actor().await?.unwrap_or_default(),
            self.action().await?.unwrap_or_default()
        ))
    }
}

impl Sponsor {
    pub async fn summary(&self) -> Result<String, Error> {
        Ok(self.name().await?.unwrap_or_default())
    }
}

impl SpecificVote {
    /// `name <leg_id>`.
    pub async fn summary(&self) -> Result<String, Error> {
        Ok(format!(
            "{} <{}>",
            self.name().await?.unwrap_or_default(),
            self.leg_id().await?.unwrap_or_default()
        ))
    }
}

impl Vote {
    pub async fn summary(&self) -> Result<String, Error> {
        Ok(format!("Vote on '{}'", self.motion().await?.unwrap_or_default()))
    }
}

impl Bill {
    /// `bill_id: title`.
    pub async fn summary(&self) -> Result<String, Error> {
        Ok(format!(
            "{}: {}",
            self.bill_id().await?.unwrap_or_default(),
            self.title().await?.unwrap_or_default()
        ))
    }

    /// A specific bill.
    ///
    /// `session` is one of the state's session identifiers (see
    /// [`Term::sessions`](crate::types::Term::sessions)); `chamber` is the
    /// originating chamber, `upper` or `lower`; `bill_id` is the
    /// identifier assigned by the state.
    pub fn get(
        client: &Client,
        state: &str,
        session: &str,
        chamber: &str,
        bill_id: &str,
    ) -> Result<Self, Error> {
        Self::get_at(client, &[state, session, chamber, bill_id])
    }
}
