use crate::{
    entity::entity,
    fetchable::{Fetchable, Searchable},
    query::CommitteeQuery,
    types::Source,
    Client, Error,
};

entity! {
    pub struct CommitteeMember = "committee member" {
        leg_id: scalar<String>,
        role: scalar<String>,
        name: scalar<String> = "legislator",
    }
}

entity! {
    /// A committee or subcommittee and its members.
    pub struct Committee = "committee" {
        id: scalar<String>,
        state: scalar<String>,
        chamber: scalar<String>,
        committee: scalar<String>,
        subcommittee: scalar<String>,
        parent_id: scalar<String>,
        members: nested_list<CommitteeMember>,
        sources: nested_list<Source>,
        created_at: timestamp,
        updated_at: timestamp,
    }
}

impl Fetchable for Committee {
    const COLLECTION: &'static str = "committees";
}

impl Searchable for Committee {
    type Params = CommitteeQuery;
}

impl Committee {
    /// A committee by Open States ID (e.g. `CAC000005`).
    pub fn get(client: &Client, id: &str) -> Result<Self, Error> {
        Self::get_at(client, &[id])
    }
}
