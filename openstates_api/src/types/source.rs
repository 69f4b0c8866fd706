use crate::entity::entity;

entity! {
    /// A page the data was scraped from.
    pub struct Source = "source" {
        url: scalar<String>,
        retrieved: timestamp,
    }
}
