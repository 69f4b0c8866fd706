//! Class-level retrieval shared by every top-level entity kind.
//!
//! Kinds only declare where they live; URL building, handle creation and
//! list unwrapping are the same for all of them.

use std::future::Future;

use crate::{
    client::Client,
    entity::Entity,
    list::ListOf,
    query::{Filters, Query},
    Error,
};

/// An entity kind addressable by path segments under a collection.
pub trait Fetchable: Entity {
    /// Collection path under the API root, e.g. `bills`.
    const COLLECTION: &'static str;

    /// Builds `COLLECTION/{segments..}/` and returns an unfetched handle.
    ///
    /// Fails with [`Error::Configuration`] when a segment is empty or no API
    /// key is configured. Nothing is retrieved yet.
    fn get_at(client: &Client, segments: &[&str]) -> Result<Self, Error> {
        if segments.is_empty() || segments.iter().any(|s| s.trim().is_empty()) {
            return Err(Error::Configuration(format!(
                "missing identifying path segment for {}",
                Self::KIND
            )));
        }
        let mut path = Vec::with_capacity(segments.len() + 1);
        path.push(Self::COLLECTION);
        path.extend_from_slice(segments);
        let url = client.build_url(&path, &Filters::new())?;
        Ok(Self::from_url(client, url))
    }
}

/// An entity kind with a multi-result search endpoint at its collection.
pub trait Searchable: Fetchable {
    type Params: Query;

    /// Issues one retrieval of the collection and returns the entries,
    /// each already hydrated from the result array.
    fn search(
        client: &Client,
        params: &Self::Params,
    ) -> impl Future<Output = Result<Vec<Self>, Error>> + Send {
        search_at::<Self, _>(client, &[Self::COLLECTION], params)
    }
}

/// Fetches a list endpoint and unwraps its entries.
pub(crate) fn search_at<E: Entity, Q: Query + ?Sized>(
    client: &Client,
    segments: &[&str],
    params: &Q,
) -> impl Future<Output = Result<Vec<E>, Error>> + Send {
    let list = client
        .build_url(segments, params)
        .map(|url| ListOf::<E>::from_url(client, url));
    async move { list?.entries().await }
}
