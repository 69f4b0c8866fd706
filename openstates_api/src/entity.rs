//! Lazily fetched entity handles.
//!
//! Every entity kind wraps a [`Resource`]: shared handle state that is
//! either built from an already-decoded payload or points at a URL that is
//! retrieved on first field access. Concurrent first accesses coalesce onto
//! a single retrieval; the outcome (payload or error) is kept for the life
//! of the handle.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde_json::Value;
use tokio::sync::watch;
use tokio::task::AbortHandle;
use url::Url;

use crate::{
    client::Client,
    field::{FieldDescriptor, Record},
    Error,
};

type Outcome = Result<Arc<Record>, Error>;

/// Top-level JSON shape a kind expects from its endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PayloadShape {
    /// A single JSON object.
    Object,
    /// A JSON array, stored as `{"entries": [...]}`.
    Array,
}

impl PayloadShape {
    fn normalize(self, value: Value) -> Result<Record, Error> {
        match (self, value) {
            (PayloadShape::Object, Value::Object(map)) => Ok(map),
            (PayloadShape::Array, Value::Array(items)) => {
                let mut record = Record::new();
                record.insert("entries".to_string(), Value::Array(items));
                Ok(record)
            }
            (PayloadShape::Object, _) => Err(Error::Parse("expected a JSON object".to_string())),
            (PayloadShape::Array, _) => Err(Error::Parse("expected a JSON array".to_string())),
        }
    }
}

/// Observable lifecycle of a handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchStatus {
    Unfetched,
    Fetching,
    Fetched,
    Failed,
}

enum FetchState {
    Unfetched,
    Fetching(AbortHandle),
    Fetched(Arc<Record>),
    Failed(Error),
}

struct Origin {
    client: Client,
    url: Url,
    shape: PayloadShape,
    kind: &'static str,
}

struct Inner {
    origin: Option<Origin>,
    state: Mutex<FetchState>,
    outcome: watch::Sender<Option<Outcome>>,
}

/// Shared state behind an entity handle. Cloning shares the state.
#[derive(Clone)]
pub struct Resource {
    inner: Arc<Inner>,
}

impl Resource {
    /// Creates an unfetched handle. Nothing is retrieved until the payload
    /// is first requested.
    pub fn from_url(client: &Client, url: Url, shape: PayloadShape, kind: &'static str) -> Self {
        let (outcome, _) = watch::channel(None);
        Self {
            inner: Arc::new(Inner {
                origin: Some(Origin {
                    client: client.clone(),
                    url,
                    shape,
                    kind,
                }),
                state: Mutex::new(FetchState::Unfetched),
                outcome,
            }),
        }
    }

    /// Creates an already-fetched handle. No network access ever happens
    /// for it.
    pub fn from_payload(payload: Record) -> Self {
        let payload = Arc::new(payload);
        let (outcome, _) = watch::channel(Some(Ok(Arc::clone(&payload))));
        Self {
            inner: Arc::new(Inner {
                origin: None,
                state: Mutex::new(FetchState::Fetched(payload)),
                outcome,
            }),
        }
    }

    /// URL the handle was created for, if any.
    pub fn url(&self) -> Option<&Url> {
        self.inner.origin.as_ref().map(|origin| &origin.url)
    }

    pub fn status(&self) -> FetchStatus {
        match &*self.inner.lock() {
            FetchState::Unfetched => FetchStatus::Unfetched,
            FetchState::Fetching(_) => FetchStatus::Fetching,
            FetchState::Fetched(_) => FetchStatus::Fetched,
            FetchState::Failed(_) => FetchStatus::Failed,
        }
    }

    /// Returns the decoded payload, retrieving it first if needed.
    ///
    /// The first caller spawns the retrieval onto the Tokio runtime; every
    /// caller, concurrent or later, observes that single outcome. Dropping a
    /// caller does not abort the retrieval.
    pub async fn payload(&self) -> Result<Arc<Record>, Error> {
        let mut outcome = {
            let mut state = self.inner.lock();
            match &*state {
                FetchState::Fetched(record) => return Ok(Arc::clone(record)),
                FetchState::Failed(err) => return Err(err.clone()),
                FetchState::Fetching(_) => self.inner.outcome.subscribe(),
                FetchState::Unfetched => {
                    let outcome = self.inner.outcome.subscribe();
                    let inner = Arc::clone(&self.inner);
                    let task = tokio::spawn(async move {
                        let result = inner.retrieve().await;
                        inner.settle(result);
                    });
                    *state = FetchState::Fetching(task.abort_handle());
                    outcome
                }
            }
        };

        let settled = outcome
            .wait_for(Option::is_some)
            .await
            .map_err(|_| Error::Cancelled)?;
        let result = (*settled).clone();
        drop(settled);
        result.unwrap_or(Err(Error::Cancelled))
    }

    /// Aborts an in-flight or not yet started retrieval. The handle ends up
    /// `Failed` with [`Error::Cancelled`]. Settled handles are left alone.
    pub fn cancel(&self) {
        let mut state = self.inner.lock();
        match &*state {
            FetchState::Fetched(_) | FetchState::Failed(_) => return,
            FetchState::Fetching(task) => task.abort(),
            FetchState::Unfetched => {}
        }
        if let Some(origin) = &self.inner.origin {
            tracing::warn!("Cancelled retrieval of {} at {}", origin.kind, origin.url.path());
        }
        *state = FetchState::Failed(Error::Cancelled);
        self.inner.outcome.send_replace(Some(Err(Error::Cancelled)));
    }
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, FetchState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn retrieve(&self) -> Outcome {
        let Some(origin) = &self.origin else {
            return Err(Error::Configuration(
                "handle has no source URL to fetch".to_string(),
            ));
        };
        tracing::debug!("Fetching {} from {}", origin.kind, origin.url.path());

        let response = origin.client.transport().get(&origin.url).await?;
        if !response.is_success() {
            let snippet = truncate_body(&response.body);
            tracing::error!(
                "Request for {} failed with status {}: {}",
                origin.kind,
                response.status,
                snippet
            );
            return Err(Error::HttpStatus {
                status: response.status,
                body: snippet,
            });
        }

        let value: Value = serde_json::from_str(&response.body).map_err(|e| {
            tracing::error!(
                "Failed to parse {}: {} | body: {}",
                origin.kind,
                e,
                truncate_body(&response.body)
            );
            Error::Parse(e.to_string())
        })?;
        let record = origin.shape.normalize(value).map_err(|e| {
            tracing::error!("Unexpected payload for {}: {}", origin.kind, e);
            e
        })?;

        tracing::debug!("Fetched {} from {}", origin.kind, origin.url.path());
        Ok(Arc::new(record))
    }

    fn settle(&self, outcome: Outcome) {
        let mut state = self.lock();
        // A cancelled handle has already published its outcome.
        if !matches!(*state, FetchState::Fetching(_)) {
            return;
        }
        *state = match &outcome {
            Ok(record) => FetchState::Fetched(Arc::clone(record)),
            Err(err) => FetchState::Failed(err.clone()),
        };
        self.outcome.send_replace(Some(outcome));
    }
}

/// Handles are equal when they were created for the same URL. Handles built
/// from a payload have no URL and are only equal to their own clones.
impl PartialEq for Resource {
    fn eq(&self, other: &Self) -> bool {
        match (self.url(), other.url()) {
            (Some(a), Some(b)) => a == b,
            (None, None) => Arc::ptr_eq(&self.inner, &other.inner),
            _ => false,
        }
    }
}

impl Eq for Resource {}

impl std::fmt::Debug for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resource")
            .field("path", &self.url().map(Url::path))
            .field("status", &self.status())
            .finish()
    }
}

/// A kind of API object with a declared field schema.
pub trait Entity: Clone + Send + Sync + Sized + 'static {
    /// Human-readable kind name, used in logs.
    const KIND: &'static str;

    /// Declared fields, in schema order.
    const FIELDS: &'static [FieldDescriptor];

    /// Top-level shape the kind's endpoint returns.
    const SHAPE: PayloadShape = PayloadShape::Object;

    fn from_resource(resource: Resource) -> Self;

    fn resource(&self) -> &Resource;

    /// Unfetched handle for `url`.
    fn from_url(client: &Client, url: Url) -> Self {
        Self::from_resource(Resource::from_url(client, url, Self::SHAPE, Self::KIND))
    }

    /// Already-fetched handle for `payload`.
    fn from_payload(payload: Record) -> Self {
        Self::from_resource(Resource::from_payload(payload))
    }

    fn source_url(&self) -> Option<&Url> {
        self.resource().url()
    }

    fn fetch_status(&self) -> FetchStatus {
        self.resource().status()
    }

    /// Raw decoded JSON behind the typed accessors.
    fn payload(&self) -> impl Future<Output = Result<Arc<Record>, Error>> + Send {
        self.resource().payload()
    }

    /// Decodes every declared field and returns the first failure.
    ///
    /// Accessors decode lazily, one field at a time; call this to reject a
    /// payload with any malformed field up front.
    fn validate(&self) -> impl Future<Output = Result<(), Error>> + Send {
        async move {
            let record = self.resource().payload().await?;
            for field in Self::FIELDS {
                field.check(&record)?;
            }
            Ok(())
        }
    }

    fn cancel(&self) {
        self.resource().cancel()
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        return body.to_string();
    }
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...[truncated]", &body[..end])
}

/// Declares an entity kind: the handle struct, its field schema, and one
/// async accessor per field.
///
/// Cardinalities: `scalar<T>`, `timestamp`, `scalars<T>`, `nested<E>`,
/// `nested_list<E>`, `mappings`. A trailing `= "key"` reads a JSON key that
/// differs from the accessor name.
macro_rules! entity {
    (@key $field:ident) => { stringify!($field) };
    (@key $field:ident $key:literal) => { $key };

    (@cardinality scalar) => { $crate::field::Cardinality::Scalar };
    (@cardinality timestamp) => { $crate::field::Cardinality::Scalar };
    (@cardinality scalars) => { $crate::field::Cardinality::ScalarList };
    (@cardinality nested) => { $crate::field::Cardinality::Nested };
    (@cardinality nested_list) => { $crate::field::Cardinality::NestedList };
    (@cardinality mappings) => { $crate::field::Cardinality::MappingList };

    (@decoder timestamp) => { $crate::field::Decoder::Timestamp };
    (@decoder $other:ident) => { $crate::field::Decoder::Plain };

    (@schema nested ($ty:ty) $desc:expr) => {
        $desc.with_schema(<$ty as $crate::entity::Entity>::FIELDS)
    };
    (@schema nested_list ($ty:ty) $desc:expr) => {
        $desc.with_schema(<$ty as $crate::entity::Entity>::FIELDS)
    };
    (@schema $card:ident ($($ty:ty)?) $desc:expr) => { $desc };

    (@descriptor $card:ident $field:ident ($($ty:ty)?) $($key:literal)?) => {
        $crate::entity::entity!(@schema $card ($($ty)?) $crate::field::FieldDescriptor::new(
            stringify!($field),
            $crate::entity::entity!(@key $field $($key)?),
            $crate::entity::entity!(@cardinality $card),
            $crate::entity::entity!(@decoder $card),
        ))
    };

    (@accessor [$(#[$fmeta:meta])*] scalar $field:ident ($ty:ty) $($key:literal)?) => {
        $(#[$fmeta])*
        pub async fn $field(&self) -> Result<Option<$ty>, $crate::Error> {
            const FIELD: $crate::field::FieldDescriptor =
                $crate::entity::entity!(@descriptor scalar $field ($ty) $($key)?);
            FIELD.scalar::<$ty>(&*self.resource.payload().await?)
        }
    };
    (@accessor [$(#[$fmeta:meta])*] timestamp $field:ident () $($key:literal)?) => {
        $(#[$fmeta])*
        pub async fn $field(&self) -> Result<Option<chrono::NaiveDateTime>, $crate::Error> {
            const FIELD: $crate::field::FieldDescriptor =
                $crate::entity::entity!(@descriptor timestamp $field () $($key)?);
            FIELD.timestamp(&*self.resource.payload().await?)
        }
    };
    (@accessor [$(#[$fmeta:meta])*] scalars $field:ident ($ty:ty) $($key:literal)?) => {
        $(#[$fmeta])*
        pub async fn $field(&self) -> Result<Vec<$ty>, $crate::Error> {
            const FIELD: $crate::field::FieldDescriptor =
                $crate::entity::entity!(@descriptor scalars $field ($ty) $($key)?);
            FIELD.scalars::<$ty>(&*self.resource.payload().await?)
        }
    };
    (@accessor [$(#[$fmeta:meta])*] nested $field:ident ($ty:ty) $($key:literal)?) => {
        $(#[$fmeta])*
        pub async fn $field(&self) -> Result<Option<$ty>, $crate::Error> {
            const FIELD: $crate::field::FieldDescriptor =
                $crate::entity::entity!(@descriptor nested $field ($ty) $($key)?);
            FIELD.nested::<$ty>(&*self.resource.payload().await?)
        }
    };
    (@accessor [$(#[$fmeta:meta])*] nested_list $field:ident ($ty:ty) $($key:literal)?) => {
        $(#[$fmeta])*
        pub async fn $field(&self) -> Result<Vec<$ty>, $crate::Error> {
            const FIELD: $crate::field::FieldDescriptor =
                $crate::entity::entity!(@descriptor nested_list $field ($ty) $($key)?);
            FIELD.nested_list::<$ty>(&*self.resource.payload().await?)
        }
    };
    (@accessor [$(#[$fmeta:meta])*] mappings $field:ident () $($key:literal)?) => {
        $(#[$fmeta])*
        pub async fn $field(&self) -> Result<Vec<$crate::field::Mapping>, $crate::Error> {
            const FIELD: $crate::field::FieldDescriptor =
                $crate::entity::entity!(@descriptor mappings $field () $($key)?);
            FIELD.mappings(&*self.resource.payload().await?)
        }
    };

    (
        $(#[$meta:meta])*
        pub struct $name:ident = $kind:literal {
            $(
                $(#[$fmeta:meta])*
                $field:ident: $card:ident $(<$ty:ty>)? $(= $key:literal)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq)]
        pub struct $name {
            resource: $crate::entity::Resource,
        }

        impl $crate::entity::Entity for $name {
            const KIND: &'static str = $kind;
            const FIELDS: &'static [$crate::field::FieldDescriptor] = &[
                $( $crate::entity::entity!(@descriptor $card $field ($($ty)?) $($key)?) ),*
            ];

            fn from_resource(resource: $crate::entity::Resource) -> Self {
                Self { resource }
            }

            fn resource(&self) -> &$crate::entity::Resource {
                &self.resource
            }
        }

        impl $name {
            $(
                $crate::entity::entity!(
                    @accessor [$(#[$fmeta])*] $card $field ($($ty)?) $($key)?
                );
            )*
        }
    };
}

pub(crate) use entity;
