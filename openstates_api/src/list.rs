//! Generic list wrapper used by every multi-result endpoint.

use std::marker::PhantomData;

use crate::{
    entity::{Entity, PayloadShape, Resource},
    field::{Cardinality, Decoder, FieldDescriptor},
    Error,
};

const ENTRIES: FieldDescriptor =
    FieldDescriptor::new("entries", "entries", Cardinality::NestedList, Decoder::Plain);

/// Entity whose only field, `entries`, is the top-level JSON array of `E`.
///
/// Search operations return the entries, never the wrapper.
pub(crate) struct ListOf<E> {
    resource: Resource,
    entries: PhantomData<fn() -> E>,
}

impl<E> Clone for ListOf<E> {
    fn clone(&self) -> Self {
        Self {
            resource: self.resource.clone(),
            entries: PhantomData,
        }
    }
}

impl<E: Entity> Entity for ListOf<E> {
    const KIND: &'static str = "list";
    const FIELDS: &'static [FieldDescriptor] = &[ENTRIES.with_schema(E::FIELDS)];
    const SHAPE: PayloadShape = PayloadShape::Array;

    fn from_resource(resource: Resource) -> Self {
        Self {
            resource,
            entries: PhantomData,
        }
    }

    fn resource(&self) -> &Resource {
        &self.resource
    }
}

impl<E: Entity> ListOf<E> {
    pub(crate) async fn entries(&self) -> Result<Vec<E>, Error> {
        ENTRIES.nested_list::<E>(&*self.resource.payload().await?)
    }
}
