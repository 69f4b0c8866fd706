//! Field descriptors: the per-kind schema metadata that drives hydration.
//!
//! A descriptor owns no state. Every entity kind lists its descriptors in
//! [`Entity::FIELDS`](crate::Entity::FIELDS) and every typed accessor
//! resolves through the same descriptor methods, so only the set of
//! descriptors differs between kinds.

use chrono::NaiveDateTime;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    decode::{self, FormatError},
    entity::Entity,
    Error,
};

/// A decoded JSON object, as cached by a fetched handle.
pub type Record = serde_json::Map<String, Value>;

/// Insertion-ordered mapping used for unstructured blocks such as contact info.
pub type Mapping = serde_json::Map<String, Value>;

/// How many values a field holds and what they are.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cardinality {
    /// One scalar value.
    Scalar,
    /// A list of scalar values.
    ScalarList,
    /// One nested entity, hydrated from the parent's subtree.
    Nested,
    /// A list of nested entities, hydrated from the parent's subtree.
    NestedList,
    /// A list of string-keyed mappings of scalars.
    MappingList,
}

/// Which scalar decoder applies to the field's values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decoder {
    /// Identity pass-through into the declared type.
    Plain,
    /// Nullable `YYYY-MM-DD HH:MM:SS` timestamp.
    Timestamp,
}

/// A typed attribute declared on an entity kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Accessor name on the Rust side.
    pub name: &'static str,
    /// Key in the JSON object.
    pub key: &'static str,
    pub cardinality: Cardinality,
    pub decoder: Decoder,
    /// Field table of the nested kind, for nested and nested-list fields.
    pub nested: Option<&'static [FieldDescriptor]>,
}

impl FieldDescriptor {
    pub const fn new(
        name: &'static str,
        key: &'static str,
        cardinality: Cardinality,
        decoder: Decoder,
    ) -> Self {
        Self {
            name,
            key,
            cardinality,
            decoder,
            nested: None,
        }
    }

    /// Attaches the nested kind's fields so eager validation can descend
    /// into it.
    pub const fn with_schema(mut self, fields: &'static [FieldDescriptor]) -> Self {
        self.nested = Some(fields);
        self
    }

    /// Returns the raw value for this field, treating `null` like an absent key.
    pub fn raw<'a>(&self, record: &'a Record) -> Option<&'a Value> {
        record.get(self.key).filter(|value| !value.is_null())
    }

    /// Decodes a plain scalar. Absent or `null` yields `None`.
    pub fn scalar<T: DeserializeOwned>(&self, record: &Record) -> Result<Option<T>, Error> {
        self.raw(record)
            .map(|raw| decode::plain(raw).map_err(|e| self.error(e)))
            .transpose()
    }

    /// Decodes a timestamp scalar. Absent or `null` yields `None`.
    pub fn timestamp(&self, record: &Record) -> Result<Option<NaiveDateTime>, Error> {
        match self.raw(record) {
            Some(raw) => decode::timestamp(raw).map_err(|e| self.error(e)),
            None => Ok(None),
        }
    }

    /// Decodes every element of a scalar list. Absent yields an empty list.
    pub fn scalars<T: DeserializeOwned>(&self, record: &Record) -> Result<Vec<T>, Error> {
        self.elements(record)?
            .iter()
            .map(|raw| decode::plain(raw).map_err(|e| self.error(e)))
            .collect()
    }

    /// Builds an already-fetched nested entity from the field's subtree.
    pub fn nested<E: Entity>(&self, record: &Record) -> Result<Option<E>, Error> {
        self.raw(record)
            .map(|raw| self.object(raw).map(E::from_payload))
            .transpose()
    }

    /// Builds one already-fetched nested entity per element.
    pub fn nested_list<E: Entity>(&self, record: &Record) -> Result<Vec<E>, Error> {
        self.elements(record)?
            .iter()
            .map(|raw| self.object(raw).map(E::from_payload))
            .collect()
    }

    /// Decodes every element as an ordered mapping of scalars. A value that
    /// is itself a list or an object is a format error.
    pub fn mappings(&self, record: &Record) -> Result<Vec<Mapping>, Error> {
        self.elements(record)?
            .iter()
            .map(|raw| self.mapping(raw))
            .collect()
    }

    /// Decodes the field generically according to its cardinality and
    /// decoder. Used by eager validation.
    pub fn check(&self, record: &Record) -> Result<(), Error> {
        match (self.cardinality, self.decoder) {
            (Cardinality::Scalar, Decoder::Timestamp) => self.timestamp(record).map(drop),
            (Cardinality::Scalar, Decoder::Plain) => self.scalar::<Value>(record).map(drop),
            (Cardinality::ScalarList, Decoder::Timestamp) => {
                for raw in self.elements(record)? {
                    decode::timestamp(raw).map_err(|e| self.error(e))?;
                }
                Ok(())
            }
            (Cardinality::ScalarList, Decoder::Plain) => self.scalars::<Value>(record).map(drop),
            (Cardinality::Nested, _) => match self.raw(record) {
                Some(raw) => self.check_nested(self.as_object(raw)?),
                None => Ok(()),
            },
            (Cardinality::NestedList, _) => {
                for raw in self.elements(record)? {
                    self.check_nested(self.as_object(raw)?)?;
                }
                Ok(())
            }
            (Cardinality::MappingList, _) => self.mappings(record).map(drop),
        }
    }

    fn check_nested(&self, record: &Record) -> Result<(), Error> {
        for field in self.nested.unwrap_or(&[]) {
            field.check(record)?;
        }
        Ok(())
    }

    fn elements<'a>(&self, record: &'a Record) -> Result<&'a [Value], Error> {
        match self.raw(record) {
            None => Ok(&[]),
            Some(Value::Array(items)) => Ok(items),
            Some(other) => Err(self.error(FormatError::new("a list", other))),
        }
    }

    fn object(&self, raw: &Value) -> Result<Record, Error> {
        self.as_object(raw).cloned()
    }

    fn as_object<'a>(&self, raw: &'a Value) -> Result<&'a Record, Error> {
        match raw {
            Value::Object(map) => Ok(map),
            other => Err(self.error(FormatError::new("an object", other))),
        }
    }

    fn mapping(&self, raw: &Value) -> Result<Mapping, Error> {
        let map = self.as_object(raw)?;
        match map.values().find(|value| value.is_array() || value.is_object()) {
            Some(value) => Err(self.error(FormatError::new("a scalar", value))),
            None => Ok(map.clone()),
        }
    }

    fn error(&self, source: FormatError) -> Error {
        Error::format(self.name, source)
    }
}
