//! The resolved argument bag handed to command handlers.

use std::str::FromStr;

use crate::error::{Error, Result};
use crate::types::{ArgumentKeys, ResolvedArgumentValue};

/// Insertion-ordered collection of resolved argument values.
///
/// Built exclusively by the resolver and read-only afterwards. Lookups use
/// exact string matching on the keys the resolver recorded, which are the
/// canonical names and abbreviations from the schema.
///
/// # Examples
///
/// ```
/// use console_args::{ArgumentBag, ResolvedArgumentValue};
///
/// let mut bag = ArgumentBag::new();
/// bag.add(ResolvedArgumentValue::new("port", "p", Some("8080")))?;
///
/// assert_eq!(bag.value_by_name("port"), Some("8080"));
/// assert_eq!(bag.parse_by_name::<u16>("port")?, 8080);
/// # Ok::<(), console_args::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentBag {
    values: Vec<ResolvedArgumentValue>,
}

impl ArgumentBag {
    /// Creates an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a resolved value.
    ///
    /// Fails with [`Error::DuplicateArgumentValue`] when a value with the
    /// same (name, abbreviation) pair is already present. Hitting this from
    /// resolution signals a resolver bug, not bad user input.
    pub fn add(&mut self, value: ResolvedArgumentValue) -> Result<()> {
        let duplicate = self
            .values
            .iter()
            .any(|existing| existing.name == value.name && existing.abbreviation == value.abbreviation);
        if duplicate {
            return Err(Error::DuplicateArgumentValue {
                name: value.name,
                abbreviation: value.abbreviation,
            });
        }

        self.values.push(value);
        Ok(())
    }

    /// Returns a snapshot of all resolved values in insertion order.
    pub fn list(&self) -> Vec<ResolvedArgumentValue> {
        self.values.clone()
    }

    /// Number of resolved values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the bag holds no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether a value keyed by this exact name is present.
    pub fn contains_name(&self, name: &str) -> bool {
        self.get_by_name(name).is_some()
    }

    /// Whether a value keyed by this exact abbreviation is present.
    pub fn contains_abbreviation(&self, abbreviation: &str) -> bool {
        self.get_by_abbreviation(abbreviation).is_some()
    }

    /// Finds a resolved value by exact name.
    pub fn get_by_name(&self, name: &str) -> Option<&ResolvedArgumentValue> {
        self.values.iter().find(|value| value.name == name)
    }

    /// Finds a resolved value by exact abbreviation.
    pub fn get_by_abbreviation(&self, abbreviation: &str) -> Option<&ResolvedArgumentValue> {
        self.values
            .iter()
            .find(|value| value.abbreviation == abbreviation)
    }

    /// Raw value lookup by exact name.
    pub fn value_by_name(&self, name: &str) -> Option<&str> {
        self.get_by_name(name).and_then(|value| value.value.as_deref())
    }

    /// Raw value lookup by exact abbreviation.
    pub fn value_by_abbreviation(&self, abbreviation: &str) -> Option<&str> {
        self.get_by_abbreviation(abbreviation)
            .and_then(|value| value.value.as_deref())
    }

    /// Raw value lookup by name, falling back to the abbreviation.
    pub fn value_by_name_or_abbreviation(&self, name: &str, abbreviation: &str) -> Option<&str> {
        if let Some(entry) = self.get_by_name(name) {
            return entry.value.as_deref();
        }
        self.value_by_abbreviation(abbreviation)
    }

    /// Raw value lookup by an [`ArgumentKeys`] pair.
    pub fn value_by_keys(&self, keys: &ArgumentKeys) -> Option<&str> {
        self.value_by_name_or_abbreviation(&keys.name, &keys.abbreviation)
    }

    /// Typed lookup by exact name.
    ///
    /// Fails with [`Error::MissingValue`] when no value is present and
    /// [`Error::ValueParse`] when the raw string does not parse. Callers that
    /// want to treat absence as optional should check presence first.
    pub fn parse_by_name<T: FromStr>(&self, name: &str) -> Result<T> {
        let raw = self.value_by_name(name).ok_or_else(|| Error::MissingValue {
            name: name.to_string(),
            target: std::any::type_name::<T>(),
        })?;
        parse_raw(name, raw)
    }

    /// Typed lookup by name, falling back to the abbreviation.
    pub fn parse_by_name_or_abbreviation<T: FromStr>(
        &self,
        name: &str,
        abbreviation: &str,
    ) -> Result<T> {
        let raw = self
            .value_by_name_or_abbreviation(name, abbreviation)
            .ok_or_else(|| Error::MissingValue {
                name: name.to_string(),
                target: std::any::type_name::<T>(),
            })?;
        parse_raw(name, raw)
    }

    /// Typed lookup by an [`ArgumentKeys`] pair.
    pub fn parse_by_keys<T: FromStr>(&self, keys: &ArgumentKeys) -> Result<T> {
        self.parse_by_name_or_abbreviation(&keys.name, &keys.abbreviation)
    }
}

fn parse_raw<T: FromStr>(name: &str, raw: &str) -> Result<T> {
    raw.parse::<T>().map_err(|_| Error::ValueParse {
        name: name.to_string(),
        value: raw.to_string(),
        target: std::any::type_name::<T>(),
    })
}
