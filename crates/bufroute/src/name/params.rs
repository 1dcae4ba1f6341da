//! Ordered resource parameters.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Value of a single parameter: one string or a sequence of strings.
///
/// A sequence with exactly one element is never stored; [`Params`] folds it
/// into [`ParamValue::One`] so that names formatted from parameters parse
/// back to equal parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// A single value, `key=value`.
    One(String),
    /// Repeated values, `key=a&key=b`.
    Many(Vec<String>),
}

impl ParamValue {
    /// Returns every value in order.
    #[must_use]
    pub fn values(&self) -> &[String] {
        match self {
            Self::One(value) => std::slice::from_ref(value),
            Self::Many(values) => values,
        }
    }

    /// Returns the first value, if any.
    #[must_use]
    pub fn first(&self) -> Option<&str> {
        self.values().first().map(String::as_str)
    }

    /// Returns the value when exactly one is present.
    #[must_use]
    pub fn as_single(&self) -> Option<&str> {
        match self {
            Self::One(value) => Some(value),
            Self::Many(_) => None,
        }
    }

    fn normalised(self) -> Option<Self> {
        match self {
            Self::Many(values) if values.is_empty() => None,
            Self::Many(mut values) if values.len() == 1 => values.pop().map(Self::One),
            other => Some(other),
        }
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::One(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::One(value.to_owned())
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(values: Vec<String>) -> Self {
        Self::Many(values)
    }
}

impl From<Vec<&str>> for ParamValue {
    fn from(values: Vec<&str>) -> Self {
        Self::Many(values.into_iter().map(str::to_owned).collect())
    }
}

/// Parameters attached to a resource name, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "IndexMap<String, ParamValue>",
    into = "IndexMap<String, ParamValue>"
)]
pub struct Params {
    entries: IndexMap<String, ParamValue>,
}

impl Params {
    /// Creates an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`, replacing any previous value in place.
    ///
    /// Empty sequences are ignored.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        if let Some(value) = value.into().normalised() {
            self.entries.insert(key.into(), value);
        }
    }

    /// Appends `value` to `key`, turning a single value into a sequence.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let value = value.into();
        match self.entries.entry(key.into()) {
            indexmap::map::Entry::Occupied(mut entry) => {
                let merged = match entry.get_mut() {
                    ParamValue::One(existing) => {
                        ParamValue::Many(vec![std::mem::take(existing), value])
                    }
                    ParamValue::Many(values) => {
                        values.push(value);
                        return;
                    }
                };
                entry.insert(merged);
            }
            indexmap::map::Entry::Vacant(entry) => {
                entry.insert(ParamValue::One(value));
            }
        }
    }

    /// Looks up a parameter.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.get(key)
    }

    /// Looks up the first value of a parameter.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(ParamValue::first)
    }

    /// Iterates over parameters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Returns the number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no parameters are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<IndexMap<String, ParamValue>> for Params {
    fn from(entries: IndexMap<String, ParamValue>) -> Self {
        entries.into_iter().collect()
    }
}

impl From<Params> for IndexMap<String, ParamValue> {
    fn from(params: Params) -> Self {
        params.entries
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}
