//! Parsed query-string state: an ordered mapping from key to one or more
//! values, serialized back with repeated `key=value` pairs for multi-valued
//! keys. Unknown keys survive a parse/serialize cycle untouched.
use std::fmt;

use url::form_urlencoded;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    Single(String),
    Multi(Vec<String>),
}

impl QueryValue {
    pub fn first(&self) -> Option<&str> {
        match self {
            Self::Single(value) => Some(value),
            Self::Multi(values) => values.first().map(String::as_str),
        }
    }

    pub fn to_vec(&self) -> Vec<String> {
        match self {
            Self::Single(value) => vec![value.clone()],
            Self::Multi(values) => values.clone(),
        }
    }

    fn push(&mut self, value: String) {
        match self {
            Self::Single(existing) => {
                let first = std::mem::take(existing);
                *self = Self::Multi(vec![first, value]);
            }
            Self::Multi(values) => values.push(value),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryMap {
    entries: Vec<(String, QueryValue)>,
}

impl QueryMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a query string with or without its leading `?`.
    pub fn parse(input: &str) -> Self {
        let input = input.strip_prefix('?').unwrap_or(input);
        let mut map = Self::new();
        for (key, value) in form_urlencoded::parse(input.as_bytes()) {
            map.append(key.into_owned(), value.into_owned());
        }
        map
    }

    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.entries
            .iter()
            .find(|(candidate, _)| candidate == key)
            .map(|(_, value)| value)
    }

    /// Overwrites `key` with a single value, keeping its position if present.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = QueryValue::Single(value.into());
        match self.entries.iter_mut().find(|(candidate, _)| *candidate == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(candidate, _)| *candidate == key) {
            Some((_, existing)) => existing.push(value),
            None => self.entries.push((key, QueryValue::Single(value))),
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<QueryValue> {
        let index = self.entries.iter().position(|(candidate, _)| candidate == key)?;
        Some(self.entries.remove(index).1)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Percent-encoded form without the leading `?`.
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.entries {
            match value {
                QueryValue::Single(value) => {
                    serializer.append_pair(key, value);
                }
                QueryValue::Multi(values) => {
                    for value in values {
                        serializer.append_pair(key, value);
                    }
                }
            }
        }
        serializer.finish()
    }
}

impl fmt::Display for QueryMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_repeated_keys_in_first_seen_order() {
        let map = QueryMap::parse("?tag=a&shader=perlin&tag=b");
        assert_eq!(map.keys().collect::<Vec<_>>(), ["tag", "shader"]);
        assert_eq!(
            map.get("tag"),
            Some(&QueryValue::Multi(vec!["a".into(), "b".into()]))
        );
        assert_eq!(map.get("shader"), Some(&QueryValue::Single("perlin".into())));
    }

    #[test]
    fn serializes_multi_values_as_repeated_pairs() {
        let map = QueryMap::parse("tag=a&tag=b&x=1");
        assert_eq!(map.to_query_string(), "tag=a&tag=b&x=1");
    }

    #[test]
    fn percent_encoding_survives_a_cycle() {
        let mut map = QueryMap::new();
        map.set("position", "10,-2.5");
        map.set("label", "a b&c");
        let encoded = map.to_query_string();
        assert_eq!(encoded, "position=10%2C-2.5&label=a+b%26c");
        assert_eq!(QueryMap::parse(&encoded), map);
    }

    #[test]
    fn set_replaces_multi_value_in_place() {
        let mut map = QueryMap::parse("a=1&b=2&a=3");
        map.set("a", "9");
        assert_eq!(map.to_query_string(), "a=9&b=2");
        assert_eq!(map.remove("b"), Some(QueryValue::Single("2".into())));
        assert_eq!(map.to_query_string(), "a=9");
    }
}
