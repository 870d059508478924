use std::collections::HashMap;

use serde::{Deserialize, Deserializer};

/// Query string parameters with lenient key lookup: `genre` also finds
/// `Genre`.
#[derive(Debug, Default)]
pub struct QueryParams {
    map: HashMap<String, String>,
}

impl<'de> Deserialize<'de> for QueryParams {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let map = HashMap::<String, String>::deserialize(deserializer)?;
        Ok(QueryParams { map })
    }
}

impl From<HashMap<String, String>> for QueryParams {
    fn from(map: HashMap<String, String>) -> Self {
        QueryParams { map }
    }
}

impl QueryParams {
    pub fn get(&self, key: &str) -> Option<&str> {
        if let Some(val) = self.map.get(key) {
            return Some(val);
        }

        let mut chars = key.chars();
        let first = chars.next()?;
        if first.is_ascii_lowercase() {
            let capitalized = format!("{}{}", first.to_ascii_uppercase(), chars.as_str());
            return self.map.get(&capitalized).map(|x| x.as_str());
        }
        None
    }

    pub fn get_usize(&self, key: &str) -> Option<usize> {
        self.get(key).and_then(|v| v.trim().parse().ok())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.map.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> QueryParams {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>()
            .into()
    }

    #[test]
    fn test_capitalized_fallback() {
        let p = params(&[("Genre", "Drama"), ("page", "2")]);
        assert_eq!(p.get("genre"), Some("Drama"));
        assert_eq!(p.get("page"), Some("2"));
        assert_eq!(p.get("language"), None);
    }

    #[test]
    fn test_typed_getters() {
        let p = params(&[("limit", " 10 "), ("page", "x")]);
        assert_eq!(p.get_usize("limit"), Some(10));
        assert_eq!(p.get_usize("page"), None);
    }
}
