use std::cmp::Reverse;
use std::collections::HashSet;

use super::entry::CatalogEntry;

/// Distinct genres and languages, each in first-seen catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Facets {
    pub genres: Vec<String>,
    pub languages: Vec<String>,
}

pub fn facets<T: CatalogEntry>(catalog: &[T]) -> Facets {
    Facets {
        genres: distinct(catalog.iter().map(|i| i.genre())),
        languages: distinct(catalog.iter().map(|i| i.language())),
    }
}

fn distinct<'a>(labels: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    labels
        .filter(|l| seen.insert(*l))
        .map(str::to_string)
        .collect()
}

/// The `limit` newest releases. Undated items sort last.
pub fn recent<T: CatalogEntry>(catalog: &[T], limit: usize) -> Vec<&T> {
    let mut sorted: Vec<&T> = catalog.iter().collect();
    sorted.sort_by_key(|i| Reverse(i.release_date()));
    sorted.truncate(limit);
    sorted
}

/// One page of `items`; pages count from 1.
pub fn paginate<T>(items: Vec<T>, page: usize, page_size: usize) -> Vec<T> {
    let start = page.saturating_sub(1).saturating_mul(page_size);
    items.into_iter().skip(start).take(page_size).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::entry::testutil::entry;

    #[test]
    fn test_facets_keep_first_seen_order() {
        let catalog = vec![
            entry("A", "Drama", "Hindi", 2001),
            entry("B", "Action", "English", 2002),
            entry("C", "Drama", "English", 2003),
            entry("D", "Comedy", "Hindi", 2004),
        ];
        let f = facets(&catalog);
        assert_eq!(f.genres, vec!["Drama", "Action", "Comedy"]);
        assert_eq!(f.languages, vec!["Hindi", "English"]);
    }

    #[test]
    fn test_recent() {
        let mut undated = entry("Undated", "Drama", "English", 2000);
        undated.released = None;
        let catalog = vec![
            entry("Old", "Drama", "English", 1960),
            undated,
            entry("New", "Drama", "English", 2024),
            entry("Mid", "Drama", "English", 1999),
        ];
        let got: Vec<&str> = recent(&catalog, 3).iter().map(|e| e.id.as_str()).collect();
        assert_eq!(got, vec!["new", "mid", "old"]);
    }

    #[test]
    fn test_paginate() {
        let items: Vec<u32> = (1..=14).collect();
        assert_eq!(paginate(items.clone(), 1, 6), vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(paginate(items.clone(), 3, 6), vec![13, 14]);
        assert!(paginate(items.clone(), 4, 6).is_empty());
        assert_eq!(paginate(items, 0, 6), vec![1, 2, 3, 4, 5, 6]);
    }
}
