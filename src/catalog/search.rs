use super::entry::CatalogEntry;

/// Case-insensitive substring match of `query` against title, genre or
/// language. A blank query matches everything.
pub fn search<'a, T: CatalogEntry>(catalog: &'a [T], query: &str) -> Vec<&'a T> {
    let needle = query.to_lowercase();
    catalog
        .iter()
        .filter(|item| {
            item.title().to_lowercase().contains(&needle)
                || item.genre().to_lowercase().contains(&needle)
                || item.language().to_lowercase().contains(&needle)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::entry::testutil::entry;

    #[test]
    fn test_search_fields() {
        let catalog = vec![
            entry("Jaws", "Thriller", "English", 1975),
            entry("Ran", "Drama", "Japanese", 1985),
            entry("Rashomon", "Drama", "Japanese", 1950),
        ];
        let titles = |q: &str| search(&catalog, q).iter().map(|e| e.title.clone()).collect::<Vec<_>>();

        assert_eq!(titles("JAWS"), vec!["Jaws"]);
        assert_eq!(titles("ran"), vec!["Ran"]);
        assert_eq!(titles("japan"), vec!["Ran", "Rashomon"]);
        assert_eq!(titles("thrill"), vec!["Jaws"]);
        assert!(titles("western").is_empty());
        assert_eq!(titles("").len(), 3);
    }
}
