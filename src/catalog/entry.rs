use chrono::{Datelike, NaiveDate};

use crate::db::Movie;

/// The view of a catalog item that search and recommendation work on.
pub trait CatalogEntry {
    fn id(&self) -> &str;
    fn title(&self) -> &str;
    fn genre(&self) -> &str;
    fn language(&self) -> &str;
    fn release_date(&self) -> Option<NaiveDate>;

    fn release_year(&self) -> Option<i32> {
        self.release_date().map(|d| d.year())
    }
}

impl CatalogEntry for Movie {
    fn id(&self) -> &str {
        &self.id
    }
    fn title(&self) -> &str {
        &self.name
    }
    fn genre(&self) -> &str {
        &self.genre
    }
    fn language(&self) -> &str {
        &self.language
    }
    fn release_date(&self) -> Option<NaiveDate> {
        self.released_on()
    }
}

#[cfg(test)]
pub(crate) mod testutil {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub struct Entry {
        pub id: String,
        pub title: String,
        pub genre: String,
        pub language: String,
        pub released: Option<NaiveDate>,
    }

    impl CatalogEntry for Entry {
        fn id(&self) -> &str {
            &self.id
        }
        fn title(&self) -> &str {
            &self.title
        }
        fn genre(&self) -> &str {
            &self.genre
        }
        fn language(&self) -> &str {
            &self.language
        }
        fn release_date(&self) -> Option<NaiveDate> {
            self.released
        }
    }

    pub fn entry(title: &str, genre: &str, language: &str, year: i32) -> Entry {
        Entry {
            id: title.to_lowercase().replace(' ', "-"),
            title: title.to_string(),
            genre: genre.to_string(),
            language: language.to_string(),
            released: NaiveDate::from_ymd_opt(year, 6, 1),
        }
    }

    pub fn ids<T: CatalogEntry>(items: &[T]) -> Vec<&str> {
        items.iter().map(|i| i.id()).collect()
    }
}
