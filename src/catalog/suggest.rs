use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use super::entry::CatalogEntry;
use super::relax::MAX_RESULTS;

/// Query words shorter than this are too weak to match titles on.
const MIN_TOKEN_LEN: usize = 3;

pub fn suggest<T, S>(catalog: &[T], known_genres: &[S], known_languages: &[S], query: &str) -> Vec<T>
where
    T: CatalogEntry + Clone,
    S: AsRef<str>,
{
    suggest_with_rng(catalog, known_genres, known_languages, query, &mut rand::thread_rng())
}

/// Best-effort suggestions for a query that found nothing exact.
///
/// Tiers, first non-empty wins: title word / genre / language match, then
/// titles sharing the query's first letter, then a random pick of the whole
/// catalog. Only an empty catalog yields nothing.
pub fn suggest_with_rng<T, S, R>(
    catalog: &[T],
    known_genres: &[S],
    known_languages: &[S],
    query: &str,
    rng: &mut R,
) -> Vec<T>
where
    T: CatalogEntry + Clone,
    S: AsRef<str>,
    R: Rng + ?Sized,
{
    let lowered = query.to_lowercase();
    let words: Vec<&str> = lowered
        .split_whitespace()
        .filter(|w| w.chars().count() >= MIN_TOKEN_LEN)
        .collect();

    // Last match wins when several labels occur in the query.
    let genre = last_label_in(known_genres, &lowered);
    let language = last_label_in(known_languages, &lowered);

    let mut found: Vec<T> = catalog
        .iter()
        .filter(|item| {
            let title = item.title().to_lowercase();
            words.iter().any(|w| title.contains(w))
                || genre.is_some_and(|g| item.genre() == g)
                || language.is_some_and(|l| item.language() == l)
        })
        .cloned()
        .collect();

    if found.is_empty() {
        if let Some(first) = query.chars().next() {
            let first: String = first.to_lowercase().collect();
            debug!(%first, "no partial match, trying first letter");
            found = catalog
                .iter()
                .filter(|item| {
                    item.title()
                        .chars()
                        .next()
                        .is_some_and(|c| c.to_lowercase().eq(first.chars()))
                })
                .cloned()
                .collect();
            if found.len() > MAX_RESULTS {
                found = found.choose_multiple(rng, MAX_RESULTS).cloned().collect();
            }
        }
    }

    if found.is_empty() {
        debug!("no heuristic match, sampling catalog");
        found = catalog.choose_multiple(rng, MAX_RESULTS).cloned().collect();
    }

    found.truncate(MAX_RESULTS);
    found
}

fn last_label_in<'a, S: AsRef<str>>(labels: &'a [S], lowered_query: &str) -> Option<&'a str> {
    labels
        .iter()
        .map(|l| l.as_ref())
        .filter(|l| lowered_query.contains(&l.to_lowercase()))
        .last()
        .filter(|l| !l.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::entry::testutil::{entry, ids, Entry};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn catalog() -> Vec<Entry> {
        vec![
            entry("The Matrix", "Sci-Fi", "English", 1999),
            entry("Amelie", "Comedy", "French", 2001),
            entry("Matrimonio all'italiana", "Comedy", "Italian", 1964),
            entry("Oldboy", "Thriller", "Korean", 2003),
            entry("Xanadu", "Musical", "English", 1980),
        ]
    }

    fn labels(xs: &[&str]) -> Vec<String> {
        xs.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_title_token_match() {
        let got = suggest_with_rng(&catalog(), &labels(&[]), &labels(&[]), "matri of", &mut rng());
        assert_eq!(ids(&got), vec!["the-matrix", "matrimonio-all'italiana"]);
    }

    #[test]
    fn test_short_tokens_ignored() {
        // "ol" is too short to match "Oldboy"; falls to first letter 'o'.
        let got = suggest_with_rng(&catalog(), &labels(&[]), &labels(&[]), "ol", &mut rng());
        assert_eq!(ids(&got), vec!["oldboy"]);
    }

    #[test]
    fn test_genre_and_language_inferred() {
        let genres = labels(&["Sci-Fi", "Comedy", "Thriller"]);
        let languages = labels(&["English", "Korean"]);
        let got = suggest_with_rng(&catalog(), &genres, &languages, "funny comedy in korean", &mut rng());
        assert_eq!(ids(&got), vec!["amelie", "matrimonio-all'italiana", "oldboy"]);
    }

    #[test]
    fn test_last_matching_label_wins() {
        let genres = labels(&["Comedy", "Musical"]);
        let got = suggest_with_rng(&catalog(), &genres, &labels(&[]), "musical comedy", &mut rng());
        assert_eq!(ids(&got), vec!["xanadu"]);
    }

    #[test]
    fn test_blank_label_matches_nothing() {
        let catalog = vec![
            entry("Amelie", "Comedy", "French", 2001),
            entry("Untagged", "", "", 2010),
            entry("Heat", "", "English", 1995),
        ];
        let genres = labels(&["Comedy", ""]);
        let languages = labels(&["French", ""]);
        let got = suggest_with_rng(&catalog, &genres, &languages, "heat comedy", &mut rng());
        assert_eq!(ids(&got), vec!["heat"]);
    }

    #[test]
    fn test_first_letter_fallback() {
        let genres = labels(&["Comedy"]);
        let languages = labels(&["French"]);
        let got = suggest_with_rng(&catalog(), &genres, &languages, "xyz123", &mut rng());
        assert_eq!(ids(&got), vec!["xanadu"]);
    }

    #[test]
    fn test_first_letter_is_raw_first_char() {
        let got = suggest_with_rng(&catalog(), &labels(&[]), &labels(&[]), " xyz123", &mut rng());
        assert_eq!(got.len(), MAX_RESULTS);
    }

    #[test]
    fn test_first_letter_fallback_sampled() {
        let many: Vec<Entry> = (0..12).map(|i| entry(&format!("Zed {}", i), "Drama", "German", 2000)).collect();
        let got = suggest_with_rng(&many, &labels(&[]), &labels(&[]), "zz", &mut rng());
        assert_eq!(got.len(), MAX_RESULTS);
        assert!(got.iter().all(|e| many.contains(e)));
    }

    #[test]
    fn test_random_fill_when_nothing_matches() {
        let got = suggest_with_rng(&catalog(), &labels(&["Comedy"]), &labels(&["French"]), "qqq", &mut rng());
        assert_eq!(got.len(), MAX_RESULTS);
        let catalog = catalog();
        assert!(got.iter().all(|e| catalog.contains(e)));

        let got = suggest_with_rng(&catalog[..2], &labels(&[]), &labels(&[]), "", &mut rng());
        assert_eq!(got.len(), 2);
    }

    #[test]
    fn test_empty_catalog() {
        let empty: Vec<Entry> = Vec::new();
        assert!(suggest(&empty, &labels(&["Comedy"]), &labels(&[]), "comedy").is_empty());
    }

    #[test]
    fn test_bounded() {
        let many: Vec<Entry> = (0..30).map(|i| entry(&format!("Comedy {}", i), "Comedy", "English", 2000)).collect();
        let got = suggest(&many, &labels(&["Comedy"]), &labels(&[]), "comedy");
        assert_eq!(got.len(), MAX_RESULTS);
    }
}
