use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub created: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AccessToken {
    pub token: String,
    pub userid: String,
    pub created: Option<DateTime<Utc>>,
    pub lastused: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub plot: String,
    pub genre: String,
    pub language: String,
    pub release_date: String,
    #[serde(default)]
    pub posters: Vec<String>,
    #[serde(default)]
    pub hero: Option<String>,
    #[serde(default)]
    pub heroine: Option<String>,
    #[serde(default)]
    pub director: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Movie {
    /// Parsed release date. Accepts a plain `YYYY-MM-DD` date or a full
    /// RFC 3339 timestamp; anything else has no date.
    pub fn released_on(&self) -> Option<NaiveDate> {
        let date = self.release_date.trim();
        if let Ok(d) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
            return Some(d);
        }
        DateTime::parse_from_rfc3339(date)
            .ok()
            .map(|dt| dt.with_timezone(&Utc).date_naive())
    }

    pub fn release_year(&self) -> Option<i32> {
        self.released_on().map(|d| d.year())
    }
}

/// Fields accepted when a movie is created.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMovie {
    pub name: String,
    #[serde(default)]
    pub plot: String,
    pub genre: String,
    pub language: String,
    pub release_date: String,
    #[serde(default)]
    pub posters: Vec<String>,
    #[serde(default)]
    pub hero: Option<String>,
    #[serde(default)]
    pub heroine: Option<String>,
    #[serde(default)]
    pub director: Option<String>,
}

impl NewMovie {
    pub fn into_movie(self, created_by: Option<String>) -> Movie {
        let now = Utc::now();
        Movie {
            id: uuid::Uuid::new_v4().to_string(),
            name: self.name,
            plot: self.plot,
            genre: self.genre,
            language: self.language,
            release_date: self.release_date,
            posters: self.posters,
            hero: self.hero,
            heroine: self.heroine,
            director: self.director,
            created_by,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }
}

/// Partial update; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieUpdate {
    pub name: Option<String>,
    pub plot: Option<String>,
    pub genre: Option<String>,
    pub language: Option<String>,
    pub release_date: Option<String>,
    pub posters: Option<Vec<String>>,
    pub hero: Option<String>,
    pub heroine: Option<String>,
    pub director: Option<String>,
}

impl MovieUpdate {
    pub fn apply(self, movie: &mut Movie) {
        if let Some(name) = self.name {
            movie.name = name;
        }
        if let Some(plot) = self.plot {
            movie.plot = plot;
        }
        if let Some(genre) = self.genre {
            movie.genre = genre;
        }
        if let Some(language) = self.language {
            movie.language = language;
        }
        if let Some(release_date) = self.release_date {
            movie.release_date = release_date;
        }
        if let Some(posters) = self.posters {
            movie.posters = posters;
        }
        if self.hero.is_some() {
            movie.hero = self.hero;
        }
        if self.heroine.is_some() {
            movie.heroine = self.heroine;
        }
        if self.director.is_some() {
            movie.director = self.director;
        }
        movie.updated_at = Some(Utc::now());
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("Column decode error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Already exists: {0}")]
    AlreadyExists(String),
}

pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(release_date: &str) -> Movie {
        NewMovie {
            name: "Heat".to_string(),
            plot: String::new(),
            genre: "Crime".to_string(),
            language: "English".to_string(),
            release_date: release_date.to_string(),
            posters: vec![],
            hero: None,
            heroine: None,
            director: None,
        }
        .into_movie(None)
    }

    #[test]
    fn test_release_year() {
        assert_eq!(movie("1995-12-15").release_year(), Some(1995));
        assert_eq!(movie("1995-12-15T00:00:00.000Z").release_year(), Some(1995));
        assert_eq!(movie("sometime in 1995").release_year(), None);
        assert_eq!(movie("").release_year(), None);
    }

    #[test]
    fn test_update_keeps_absent_fields() {
        let mut m = movie("1995-12-15");
        let update = MovieUpdate {
            genre: Some("Thriller".to_string()),
            director: Some("Michael Mann".to_string()),
            ..Default::default()
        };
        update.apply(&mut m);
        assert_eq!(m.genre, "Thriller");
        assert_eq!(m.director.as_deref(), Some("Michael Mann"));
        assert_eq!(m.name, "Heat");
        assert_eq!(m.language, "English");
    }
}
