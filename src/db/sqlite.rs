use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::model::*;
use super::repo::*;

const MOVIE_COLUMNS: &str = "id, name, plot, genre, language, releasedate, posters, \
     hero, heroine, director, createdby, created, updated";

pub struct SqliteRepository {
    pool: SqlitePool,
    token_cache: Arc<RwLock<HashMap<String, AccessToken>>>,
}

#[derive(sqlx::FromRow)]
struct MovieRow {
    id: String,
    name: String,
    plot: String,
    genre: String,
    language: String,
    releasedate: String,
    posters: String,
    hero: Option<String>,
    heroine: Option<String>,
    director: Option<String>,
    createdby: Option<String>,
    created: Option<DateTime<Utc>>,
    updated: Option<DateTime<Utc>>,
}

impl TryFrom<MovieRow> for Movie {
    type Error = DbError;

    fn try_from(row: MovieRow) -> Result<Self, Self::Error> {
        Ok(Movie {
            id: row.id,
            name: row.name,
            plot: row.plot,
            genre: row.genre,
            language: row.language,
            release_date: row.releasedate,
            posters: serde_json::from_str(&row.posters)?,
            hero: row.hero,
            heroine: row.heroine,
            director: row.director,
            created_by: row.createdby,
            created_at: row.created,
            updated_at: row.updated,
        })
    }
}

impl SqliteRepository {
    pub async fn new(db_path: &str) -> DbResult<Self> {
        let options = SqliteConnectOptions::from_str(db_path)?.create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        let repo = Self {
            pool,
            token_cache: Arc::new(RwLock::new(HashMap::new())),
        };

        repo.init_schema().await?;

        info!("Database initialized at {}", db_path);

        Ok(repo)
    }

    async fn init_schema(&self) -> DbResult<()> {
        let schema = include_str!("schema.sql");
        sqlx::raw_sql(schema).execute(&self.pool).await?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl UserRepo for SqliteRepository {
    async fn get_user_by_email(&self, email: &str) -> DbResult<User> {
        sqlx::query_as::<_, User>(
            "SELECT id, name, email, password, created FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => DbError::NotFound(format!("User not found: {}", email)),
            _ => DbError::Sqlx(e),
        })
    }

    async fn get_user_by_id(&self, id: &str) -> DbResult<User> {
        sqlx::query_as::<_, User>(
            "SELECT id, name, email, password, created FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => DbError::NotFound(format!("User not found: {}", id)),
            _ => DbError::Sqlx(e),
        })
    }

    async fn create_user(&self, user: &User) -> DbResult<()> {
        // The UNIQUE email column decides; concurrent registrations race on it.
        sqlx::query("INSERT INTO users (id, name, email, password, created) VALUES (?, ?, ?, ?, ?)")
            .bind(&user.id)
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password)
            .bind(user.created)
            .execute(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref dbe) if dbe.is_unique_violation() => {
                    DbError::AlreadyExists(format!("User already exists: {}", user.email))
                }
                _ => DbError::Sqlx(e),
            })?;
        Ok(())
    }
}

#[async_trait]
impl AccessTokenRepo for SqliteRepository {
    async fn get_token(&self, token: &str) -> DbResult<AccessToken> {
        {
            let cache = self.token_cache.read().await;
            if let Some(t) = cache.get(token) {
                return Ok(t.clone());
            }
        }

        let access_token = sqlx::query_as::<_, AccessToken>(
            "SELECT token, userid, created, lastused FROM accesstokens WHERE token = ?",
        )
        .bind(token)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => DbError::NotFound("Token not found".to_string()),
            _ => DbError::Sqlx(e),
        })?;

        let mut cache = self.token_cache.write().await;
        cache.insert(token.to_string(), access_token.clone());

        Ok(access_token)
    }

    async fn upsert_token(&self, token: &AccessToken) -> DbResult<()> {
        sqlx::query(
            "INSERT OR REPLACE INTO accesstokens (token, userid, created, lastused) VALUES (?, ?, ?, ?)",
        )
        .bind(&token.token)
        .bind(&token.userid)
        .bind(token.created)
        .bind(token.lastused)
        .execute(&self.pool)
        .await?;

        let mut cache = self.token_cache.write().await;
        cache.insert(token.token.clone(), token.clone());
        Ok(())
    }

    async fn delete_token(&self, token: &str) -> DbResult<()> {
        {
            let mut cache = self.token_cache.write().await;
            cache.remove(token);
        }

        sqlx::query("DELETE FROM accesstokens WHERE token = ?")
            .bind(token)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl MovieRepo for SqliteRepository {
    async fn list_movies(&self) -> DbResult<Vec<Movie>> {
        let rows = sqlx::query_as::<_, MovieRow>(&format!(
            "SELECT {} FROM movies ORDER BY seq",
            MOVIE_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        debug!("Loaded {} movies", rows.len());
        rows.into_iter().map(Movie::try_from).collect()
    }

    async fn get_movie(&self, id: &str) -> DbResult<Movie> {
        let row = sqlx::query_as::<_, MovieRow>(&format!(
            "SELECT {} FROM movies WHERE id = ?",
            MOVIE_COLUMNS
        ))
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => DbError::NotFound(format!("Movie not found: {}", id)),
            _ => DbError::Sqlx(e),
        })?;

        Movie::try_from(row)
    }

    async fn create_movie(&self, movie: &Movie) -> DbResult<()> {
        sqlx::query(&format!(
            "INSERT INTO movies ({}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            MOVIE_COLUMNS
        ))
        .bind(&movie.id)
        .bind(&movie.name)
        .bind(&movie.plot)
        .bind(&movie.genre)
        .bind(&movie.language)
        .bind(&movie.release_date)
        .bind(serde_json::to_string(&movie.posters)?)
        .bind(&movie.hero)
        .bind(&movie.heroine)
        .bind(&movie.director)
        .bind(&movie.created_by)
        .bind(movie.created_at)
        .bind(movie.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update_movie(&self, movie: &Movie) -> DbResult<()> {
        let result = sqlx::query(
            "UPDATE movies SET name = ?, plot = ?, genre = ?, language = ?, releasedate = ?, \
             posters = ?, hero = ?, heroine = ?, director = ?, updated = ? WHERE id = ?",
        )
        .bind(&movie.name)
        .bind(&movie.plot)
        .bind(&movie.genre)
        .bind(&movie.language)
        .bind(&movie.release_date)
        .bind(serde_json::to_string(&movie.posters)?)
        .bind(&movie.hero)
        .bind(&movie.heroine)
        .bind(&movie.director)
        .bind(movie.updated_at)
        .bind(&movie.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound(format!("Movie not found: {}", movie.id)));
        }
        Ok(())
    }

    async fn delete_movie(&self, id: &str) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM movies WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound(format!("Movie not found: {}", id)));
        }
        Ok(())
    }
}
