use async_trait::async_trait;

use super::model::*;

#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn get_user_by_email(&self, email: &str) -> DbResult<User>;
    async fn get_user_by_id(&self, id: &str) -> DbResult<User>;
    async fn create_user(&self, user: &User) -> DbResult<()>;
}

#[async_trait]
pub trait AccessTokenRepo: Send + Sync {
    async fn get_token(&self, token: &str) -> DbResult<AccessToken>;
    async fn upsert_token(&self, token: &AccessToken) -> DbResult<()>;
    async fn delete_token(&self, token: &str) -> DbResult<()>;
}

#[async_trait]
pub trait MovieRepo: Send + Sync {
    /// Every movie in the catalog, oldest insert first.
    async fn list_movies(&self) -> DbResult<Vec<Movie>>;
    async fn get_movie(&self, id: &str) -> DbResult<Movie>;
    async fn create_movie(&self, movie: &Movie) -> DbResult<()>;
    async fn update_movie(&self, movie: &Movie) -> DbResult<()>;
    async fn delete_movie(&self, id: &str) -> DbResult<()>;
}

pub trait Repository: UserRepo + AccessTokenRepo + MovieRepo + Send + Sync {}

impl<T> Repository for T where T: UserRepo + AccessTokenRepo + MovieRepo + Send + Sync {}
