use serde::{Deserialize, Serialize};

use crate::db::{Movie, User};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
    pub success: bool,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self { message: message.into(), success: true }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self { message: message.into(), success: false }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DataResponse<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: T,
    pub success: bool,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self { message: None, data, success: true }
    }

    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self { message: Some(message.into()), data, success: true }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MovieList {
    pub movies: Vec<Movie>,
    pub total: usize,
    pub success: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResults {
    pub movies: Vec<Movie>,
    /// True when nothing matched exactly and `movies` are fallback suggestions.
    pub suggested: bool,
    pub success: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResults {
    pub movies: Vec<Movie>,
    pub applied_filters: Vec<String>,
    pub success: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct FacetList {
    pub genres: Vec<String>,
    pub languages: Vec<String>,
    pub success: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserInfo {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        Self { id: user.id, name: user.name, email: user.email }
    }
}
