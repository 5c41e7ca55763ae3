use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Body of a successful local login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
    pub id: Uuid,
    pub api_token: String,
    #[serde(default)]
    pub new_user: bool,
    #[serde(default)]
    pub username: String,
}

/// Form fields posted to the local login endpoint
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}
