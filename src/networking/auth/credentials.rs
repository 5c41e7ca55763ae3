//! API credentials and client identification headers
//!
//! Every request carries a `User-Agent` and an `X-CLIENT` header naming the
//! integration; authenticated requests add `X-API-USER` and `X-API-KEY`.

use crate::networking::{HabiticaError, HabiticaResult};
use crate::{APP_NAME, VERSION};
use uuid::Uuid;

pub const HEADER_API_USER: &str = "x-api-user";
pub const HEADER_API_KEY: &str = "x-api-key";
pub const HEADER_CLIENT: &str = "x-client";

/// User id of the library author, used in the default `X-CLIENT` header.
/// Applications should register their own and set `x_client`.
pub const DEVELOPER_ID: &str = "4c4ca53f-c059-4ffa-966e-9d29dd405daf";

/// User id and API token pair
#[derive(Clone, PartialEq, Eq)]
pub struct ApiCredentials {
    pub api_user: String,
    pub api_key: String,
}

impl std::fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("api_user", &self.api_user)
            .field("api_key", &"***")
            .finish()
    }
}

impl ApiCredentials {
    pub fn new(api_user: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_user: api_user.into(),
            api_key: api_key.into(),
        }
    }

    /// Accept both values or neither; one without the other is a mistake
    pub fn from_parts(api_user: Option<&str>, api_key: Option<&str>) -> HabiticaResult<Option<Self>> {
        match (api_user, api_key) {
            (Some(user), Some(key)) => Ok(Some(Self::new(user, key))),
            (None, None) => Ok(None),
            _ => Err(HabiticaError::config(
                "Both 'api_user' and 'api_key' must be provided together.",
            )),
        }
    }
}

/// `User-Agent` naming this library, its version and the platform
pub fn user_agent() -> String {
    format!(
        "{}/{} ({}; {}) reqwest",
        APP_NAME,
        VERSION,
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}

/// Validate a custom `X-CLIENT` value or build the default one.
///
/// Custom values must start with the developer's user id (a UUID), e.g.
/// `"123e4567-e89b-12d3-a456-426614174000 - MyHabiticaApp"`.
pub fn x_client(custom: Option<&str>) -> HabiticaResult<String> {
    match custom {
        Some(value) => {
            let id = value.get(..36).unwrap_or(value);
            Uuid::parse_str(id).map_err(|_| {
                HabiticaError::config(
                    "Invalid User ID provided in x-client. Expected a valid UUID format. \
                     Please ensure the User ID is correct",
                )
            })?;
            Ok(value.to_string())
        }
        None => Ok(format!("{} - {}/{}", DEVELOPER_ID, APP_NAME, VERSION)),
    }
}
