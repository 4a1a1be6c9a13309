//! Caller identity as established by the upstream auth gateway.
//!
//! The gateway authenticates the request and forwards `x-user-id` and `x-user-role`.
//! This service only authorizes: role checks here, ownership checks in `access`.

use std::fmt;
use std::str::FromStr;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_ROLE_HEADER: &str = "x-user-role";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Company,
    Applicant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Company => "company",
            Role::Applicant => "applicant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "company" => Ok(Role::Company),
            "applicant" => Ok(Role::Applicant),
            other => Err(format!("unknown role '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub role: Role,
}

impl AuthUser {
    pub fn require(&self, role: Role) -> Result<(), AppError> {
        if self.role == role {
            Ok(())
        } else {
            Err(AppError::Forbidden)
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = |name: &str| {
            parts
                .headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .ok_or_else(|| AppError::Unauthorized(format!("missing {name} header")))
        };

        let user_id = Uuid::parse_str(header(USER_ID_HEADER)?.trim())
            .map_err(|_| AppError::Unauthorized(format!("invalid {USER_ID_HEADER} header")))?;
        let role = header(USER_ROLE_HEADER)?
            .parse::<Role>()
            .map_err(AppError::Unauthorized)?;

        Ok(AuthUser { user_id, role })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(headers: &[(&str, &str)]) -> Result<AuthUser, AppError> {
        let mut builder = Request::builder().uri("/");
        for (k, v) in headers {
            builder = builder.header(*k, *v);
        }
        let (mut parts, _) = builder.body(()).unwrap().into_parts();
        AuthUser::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_valid_headers_extract_user() {
        let id = Uuid::new_v4();
        let user = extract(&[
            (USER_ID_HEADER, &id.to_string()),
            (USER_ROLE_HEADER, "Company"),
        ])
        .await
        .unwrap();
        assert_eq!(user.user_id, id);
        assert_eq!(user.role, Role::Company);
    }

    #[tokio::test]
    async fn test_missing_headers_are_unauthorized() {
        let err = extract(&[]).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_bad_role_is_unauthorized() {
        let err = extract(&[
            (USER_ID_HEADER, &Uuid::new_v4().to_string()),
            (USER_ROLE_HEADER, "admin"),
        ])
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(msg) if msg.contains("admin")));
    }

    #[tokio::test]
    async fn test_bad_user_id_is_unauthorized() {
        let err = extract(&[(USER_ID_HEADER, "42"), (USER_ROLE_HEADER, "applicant")])
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[test]
    fn test_require_role() {
        let user = AuthUser {
            user_id: Uuid::new_v4(),
            role: Role::Applicant,
        };
        assert!(user.require(Role::Applicant).is_ok());
        assert!(matches!(user.require(Role::Company), Err(AppError::Forbidden)));
    }
}
