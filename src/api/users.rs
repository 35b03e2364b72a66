//! Session and User Endpoints
//!
//! Authentication lives on the server; the client only learns who is
//! logged in and which role flags they carry.

use serde::Serialize;

use super::{extract_one, required, success_message, valid_email, ApiClient, ApiError, Method};
use crate::models::User;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        valid_email(&self.email)?;
        required(&self.password, "Password")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    /// Owners register the same way and wait for admin approval
    pub is_owner: bool,
}

pub const MIN_PASSWORD_LEN: usize = 6;

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        required(&self.name, "Name")?;
        valid_email(&self.email)?;
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ApiError::Invalid(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }
        Ok(())
    }
}

impl ApiClient {
    /// Current session user. `Unauthorized` means nobody is logged in.
    pub async fn current_user(&self) -> Result<User, ApiError> {
        self.get_one("/user/me", "user").await
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<User, ApiError> {
        request.validate()?;
        let body = self.send_json(Method::Post, "/user/login", request).await?;
        extract_one(&body, "user")
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<User, ApiError> {
        request.validate()?;
        let body = self.send_json(Method::Post, "/user/register", request).await?;
        extract_one(&body, "user")
    }

    pub async fn logout(&self) -> Result<String, ApiError> {
        let body = self.send_empty(Method::Post, "/user/logout").await?;
        Ok(success_message(&body))
    }

    pub async fn admin_users(&self) -> Result<Vec<User>, ApiError> {
        self.get_collection("/admin/users", "users").await
    }

    pub async fn delete_user(&self, id: &str) -> Result<String, ApiError> {
        let body = self.send_empty(Method::Delete, &format!("/admin/users/{}", id)).await?;
        Ok(success_message(&body))
    }

    /// Flip the blocked flag; returns the updated record
    pub async fn toggle_block(&self, id: &str) -> Result<User, ApiError> {
        let body = self.send_empty(Method::Patch, &format!("/admin/users/{}/block", id)).await?;
        extract_one(&body, "user")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_validation() {
        let login = LoginRequest {
            email: "asha@example.com".into(),
            password: String::new(),
        };
        assert_eq!(login.validate().unwrap_err(), ApiError::Invalid("Password is required".to_string()));
    }

    #[test]
    fn test_register_password_length() {
        let register = RegisterRequest {
            name: "Asha".into(),
            email: "asha@example.com".into(),
            password: "12345".into(),
            is_owner: true,
        };
        assert!(register.validate().is_err());
        let register = RegisterRequest {
            password: "123456".into(),
            ..register
        };
        assert!(register.validate().is_ok());
        assert_eq!(serde_json::to_value(&register).unwrap()["isOwner"], true);
    }
}
