use serde::{Deserialize, Serialize};

use crate::{
    users::User,
    validation::{normalize_email, validate_email, validate_length, Validate, ValidationError},
};

/// Request body for user registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl Validate for RegisterRequest {
    fn normalize(&mut self) {
        self.email = normalize_email(&self.email);
        self.name = self
            .name
            .take()
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
    }

    fn validate(&self) -> Result<(), ValidationError> {
        validate_email(&self.email)?;
        validate_length(&self.password, 6, 128, "password")?;
        if let Some(name) = &self.name {
            validate_length(name, 1, 100, "name")?;
        }
        Ok(())
    }
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl Validate for LoginRequest {
    fn normalize(&mut self) {
        self.email = normalize_email(&self.email);
    }

    fn validate(&self) -> Result<(), ValidationError> {
        validate_email(&self.email)?;
        if self.password.is_empty() {
            return Err(ValidationError::new("password", "is required"));
        }
        Ok(())
    }
}

/// `data` of a successful register or login.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthPayload {
    pub user: User,
    pub token: String,
}

/// `data` of the profile endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProfilePayload {
    pub user: User,
}
