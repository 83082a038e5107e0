//! Wire types for the HR API endpoints that do not map onto a domain type.

use serde::{Deserialize, Serialize};

use crate::domain::{InternshipStatus, Role};

#[derive(Debug, Serialize)]
pub(super) struct LoginRequestDto<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Serialize)]
pub(super) struct AccessRequestDto<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub user_type: Role,
}

#[derive(Debug, Serialize)]
pub(super) struct RefreshRequestDto<'a> {
    pub refresh: &'a str,
}

#[derive(Deserialize)]
pub(super) struct TokenPairDto {
    pub access: String,
    pub refresh: String,
}

#[derive(Deserialize)]
pub(super) struct AccessTokenDto {
    pub access: String,
}

#[derive(Debug, Serialize)]
pub(super) struct ChangeStatusDto {
    pub status: InternshipStatus,
}
