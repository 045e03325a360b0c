use serde::Serialize;

use crate::db::Account;
use crate::services::StatusValue;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RecipeDto {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct StatusChoiceDto {
    pub value: i32,
    pub label: &'static str,
}

impl From<StatusValue> for StatusChoiceDto {
    fn from(status: StatusValue) -> Self {
        Self {
            value: status.value(),
            label: status.label(),
        }
    }
}

/// Detail view data: everything the template layer needs, fully resolved.
#[derive(Debug, Serialize)]
pub struct RecipeDetailDto {
    pub id: i32,
    pub name: String,
    /// Ingredient names flattened into one display string ("Lettuce, Tomato").
    pub ingredients: String,
    pub status: i32,
    pub status_label: &'static str,
    pub status_choices: Vec<StatusChoiceDto>,
    pub authenticated: bool,
}

#[derive(Debug, Serialize)]
pub struct AccountDto {
    pub id: i32,
    pub username: String,
}

impl From<Account> for AccountDto {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            username: account.username,
        }
    }
}

/// What the login/register form pages need to know about the caller.
#[derive(Debug, Serialize)]
pub struct SessionStateDto {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<AccountDto>,
}
