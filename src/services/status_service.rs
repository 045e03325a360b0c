//! Domain service for per-account recipe completion status.

use thiserror::Error;

/// Completion state of a recipe for one account. Stored as its integer value;
/// absent rows read as [`StatusValue::NotOwned`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusValue {
    #[default]
    NotOwned,
    Owned,
    Cooked,
}

impl StatusValue {
    pub const ALL: [Self; 3] = [Self::NotOwned, Self::Owned, Self::Cooked];

    #[must_use]
    pub const fn value(self) -> i32 {
        match self {
            Self::NotOwned => 0,
            Self::Owned => 1,
            Self::Cooked => 2,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NotOwned => "Not Owned",
            Self::Owned => "Owned",
            Self::Cooked => "Cooked",
        }
    }
}

impl TryFrom<i64> for StatusValue {
    type Error = i64;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::NotOwned),
            1 => Ok(Self::Owned),
            2 => Ok(Self::Cooked),
            other => Err(other),
        }
    }
}

/// Errors specific to status-tracking operations.
#[derive(Debug, Error)]
pub enum StatusError {
    #[error("Invalid status value: {0}")]
    InvalidStatus(i64),

    #[error("Recipe not found: {0}")]
    RecipeNotFound(i32),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for StatusError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for StatusError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Domain service trait for status tracking. The account id always comes from
/// the authenticated session at the call site, never from request payloads.
#[async_trait::async_trait]
pub trait StatusService: Send + Sync {
    /// Current status of a recipe for an account; a pair that was never
    /// written reads as [`StatusValue::NotOwned`].
    async fn status_for(
        &self,
        account_id: i32,
        recipe_id: i32,
    ) -> Result<StatusValue, StatusError>;

    /// Validates `value` and writes it for the pair, creating the row on
    /// first write and updating it in place afterwards. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`StatusError::InvalidStatus`] when `value` is not 0, 1 or 2,
    /// and [`StatusError::RecipeNotFound`] for an unknown recipe.
    async fn set_status(
        &self,
        account_id: i32,
        recipe_id: i32,
        value: i64,
    ) -> Result<StatusValue, StatusError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_round_trips() {
        for status in StatusValue::ALL {
            assert_eq!(StatusValue::try_from(i64::from(status.value())), Ok(status));
        }
    }

    #[test]
    fn rejects_values_outside_range() {
        assert_eq!(StatusValue::try_from(-1), Err(-1));
        assert_eq!(StatusValue::try_from(3), Err(3));
        assert_eq!(StatusValue::try_from(i64::MAX), Err(i64::MAX));
    }

    #[test]
    fn labels_match_display_contract() {
        assert_eq!(StatusValue::NotOwned.label(), "Not Owned");
        assert_eq!(StatusValue::Owned.label(), "Owned");
        assert_eq!(StatusValue::Cooked.label(), "Cooked");
    }

    #[test]
    fn default_is_not_owned() {
        assert_eq!(StatusValue::default(), StatusValue::NotOwned);
        assert_eq!(StatusValue::default().value(), 0);
    }
}
