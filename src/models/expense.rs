use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::validation::validate_positive_amount;

/// Expense entity representing a single expense record owned by a user
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Expense {
    pub id: i32,
    pub amount: Decimal,
    pub description: String,
    #[schema(format = "date", example = "2024-01-15")]
    pub date: NaiveDate,
    pub user_id: i32,
}

/// Request payload for creating a new expense
///
/// The owning user is taken from the verified token, not the body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[schema(example = json!({
    "amount": 12.50,
    "description": "lunch",
    "date": "2024-01-15"
}))]
pub struct CreateExpenseRequest {
    #[validate(custom(function = "validate_positive_amount"))]
    #[schema(value_type = f64, minimum = 0.01, example = 12.50)]
    pub amount: Decimal,

    pub description: String,

    #[schema(format = "date", example = "2024-01-15")]
    pub date: NaiveDate,
}

/// Query parameters for listing expenses
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct ExpenseListParams {
    /// Identifier of the user whose expenses are listed
    pub user_id: i32,
}
