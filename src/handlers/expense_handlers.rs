use axum::{
    Json,
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use validator::Validate;

use crate::handlers::{ErrorResponse, validation_error_response};
use crate::middleware::auth_middleware::AuthenticatedUser;
use crate::models::expense::{CreateExpenseRequest, Expense, ExpenseListParams};
use crate::services::expense_service::{ExpenseError, ExpenseService};

/// Convert ExpenseError to HTTP response
impl IntoResponse for ExpenseError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            ExpenseError::NotFound => (
                StatusCode::NOT_FOUND,
                "expense_not_found",
                "Expense not found",
            ),
            ExpenseError::DatabaseError(ref msg) => {
                tracing::error!(error = %msg, "expense operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    msg.as_str(),
                )
            }
        };

        let error_response = ErrorResponse::new(error_type, message);
        (status, Json(error_response)).into_response()
    }
}

/// Handler for listing expenses
///
/// Returns all expenses for the user named in the query, in storage order.
#[utoipa::path(
    get,
    path = "/expenses",
    params(ExpenseListParams),
    responses(
        (status = 200, description = "List of expenses", body = Vec<Expense>),
        (status = 401, description = "Missing authentication token", body = ErrorResponse),
        (status = 403, description = "Invalid token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("api_token" = [])
    ),
    tag = "expenses"
)]
pub async fn list_expenses_handler(
    State(expense_service): State<Arc<dyn ExpenseService>>,
    Query(params): Query<ExpenseListParams>,
) -> Result<Json<Vec<Expense>>, Response> {
    match expense_service.list_expenses(params.user_id).await {
        Ok(expenses) => Ok(Json(expenses)),
        Err(e) => Err(e.into_response()),
    }
}

/// Handler for creating an expense
///
/// Creates a new expense owned by the authenticated user.
#[utoipa::path(
    post,
    path = "/expenses",
    request_body = CreateExpenseRequest,
    responses(
        (status = 201, description = "Expense successfully created", body = Expense),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Missing authentication token", body = ErrorResponse),
        (status = 403, description = "Invalid token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("api_token" = [])
    ),
    tag = "expenses"
)]
pub async fn create_expense_handler(
    State(expense_service): State<Arc<dyn ExpenseService>>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateExpenseRequest>,
) -> Result<(StatusCode, Json<Expense>), Response> {
    if let Err(validation_errors) = request.validate() {
        return Err(validation_error_response(&validation_errors));
    }

    match expense_service
        .add_expense(auth_user.user_id, request)
        .await
    {
        Ok(expense) => Ok((StatusCode::CREATED, Json(expense))),
        Err(e) => Err(e.into_response()),
    }
}

/// Handler for deleting an expense
///
/// Deletes an expense owned by the authenticated user and returns the
/// deleted row's prior contents.
#[utoipa::path(
    delete,
    path = "/expenses/{id}",
    params(
        ("id" = i32, Path, description = "Expense ID")
    ),
    responses(
        (status = 200, description = "Deleted expense", body = Expense),
        (status = 401, description = "Missing authentication token", body = ErrorResponse),
        (status = 403, description = "Invalid token", body = ErrorResponse),
        (status = 404, description = "Expense not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("api_token" = [])
    ),
    tag = "expenses"
)]
pub async fn delete_expense_handler(
    State(expense_service): State<Arc<dyn ExpenseService>>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(expense_id): Path<i32>,
) -> Result<Json<Expense>, Response> {
    match expense_service
        .delete_expense(auth_user.user_id, expense_id)
        .await
    {
        Ok(expense) => Ok(Json(expense)),
        Err(e) => Err(e.into_response()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::RepositoryError;
    use crate::repositories::expense_repository::ExpenseRepository;
    use crate::services::expense_service::ExpenseServiceImpl;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::collections::HashMap;
    use std::str::FromStr;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicI32, Ordering};

    // Mock repository for testing
    struct MockExpenseRepository {
        expenses: Mutex<HashMap<i32, Expense>>,
        next_id: AtomicI32,
    }

    impl MockExpenseRepository {
        fn new() -> Self {
            Self {
                expenses: Mutex::new(HashMap::new()),
                next_id: AtomicI32::new(1),
            }
        }
    }

    #[async_trait]
    impl ExpenseRepository for MockExpenseRepository {
        async fn create(
            &self,
            user_id: i32,
            amount: Decimal,
            description: String,
            date: NaiveDate,
        ) -> Result<Expense, RepositoryError> {
            let mut expenses = self.expenses.lock().unwrap();

            let expense = Expense {
                id: self.next_id.fetch_add(1, Ordering::SeqCst),
                amount,
                description,
                date,
                user_id,
            };

            expenses.insert(expense.id, expense.clone());
            Ok(expense)
        }

        async fn find_by_user(&self, user_id: i32) -> Result<Vec<Expense>, RepositoryError> {
            let expenses = self.expenses.lock().unwrap();
            let mut found: Vec<Expense> = expenses
                .values()
                .filter(|e| e.user_id == user_id)
                .cloned()
                .collect();
            found.sort_by_key(|e| e.id);
            Ok(found)
        }

        async fn delete(&self, id: i32, user_id: i32) -> Result<Expense, RepositoryError> {
            let mut expenses = self.expenses.lock().unwrap();

            match expenses.get(&id) {
                Some(e) if e.user_id == user_id => Ok(expenses.remove(&id).unwrap()),
                _ => Err(RepositoryError::NotFound),
            }
        }
    }

    fn test_expense_service() -> Arc<dyn ExpenseService> {
        Arc::new(ExpenseServiceImpl::new(Arc::new(
            MockExpenseRepository::new(),
        )))
    }

    fn lunch_request() -> CreateExpenseRequest {
        CreateExpenseRequest {
            amount: Decimal::from_str("12.5").unwrap(),
            description: "lunch".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_create_expense_handler_success() {
        let service = test_expense_service();

        let result = create_expense_handler(
            State(service),
            Extension(AuthenticatedUser { user_id: 1 }),
            Json(lunch_request()),
        )
        .await;
        assert!(result.is_ok());

        let (status, Json(expense)) = result.unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(expense.amount, Decimal::from_str("12.5").unwrap());
        assert_eq!(expense.description, "lunch");
        assert_eq!(expense.user_id, 1);
    }

    #[tokio::test]
    async fn test_create_expense_handler_rejects_negative_amount() {
        let service = test_expense_service();

        let request = CreateExpenseRequest {
            amount: Decimal::from_str("-5.00").unwrap(),
            description: "refund".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        };

        let result = create_expense_handler(
            State(service),
            Extension(AuthenticatedUser { user_id: 1 }),
            Json(request),
        )
        .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_list_expenses_handler_scoped_by_user() {
        let service = test_expense_service();

        let _ = create_expense_handler(
            State(service.clone()),
            Extension(AuthenticatedUser { user_id: 1 }),
            Json(lunch_request()),
        )
        .await;

        let result = list_expenses_handler(
            State(service.clone()),
            Query(ExpenseListParams { user_id: 1 }),
        )
        .await;
        let Json(expenses) = result.unwrap();
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].description, "lunch");

        let result =
            list_expenses_handler(State(service), Query(ExpenseListParams { user_id: 2 })).await;
        let Json(expenses) = result.unwrap();
        assert!(expenses.is_empty());
    }

    #[tokio::test]
    async fn test_delete_expense_handler_returns_deleted_row() {
        let service = test_expense_service();

        let (_, Json(created)) = create_expense_handler(
            State(service.clone()),
            Extension(AuthenticatedUser { user_id: 1 }),
            Json(lunch_request()),
        )
        .await
        .unwrap();

        let result = delete_expense_handler(
            State(service.clone()),
            Extension(AuthenticatedUser { user_id: 1 }),
            Path(created.id),
        )
        .await;
        assert!(result.is_ok());

        let Json(deleted) = result.unwrap();
        assert_eq!(deleted.id, created.id);
        assert_eq!(deleted.description, "lunch");

        let Json(expenses) = list_expenses_handler(
            State(service),
            Query(ExpenseListParams { user_id: 1 }),
        )
        .await
        .unwrap();
        assert!(expenses.is_empty());
    }

    #[tokio::test]
    async fn test_delete_expense_handler_not_found() {
        let service = test_expense_service();

        let result = delete_expense_handler(
            State(service),
            Extension(AuthenticatedUser { user_id: 1 }),
            Path(999),
        )
        .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_delete_expense_handler_scoped_to_owner() {
        let service = test_expense_service();

        let (_, Json(created)) = create_expense_handler(
            State(service.clone()),
            Extension(AuthenticatedUser { user_id: 1 }),
            Json(lunch_request()),
        )
        .await
        .unwrap();

        // Another user cannot delete the row
        let result = delete_expense_handler(
            State(service),
            Extension(AuthenticatedUser { user_id: 2 }),
            Path(created.id),
        )
        .await;
        assert!(result.is_err());
    }
}
