use async_trait::async_trait;
use std::sync::Arc;

use crate::models::expense::{CreateExpenseRequest, Expense};
use crate::repositories::expense_repository::ExpenseRepository;
use crate::repositories::RepositoryError;

/// Expense service errors
#[derive(Debug, thiserror::Error)]
pub enum ExpenseError {
    #[error("Expense not found")]
    NotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<RepositoryError> for ExpenseError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::NotFound => Self::NotFound,
            RepositoryError::DatabaseError(msg) => Self::DatabaseError(msg),
            RepositoryError::ConstraintViolation(msg) => Self::DatabaseError(msg),
        }
    }
}

/// Trait defining expense service operations
///
/// All operations require a verified user identifier obtained from the
/// authentication gate.
#[async_trait]
pub trait ExpenseService: Send + Sync {
    /// List all expenses owned by a user; an empty list is not an error
    async fn list_expenses(&self, user_id: i32) -> Result<Vec<Expense>, ExpenseError>;

    /// Add a new expense owned by the user, returning the created row
    async fn add_expense(
        &self,
        user_id: i32,
        request: CreateExpenseRequest,
    ) -> Result<Expense, ExpenseError>;

    /// Delete an expense owned by the user, returning its prior contents
    async fn delete_expense(&self, user_id: i32, expense_id: i32)
        -> Result<Expense, ExpenseError>;
}

/// Implementation of ExpenseService
pub struct ExpenseServiceImpl {
    expense_repository: Arc<dyn ExpenseRepository>,
}

impl ExpenseServiceImpl {
    pub fn new(expense_repository: Arc<dyn ExpenseRepository>) -> Self {
        Self { expense_repository }
    }
}

#[async_trait]
impl ExpenseService for ExpenseServiceImpl {
    async fn list_expenses(&self, user_id: i32) -> Result<Vec<Expense>, ExpenseError> {
        Ok(self.expense_repository.find_by_user(user_id).await?)
    }

    async fn add_expense(
        &self,
        user_id: i32,
        request: CreateExpenseRequest,
    ) -> Result<Expense, ExpenseError> {
        Ok(self
            .expense_repository
            .create(user_id, request.amount, request.description, request.date)
            .await?)
    }

    async fn delete_expense(
        &self,
        user_id: i32,
        expense_id: i32,
    ) -> Result<Expense, ExpenseError> {
        Ok(self.expense_repository.delete(expense_id, user_id).await?)
    }
}
