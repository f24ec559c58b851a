use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::models::expense::Expense;
use crate::repositories::RepositoryError;

/// Trait defining expense repository operations
#[async_trait]
pub trait ExpenseRepository: Send + Sync {
    /// Create a new expense owned by the given user
    async fn create(
        &self,
        user_id: i32,
        amount: Decimal,
        description: String,
        date: NaiveDate,
    ) -> Result<Expense, RepositoryError>;

    /// Find all expenses owned by a user, in storage order
    async fn find_by_user(&self, user_id: i32) -> Result<Vec<Expense>, RepositoryError>;

    /// Delete an expense owned by the given user, returning the deleted row
    async fn delete(&self, id: i32, user_id: i32) -> Result<Expense, RepositoryError>;
}

/// PostgreSQL implementation of ExpenseRepository
pub struct PostgresExpenseRepository {
    pool: PgPool,
}

impl PostgresExpenseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ExpenseRepository for PostgresExpenseRepository {
    async fn create(
        &self,
        user_id: i32,
        amount: Decimal,
        description: String,
        date: NaiveDate,
    ) -> Result<Expense, RepositoryError> {
        let result = sqlx::query_as::<_, Expense>(
            r#"
            INSERT INTO expenses (amount, description, date, user_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, amount, description, date, user_id
            "#,
        )
        .bind(amount)
        .bind(&description)
        .bind(date)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(expense) => Ok(expense),
            Err(sqlx::Error::Database(db_err)) => {
                // Foreign key on user_id: the owning user must exist
                if db_err.is_foreign_key_violation() {
                    Err(RepositoryError::ConstraintViolation(
                        "Owning user does not exist".to_string(),
                    ))
                } else {
                    Err(RepositoryError::DatabaseError(db_err.to_string()))
                }
            }
            Err(e) => Err(RepositoryError::DatabaseError(e.to_string())),
        }
    }

    async fn find_by_user(&self, user_id: i32) -> Result<Vec<Expense>, RepositoryError> {
        let result = sqlx::query_as::<_, Expense>(
            r#"
            SELECT id, amount, description, date, user_id
            FROM expenses
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await;

        match result {
            Ok(expenses) => Ok(expenses),
            Err(e) => Err(RepositoryError::DatabaseError(e.to_string())),
        }
    }

    async fn delete(&self, id: i32, user_id: i32) -> Result<Expense, RepositoryError> {
        let result = sqlx::query_as::<_, Expense>(
            r#"
            DELETE FROM expenses
            WHERE id = $1 AND user_id = $2
            RETURNING id, amount, description, date, user_id
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await;

        match result {
            Ok(Some(expense)) => Ok(expense),
            Ok(None) => Err(RepositoryError::NotFound),
            Err(e) => Err(RepositoryError::DatabaseError(e.to_string())),
        }
    }
}
