use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::user::{CreateUserRequest, User};
use crate::repositories::RepositoryError;

/// Trait defining user repository operations
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a new user
    async fn create(&self, user: CreateUserRequest) -> Result<User, RepositoryError>;

    /// Find a user matching both email and password exactly
    async fn find_by_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, RepositoryError>;
}

/// PostgreSQL implementation of UserRepository
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: CreateUserRequest) -> Result<User, RepositoryError> {
        let result = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (fullname, email, password)
            VALUES ($1, $2, $3)
            RETURNING id, fullname, email, password
            "#,
        )
        .bind(&user.fullname)
        .bind(&user.email)
        .bind(&user.password)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(user) => Ok(user),
            Err(sqlx::Error::Database(db_err)) => {
                // Unique constraint on fullname or email
                if db_err.is_unique_violation() {
                    Err(RepositoryError::ConstraintViolation(
                        "Full name or email already exists".to_string(),
                    ))
                } else {
                    Err(RepositoryError::DatabaseError(db_err.to_string()))
                }
            }
            Err(e) => Err(RepositoryError::DatabaseError(e.to_string())),
        }
    }

    async fn find_by_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, RepositoryError> {
        let result = sqlx::query_as::<_, User>(
            r#"
            SELECT id, fullname, email, password
            FROM users
            WHERE email = $1 AND password = $2
            "#,
        )
        .bind(email)
        .bind(password)
        .fetch_optional(&self.pool)
        .await;

        match result {
            Ok(user) => Ok(user),
            Err(e) => Err(RepositoryError::DatabaseError(e.to_string())),
        }
    }
}
