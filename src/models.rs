pub mod auth;
pub mod expense;
pub mod user;

pub use auth::{LoginRequest, LoginResponse, SignupResponse};
pub use expense::{CreateExpenseRequest, Expense, ExpenseListParams};
pub use user::{CreateUserRequest, User};
