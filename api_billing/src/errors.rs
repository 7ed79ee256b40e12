use actix_web::http::StatusCode;
use common::error::AppError;

pub const ALREADY_FLUENT: &str = "ALREADY_FLUENT";
pub const NO_SUBSCRIPTION: &str = "NO_SUBSCRIPTION";
pub const NO_BILLING_ACCOUNT: &str = "NO_BILLING_ACCOUNT";

pub fn already_fluent() -> AppError {
    AppError::coded(StatusCode::BAD_REQUEST, ALREADY_FLUENT, "Already on Fluent plan")
}

pub fn no_subscription() -> AppError {
    AppError::coded(StatusCode::NOT_FOUND, NO_SUBSCRIPTION, "No active subscription")
}

pub fn no_billing_account() -> AppError {
    AppError::coded(StatusCode::BAD_REQUEST, NO_BILLING_ACCOUNT, "No billing account")
}
