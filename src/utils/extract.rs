use axum::extract::FromRequest;

use crate::utils::error::AppError;

/// `axum::Json` whose rejections render as the usual `{ "error": ... }` body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
