//! Response envelopes for write operations.

use axum::{http::StatusCode, Json};
use serde::Serialize;

#[derive(Serialize)]
pub struct Created<T> {
    pub message: String,
    pub data: T,
}

#[derive(Serialize)]
pub struct Message {
    pub message: String,
}

pub fn created<T: Serialize>(message: String, data: T) -> (StatusCode, Json<Created<T>>) {
    (StatusCode::CREATED, Json(Created { message, data }))
}

pub fn message_ok(message: String) -> (StatusCode, Json<Message>) {
    (StatusCode::OK, Json(Message { message }))
}
