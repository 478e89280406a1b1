use axum::{extract::Path, http::StatusCode};

use crate::database::Session;
use crate::error::ApiError;

/// DELETE /students/:id - destroy the row, 204 on success
pub async fn delete(Path(id): Path<i32>) -> Result<StatusCode, ApiError> {
    let mut session = Session::acquire().await?;
    if !session.delete(id).await? {
        return Err(ApiError::not_found(format!(
            "Student with id {} not found",
            id
        )));
    }
    session.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}
