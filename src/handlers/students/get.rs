use axum::{extract::Path, Json};

use crate::database::models::Student;
use crate::database::Session;
use crate::error::ApiError;

/// GET /students/:id - fetch a single student
pub async fn get(Path(id): Path<i32>) -> Result<Json<Student>, ApiError> {
    let mut session = Session::acquire().await?;
    let student = session
        .fetch_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Student with id {} not found", id)))?;
    session.commit().await?;
    Ok(Json(student))
}
