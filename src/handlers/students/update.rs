use axum::{extract::rejection::JsonRejection, extract::Path, Json};

use crate::api::StudentUpdate;
use crate::database::models::Student;
use crate::database::Session;
use crate::error::ApiError;

/// PUT /students/:id - partial update. Loads the stored row, overwrites only
/// the fields present in the body, persists the result.
pub async fn update(
    Path(id): Path<i32>,
    payload: Result<Json<StudentUpdate>, JsonRejection>,
) -> Result<Json<Student>, ApiError> {
    let Json(update) = payload?;
    update
        .validate()
        .map_err(|fields| ApiError::validation_error("Validation failed", Some(fields)))?;

    let mut session = Session::acquire().await?;
    let mut student = session
        .fetch_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Student with id {} not found", id)))?;

    update.apply_to(&mut student);
    let student = session.update(&student).await?;
    session.commit().await?;
    Ok(Json(student))
}
