use axum::{extract::rejection::JsonRejection, http::StatusCode, Json};

use crate::api::StudentCreate;
use crate::database::models::Student;
use crate::database::Session;
use crate::error::ApiError;

/// POST /students/ - create a student once every field rule passes.
/// A duplicate email surfaces as a 400 integrity violation after rollback.
pub async fn create(
    payload: Result<Json<StudentCreate>, JsonRejection>,
) -> Result<(StatusCode, Json<Student>), ApiError> {
    let Json(create) = payload?;
    create
        .validate()
        .map_err(|fields| ApiError::validation_error("Validation failed", Some(fields)))?;

    let mut session = Session::acquire().await?;
    let student = session.insert(&create.into()).await?;
    session.commit().await?;
    Ok((StatusCode::CREATED, Json(student)))
}
