use axum::Json;

use crate::database::models::Student;
use crate::database::Session;
use crate::error::ApiError;

/// GET /students/ - list every student in database default order
pub async fn list() -> Result<Json<Vec<Student>>, ApiError> {
    let mut session = Session::acquire().await?;
    let students = session.fetch_all().await?;
    session.commit().await?;
    Ok(Json(students))
}
