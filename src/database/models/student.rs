use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Stored shape of a student row. Column constraints (NOT NULL, UNIQUE email,
/// serial primary key) live in the database; see schema.sql.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Student {
    pub id: i32,
    pub name: String,
    pub age: i32,
    pub email: String,
    pub phone: String,
    pub photo_url: Option<String>,
}

/// Field values for a row that does not exist yet; the database assigns the id.
#[derive(Debug, Clone)]
pub struct NewStudent {
    pub name: String,
    pub age: i32,
    pub email: String,
    pub phone: String,
    pub photo_url: Option<String>,
}
