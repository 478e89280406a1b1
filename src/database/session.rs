use sqlx::{PgPool, Postgres, Transaction};
use tracing::warn;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::student::{NewStudent, Student};

const COLUMNS: &str = "id, name, age, email, phone, photo_url";

/// Request-scoped database session. Opens a transaction lazily on first use;
/// `commit`/`rollback` close it explicitly, and dropping the session with a
/// transaction still open rolls it back, so nothing leaks across requests.
///
/// After an integrity violation the failed transaction has already been rolled
/// back; the next operation opens a fresh one, keeping the session reusable.
pub struct Session {
    pool: PgPool,
    tx: Option<Transaction<'static, Postgres>>,
}

impl Session {
    /// Acquire a session backed by the shared pool.
    pub async fn acquire() -> Result<Self, DatabaseError> {
        let pool = DatabaseManager::pool().await?;
        Ok(Self { pool, tx: None })
    }

    async fn tx(&mut self) -> Result<&mut Transaction<'static, Postgres>, DatabaseError> {
        if self.tx.is_none() {
            self.tx = Some(self.pool.begin().await?);
        }
        Ok(self.tx.as_mut().expect("transaction opened above"))
    }

    pub async fn fetch_all(&mut self) -> Result<Vec<Student>, DatabaseError> {
        let tx = self.tx().await?;
        let sql = format!("SELECT {} FROM students", COLUMNS);
        let rows = sqlx::query_as::<_, Student>(&sql)
            .fetch_all(&mut **tx)
            .await?;
        Ok(rows)
    }

    pub async fn fetch_by_id(&mut self, id: i32) -> Result<Option<Student>, DatabaseError> {
        let tx = self.tx().await?;
        let sql = format!("SELECT {} FROM students WHERE id = $1", COLUMNS);
        let row = sqlx::query_as::<_, Student>(&sql)
            .bind(id)
            .fetch_optional(&mut **tx)
            .await?;
        Ok(row)
    }

    pub async fn insert(&mut self, new: &NewStudent) -> Result<Student, DatabaseError> {
        let tx = self.tx().await?;
        let sql = format!(
            "INSERT INTO students (name, age, email, phone, photo_url) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            COLUMNS
        );
        let result = sqlx::query_as::<_, Student>(&sql)
            .bind(&new.name)
            .bind(new.age)
            .bind(&new.email)
            .bind(&new.phone)
            .bind(&new.photo_url)
            .fetch_one(&mut **tx)
            .await;
        self.classify_write(result).await
    }

    /// Persist a full row in place. Callers load the row first and overwrite
    /// only the fields present in the request, then hand the result here.
    pub async fn update(&mut self, student: &Student) -> Result<Student, DatabaseError> {
        let tx = self.tx().await?;
        let sql = format!(
            "UPDATE students SET name = $1, age = $2, email = $3, phone = $4, photo_url = $5 \
             WHERE id = $6 RETURNING {}",
            COLUMNS
        );
        let result = sqlx::query_as::<_, Student>(&sql)
            .bind(&student.name)
            .bind(student.age)
            .bind(&student.email)
            .bind(&student.phone)
            .bind(&student.photo_url)
            .bind(student.id)
            .fetch_one(&mut **tx)
            .await;
        self.classify_write(result).await
    }

    /// Returns whether a row was actually deleted.
    pub async fn delete(&mut self, id: i32) -> Result<bool, DatabaseError> {
        let tx = self.tx().await?;
        let done = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(&mut **tx)
            .await?;
        Ok(done.rows_affected() > 0)
    }

    pub async fn commit(&mut self) -> Result<(), DatabaseError> {
        if let Some(tx) = self.tx.take() {
            tx.commit().await?;
        }
        Ok(())
    }

    pub async fn rollback(&mut self) {
        if let Some(tx) = self.tx.take() {
            if let Err(err) = tx.rollback().await {
                warn!("rollback failed: {}", err);
            }
        }
    }

    /// Constraint breaches roll the transaction back before surfacing, so the
    /// session stays usable and the client sees a distinct error.
    async fn classify_write(
        &mut self,
        result: Result<Student, sqlx::Error>,
    ) -> Result<Student, DatabaseError> {
        match result {
            Ok(row) => Ok(row),
            Err(err) => {
                let err = DatabaseError::from_sqlx(err);
                if matches!(err, DatabaseError::IntegrityViolation(_)) {
                    self.rollback().await;
                }
                Err(err)
            }
        }
    }
}
