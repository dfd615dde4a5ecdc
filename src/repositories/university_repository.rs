use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::University;
use crate::utils::errors::{is_unique_violation, AppError, AppResult};

pub struct UniversityRepository {
    pool: PgPool,
}

impl UniversityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> AppResult<Vec<University>> {
        sqlx::query_as::<_, University>("SELECT * FROM universities ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database("خطأ في جلب البيانات", e))
    }

    /// Número de rutas por universidad, para enriquecer el listado
    pub async fn routes_count_by_university(&self) -> AppResult<HashMap<Uuid, i64>> {
        let counts: Vec<(Uuid, i64)> = sqlx::query_as(
            "SELECT university_id, COUNT(*) FROM routes GROUP BY university_id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database("خطأ في جلب البيانات", e))?;

        Ok(counts.into_iter().collect())
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<University>> {
        sqlx::query_as::<_, University>("SELECT * FROM universities WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database("خطأ في جلب البيانات", e))
    }

    pub async fn find_by_name(&self, name: &str) -> AppResult<Option<University>> {
        sqlx::query_as::<_, University>("SELECT * FROM universities WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database("خطأ في جلب البيانات", e))
    }

    pub async fn create(&self, name: &str) -> AppResult<University> {
        sqlx::query_as::<_, University>(
            "INSERT INTO universities (name) VALUES ($1) RETURNING *",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Duplicate("اسم الجامعة موجود مسبقاً".to_string())
            } else {
                AppError::database("خطأ في إضافة الجامعة", e)
            }
        })
    }

    pub async fn update(&self, id: Uuid, name: Option<String>) -> AppResult<University> {
        sqlx::query_as::<_, University>(
            r#"
            UPDATE universities
            SET name = COALESCE($2, name), updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Duplicate("اسم الجامعة موجود مسبقاً".to_string())
            } else {
                AppError::database("خطأ في تحديث الجامعة", e)
            }
        })?
        .ok_or_else(|| AppError::NotFound("الجامعة غير موجودة".to_string()))
    }

    /// El borrado cae en cascada sobre las rutas y sus viajes (esquema)
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM universities WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database("خطأ في حذف الجامعة", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("الجامعة غير موجودة".to_string()));
        }
        Ok(())
    }
}
