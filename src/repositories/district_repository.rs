use sqlx::PgPool;
use uuid::Uuid;

use crate::models::District;
use crate::utils::errors::{is_unique_violation, AppError, AppResult};

pub struct DistrictRepository {
    pool: PgPool,
}

impl DistrictRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> AppResult<Vec<District>> {
        sqlx::query_as::<_, District>("SELECT * FROM districts ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database("فشل جلب الأحياء", e))
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<District>> {
        sqlx::query_as::<_, District>("SELECT * FROM districts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database("خطأ في جلب البيانات", e))
    }

    pub async fn create(&self, name: &str, description: Option<String>) -> AppResult<District> {
        sqlx::query_as::<_, District>(
            "INSERT INTO districts (name, description) VALUES ($1, $2) RETURNING *",
        )
        .bind(name)
        .bind(description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Duplicate("اسم الحي موجود مسبقاً".to_string())
            } else {
                AppError::database("خطأ في إضافة الحي", e)
            }
        })
    }

    pub async fn update(
        &self,
        id: Uuid,
        name: Option<String>,
        description: Option<String>,
    ) -> AppResult<District> {
        sqlx::query_as::<_, District>(
            r#"
            UPDATE districts
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(description)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Duplicate("اسم الحي موجود مسبقاً".to_string())
            } else {
                AppError::database("خطأ في تحديث الحي", e)
            }
        })?
        .ok_or_else(|| AppError::NotFound("الحي غير موجود".to_string()))
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM districts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database("خطأ في حذف الحي", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("الحي غير موجود".to_string()));
        }
        Ok(())
    }
}
