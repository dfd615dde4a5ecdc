use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Representative;
use crate::utils::errors::{AppError, AppResult};

pub struct RepresentativeRepository {
    pool: PgPool,
}

impl RepresentativeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> AppResult<Vec<Representative>> {
        sqlx::query_as::<_, Representative>("SELECT * FROM representatives ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database("خطأ في جلب البيانات", e))
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Representative>> {
        sqlx::query_as::<_, Representative>("SELECT * FROM representatives WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database("خطأ في جلب البيانات", e))
    }

    pub async fn find_by_name(&self, name: &str) -> AppResult<Option<Representative>> {
        sqlx::query_as::<_, Representative>("SELECT * FROM representatives WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database("خطأ في جلب البيانات", e))
    }

    pub async fn create(
        &self,
        name: &str,
        phone: Option<String>,
        email: Option<String>,
    ) -> AppResult<Representative> {
        sqlx::query_as::<_, Representative>(
            "INSERT INTO representatives (name, phone, email) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(name)
        .bind(phone)
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database("خطأ في إضافة المندوب", e))
    }

    pub async fn update(
        &self,
        id: Uuid,
        name: Option<String>,
        phone: Option<String>,
        email: Option<String>,
    ) -> AppResult<Representative> {
        sqlx::query_as::<_, Representative>(
            r#"
            UPDATE representatives
            SET name = COALESCE($2, name),
                phone = COALESCE($3, phone),
                email = COALESCE($4, email),
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(phone)
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database("خطأ في تحديث المندوب", e))?
        .ok_or_else(|| AppError::NotFound("المندوب غير موجود".to_string()))
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM representatives WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database("خطأ في حذف المندوب", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("المندوب غير موجود".to_string()));
        }
        Ok(())
    }
}
