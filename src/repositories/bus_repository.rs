use std::collections::HashMap;

use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::models::Bus;
use crate::utils::errors::{is_unique_violation, AppError, AppResult};

/// Fila de la tabla de unión con el nombre del distrito resuelto
#[derive(Debug, Clone, FromRow)]
pub struct BusDistrictRow {
    pub id: Uuid,
    pub bus_id: Uuid,
    pub district_id: Uuid,
    pub district_name: String,
}

pub struct BusRepository {
    pool: PgPool,
}

impl BusRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> AppResult<Vec<Bus>> {
        sqlx::query_as::<_, Bus>("SELECT * FROM buses ORDER BY bus_number ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database("خطأ في جلب البيانات", e))
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Bus>> {
        sqlx::query_as::<_, Bus>("SELECT * FROM buses WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database("خطأ في جلب البيانات", e))
    }

    pub async fn find_by_number(&self, bus_number: &str) -> AppResult<Option<Bus>> {
        sqlx::query_as::<_, Bus>("SELECT * FROM buses WHERE bus_number = $1")
            .bind(bus_number)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database("خطأ في جلب البيانات", e))
    }

    /// Asociaciones de distrito para un conjunto de autobuses, agrupadas
    /// por autobús
    pub async fn districts_for_buses(
        &self,
        bus_ids: &[Uuid],
    ) -> AppResult<HashMap<Uuid, Vec<BusDistrictRow>>> {
        if bus_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query_as::<_, BusDistrictRow>(
            r#"
            SELECT bd.id, bd.bus_id, bd.district_id, d.name AS district_name
            FROM bus_districts bd
            JOIN districts d ON d.id = bd.district_id
            WHERE bd.bus_id = ANY($1)
            ORDER BY d.name ASC
            "#,
        )
        .bind(bus_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database("خطأ في جلب البيانات", e))?;

        let mut grouped: HashMap<Uuid, Vec<BusDistrictRow>> = HashMap::new();
        for row in rows {
            grouped.entry(row.bus_id).or_default().push(row);
        }
        Ok(grouped)
    }

    pub async fn districts_for_bus(&self, bus_id: Uuid) -> AppResult<Vec<BusDistrictRow>> {
        let mut grouped = self.districts_for_buses(&[bus_id]).await?;
        Ok(grouped.remove(&bus_id).unwrap_or_default())
    }

    pub async fn create(
        &self,
        bus_number: &str,
        capacity: i32,
        district_ids: &[Uuid],
    ) -> AppResult<Bus> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database("خطأ في إضافة الباص", e))?;

        let bus = sqlx::query_as::<_, Bus>(
            "INSERT INTO buses (bus_number, capacity) VALUES ($1, $2) RETURNING *",
        )
        .bind(bus_number)
        .bind(capacity)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Duplicate("رقم الباص موجود مسبقاً".to_string())
            } else {
                AppError::database("خطأ في إضافة الباص", e)
            }
        })?;

        for district_id in district_ids {
            sqlx::query("INSERT INTO bus_districts (bus_id, district_id) VALUES ($1, $2)")
                .bind(bus.id)
                .bind(district_id)
                .execute(&mut *tx)
                .await
                .map_err(|e| AppError::database("خطأ في إضافة الباص", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| AppError::database("خطأ في إضافة الباص", e))?;

        Ok(bus)
    }

    /// Actualización de campos escalares y, si `district_ids` viene,
    /// reemplazo completo de las asociaciones. Todo dentro de una
    /// transacción para que nunca se observe una reescritura parcial.
    pub async fn update(
        &self,
        id: Uuid,
        bus_number: Option<String>,
        capacity: Option<i32>,
        district_ids: Option<Vec<Uuid>>,
    ) -> AppResult<Bus> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database("خطأ في تحديث الباص", e))?;

        let bus = sqlx::query_as::<_, Bus>(
            r#"
            UPDATE buses
            SET bus_number = COALESCE($2, bus_number),
                capacity = COALESCE($3, capacity),
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(bus_number)
        .bind(capacity)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Duplicate("رقم الباص موجود مسبقاً".to_string())
            } else {
                AppError::database("خطأ في تحديث الباص", e)
            }
        })?
        .ok_or_else(|| AppError::NotFound("الباص غير موجود".to_string()))?;

        if let Some(district_ids) = district_ids {
            sqlx::query("DELETE FROM bus_districts WHERE bus_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await
                .map_err(|e| AppError::database("خطأ في تحديث الباص", e))?;

            for district_id in district_ids {
                sqlx::query("INSERT INTO bus_districts (bus_id, district_id) VALUES ($1, $2)")
                    .bind(id)
                    .bind(district_id)
                    .execute(&mut *tx)
                    .await
                    .map_err(|e| AppError::database("خطأ في تحديث الباص", e))?;
            }
        }

        tx.commit()
            .await
            .map_err(|e| AppError::database("خطأ في تحديث الباص", e))?;

        Ok(bus)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM buses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database("خطأ في حذف الباص", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("الباص غير موجود".to_string()));
        }
        Ok(())
    }
}
