use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::models::Route;
use crate::utils::errors::{AppError, AppResult};

/// Ruta con sus entidades relacionadas resueltas en un solo join
#[derive(Debug, FromRow)]
pub struct RouteRow {
    pub id: Uuid,
    pub university_id: Uuid,
    pub driver_id: Uuid,
    pub bus_id: Uuid,
    pub district_id: Option<Uuid>,
    pub representative_id: Option<Uuid>,
    pub total_go_trips: i32,
    pub total_return_trips: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub university_name: String,
    pub driver_name: String,
    pub bus_number: String,
    pub bus_capacity: i32,
    pub district_name: Option<String>,
}

const ROUTE_SELECT: &str = r#"
SELECT r.id, r.university_id, r.driver_id, r.bus_id, r.district_id, r.representative_id,
       r.total_go_trips, r.total_return_trips, r.is_active, r.created_at, r.updated_at,
       u.name AS university_name,
       dr.name AS driver_name,
       b.bus_number, b.capacity AS bus_capacity,
       di.name AS district_name
FROM routes r
JOIN universities u ON u.id = r.university_id
JOIN drivers dr ON dr.id = r.driver_id
JOIN buses b ON b.id = r.bus_id
LEFT JOIN districts di ON di.id = r.district_id
"#;

pub struct RouteRepository {
    pool: PgPool,
}

impl RouteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> AppResult<Vec<RouteRow>> {
        let query = format!("{} ORDER BY r.created_at DESC", ROUTE_SELECT);
        sqlx::query_as::<_, RouteRow>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database("خطأ في جلب البيانات", e))
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<RouteRow>> {
        let query = format!("{} WHERE r.id = $1", ROUTE_SELECT);
        sqlx::query_as::<_, RouteRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database("خطأ في جلب البيانات", e))
    }

    /// Autobús asignado a la ruta, usado al crear viajes diarios
    pub async fn find_bus_id(&self, route_id: Uuid) -> AppResult<Option<Uuid>> {
        let row: Option<(Uuid,)> =
            sqlx::query_as("SELECT bus_id FROM routes WHERE id = $1")
                .bind(route_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| AppError::database("خطأ في جلب البيانات", e))?;

        Ok(row.map(|(bus_id,)| bus_id))
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        university_id: Uuid,
        driver_id: Uuid,
        bus_id: Uuid,
        district_id: Option<Uuid>,
        representative_id: Option<Uuid>,
        total_go_trips: i32,
        total_return_trips: i32,
    ) -> AppResult<Route> {
        sqlx::query_as::<_, Route>(
            r#"
            INSERT INTO routes
                (university_id, driver_id, bus_id, district_id, representative_id,
                 total_go_trips, total_return_trips)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(university_id)
        .bind(driver_id)
        .bind(bus_id)
        .bind(district_id)
        .bind(representative_id)
        .bind(total_go_trips)
        .bind(total_return_trips)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database("خطأ في إضافة الرحلة", e))
    }

    /// Actualización parcial. `district_id` solo se aplica si viene,
    /// nunca limpia el valor existente.
    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: Uuid,
        university_id: Option<Uuid>,
        driver_id: Option<Uuid>,
        bus_id: Option<Uuid>,
        district_id: Option<Uuid>,
        total_go_trips: Option<i32>,
        total_return_trips: Option<i32>,
        is_active: Option<bool>,
    ) -> AppResult<Route> {
        sqlx::query_as::<_, Route>(
            r#"
            UPDATE routes
            SET university_id = COALESCE($2, university_id),
                driver_id = COALESCE($3, driver_id),
                bus_id = COALESCE($4, bus_id),
                district_id = COALESCE($5, district_id),
                total_go_trips = COALESCE($6, total_go_trips),
                total_return_trips = COALESCE($7, total_return_trips),
                is_active = COALESCE($8, is_active),
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(university_id)
        .bind(driver_id)
        .bind(bus_id)
        .bind(district_id)
        .bind(total_go_trips)
        .bind(total_return_trips)
        .bind(is_active)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database("خطأ في تحديث الرحلة", e))?
        .ok_or_else(|| AppError::NotFound("الرحلة غير موجودة".to_string()))
    }

    /// El borrado cae en cascada sobre los viajes diarios (esquema)
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM routes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database("خطأ في حذف الرحلة", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("الرحلة غير موجودة".to_string()));
        }
        Ok(())
    }
}
