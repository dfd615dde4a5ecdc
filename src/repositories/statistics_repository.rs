use chrono::NaiveDate;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::models::TripStatus;
use crate::utils::errors::{AppError, AppResult};

/// Proyección mínima de `trips` para las estadísticas del día
#[derive(Debug, Clone, FromRow)]
pub struct TripStatRow {
    pub status: TripStatus,
    pub passengers_count: i32,
    pub route_id: Option<Uuid>,
}

/// Proyección mínima de `route_trips` para las estadísticas del día
#[derive(Debug, Clone, FromRow)]
pub struct RouteTripStatRow {
    pub status: TripStatus,
    pub students_count: i32,
    pub route_id: Uuid,
}

/// Conductor y universidad de una ruta, para atribuir sus viajes
#[derive(Debug, Clone, FromRow)]
pub struct RouteRefRow {
    pub id: Uuid,
    pub driver_id: Uuid,
    pub driver_name: String,
    pub university_id: Uuid,
    pub university_name: String,
}

pub struct StatisticsRepository {
    pool: PgPool,
}

impl StatisticsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn count_universities(&self) -> AppResult<i64> {
        self.count_table("SELECT COUNT(*) FROM universities").await
    }

    pub async fn count_drivers(&self) -> AppResult<i64> {
        self.count_table("SELECT COUNT(*) FROM drivers").await
    }

    pub async fn count_buses(&self) -> AppResult<i64> {
        self.count_table("SELECT COUNT(*) FROM buses").await
    }

    pub async fn count_districts(&self) -> AppResult<i64> {
        self.count_table("SELECT COUNT(*) FROM districts").await
    }

    async fn count_table(&self, query: &str) -> AppResult<i64> {
        let row: (i64,) = sqlx::query_as(query)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database("فشل جلب الإحصائيات", e))?;
        Ok(row.0)
    }

    pub async fn find_trip_stats(&self, date: NaiveDate) -> AppResult<Vec<TripStatRow>> {
        sqlx::query_as::<_, TripStatRow>(
            "SELECT status, passengers_count, route_id FROM trips WHERE trip_date = $1",
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database("فشل جلب الإحصائيات", e))
    }

    pub async fn find_route_trip_stats(
        &self,
        date: NaiveDate,
    ) -> AppResult<Vec<RouteTripStatRow>> {
        sqlx::query_as::<_, RouteTripStatRow>(
            "SELECT status, students_count, route_id FROM route_trips WHERE trip_date = $1",
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database("فشل جلب الإحصائيات", e))
    }

    /// Solo las rutas que aparecen en los viajes del día
    pub async fn find_route_refs(&self, route_ids: &[Uuid]) -> AppResult<Vec<RouteRefRow>> {
        if route_ids.is_empty() {
            return Ok(Vec::new());
        }

        sqlx::query_as::<_, RouteRefRow>(
            r#"
            SELECT r.id,
                   dr.id AS driver_id, dr.name AS driver_name,
                   u.id AS university_id, u.name AS university_name
            FROM routes r
            JOIN drivers dr ON dr.id = r.driver_id
            JOIN universities u ON u.id = r.university_id
            WHERE r.id = ANY($1)
            "#,
        )
        .bind(route_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database("فشل جلب الإحصائيات", e))
    }
}
