//! Repositorio de viajes diarios
//!
//! Cubre las dos tablas de origen: `trips` (nueva) y `route_trips`
//! (heredada). Las consultas filtradas devuelven filas ya unidas a sus
//! entidades relacionadas; la unificación de forma y el orden final los
//! hace el servicio de fusión.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::models::{RouteTrip, Trip, TripDirection, TripStatus};
use crate::utils::errors::{is_unique_violation, AppError, AppResult};

/// Filtros comunes del listado unificado
#[derive(Debug, Default, Clone)]
pub struct TripFilters {
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub bus_id: Option<Uuid>,
    pub status: Option<TripStatus>,
    pub direction: Option<TripDirection>,
}

/// Fila de `trips` con ruta, universidad, conductor y distrito resueltos
#[derive(Debug, FromRow)]
pub struct TripJoinRow {
    pub id: Uuid,
    pub trip_date: NaiveDate,
    pub direction: TripDirection,
    pub scheduled_time: DateTime<Utc>,
    pub passengers_count: i32,
    pub status: TripStatus,
    pub notes: Option<String>,
    pub bus_id: Uuid,
    pub bus_number: String,
    pub route_id: Option<Uuid>,
    pub university_id: Option<Uuid>,
    pub university_name: Option<String>,
    pub driver_id: Option<Uuid>,
    pub driver_name: Option<String>,
    pub driver_phone: Option<String>,
    pub route_district_id: Option<Uuid>,
    pub route_district_name: Option<String>,
}

/// Fila de `route_trips` con las mismas resoluciones
#[derive(Debug, FromRow)]
pub struct RouteTripJoinRow {
    pub id: Uuid,
    pub trip_date: NaiveDate,
    pub direction: TripDirection,
    pub trip_time: String,
    pub students_count: i32,
    pub status: TripStatus,
    pub route_id: Uuid,
    pub bus_id: Uuid,
    pub bus_number: String,
    pub university_id: Option<Uuid>,
    pub university_name: Option<String>,
    pub driver_id: Option<Uuid>,
    pub driver_name: Option<String>,
    pub driver_phone: Option<String>,
    pub route_district_id: Option<Uuid>,
    pub route_district_name: Option<String>,
}

pub struct TripRepository {
    pool: PgPool,
}

impl TripRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_trips(&self, filters: &TripFilters) -> AppResult<Vec<TripJoinRow>> {
        sqlx::query_as::<_, TripJoinRow>(
            r#"
            SELECT t.id, t.trip_date, t.direction, t.scheduled_time,
                   t.passengers_count, t.status, t.notes,
                   t.bus_id, b.bus_number,
                   r.id AS route_id,
                   u.id AS university_id, u.name AS university_name,
                   dr.id AS driver_id, dr.name AS driver_name, dr.phone AS driver_phone,
                   rd.id AS route_district_id, rd.name AS route_district_name
            FROM trips t
            JOIN buses b ON b.id = t.bus_id
            LEFT JOIN routes r ON r.id = t.route_id
            LEFT JOIN universities u ON u.id = r.university_id
            LEFT JOIN drivers dr ON dr.id = r.driver_id
            LEFT JOIN districts rd ON rd.id = r.district_id
            WHERE ($1::date IS NULL OR t.trip_date >= $1)
              AND ($2::date IS NULL OR t.trip_date <= $2)
              AND ($3::uuid IS NULL OR t.bus_id = $3)
              AND ($4::trip_status IS NULL OR t.status = $4)
              AND ($5::trip_direction IS NULL OR t.direction = $5)
            ORDER BY t.trip_date DESC, t.scheduled_time ASC
            "#,
        )
        .bind(filters.date_from)
        .bind(filters.date_to)
        .bind(filters.bus_id)
        .bind(filters.status)
        .bind(filters.direction)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database("خطأ في جلب البيانات", e))
    }

    pub async fn find_route_trips(
        &self,
        filters: &TripFilters,
    ) -> AppResult<Vec<RouteTripJoinRow>> {
        sqlx::query_as::<_, RouteTripJoinRow>(
            r#"
            SELECT rt.id, rt.trip_date, rt.direction, rt.trip_time,
                   rt.students_count, rt.status,
                   rt.route_id, r.bus_id, b.bus_number,
                   u.id AS university_id, u.name AS university_name,
                   dr.id AS driver_id, dr.name AS driver_name, dr.phone AS driver_phone,
                   rd.id AS route_district_id, rd.name AS route_district_name
            FROM route_trips rt
            JOIN routes r ON r.id = rt.route_id
            JOIN buses b ON b.id = r.bus_id
            LEFT JOIN universities u ON u.id = r.university_id
            LEFT JOIN drivers dr ON dr.id = r.driver_id
            LEFT JOIN districts rd ON rd.id = r.district_id
            WHERE ($1::date IS NULL OR rt.trip_date >= $1)
              AND ($2::date IS NULL OR rt.trip_date <= $2)
              AND ($3::uuid IS NULL OR r.bus_id = $3)
              AND ($4::trip_status IS NULL OR rt.status = $4)
              AND ($5::trip_direction IS NULL OR rt.direction = $5)
            ORDER BY rt.trip_date DESC, rt.trip_time ASC
            "#,
        )
        .bind(filters.date_from)
        .bind(filters.date_to)
        .bind(filters.bus_id)
        .bind(filters.status)
        .bind(filters.direction)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database("خطأ في جلب البيانات", e))
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Trip>> {
        sqlx::query_as::<_, Trip>("SELECT * FROM trips WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database("خطأ في جلب البيانات", e))
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        bus_id: Uuid,
        route_id: Option<Uuid>,
        trip_date: NaiveDate,
        direction: TripDirection,
        scheduled_time: DateTime<Utc>,
        passengers_count: i32,
        status: TripStatus,
        notes: Option<String>,
    ) -> AppResult<Trip> {
        sqlx::query_as::<_, Trip>(
            r#"
            INSERT INTO trips
                (bus_id, route_id, trip_date, direction, scheduled_time,
                 passengers_count, status, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(bus_id)
        .bind(route_id)
        .bind(trip_date)
        .bind(direction)
        .bind(scheduled_time)
        .bind(passengers_count)
        .bind(status)
        .bind(notes)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database("خطأ في إضافة الرحلة", e))
    }

    /// Persistir los valores ya fusionados de una actualización parcial
    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: Uuid,
        passengers_count: i32,
        status: TripStatus,
        scheduled_time: DateTime<Utc>,
        actual_departure_time: Option<DateTime<Utc>>,
        actual_arrival_time: Option<DateTime<Utc>>,
        notes: Option<String>,
    ) -> AppResult<Trip> {
        sqlx::query_as::<_, Trip>(
            r#"
            UPDATE trips
            SET passengers_count = $2,
                status = $3,
                scheduled_time = $4,
                actual_departure_time = $5,
                actual_arrival_time = $6,
                notes = $7,
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(passengers_count)
        .bind(status)
        .bind(scheduled_time)
        .bind(actual_departure_time)
        .bind(actual_arrival_time)
        .bind(notes)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database("خطأ في تحديث الرحلة", e))?
        .ok_or_else(|| AppError::NotFound("الرحلة غير موجودة".to_string()))
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM trips WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database("خطأ في حذف الرحلة", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("الرحلة غير موجودة".to_string()));
        }
        Ok(())
    }

    /// Alta en la tabla heredada, usada por la importación. Un duplicado
    /// (misma ruta, fecha, hora y dirección) sale como `Duplicate`.
    pub async fn create_route_trip(
        &self,
        route_id: Uuid,
        trip_date: NaiveDate,
        direction: TripDirection,
        trip_time: &str,
        students_count: i32,
    ) -> AppResult<RouteTrip> {
        sqlx::query_as::<_, RouteTrip>(
            r#"
            INSERT INTO route_trips
                (route_id, trip_date, direction, trip_time, students_count, status)
            VALUES ($1, $2, $3, $4, $5, 'PENDING')
            RETURNING *
            "#,
        )
        .bind(route_id)
        .bind(trip_date)
        .bind(direction)
        .bind(trip_time)
        .bind(students_count)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Duplicate("رحلة مكررة لنفس المسار والتاريخ والوقت".to_string())
            } else {
                AppError::database("خطأ في إضافة رحلة يومية", e)
            }
        })
    }
}
