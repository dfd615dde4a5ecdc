use std::collections::HashMap;

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::statistics_dto::StatisticsResponse;
use crate::repositories::statistics_repository::{RouteRefRow, StatisticsRepository};
use crate::services::statistics_service::{fold_statistics, EntityTotals};
use crate::utils::errors::AppResult;
use crate::utils::validation::parse_date;

pub struct StatisticsController {
    repository: StatisticsRepository,
}

impl StatisticsController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: StatisticsRepository::new(pool),
        }
    }

    /// Estadísticas del día indicado (hoy por defecto): totales de
    /// entidades en paralelo, viajes de ambas tablas y métricas por
    /// conductor y universidad.
    pub async fn get(&self, date: Option<String>) -> AppResult<StatisticsResponse> {
        let target_date = match date {
            Some(value) => parse_date(&value, "صيغة التاريخ غير صالحة")?,
            None => Utc::now().date_naive(),
        };

        let (universities, drivers, buses, districts, trips, route_trips) = futures::try_join!(
            self.repository.count_universities(),
            self.repository.count_drivers(),
            self.repository.count_buses(),
            self.repository.count_districts(),
            self.repository.find_trip_stats(target_date),
            self.repository.find_route_trip_stats(target_date),
        )?;

        // Solo las rutas referenciadas por los viajes del día
        let mut route_ids: Vec<Uuid> = trips
            .iter()
            .filter_map(|trip| trip.route_id)
            .chain(route_trips.iter().map(|rt| rt.route_id))
            .collect();
        route_ids.sort_unstable();
        route_ids.dedup();

        let routes: HashMap<Uuid, RouteRefRow> = self
            .repository
            .find_route_refs(&route_ids)
            .await?
            .into_iter()
            .map(|row| (row.id, row))
            .collect();

        Ok(fold_statistics(
            target_date.to_string(),
            EntityTotals {
                universities,
                drivers,
                buses,
                districts,
            },
            &trips,
            &route_trips,
            &routes,
        ))
    }
}
