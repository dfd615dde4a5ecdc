//! Plegado de estadísticas diarias
//!
//! Recibe las proyecciones mínimas de ambas tablas de viajes y las rutas
//! involucradas, y produce los totales, los contadores por estado y las
//! métricas por conductor y por universidad.

use std::collections::HashMap;

use uuid::Uuid;

use crate::dto::statistics_dto::{
    DriverPerformance, StatisticsResponse, StatisticsTotals, StatusCounts, UniversityActivity,
};
use crate::models::TripStatus;
use crate::repositories::statistics_repository::{RouteRefRow, RouteTripStatRow, TripStatRow};

/// Totales de entidades, consultados en paralelo por el controlador
#[derive(Debug, Default, Clone, Copy)]
pub struct EntityTotals {
    pub universities: i64,
    pub drivers: i64,
    pub buses: i64,
    pub districts: i64,
}

struct DriverAgg {
    name: String,
    trips: i64,
    arrived: i64,
}

struct UniversityAgg {
    name: String,
    trips: i64,
    students: i64,
}

pub fn fold_statistics(
    date: String,
    entity_totals: EntityTotals,
    trips: &[TripStatRow],
    route_trips: &[RouteTripStatRow],
    routes: &HashMap<Uuid, RouteRefRow>,
) -> StatisticsResponse {
    let mut status_counts = StatusCounts::default();
    for status in trips
        .iter()
        .map(|t| t.status)
        .chain(route_trips.iter().map(|rt| rt.status))
    {
        bump(&mut status_counts, status);
    }

    let total_students: i64 = trips.iter().map(|t| t.passengers_count as i64).sum::<i64>()
        + route_trips
            .iter()
            .map(|rt| rt.students_count as i64)
            .sum::<i64>();

    let mut driver_agg: HashMap<Uuid, DriverAgg> = HashMap::new();
    let mut university_agg: HashMap<Uuid, UniversityAgg> = HashMap::new();

    // Los viajes sin ruta no se pueden atribuir y se omiten
    for trip in trips {
        if let Some(route) = trip.route_id.and_then(|id| routes.get(&id)) {
            attribute(
                &mut driver_agg,
                &mut university_agg,
                route,
                trip.status,
                trip.passengers_count as i64,
            );
        }
    }
    for route_trip in route_trips {
        if let Some(route) = routes.get(&route_trip.route_id) {
            attribute(
                &mut driver_agg,
                &mut university_agg,
                route,
                route_trip.status,
                route_trip.students_count as i64,
            );
        }
    }

    let mut drivers_performance: Vec<DriverPerformance> = driver_agg
        .into_iter()
        .map(|(driver_id, agg)| DriverPerformance {
            driver_id,
            name: agg.name,
            trips: agg.trips,
            arrived: agg.arrived,
            performance_percentage: percentage(agg.arrived, agg.trips),
        })
        .collect();
    drivers_performance.sort_by(|a, b| {
        b.performance_percentage
            .partial_cmp(&a.performance_percentage)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut universities_activity: Vec<UniversityActivity> = university_agg
        .into_iter()
        .map(|(university_id, agg)| UniversityActivity {
            university_id,
            name: agg.name,
            trips: agg.trips,
            students: agg.students,
        })
        .collect();
    universities_activity.sort_by(|a, b| b.trips.cmp(&a.trips));

    StatisticsResponse {
        date,
        totals: StatisticsTotals {
            total_trips: (trips.len() + route_trips.len()) as i64,
            total_students,
            total_universities: entity_totals.universities,
            total_drivers: entity_totals.drivers,
            total_buses: entity_totals.buses,
            total_districts: entity_totals.districts,
        },
        status_counts,
        drivers_performance,
        universities_activity,
    }
}

fn bump(counts: &mut StatusCounts, status: TripStatus) {
    match status {
        TripStatus::Pending => counts.pending += 1,
        TripStatus::Departed => counts.departed += 1,
        TripStatus::Arrived => counts.arrived += 1,
        TripStatus::Delayed => counts.delayed += 1,
        TripStatus::Cancelled => counts.cancelled += 1,
    }
}

fn attribute(
    driver_agg: &mut HashMap<Uuid, DriverAgg>,
    university_agg: &mut HashMap<Uuid, UniversityAgg>,
    route: &RouteRefRow,
    status: TripStatus,
    students: i64,
) {
    let driver = driver_agg.entry(route.driver_id).or_insert_with(|| DriverAgg {
        name: route.driver_name.clone(),
        trips: 0,
        arrived: 0,
    });
    driver.trips += 1;
    if status == TripStatus::Arrived {
        driver.arrived += 1;
    }

    let university = university_agg
        .entry(route.university_id)
        .or_insert_with(|| UniversityAgg {
            name: route.university_name.clone(),
            trips: 0,
            students: 0,
        });
    university.trips += 1;
    university.students += students;
}

/// Porcentaje llegados/total con un decimal; 0 cuando no hay viajes
fn percentage(arrived: i64, trips: i64) -> f64 {
    if trips == 0 {
        return 0.0;
    }
    (arrived as f64 / trips as f64 * 100.0 * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route_ref(name: &str, university: &str) -> RouteRefRow {
        RouteRefRow {
            id: Uuid::new_v4(),
            driver_id: Uuid::new_v4(),
            driver_name: name.to_string(),
            university_id: Uuid::new_v4(),
            university_name: university.to_string(),
        }
    }

    #[test]
    fn test_zero_trips_yields_zero_filled_statistics() {
        let response = fold_statistics(
            "2024-05-01".to_string(),
            EntityTotals {
                universities: 4,
                drivers: 5,
                buses: 5,
                districts: 4,
            },
            &[],
            &[],
            &HashMap::new(),
        );

        assert_eq!(response.totals.total_trips, 0);
        assert_eq!(response.totals.total_students, 0);
        assert_eq!(response.totals.total_universities, 4);
        assert_eq!(response.status_counts, StatusCounts::default());
        assert!(response.drivers_performance.is_empty());
        assert!(response.universities_activity.is_empty());
    }

    #[test]
    fn test_percentage_never_nan() {
        assert_eq!(percentage(0, 0), 0.0);
        assert!(!percentage(0, 0).is_nan());
    }

    #[test]
    fn test_percentage_rounds_to_one_decimal() {
        assert_eq!(percentage(1, 3), 33.3);
        assert_eq!(percentage(2, 3), 66.7);
        assert_eq!(percentage(1, 2), 50.0);
    }

    #[test]
    fn test_status_counts_merge_both_sources() {
        let route = route_ref("أحمد محمد", "جامعة الملك سعود");
        let mut routes = HashMap::new();
        routes.insert(route.id, route.clone());

        let trips = vec![
            TripStatRow {
                status: TripStatus::Arrived,
                passengers_count: 30,
                route_id: Some(route.id),
            },
            TripStatRow {
                status: TripStatus::Pending,
                passengers_count: 10,
                route_id: None,
            },
        ];
        let route_trips = vec![RouteTripStatRow {
            status: TripStatus::Arrived,
            students_count: 25,
            route_id: route.id,
        }];

        let response = fold_statistics(
            "2024-05-01".to_string(),
            EntityTotals::default(),
            &trips,
            &route_trips,
            &routes,
        );

        assert_eq!(response.totals.total_trips, 3);
        assert_eq!(response.totals.total_students, 65);
        assert_eq!(response.status_counts.arrived, 2);
        assert_eq!(response.status_counts.pending, 1);

        // El viaje sin ruta no se atribuye a nadie
        assert_eq!(response.drivers_performance.len(), 1);
        let driver = &response.drivers_performance[0];
        assert_eq!(driver.trips, 2);
        assert_eq!(driver.arrived, 2);
        assert_eq!(driver.performance_percentage, 100.0);

        let university = &response.universities_activity[0];
        assert_eq!(university.trips, 2);
        assert_eq!(university.students, 55);
    }

    #[test]
    fn test_drivers_sorted_by_percentage_descending() {
        let good = route_ref("سعيد حسن", "جامعة الفيصل");
        let bad = route_ref("خالد عبدالله", "جامعة الفيصل");
        let mut routes = HashMap::new();
        routes.insert(good.id, good.clone());
        routes.insert(bad.id, bad.clone());

        let route_trips = vec![
            RouteTripStatRow {
                status: TripStatus::Pending,
                students_count: 0,
                route_id: bad.id,
            },
            RouteTripStatRow {
                status: TripStatus::Arrived,
                students_count: 0,
                route_id: good.id,
            },
        ];

        let response = fold_statistics(
            "2024-05-01".to_string(),
            EntityTotals::default(),
            &[],
            &route_trips,
            &routes,
        );

        assert_eq!(response.drivers_performance[0].name, "سعيد حسن");
        assert_eq!(response.drivers_performance[0].performance_percentage, 100.0);
        assert_eq!(response.drivers_performance[1].performance_percentage, 0.0);
    }
}
