//! Unificación de los dos orígenes de viajes diarios
//!
//! Normaliza filas de `trips` y `route_trips` a una forma común y las
//! ordena por fecha descendente y después por la etiqueta de hora en
//! orden lexicográfico. Las etiquetas vienen en formatos distintos según
//! la tabla ("08:00" de 24 horas frente a "8:30 AM"); la comparación es
//! de strings a propósito, el contrato del API conserva ese orden.

use std::collections::HashMap;

use uuid::Uuid;

use crate::dto::trip_dto::{TripSource, UnifiedTrip, UnifiedTripRoute};
use crate::dto::{BusRef, DriverRef, NamedRef};
use crate::repositories::trip_repository::{RouteTripJoinRow, TripJoinRow};

/// Unir, normalizar y ordenar los dos orígenes
pub fn unify_trips(
    trips: Vec<TripJoinRow>,
    route_trips: Vec<RouteTripJoinRow>,
    bus_districts: &HashMap<Uuid, Vec<NamedRef>>,
) -> Vec<UnifiedTrip> {
    let mut unified = Vec::with_capacity(trips.len() + route_trips.len());
    for row in trips {
        unified.push(normalize_trip(row, bus_districts));
    }
    for row in route_trips {
        unified.push(normalize_route_trip(row, bus_districts));
    }
    sort_unified(&mut unified);
    unified
}

/// Distritos del viaje: el de la ruta si existe, si no todos los del autobús
fn resolve_districts(
    route_district: Option<NamedRef>,
    bus_id: Uuid,
    bus_districts: &HashMap<Uuid, Vec<NamedRef>>,
) -> Vec<NamedRef> {
    match route_district {
        Some(district) => vec![district],
        None => bus_districts.get(&bus_id).cloned().unwrap_or_default(),
    }
}

fn named_ref(id: Option<Uuid>, name: Option<String>) -> Option<NamedRef> {
    match (id, name) {
        (Some(id), Some(name)) => Some(NamedRef { id, name }),
        _ => None,
    }
}

fn normalize_trip(
    row: TripJoinRow,
    bus_districts: &HashMap<Uuid, Vec<NamedRef>>,
) -> UnifiedTrip {
    let route_district = named_ref(row.route_district_id, row.route_district_name);
    let districts = resolve_districts(route_district, row.bus_id, bus_districts);

    let driver = match (row.driver_id, row.driver_name) {
        (Some(id), Some(name)) => Some(DriverRef {
            id,
            name,
            phone: row.driver_phone,
        }),
        _ => None,
    };

    UnifiedTrip {
        id: row.id,
        source: TripSource::Trips,
        trip_date: row.trip_date,
        direction: row.direction,
        // la hora programada se presenta como etiqueta de 24 horas
        trip_time: row.scheduled_time.format("%H:%M").to_string(),
        students_count: row.passengers_count,
        status: row.status,
        notes: row.notes,
        route: UnifiedTripRoute {
            id: None,
            bus: Some(BusRef {
                id: row.bus_id,
                bus_number: row.bus_number,
            }),
            driver,
            university: named_ref(row.university_id, row.university_name),
            district: districts.first().cloned(),
            districts,
        },
    }
}

fn normalize_route_trip(
    row: RouteTripJoinRow,
    bus_districts: &HashMap<Uuid, Vec<NamedRef>>,
) -> UnifiedTrip {
    let route_district = named_ref(row.route_district_id, row.route_district_name);
    let districts = resolve_districts(route_district, row.bus_id, bus_districts);

    let driver = match (row.driver_id, row.driver_name) {
        (Some(id), Some(name)) => Some(DriverRef {
            id,
            name,
            phone: row.driver_phone,
        }),
        _ => None,
    };

    UnifiedTrip {
        id: row.id,
        source: TripSource::RouteTrips,
        trip_date: row.trip_date,
        direction: row.direction,
        trip_time: row.trip_time,
        students_count: row.students_count,
        status: row.status,
        notes: None,
        route: UnifiedTripRoute {
            id: Some(row.route_id),
            bus: Some(BusRef {
                id: row.bus_id,
                bus_number: row.bus_number,
            }),
            driver,
            university: named_ref(row.university_id, row.university_name),
            district: districts.first().cloned(),
            districts,
        },
    }
}

/// Fecha descendente, después etiqueta de hora ascendente (comparación
/// de strings)
pub fn sort_unified(trips: &mut [UnifiedTrip]) {
    trips.sort_by(|a, b| {
        b.trip_date
            .cmp(&a.trip_date)
            .then_with(|| a.trip_time.cmp(&b.trip_time))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TripDirection, TripStatus};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn trip_row(scheduled_hour: u32, scheduled_min: u32, date: NaiveDate) -> TripJoinRow {
        TripJoinRow {
            id: Uuid::new_v4(),
            trip_date: date,
            direction: TripDirection::Go,
            scheduled_time: Utc
                .with_ymd_and_hms(2024, 5, 1, scheduled_hour, scheduled_min, 0)
                .unwrap(),
            passengers_count: 10,
            status: TripStatus::Pending,
            notes: None,
            bus_id: Uuid::new_v4(),
            bus_number: "BUS-001".to_string(),
            route_id: None,
            university_id: None,
            university_name: None,
            driver_id: None,
            driver_name: None,
            driver_phone: None,
            route_district_id: None,
            route_district_name: None,
        }
    }

    fn route_trip_row(trip_time: &str, date: NaiveDate) -> RouteTripJoinRow {
        RouteTripJoinRow {
            id: Uuid::new_v4(),
            trip_date: date,
            direction: TripDirection::Go,
            trip_time: trip_time.to_string(),
            students_count: 20,
            status: TripStatus::Pending,
            route_id: Uuid::new_v4(),
            bus_id: Uuid::new_v4(),
            bus_number: "BUS-002".to_string(),
            university_id: None,
            university_name: None,
            driver_id: None,
            driver_name: None,
            driver_phone: None,
            route_district_id: None,
            route_district_name: None,
        }
    }

    #[test]
    fn test_merged_sources_sort_lexicographically_by_time_label() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let unified = unify_trips(
            vec![trip_row(8, 0, date)],
            vec![route_trip_row("8:30 AM", date)],
            &HashMap::new(),
        );

        let labels: Vec<&str> = unified.iter().map(|t| t.trip_time.as_str()).collect();
        assert_eq!(labels, vec!["08:00", "8:30 AM"]);
        assert_eq!(unified[0].source, TripSource::Trips);
        assert_eq!(unified[1].source, TripSource::RouteTrips);
    }

    #[test]
    fn test_sort_is_string_compare_not_numeric() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let unified = unify_trips(
            vec![],
            vec![route_trip_row("9:00", date), route_trip_row("10:30 AM", date)],
            &HashMap::new(),
        );

        // "10:30 AM" queda antes que "9:00" porque '1' < '9'
        let labels: Vec<&str> = unified.iter().map(|t| t.trip_time.as_str()).collect();
        assert_eq!(labels, vec!["10:30 AM", "9:00"]);
    }

    #[test]
    fn test_sort_date_descending_before_time() {
        let newer = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
        let older = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let unified = unify_trips(
            vec![],
            vec![
                route_trip_row("7:30 AM", older),
                route_trip_row("9:30 AM", newer),
            ],
            &HashMap::new(),
        );

        assert_eq!(unified[0].trip_date, newer);
        assert_eq!(unified[1].trip_date, older);
    }

    #[test]
    fn test_route_district_takes_precedence_over_bus_districts() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let mut row = route_trip_row("7:30 AM", date);
        let district_id = Uuid::new_v4();
        row.route_district_id = Some(district_id);
        row.route_district_name = Some("حي العليا".to_string());

        let mut bus_districts = HashMap::new();
        bus_districts.insert(
            row.bus_id,
            vec![NamedRef {
                id: Uuid::new_v4(),
                name: "حي الرياض".to_string(),
            }],
        );

        let unified = unify_trips(vec![], vec![row], &bus_districts);
        assert_eq!(unified[0].route.districts.len(), 1);
        assert_eq!(unified[0].route.districts[0].id, district_id);
        assert_eq!(
            unified[0].route.district.as_ref().map(|d| d.id),
            Some(district_id)
        );
    }

    #[test]
    fn test_bus_districts_used_when_route_has_none() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let row = route_trip_row("7:30 AM", date);
        let bus_id = row.bus_id;

        let mut bus_districts = HashMap::new();
        bus_districts.insert(
            bus_id,
            vec![
                NamedRef {
                    id: Uuid::new_v4(),
                    name: "حي الرياض".to_string(),
                },
                NamedRef {
                    id: Uuid::new_v4(),
                    name: "حي السلي".to_string(),
                },
            ],
        );

        let unified = unify_trips(vec![], vec![row], &bus_districts);
        assert_eq!(unified[0].route.districts.len(), 2);
        assert_eq!(
            unified[0].route.district.as_ref().map(|d| d.name.clone()),
            Some("حي الرياض".to_string())
        );
    }
}
