//! Importación masiva de rutas y viajes desde una hoja de cálculo
//!
//! Cada fila resuelve o crea sus entidades referenciadas, crea una ruta
//! y da de alta los viajes del día según las columnas de franja horaria.
//! Los fallos son por fila y no abortan el lote.

use chrono::Utc;
use sqlx::PgPool;
use tracing::warn;

use crate::dto::import_dto::{ImportCounts, ImportResponse};
use crate::models::{Bus, Driver, Representative, TripDirection, University};
use crate::repositories::bus_repository::BusRepository;
use crate::repositories::driver_repository::DriverRepository;
use crate::repositories::representative_repository::RepresentativeRepository;
use crate::repositories::route_repository::RouteRepository;
use crate::repositories::trip_repository::TripRepository;
use crate::repositories::university_repository::UniversityRepository;
use crate::services::import_service::{
    is_truthy, parse_count, parse_spreadsheet, ImportField, ImportRow, GO_TIMES, RETURN_TIMES,
};
use crate::utils::errors::{AppError, AppResult};

/// Capacidad asignada a los autobuses creados por la importación
const DEFAULT_CAPACITY: i32 = 50;

pub struct ImportController {
    universities: UniversityRepository,
    drivers: DriverRepository,
    buses: BusRepository,
    representatives: RepresentativeRepository,
    routes: RouteRepository,
    trips: TripRepository,
}

impl ImportController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            universities: UniversityRepository::new(pool.clone()),
            drivers: DriverRepository::new(pool.clone()),
            buses: BusRepository::new(pool.clone()),
            representatives: RepresentativeRepository::new(pool.clone()),
            routes: RouteRepository::new(pool.clone()),
            trips: TripRepository::new(pool),
        }
    }

    pub async fn import(&self, filename: &str, bytes: &[u8]) -> AppResult<ImportResponse> {
        let rows = parse_spreadsheet(filename, bytes)?;
        if rows.is_empty() {
            return Err(AppError::BadRequest("الملف فارغ".to_string()));
        }

        let today = Utc::now().date_naive();
        let mut counts = ImportCounts::default();
        let mut errors = Vec::new();

        for (index, row) in rows.iter().enumerate() {
            match self.import_row(row, today).await {
                Ok(trips_created) => {
                    counts.routes_created += 1;
                    counts.trips_created += trips_created;
                }
                Err(error) => {
                    // la primera fila de datos es la número 2 del archivo
                    errors.push(format!("خطأ في السطر {}: {}", index + 2, error));
                }
            }
        }

        Ok(ImportResponse {
            success: true,
            message: "تم استيراد البيانات بنجاح".to_string(),
            details: counts,
            errors,
        })
    }

    /// Procesar una fila: entidades, ruta y viajes de franjas horarias
    async fn import_row(&self, row: &ImportRow, today: chrono::NaiveDate) -> AppResult<u32> {
        let university = self.resolve_university(row).await?;
        let driver = self.resolve_driver(row).await?;
        let bus = self.resolve_bus(row).await?;
        let representative = self.resolve_representative(row).await?;

        let total_go_trips = row
            .field(ImportField::GoTripsCount)
            .map(parse_count)
            .unwrap_or(0);
        let total_return_trips = row
            .field(ImportField::ReturnTripsCount)
            .map(parse_count)
            .unwrap_or(0);

        let route = self
            .routes
            .create(
                university.id,
                driver.id,
                bus.id,
                None,
                Some(representative.id),
                total_go_trips,
                total_return_trips,
            )
            .await?;

        let mut trips_created = 0;
        trips_created += self
            .create_slot_trips(row, route.id, today, TripDirection::Go, GO_TIMES)
            .await;
        trips_created += self
            .create_slot_trips(row, route.id, today, TripDirection::Return, RETURN_TIMES)
            .await;

        Ok(trips_created)
    }

    /// Un viaje por cada franja con celda presente. Los duplicados y
    /// otros fallos de alta se registran sin interrumpir la fila.
    async fn create_slot_trips(
        &self,
        row: &ImportRow,
        route_id: uuid::Uuid,
        today: chrono::NaiveDate,
        direction: TripDirection,
        slots: &[&str],
    ) -> u32 {
        let mut created = 0;
        for slot in slots {
            let Some(cell) = row.slot_cell(direction, slot) else {
                continue;
            };
            if !is_truthy(cell) {
                continue;
            }

            match self
                .trips
                .create_route_trip(route_id, today, direction, slot, parse_count(cell))
                .await
            {
                Ok(_) => created += 1,
                Err(AppError::Duplicate(_)) => {
                    warn!(
                        "viaje {} duplicado para la franja '{}', se omite",
                        direction.as_str(),
                        slot
                    );
                }
                Err(error) => {
                    warn!(
                        "fallo creando viaje {} en la franja '{}': {}",
                        direction.as_str(),
                        slot,
                        error
                    );
                }
            }
        }
        created
    }

    async fn resolve_university(&self, row: &ImportRow) -> AppResult<University> {
        let name = row
            .field(ImportField::University)
            .ok_or_else(|| AppError::BadRequest("اسم الجامعة مفقود".to_string()))?;

        match self.universities.find_by_name(name).await? {
            Some(university) => Ok(university),
            None => self.universities.create(name).await,
        }
    }

    async fn resolve_driver(&self, row: &ImportRow) -> AppResult<Driver> {
        let name = row
            .field(ImportField::Driver)
            .ok_or_else(|| AppError::BadRequest("اسم السائق مفقود".to_string()))?;

        match self.drivers.find_by_name(name).await? {
            Some(driver) => Ok(driver),
            None => self.drivers.create(name, None).await,
        }
    }

    async fn resolve_bus(&self, row: &ImportRow) -> AppResult<Bus> {
        let bus_number = row
            .field(ImportField::Bus)
            .ok_or_else(|| AppError::BadRequest("رقم الباص مفقود".to_string()))?;

        match self.buses.find_by_number(bus_number).await? {
            Some(bus) => Ok(bus),
            None => self.buses.create(bus_number, DEFAULT_CAPACITY, &[]).await,
        }
    }

    async fn resolve_representative(&self, row: &ImportRow) -> AppResult<Representative> {
        let name = row
            .field(ImportField::Representative)
            .ok_or_else(|| AppError::BadRequest("اسم المندوب مفقود".to_string()))?;

        match self.representatives.find_by_name(name).await? {
            Some(representative) => Ok(representative),
            None => self.representatives.create(name, None, None).await,
        }
    }
}
