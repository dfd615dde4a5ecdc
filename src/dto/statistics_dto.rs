use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Default, Deserialize)]
pub struct StatisticsQuery {
    pub date: Option<String>,
}

#[derive(Debug, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsTotals {
    pub total_trips: i64,
    pub total_students: i64,
    pub total_universities: i64,
    pub total_drivers: i64,
    pub total_buses: i64,
    pub total_districts: i64,
}

/// Contadores por estado, siempre con las cinco claves presentes
#[derive(Debug, Default, Serialize, PartialEq)]
pub struct StatusCounts {
    #[serde(rename = "PENDING")]
    pub pending: i64,
    #[serde(rename = "DEPARTED")]
    pub departed: i64,
    #[serde(rename = "ARRIVED")]
    pub arrived: i64,
    #[serde(rename = "DELAYED")]
    pub delayed: i64,
    #[serde(rename = "CANCELLED")]
    pub cancelled: i64,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DriverPerformance {
    pub driver_id: Uuid,
    pub name: String,
    pub trips: i64,
    pub arrived: i64,
    /// Porcentaje llegados/total con un decimal; 0 si no hay viajes
    pub performance_percentage: f64,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UniversityActivity {
    pub university_id: Uuid,
    pub name: String,
    pub trips: i64,
    pub students: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsResponse {
    pub date: String,
    pub totals: StatisticsTotals,
    pub status_counts: StatusCounts,
    pub drivers_performance: Vec<DriverPerformance>,
    pub universities_activity: Vec<UniversityActivity>,
}
