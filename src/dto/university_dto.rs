use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct CreateUniversityRequest {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUniversityRequest {
    pub name: Option<String>,
}

/// Item del listado, enriquecido con el número de rutas que la referencian
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UniversityListItem {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub routes_count: i64,
}
