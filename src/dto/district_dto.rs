use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateDistrictRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateDistrictRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}
