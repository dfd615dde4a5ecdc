use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateRepresentativeRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRepresentativeRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}
