use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateDriverRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateDriverRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
}
