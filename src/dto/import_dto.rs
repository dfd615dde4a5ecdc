use serde::Serialize;

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportCounts {
    pub routes_created: u32,
    pub trips_created: u32,
}

/// Resumen del lote. Los fallos por fila no abortan la importación:
/// se acumulan en `errors` junto a los contadores parciales.
#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub success: bool,
    pub message: String,
    pub details: ImportCounts,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}
