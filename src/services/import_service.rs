//! Análisis de archivos de importación
//!
//! Convierte la primera hoja de un archivo .xlsx/.xls/.csv en filas
//! indexadas por encabezado. El mapeo de columnas es declarativo: cada
//! campo canónico lleva su lista de encabezados aceptados, alias árabes
//! primero con alternativas en inglés.

use std::collections::HashMap;
use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};

use crate::models::TripDirection;
use crate::utils::errors::{AppError, AppResult};

/// Campos canónicos reconocidos en el encabezado
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportField {
    University,
    Driver,
    Bus,
    Representative,
    GoTripsCount,
    ReturnTripsCount,
}

/// Tabla campo canónico → encabezados aceptados
pub const COLUMN_ALIASES: &[(ImportField, &[&str])] = &[
    (
        ImportField::University,
        &["الجامعة", "اسم الجامعة", "University", "university"],
    ),
    (
        ImportField::Driver,
        &["السائق", "اسم السائق", "Driver", "driver"],
    ),
    (ImportField::Bus, &["الباص", "رقم الباص", "Bus", "bus"]),
    (
        ImportField::Representative,
        &["المندوب", "اسم المندوب", "Representative", "representative"],
    ),
    (
        ImportField::GoTripsCount,
        &["عدد رحلات الذهاب", "Go Trips", "go_trips"],
    ),
    (
        ImportField::ReturnTripsCount,
        &["عدد رحلات العودة", "Return Trips", "return_trips"],
    ),
];

/// Franjas horarias de ida reconocidas como columnas
pub const GO_TIMES: &[&str] = &[
    "7:30 AM", "8:30 AM", "9:30 AM", "10:30 AM", "11:30 AM", "12:30 PM", "1:30 PM", "2:30 PM",
    "المجمّع",
];

/// Franjas horarias de vuelta
pub const RETURN_TIMES: &[&str] = &[
    "12:30 PM", "1:30 PM", "2:30 PM", "3:30 PM", "4:30 PM", "5:30 PM", "المجمّع",
];

/// Fila del archivo indexada por encabezado. Las celdas vacías no se
/// almacenan.
#[derive(Debug, Default, Clone)]
pub struct ImportRow {
    values: HashMap<String, String>,
}

impl ImportRow {
    pub fn new(values: HashMap<String, String>) -> Self {
        Self { values }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Valor de un campo canónico, probando sus alias en orden
    pub fn field(&self, field: ImportField) -> Option<&str> {
        let aliases = COLUMN_ALIASES
            .iter()
            .find(|(candidate, _)| *candidate == field)
            .map(|(_, aliases)| *aliases)?;

        aliases
            .iter()
            .find_map(|alias| self.values.get(*alias))
            .map(|value| value.as_str())
    }

    /// Celda de una franja horaria: primero el encabezado con prefijo de
    /// dirección ("ذهاب_7:30 AM" / "عودة_3:30 PM"), después la etiqueta
    /// sola. La etiqueta sin prefijo se comparte entre ambas direcciones,
    /// igual que en las plantillas originales.
    pub fn slot_cell(&self, direction: TripDirection, slot: &str) -> Option<&str> {
        let prefixed = match direction {
            TripDirection::Go => format!("ذهاب_{}", slot),
            TripDirection::Return => format!("عودة_{}", slot),
        };
        self.values
            .get(&prefixed)
            .or_else(|| self.values.get(slot))
            .map(|value| value.as_str())
    }
}

/// Una celda cuenta como presente si no está vacía ni es "0"
pub fn is_truthy(cell: &str) -> bool {
    let trimmed = cell.trim();
    !trimmed.is_empty() && trimmed != "0"
}

/// Número de estudiantes de una celda; ilegible cuenta como 0
pub fn parse_count(cell: &str) -> i32 {
    let trimmed = cell.trim();
    trimmed
        .parse::<i32>()
        .or_else(|_| trimmed.parse::<f64>().map(|value| value as i32))
        .unwrap_or(0)
}

/// Analizar el archivo según su extensión
pub fn parse_spreadsheet(filename: &str, bytes: &[u8]) -> AppResult<Vec<ImportRow>> {
    let extension = filename
        .rsplit('.')
        .next()
        .unwrap_or("")
        .to_ascii_lowercase();

    match extension.as_str() {
        "csv" => parse_csv(bytes),
        "xlsx" | "xls" => parse_excel(bytes),
        _ => Err(AppError::BadRequest(
            "صيغة الملف غير مدعومة. الصيغ المقبولة: .xlsx .xls .csv".to_string(),
        )),
    }
}

fn parse_csv(bytes: &[u8]) -> AppResult<Vec<ImportRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let headers = reader
        .headers()
        .map_err(|e| AppError::BadRequest(format!("خطأ في قراءة الملف: {}", e)))?
        .clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record =
            record.map_err(|e| AppError::BadRequest(format!("خطأ في قراءة الملف: {}", e)))?;

        let mut values = HashMap::new();
        for (header, value) in headers.iter().zip(record.iter()) {
            if !header.is_empty() && !value.is_empty() {
                values.insert(header.to_string(), value.to_string());
            }
        }
        if !values.is_empty() {
            rows.push(ImportRow::new(values));
        }
    }
    Ok(rows)
}

fn parse_excel(bytes: &[u8]) -> AppResult<Vec<ImportRow>> {
    let cursor = Cursor::new(bytes.to_vec());
    let mut workbook = open_workbook_auto_from_rs(cursor)
        .map_err(|e| AppError::BadRequest(format!("خطأ في قراءة الملف: {}", e)))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| AppError::BadRequest("الملف فارغ".to_string()))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| AppError::BadRequest(format!("خطأ في قراءة الملف: {}", e)))?;

    let mut rows_iter = range.rows();
    let headers: Vec<String> = match rows_iter.next() {
        Some(row) => row.iter().map(cell_to_string).collect(),
        None => return Ok(Vec::new()),
    };

    let mut rows = Vec::new();
    for row in rows_iter {
        let mut values = HashMap::new();
        for (header, cell) in headers.iter().zip(row.iter()) {
            let value = cell_to_string(cell);
            if !header.is_empty() && !value.is_empty() {
                values.insert(header.clone(), value);
            }
        }
        if !values.is_empty() {
            rows.push(ImportRow::new(values));
        }
    }
    Ok(rows)
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(value) => value.trim().to_string(),
        Data::Int(value) => value.to_string(),
        Data::Float(value) => {
            if value.fract() == 0.0 {
                format!("{}", *value as i64)
            } else {
                value.to_string()
            }
        }
        Data::Bool(value) => value.to_string(),
        other => other.to_string().trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV_ARABIC: &str = "\
الجامعة,السائق,الباص,المندوب,عدد رحلات الذهاب,عدد رحلات العودة,ذهاب_7:30 AM,عودة_3:30 PM,12:30 PM
جامعة الملك سعود,أحمد محمد,BUS-001,سالم فهد,3,2,25,18,10
جامعة الملك سعود,خالد عبدالله,BUS-002,سالم فهد,1,1,30,,0
";

    #[test]
    fn test_parse_csv_with_arabic_headers() {
        let rows = parse_spreadsheet("routes.csv", CSV_ARABIC.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);

        let first = &rows[0];
        assert_eq!(first.field(ImportField::University), Some("جامعة الملك سعود"));
        assert_eq!(first.field(ImportField::Driver), Some("أحمد محمد"));
        assert_eq!(first.field(ImportField::Bus), Some("BUS-001"));
        assert_eq!(first.field(ImportField::Representative), Some("سالم فهد"));
        assert_eq!(first.field(ImportField::GoTripsCount), Some("3"));
        assert_eq!(first.field(ImportField::ReturnTripsCount), Some("2"));
    }

    #[test]
    fn test_slot_cell_prefixed_and_bare() {
        let rows = parse_spreadsheet("routes.csv", CSV_ARABIC.as_bytes()).unwrap();
        let first = &rows[0];

        assert_eq!(first.slot_cell(TripDirection::Go, "7:30 AM"), Some("25"));
        assert_eq!(first.slot_cell(TripDirection::Return, "3:30 PM"), Some("18"));
        // La columna sin prefijo responde para ambas direcciones
        assert_eq!(first.slot_cell(TripDirection::Go, "12:30 PM"), Some("10"));
        assert_eq!(first.slot_cell(TripDirection::Return, "12:30 PM"), Some("10"));
        assert_eq!(first.slot_cell(TripDirection::Go, "8:30 AM"), None);
    }

    #[test]
    fn test_empty_cells_are_not_stored() {
        let rows = parse_spreadsheet("routes.csv", CSV_ARABIC.as_bytes()).unwrap();
        let second = &rows[1];
        assert_eq!(second.slot_cell(TripDirection::Return, "3:30 PM"), None);
    }

    #[test]
    fn test_english_header_fallbacks() {
        let csv = "University,Driver,Bus,Representative\nKSU,Ahmed,BUS-009,Salem\n";
        let rows = parse_spreadsheet("data.csv", csv.as_bytes()).unwrap();
        assert_eq!(rows[0].field(ImportField::University), Some("KSU"));
        assert_eq!(rows[0].field(ImportField::Bus), Some("BUS-009"));
    }

    #[test]
    fn test_unsupported_extension() {
        let result = parse_spreadsheet("routes.pdf", b"whatever");
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_empty_csv_has_no_rows() {
        let rows = parse_spreadsheet("empty.csv", b"").unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_is_truthy() {
        assert!(is_truthy("25"));
        assert!(is_truthy("x"));
        assert!(!is_truthy(""));
        assert!(!is_truthy("  "));
        assert!(!is_truthy("0"));
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("12"), 12);
        assert_eq!(parse_count("12.0"), 12);
        assert_eq!(parse_count(" 7 "), 7);
        assert_eq!(parse_count("abc"), 0);
        assert_eq!(parse_count(""), 0);
    }

    #[test]
    fn test_time_slot_tables() {
        assert_eq!(GO_TIMES.len(), 9);
        assert_eq!(RETURN_TIMES.len(), 7);
        assert!(GO_TIMES.contains(&"المجمّع"));
        assert!(RETURN_TIMES.contains(&"المجمّع"));
    }
}
