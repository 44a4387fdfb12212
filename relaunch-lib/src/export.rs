//! Rendering record lists as JSON, CSV or plain text.

use std::fmt;
use std::str::FromStr;

use relaunch_core::{Field, FieldKind, Record};
use serde::{Deserialize, Serialize};

use crate::error::LibError;

/// Output format for record listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
    Txt,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Txt => "txt",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = LibError;

    /// Accepts the bare name or the file extension form (`json`, `.json`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_start_matches('.').to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            "txt" | "text" => Ok(ExportFormat::Txt),
            _ => Err(LibError::UnknownFormat(s.to_string())),
        }
    }
}

/// Render `records` in the requested format.
pub fn export_records<R: Record>(records: &[R], format: ExportFormat) -> Result<String, LibError> {
    match format {
        ExportFormat::Json => to_json(records),
        ExportFormat::Csv => to_csv(records),
        ExportFormat::Txt => Ok(to_text(records)),
    }
}

/// An array of objects. Numbers and booleans keep their JSON types.
fn to_json<R: Record>(records: &[R]) -> Result<String, LibError> {
    let rows: Vec<serde_json::Value> = records
        .iter()
        .map(|record| {
            let object = record
                .fields()
                .into_iter()
                .map(|field| (field.name.to_string(), json_value(&field)))
                .collect::<serde_json::Map<_, _>>();
            serde_json::Value::Object(object)
        })
        .collect();
    Ok(serde_json::to_string_pretty(&rows)?)
}

fn json_value(field: &Field) -> serde_json::Value {
    match field.kind {
        FieldKind::Number => field
            .value
            .parse::<i64>()
            .map(serde_json::Value::from)
            .unwrap_or_else(|_| serde_json::Value::String(field.value.clone())),
        FieldKind::Boolean => serde_json::Value::Bool(field.value == "true"),
        FieldKind::String => serde_json::Value::String(field.value.clone()),
    }
}

/// Header row of column names, then one row per record.
fn to_csv<R: Record>(records: &[R]) -> Result<String, LibError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(R::COLUMNS.iter().map(|c| c.name))?;
    for record in records {
        writer.write_record(record.fields().iter().map(|f| f.value.as_str()))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| LibError::Io(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// One line per record of `name=value;` pairs.
fn to_text<R: Record>(records: &[R]) -> String {
    let mut out = String::new();
    for record in records {
        for field in record.fields() {
            out.push_str(field.name);
            out.push('=');
            out.push_str(&field.value);
            out.push(';');
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use relaunch_core::{LaunchTaskRecord, TaskTypeRecord};

    fn task() -> LaunchTaskRecord {
        LaunchTaskRecord {
            id: 7,
            release_key: "gog_1".to_string(),
            user_id: 46_988_221_349_126_400,
            order: 2,
            type_id: 3,
            type_name: "CustomTask".to_string(),
            is_primary: true,
        }
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("json".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert_eq!(".CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!(".txt".parse::<ExportFormat>().unwrap(), ExportFormat::Txt);
        assert!(matches!(
            "xml".parse::<ExportFormat>(),
            Err(LibError::UnknownFormat(_))
        ));
    }

    #[test]
    fn test_json_keeps_field_types() {
        let out = export_records(&[task()], ExportFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        let row = &parsed[0];
        assert_eq!(row["id"], 7);
        assert_eq!(row["userId"], 46_988_221_349_126_400_i64);
        assert_eq!(row["gameReleaseKey"], "gog_1");
        assert_eq!(row["isPrimary"], true);
    }

    #[test]
    fn test_json_of_nothing_is_empty_array() {
        let out = export_records::<TaskTypeRecord>(&[], ExportFormat::Json).unwrap();
        assert_eq!(out, "[]");
    }

    #[test]
    fn test_csv_has_header_and_quotes() {
        let types = [
            TaskTypeRecord { id: 1, type_name: "FileTask".to_string() },
            TaskTypeRecord { id: 2, type_name: "a,b".to_string() },
        ];
        let out = export_records(&types, ExportFormat::Csv).unwrap();
        assert_eq!(out, "id,type\n1,FileTask\n2,\"a,b\"\n");
    }

    #[test]
    fn test_csv_header_without_records() {
        let out = export_records::<TaskTypeRecord>(&[], ExportFormat::Csv).unwrap();
        assert_eq!(out, "id,type\n");
    }

    #[test]
    fn test_text_lines() {
        let types = [TaskTypeRecord { id: 1, type_name: "FileTask".to_string() }];
        let out = export_records(&types, ExportFormat::Txt).unwrap();
        assert_eq!(out, "id=1;type=FileTask;\n");
    }
}
