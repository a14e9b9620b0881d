//! CSV and JSON export bodies with download headers.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::Value;

pub const CSV_FILENAME: &str = "nextbike-filtered.csv";
pub const JSON_FILENAME: &str = "nextbike-filtered.json";

/// Header is the key set of the first row; later rows are projected onto it.
/// An empty input yields a single empty line.
pub fn to_csv(rows: &[Value]) -> String {
    let headers: Vec<&str> = rows
        .first()
        .and_then(Value::as_object)
        .map(|m| m.keys().map(String::as_str).collect())
        .unwrap_or_default();
    let mut out = headers.join(",");
    out.push('\n');
    for row in rows {
        let line: Vec<String> = headers.iter().map(|h| csv_field(row.get(*h))).collect();
        out.push_str(&line.join(","));
        out.push('\n');
    }
    out
}

/// Null or absent is empty; values containing a comma or quote are quoted with inner quotes doubled.
/// Whole-number floats drop the fraction (`16`, not `16.0`).
fn csv_field(value: Option<&Value>) -> String {
    let text = match value {
        None | Some(Value::Null) => return String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => match n.as_f64() {
            Some(f) if n.is_f64() => f.to_string(),
            _ => n.to_string(),
        },
        Some(other) => other.to_string(),
    };
    if text.contains(',') || text.contains('"') {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text
    }
}

/// 200 response with content type and `attachment` disposition.
pub fn attachment(content_type: &'static str, filename: &str, body: String) -> Response {
    let disposition = HeaderValue::from_str(&format!("attachment; filename={}", filename))
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"));
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(content_type)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response()
}

pub fn csv_attachment(rows: &[Value]) -> Response {
    attachment("text/csv; charset=utf-8", CSV_FILENAME, to_csv(rows))
}

pub fn json_attachment(rows: &[Value]) -> Result<Response, serde_json::Error> {
    let body = serde_json::to_string(rows)?;
    Ok(attachment("application/json; charset=utf-8", JSON_FILENAME, body))
}
