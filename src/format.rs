//! Row formatting: PostgreSQL rows to JSON objects, then boolean coercion and date truncation.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::{Map, Value};
use sqlx::postgres::PgRow;
use sqlx::{Column, Row};

/// Boolean columns that may arrive as a native bool or as the text `'t'`.
pub const BOOL_COLUMNS: &[&str] = &["aktivna"];

/// Date columns rendered as `YYYY-MM-DD`.
pub const DATE_COLUMNS: &[&str] = &["datum_posljednje_aktivnosti", "zadnje_koristenje"];

/// Convert a row to a JSON object, keeping the column order of the SELECT list.
pub fn row_to_json(row: &PgRow) -> Value {
    let mut map = Map::new();
    for col in row.columns() {
        let name = col.name();
        map.insert(name.to_string(), cell_to_value(row, name));
    }
    Value::Object(map)
}

fn cell_to_value(row: &PgRow, name: &str) -> Value {
    if let Ok(Some(n)) = row.try_get::<Option<i16>, _>(name) {
        return Value::Number(n.into());
    }
    if let Ok(Some(n)) = row.try_get::<Option<i32>, _>(name) {
        return Value::Number(n.into());
    }
    if let Ok(Some(n)) = row.try_get::<Option<i64>, _>(name) {
        return Value::Number(n.into());
    }
    if let Ok(Some(n)) = row.try_get::<Option<f32>, _>(name) {
        if let Some(n) = serde_json::Number::from_f64(f64::from(n)) {
            return Value::Number(n);
        }
    }
    if let Ok(Some(n)) = row.try_get::<Option<f64>, _>(name) {
        if let Some(n) = serde_json::Number::from_f64(n) {
            return Value::Number(n);
        }
    }
    if let Ok(Some(b)) = row.try_get::<Option<bool>, _>(name) {
        return Value::Bool(b);
    }
    if let Ok(Some(d)) = row.try_get::<Option<NaiveDate>, _>(name) {
        return Value::String(d.format("%Y-%m-%d").to_string());
    }
    if let Ok(Some(d)) = row.try_get::<Option<DateTime<Utc>>, _>(name) {
        return Value::String(d.to_rfc3339());
    }
    if let Ok(Some(d)) = row.try_get::<Option<NaiveDateTime>, _>(name) {
        return Value::String(d.format("%Y-%m-%dT%H:%M:%S%.f").to_string());
    }
    if let Ok(Some(s)) = row.try_get::<Option<String>, _>(name) {
        return Value::String(s);
    }
    if let Ok(Some(j)) = row.try_get::<Option<Value>, _>(name) {
        return j;
    }
    Value::Null
}

/// Normalize one row in place. Only keys present on the row are touched.
pub fn format_row(mut row: Value) -> Value {
    if let Value::Object(map) = &mut row {
        for key in BOOL_COLUMNS {
            if let Some(v) = map.get_mut(*key) {
                *v = Value::Bool(coerce_bool(v));
            }
        }
        for key in DATE_COLUMNS {
            if let Some(v) = map.get_mut(*key) {
                *v = truncate_date(v);
            }
        }
    }
    row
}

pub fn format_pg_rows(rows: &[PgRow]) -> Vec<Value> {
    rows.iter().map(|r| format_row(row_to_json(r))).collect()
}

/// `true` or `"t"` is true; everything else is false.
pub fn coerce_bool(v: &Value) -> bool {
    match v {
        Value::Bool(b) => *b,
        Value::String(s) => s == "t",
        _ => false,
    }
}

/// Calendar date (UTC) of a date or timestamp string; null stays null.
pub fn truncate_date(v: &Value) -> Value {
    let Value::String(s) = v else {
        return Value::Null;
    };
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Value::String(dt.with_timezone(&Utc).format("%Y-%m-%d").to_string());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Value::String(dt.format("%Y-%m-%d").to_string());
    }
    match s.split('T').next() {
        Some(date) if NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok() => Value::String(date.to_string()),
        _ => Value::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bool_coercion_accepts_native_and_t() {
        assert!(coerce_bool(&json!(true)));
        assert!(coerce_bool(&json!("t")));
        assert!(!coerce_bool(&json!(false)));
        assert!(!coerce_bool(&json!("f")));
        assert!(!coerce_bool(&json!("true")));
        assert!(!coerce_bool(&Value::Null));
        assert!(!coerce_bool(&json!(1)));
    }

    #[test]
    fn dates_truncate_to_calendar_day() {
        assert_eq!(truncate_date(&json!("2024-03-05")), json!("2024-03-05"));
        assert_eq!(truncate_date(&json!("2024-03-05T10:11:12.000Z")), json!("2024-03-05"));
        assert_eq!(truncate_date(&json!("2024-03-05T23:30:00-02:00")), json!("2024-03-06"));
        assert_eq!(truncate_date(&json!("2024-03-05T10:11:12")), json!("2024-03-05"));
        assert_eq!(truncate_date(&Value::Null), Value::Null);
        assert_eq!(truncate_date(&json!("not a date")), Value::Null);
    }

    #[test]
    fn format_row_touches_only_present_keys() {
        let station = format_row(json!({
            "id": 1,
            "naziv": "Trg",
            "aktivna": "t",
            "datum_posljednje_aktivnosti": "2024-01-02T00:00:00Z"
        }));
        assert_eq!(station["aktivna"], json!(true));
        assert_eq!(station["datum_posljednje_aktivnosti"], json!("2024-01-02"));
        assert!(station.get("zadnje_koristenje").is_none());

        let bike = format_row(json!({"id": 800001, "zadnje_koristenje": null, "stanica_id": 1}));
        assert_eq!(bike["zadnje_koristenje"], Value::Null);
        assert!(bike.get("aktivna").is_none());
    }

    #[test]
    fn format_row_keeps_column_order() {
        let row = format_row(json!({"stanica_id": 1, "naziv": "A", "aktivna": false, "bicikl_id": null}));
        let keys: Vec<&String> = row.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["stanica_id", "naziv", "aktivna", "bicikl_id"]);
    }
}
