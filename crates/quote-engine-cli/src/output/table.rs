use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::{format_value, yearly_results};

/// Render a quote result as a schedule table plus a summary block; other
/// shapes fall back to generic field/value or row tables.
pub fn print_table(value: &Value) {
    if let Some(years) = yearly_results(value) {
        print_schedule(years);
        if let Some(result) = value.get("result") {
            print_summary(result);
        }
        print_warnings(value);
        if let Some(Value::String(meth)) = value.get("methodology") {
            println!("\nMethodology: {}", meth);
        }
        return;
    }

    match value.get("result") {
        Some(Value::Array(rows)) => print_rows(rows),
        Some(Value::Object(_)) | None => print_flat(value.get("result").unwrap_or(value)),
        Some(other) => println!("{}", other),
    }
}

const SCHEDULE_COLUMNS: [&str; 7] = [
    "year",
    "gross_usd",
    "gross_sar",
    "vat_sar",
    "grand_total_sar",
    "net_usd",
    "floor_adjusted",
];

fn print_schedule(years: &[Value]) {
    let mut builder = Builder::default();
    builder.push_record(["Year", "Gross USD", "Gross SAR", "VAT SAR", "Grand SAR", "Net USD", "Floor"]);
    for year in years {
        if let Value::Object(map) = year {
            let row: Vec<String> = SCHEDULE_COLUMNS
                .iter()
                .map(|col| map.get(*col).map(format_value).unwrap_or_default())
                .collect();
            builder.push_record(row);
        }
    }
    println!("{}", Table::from(builder));

    // year-1 notes, when any floor fired
    for year in years {
        if let Some(Value::Array(notes)) = year.get("notes") {
            for note in notes {
                if let Value::String(s) = note {
                    println!("  note: {}", s);
                }
            }
        }
    }
}

/// Summary scalars worth surfacing under the schedule.
const SUMMARY_FIELDS: [&str; 9] = [
    "total_gross_usd",
    "total_net_usd",
    "total_grand_sar",
    "acv_usd",
    "net_acv_usd",
    "renewal_base_acv",
    "upsell_acv",
    "net_upsell_acv",
    "currency_to_display",
];

fn print_summary(result: &Value) {
    let Value::Object(map) = result else { return };
    let mut builder = Builder::default();
    builder.push_record(["Metric", "Value"]);
    for field in SUMMARY_FIELDS {
        if let Some(v) = map.get(field) {
            if !v.is_null() {
                builder.push_record([field, &format_value(v)]);
            }
        }
    }
    println!("\n{}", Table::from(builder));
}

fn print_warnings(envelope: &Value) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }
}

fn print_rows(rows: &[Value]) {
    if rows.is_empty() {
        println!("(empty)");
        return;
    }
    let Some(Value::Object(first)) = rows.first() else {
        for row in rows {
            println!("{}", format_value(row));
        }
        return;
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(&headers);
    for row in rows {
        if let Value::Object(map) = row {
            let record: Vec<String> = headers
                .iter()
                .map(|h| map.get(h.as_str()).map(format_value).unwrap_or_default())
                .collect();
            builder.push_record(record);
        }
    }
    println!("{}", Table::from(builder));
}

fn print_flat(value: &Value) {
    if let Value::Object(map) = value {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in map {
            builder.push_record([key.as_str(), &format_value(val)]);
        }
        println!("{}", Table::from(builder));
    } else {
        println!("{}", value);
    }
}
