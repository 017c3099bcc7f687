use tabled::Table;
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::query::{SortColumn, SortDirection, SortState};
use crate::types::Alert;

pub mod cli_formatting;

pub use cli_formatting::*;

/// Column headers in display order
const COLUMNS: [(Option<SortColumn>, &str); 6] = [
    (None, "ID"),
    (Some(SortColumn::Datetime), "Datetime"),
    (Some(SortColumn::Value), "Value"),
    (Some(SortColumn::Version), "Version"),
    (Some(SortColumn::Type), "Type"),
    (Some(SortColumn::Sended), "Sended"),
];

/// Header label, with an arrow on the sorted column
fn header_label(column: Option<SortColumn>, label: &str, sort: &SortState) -> String {
    match column {
        Some(column) if sort.column == Some(column) => {
            let arrow = match sort.direction {
                SortDirection::Ascending => '↑',
                SortDirection::Descending => '↓',
            };
            format!("{label} {arrow}")
        }
        _ => label.to_string(),
    }
}

/// Whole numbers print without a fractional part
pub fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

pub fn format_sended(sended: bool) -> &'static str {
    if sended { "si" } else { "no" }
}

/// Render one page of alerts as a table
pub fn render_alert_table(rows: &[Alert], sort: &SortState) -> String {
    if rows.is_empty() {
        return "No alerts match the current filters.".to_string();
    }

    let mut builder = Builder::default();
    builder.push_record(
        COLUMNS
            .iter()
            .map(|(column, label)| header_label(*column, label, sort)),
    );

    for alert in rows {
        builder.push_record([
            alert
                .id
                .map(|id| id.to_string())
                .unwrap_or_else(|| "-".to_string()),
            alert.datetime.clone(),
            format_value(alert.value),
            alert.version.to_string(),
            alert
                .alert_type
                .map(|t| t.to_string())
                .unwrap_or_else(|| "-".to_string()),
            format_sended(alert.sended).to_string(),
        ]);
    }

    let mut table: Table = builder.build();
    table.with(Style::modern());
    table.to_string()
}
