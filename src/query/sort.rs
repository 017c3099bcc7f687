//! Column sorting for the alert list.
//!
//! Sorting is always stable: alerts that compare equal on the chosen column
//! keep the order they arrived in from the backend.

use std::cmp::Ordering;

use serde::Serialize;
use unicase::UniCase;

use crate::error::AlertDeskError;
use crate::types::Alert;

/// The five displayable alert fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortColumn {
    Datetime,
    Value,
    Version,
    Type,
    Sended,
}

impl SortColumn {
    pub const ALL: [SortColumn; 5] = [
        SortColumn::Datetime,
        SortColumn::Value,
        SortColumn::Version,
        SortColumn::Type,
        SortColumn::Sended,
    ];

    /// All valid string representations of this enum.
    pub const ALL_STRINGS: &[&str] = &["datetime", "value", "version", "type", "sended"];
}

enum_display_fromstr!(
    SortColumn,
    AlertDeskError::invalid_sort_column,
    {
        Datetime => "datetime" | "date",
        Value => "value",
        Version => "version",
        Type => "type",
        Sended => "sended" | "sent",
    }
);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggle(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

enum_display_fromstr!(
    SortDirection,
    AlertDeskError::invalid_sort_direction,
    {
        Ascending => "asc" | "ascending",
        Descending => "desc" | "descending",
    }
);

/// Selected column and direction. No column means fetch order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SortState {
    pub column: Option<SortColumn>,
    pub direction: SortDirection,
}

impl SortState {
    /// Clicking the active column flips direction, any other column starts ascending
    pub fn sort_by(&mut self, column: SortColumn) {
        if self.column == Some(column) {
            self.direction = self.direction.toggle();
        } else {
            self.column = Some(column);
            self.direction = SortDirection::Ascending;
        }
    }

    /// Ordered copy of `alerts`
    pub fn apply(&self, alerts: &[Alert]) -> Vec<Alert> {
        let mut sorted = alerts.to_vec();
        sort_alerts(&mut sorted, self.column, self.direction);
        sorted
    }
}

/// Compare two alerts on one column, ascending
pub fn compare_by(column: SortColumn, a: &Alert, b: &Alert) -> Ordering {
    match column {
        SortColumn::Datetime => {
            UniCase::new(a.datetime.as_str()).cmp(&UniCase::new(b.datetime.as_str()))
        }
        SortColumn::Value => a.value.total_cmp(&b.value),
        SortColumn::Version => a.version.cmp(&b.version),
        // Unclassified alerts sort first
        SortColumn::Type => a
            .alert_type
            .map(|t| UniCase::new(t.label()))
            .cmp(&b.alert_type.map(|t| UniCase::new(t.label()))),
        SortColumn::Sended => a.sended.cmp(&b.sended),
    }
}

/// Stable in-place sort
pub fn sort_alerts(alerts: &mut [Alert], column: Option<SortColumn>, direction: SortDirection) {
    let Some(column) = column else {
        return;
    };

    alerts.sort_by(|a, b| {
        let ordering = compare_by(column, a, b);
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;
    use crate::types::{AlertType, Version};

    fn alert(id: u64, datetime: &str, value: f64, version: Version) -> Alert {
        Alert {
            id: Some(id),
            datetime: datetime.to_string(),
            value,
            version,
            alert_type: AlertType::classify(version, value),
            sended: id % 2 == 0,
        }
    }

    fn ids(alerts: &[Alert]) -> Vec<u64> {
        alerts.iter().filter_map(|a| a.id).collect()
    }

    fn sample() -> Vec<Alert> {
        vec![
            alert(1, "2024-01-03 10:00:00", 650.0, Version::V1),
            alert(2, "2024-01-01 10:00:00", 150.0, Version::V2),
            alert(3, "2024-01-02 10:00:00", 950.0, Version::V1),
            alert(4, "2024-01-01 10:00:00", 300.0, Version::V1),
            alert(5, "2024-01-02 10:00:00", 650.0, Version::V2),
        ]
    }

    #[test]
    fn test_no_column_preserves_fetch_order() {
        let state = SortState::default();
        assert_eq!(ids(&state.apply(&sample())), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_sort_by_value() {
        let mut alerts = sample();
        sort_alerts(&mut alerts, Some(SortColumn::Value), SortDirection::Ascending);
        assert_eq!(ids(&alerts), vec![2, 4, 1, 5, 3]);
    }

    #[test]
    fn test_sort_by_value_descending_keeps_ties_in_input_order() {
        let mut alerts = sample();
        sort_alerts(&mut alerts, Some(SortColumn::Value), SortDirection::Descending);
        assert_eq!(ids(&alerts), vec![3, 1, 5, 4, 2]);
    }

    #[test]
    fn test_sort_by_datetime_is_stable() {
        let mut alerts = sample();
        sort_alerts(&mut alerts, Some(SortColumn::Datetime), SortDirection::Ascending);
        assert_eq!(ids(&alerts), vec![2, 4, 3, 5, 1]);
    }

    #[test]
    fn test_sort_by_type_uses_case_insensitive_labels() {
        // ALTA < BAJA < MEDIA
        let mut alerts = sample();
        sort_alerts(&mut alerts, Some(SortColumn::Type), SortDirection::Ascending);
        assert_eq!(ids(&alerts), vec![2, 3, 4, 5, 1]);
    }

    #[test]
    fn test_sort_by_type_puts_unclassified_first() {
        let mut alerts = sample();
        alerts[4].alert_type = None;
        sort_alerts(&mut alerts, Some(SortColumn::Type), SortDirection::Ascending);
        assert_eq!(ids(&alerts), vec![5, 2, 3, 4, 1]);
    }

    #[test]
    fn test_sort_by_version_and_sended() {
        let mut alerts = sample();
        sort_alerts(&mut alerts, Some(SortColumn::Version), SortDirection::Ascending);
        assert_eq!(ids(&alerts), vec![1, 3, 4, 2, 5]);

        let mut alerts = sample();
        sort_alerts(&mut alerts, Some(SortColumn::Sended), SortDirection::Ascending);
        assert_eq!(ids(&alerts), vec![1, 3, 5, 2, 4]);
    }

    #[test]
    fn test_sort_is_stable_for_every_column_and_direction() {
        let alerts: Vec<Alert> = (0..40u64)
            .map(|i| {
                let version = if i % 3 == 0 { Version::V2 } else { Version::V1 };
                let day = i % 4 + 1;
                let stamp = if i % 5 == 0 {
                    format!("2024-0{day}-01 T")
                } else {
                    format!("2024-0{day}-01 t")
                };
                alert(i, &stamp, (i % 6) as f64 * 150.0, version)
            })
            .collect();

        for column in SortColumn::ALL {
            for direction in [SortDirection::Ascending, SortDirection::Descending] {
                let mut sorted = alerts.clone();
                sort_alerts(&mut sorted, Some(column), direction);

                for pair in sorted.windows(2) {
                    if compare_by(column, &pair[0], &pair[1]) == Ordering::Equal {
                        assert!(
                            pair[0].id < pair[1].id,
                            "{column} {direction}: ties out of input order"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_sort_by_value_with_nan_is_still_ordered() {
        let mut alerts = sample();
        alerts[1].value = f64::NAN;
        sort_alerts(&mut alerts, Some(SortColumn::Value), SortDirection::Ascending);
        assert_eq!(ids(&alerts), vec![4, 1, 5, 3, 2]);

        let mut alerts: Vec<Alert> = (0..200u64)
            .map(|i| {
                let value = if i % 3 == 0 { f64::NAN } else { ((i * 7919) % 1000) as f64 };
                alert(i, "2024-01-01 00:00:00", value, Version::V1)
            })
            .collect();
        sort_alerts(&mut alerts, Some(SortColumn::Value), SortDirection::Ascending);
        let finite: Vec<f64> = alerts.iter().map(|a| a.value).filter(|v| v.is_finite()).collect();
        assert!(finite.windows(2).all(|w| w[0] <= w[1]));
        assert!(alerts[alerts.len() - 67..].iter().all(|a| a.value.is_nan()));
    }

    #[test]
    fn test_sort_by_same_column_twice_toggles_direction() {
        let mut state = SortState::default();
        state.sort_by(SortColumn::Type);
        assert_eq!(state.column, Some(SortColumn::Type));
        assert_eq!(state.direction, SortDirection::Ascending);

        state.sort_by(SortColumn::Type);
        assert_eq!(state.column, Some(SortColumn::Type));
        assert_eq!(state.direction, SortDirection::Descending);
    }

    #[test]
    fn test_sort_by_new_column_resets_to_ascending() {
        let mut state = SortState::default();
        state.sort_by(SortColumn::Value);
        state.sort_by(SortColumn::Value);
        state.sort_by(SortColumn::Datetime);
        assert_eq!(state.column, Some(SortColumn::Datetime));
        assert_eq!(state.direction, SortDirection::Ascending);
    }

    #[test]
    fn test_sort_column_from_str() {
        assert_eq!(SortColumn::from_str("value").unwrap(), SortColumn::Value);
        assert_eq!(SortColumn::from_str("TYPE").unwrap(), SortColumn::Type);
        assert_eq!(SortColumn::from_str("date").unwrap(), SortColumn::Datetime);
        assert!(SortColumn::from_str("severity").is_err());
        assert!(SortColumn::from_str("").is_err());
    }

    #[test]
    fn test_sort_direction_display() {
        assert_eq!(SortDirection::Ascending.to_string(), "asc");
        assert_eq!(SortDirection::Descending.to_string(), "desc");
        assert_eq!(SortDirection::default(), SortDirection::Ascending);
    }
}
