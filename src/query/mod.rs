//! Filter criteria and their translation into the search payload.
//!
//! Sorting and pagination of the fetched alerts live in the submodules.

pub mod pagination;
pub mod sort;

use serde::Serialize;

use crate::types::{AlertType, Selection, SendedFilter, Version};

pub use pagination::{Pagination, page_window, total_pages, visible_slice};
pub use sort::{SortColumn, SortDirection, SortState, sort_alerts};

/// Operator-selected constraints on which alerts are fetched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterCriteria {
    pub version: Selection<Version>,
    pub alert_type: Selection<AlertType>,
    pub sended: SendedFilter,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            version: Selection::Only(Version::V1),
            alert_type: Selection::All,
            sended: SendedFilter::All,
        }
    }
}

impl FilterCriteria {
    /// Returns true when the version actually changed
    pub fn set_version(&mut self, version: Selection<Version>) -> bool {
        let changed = self.version != version;
        self.version = version;
        changed
    }

    /// Returns true when the type actually changed
    pub fn set_type(&mut self, alert_type: Selection<AlertType>) -> bool {
        let changed = self.alert_type != alert_type;
        self.alert_type = alert_type;
        changed
    }

    /// Returns true when the sended filter actually changed
    pub fn set_sended(&mut self, sended: SendedFilter) -> bool {
        let changed = self.sended != sended;
        self.sended = sended;
        changed
    }

    pub fn apply(&mut self, change: FilterChange) -> bool {
        match change {
            FilterChange::Version(version) => self.set_version(version),
            FilterChange::Type(alert_type) => self.set_type(alert_type),
            FilterChange::Sended(sended) => self.set_sended(sended),
        }
    }

    pub fn to_query(&self) -> AlertQuery {
        AlertQuery {
            version: self.version.value(),
            alert_type: self.alert_type.value(),
            sended: self.sended.as_query_value(),
        }
    }
}

/// A single operator edit to the filters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterChange {
    Version(Selection<Version>),
    Type(Selection<AlertType>),
    Sended(SendedFilter),
}

/// Body of `POST /challenge/search`. Unrestricted dimensions are sent as null.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AlertQuery {
    pub version: Option<Version>,
    #[serde(rename = "type")]
    pub alert_type: Option<AlertType>,
    pub sended: Option<bool>,
}
