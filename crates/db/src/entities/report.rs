//! Citizen report entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Issue category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum Category {
    #[sea_orm(string_value = "Roads")]
    Roads,
    #[sea_orm(string_value = "Electricity")]
    Electricity,
    #[sea_orm(string_value = "Water")]
    Water,
    #[sea_orm(string_value = "Sanitation")]
    Sanitation,
    #[sea_orm(string_value = "Security")]
    Security,
    #[sea_orm(string_value = "Healthcare")]
    Healthcare,
    #[sea_orm(string_value = "Education")]
    Education,
    #[sea_orm(string_value = "Other")]
    Other,
}

impl Category {
    /// The wire representation of this category.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Roads => "Roads",
            Self::Electricity => "Electricity",
            Self::Water => "Water",
            Self::Sanitation => "Sanitation",
            Self::Security => "Security",
            Self::Healthcare => "Healthcare",
            Self::Education => "Education",
            Self::Other => "Other",
        }
    }

    /// All valid categories, in display order.
    pub const ALL: [Self; 8] = [
        Self::Roads,
        Self::Electricity,
        Self::Water,
        Self::Sanitation,
        Self::Security,
        Self::Healthcare,
        Self::Education,
        Self::Other,
    ];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Roads" => Ok(Self::Roads),
            "Electricity" => Ok(Self::Electricity),
            "Water" => Ok(Self::Water),
            "Sanitation" => Ok(Self::Sanitation),
            "Security" => Ok(Self::Security),
            "Healthcare" => Ok(Self::Healthcare),
            "Education" => Ok(Self::Education),
            "Other" => Ok(Self::Other),
            other => Err(format!("Invalid category: {other}")),
        }
    }
}

/// Report priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum Priority {
    #[sea_orm(string_value = "low")]
    Low,
    #[sea_orm(string_value = "medium")]
    #[default]
    Medium,
    #[sea_orm(string_value = "high")]
    High,
    #[sea_orm(string_value = "urgent")]
    Urgent,
}

impl Priority {
    /// The wire representation of this priority.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "urgent" => Ok(Self::Urgent),
            other => Err(format!("Invalid priority: {other}")),
        }
    }
}

/// Report workflow status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[derive(Default)]
pub enum ReportStatus {
    #[sea_orm(string_value = "pending")]
    #[serde(rename = "pending")]
    #[default]
    Pending,
    #[sea_orm(string_value = "in-progress")]
    #[serde(rename = "in-progress")]
    InProgress,
    #[sea_orm(string_value = "resolved")]
    #[serde(rename = "resolved")]
    Resolved,
}

impl ReportStatus {
    /// The wire representation of this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Resolved => "resolved",
        }
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "in-progress" => Ok(Self::InProgress),
            "resolved" => Ok(Self::Resolved),
            other => Err(format!("Invalid status: {other}")),
        }
    }
}

/// Report model.
///
/// The composite `location` value from the API maps to the flat
/// `area`/`lga`/`state`/`latitude`/`longitude` columns here and is
/// re-nested by the response types in the API layer.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "report")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Short summary of the issue.
    pub title: String,
    /// Full description of the issue.
    #[sea_orm(column_type = "Text")]
    pub description: String,
    /// Issue category.
    pub category: Category,
    /// Handling priority.
    pub priority: Priority,
    /// Neighbourhood or street within the LGA.
    pub area: String,
    /// Local Government Area.
    pub lga: String,
    /// Nigerian state (or the Federal Capital Territory).
    pub state: String,
    /// Optional coordinate pair.
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Optional photo URL.
    pub image: Option<String>,
    /// Current workflow status.
    pub status: ReportStatus,
    /// Identifier of the submitting user or session.
    pub userid: String,
    /// Handler the report is assigned to.
    pub assigned_to: Option<String>,
    /// Notes recorded when the report is resolved.
    #[sea_orm(column_type = "Text", nullable)]
    pub resolution_notes: Option<String>,
    /// Expected resolution date.
    pub estimated_resolution_date: Option<DateTimeWithTimeZone>,
    /// Community vote counter, never negative.
    pub votes: i32,
    /// Urgency flag; forced true whenever priority is urgent.
    pub is_urgent: bool,
    /// When the report was created. Immutable.
    pub created_at: DateTimeWithTimeZone,
    /// When the report was last mutated.
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn enums_round_trip_their_wire_values() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
        for status in [
            ReportStatus::Pending,
            ReportStatus::InProgress,
            ReportStatus::Resolved,
        ] {
            assert_eq!(status.as_str().parse::<ReportStatus>().unwrap(), status);
        }
    }

    #[test]
    fn out_of_set_values_fail_to_parse() {
        assert!("archived".parse::<ReportStatus>().is_err());
        assert!("Potholes".parse::<Category>().is_err());
        assert!("critical".parse::<Priority>().is_err());
    }

    #[test]
    fn status_serializes_with_hyphen() {
        let json = serde_json::to_string(&ReportStatus::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");
    }

    #[test]
    fn defaults_match_creation_rules() {
        assert_eq!(ReportStatus::default(), ReportStatus::Pending);
        assert_eq!(Priority::default(), Priority::Medium);
    }
}
