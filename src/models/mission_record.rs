//! Mission record model.
//!
//! A [`MissionRecord`] is one row of the mission list: the result of a
//! calculated trip leg as it is listed and exported. Records are never
//! modified; an amendment produces a new record that supersedes the old one.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::DsaResult;

/// A saved mission row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionRecord {
    /// Unique identifier for the record.
    pub record_id: Uuid,
    /// The traveler's name.
    pub traveler: String,
    /// The travel authorization number.
    pub ta_number: String,
    /// The destination country.
    pub country: String,
    /// The destination city (rate table area).
    pub city: String,
    /// Days travelled.
    pub days: u32,
    /// Net DSA amount.
    pub total_dsa: Decimal,
    /// Number of attached receipts.
    pub attachments: u32,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// The record this one replaces, if it is an amendment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supersedes: Option<Uuid>,
}

/// Field edits applied to a record. Unset fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionAmendment {
    /// New traveler name.
    #[serde(default)]
    pub traveler: Option<String>,
    /// New TA number.
    #[serde(default)]
    pub ta_number: Option<String>,
    /// New country.
    #[serde(default)]
    pub country: Option<String>,
    /// New city.
    #[serde(default)]
    pub city: Option<String>,
    /// New day count.
    #[serde(default)]
    pub days: Option<u32>,
    /// New net DSA amount.
    #[serde(default)]
    pub total_dsa: Option<Decimal>,
    /// New attachment count.
    #[serde(default)]
    pub attachments: Option<u32>,
}

impl MissionRecord {
    /// Creates a record from a calculated leg.
    pub fn from_result(traveler: &str, ta_number: &str, result: &DsaResult) -> Self {
        Self {
            record_id: Uuid::new_v4(),
            traveler: traveler.to_string(),
            ta_number: ta_number.to_string(),
            country: result.country.clone(),
            city: result.area.clone(),
            days: result.days_travelled,
            total_dsa: result.net_allowance,
            attachments: result.attachments_count,
            created_at: Utc::now(),
            supersedes: None,
        }
    }

    /// Returns a new record carrying the amendment, superseding this one.
    ///
    /// # Example
    ///
    /// ```
    /// use dsa_engine::models::{MissionAmendment, MissionRecord};
    /// use chrono::Utc;
    /// use rust_decimal::Decimal;
    /// use uuid::Uuid;
    ///
    /// let original = MissionRecord {
    ///     record_id: Uuid::new_v4(),
    ///     traveler: "Rania Haddad".to_string(),
    ///     ta_number: "TA-RHA-25-001".to_string(),
    ///     country: "Jordan".to_string(),
    ///     city: "Amman".to_string(),
    ///     days: 3,
    ///     total_dsa: Decimal::new(800, 0),
    ///     attachments: 0,
    ///     created_at: Utc::now(),
    ///     supersedes: None,
    /// };
    /// let amended = original.amended(&MissionAmendment {
    ///     attachments: Some(2),
    ///     ..Default::default()
    /// });
    ///
    /// assert_eq!(amended.attachments, 2);
    /// assert_eq!(amended.supersedes, Some(original.record_id));
    /// assert_eq!(original.attachments, 0);
    /// ```
    pub fn amended(&self, amendment: &MissionAmendment) -> Self {
        Self {
            record_id: Uuid::new_v4(),
            traveler: amendment
                .traveler
                .clone()
                .unwrap_or_else(|| self.traveler.clone()),
            ta_number: amendment
                .ta_number
                .clone()
                .unwrap_or_else(|| self.ta_number.clone()),
            country: amendment
                .country
                .clone()
                .unwrap_or_else(|| self.country.clone()),
            city: amendment.city.clone().unwrap_or_else(|| self.city.clone()),
            days: amendment.days.unwrap_or(self.days),
            total_dsa: amendment.total_dsa.unwrap_or(self.total_dsa),
            attachments: amendment.attachments.unwrap_or(self.attachments),
            created_at: Utc::now(),
            supersedes: Some(self.record_id),
        }
    }
}
