//! Wire body for the storage endpoint.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::record::FieldRecord;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionPayload {
    pub name: String,
    #[serde(rename = "mobile_number")]
    pub mobile: String,
    #[serde(rename = "company_email")]
    pub email: String,
    pub department: String,
    pub role: String,
    #[serde(rename = "current_address")]
    pub address: String,
    /// ISO-8601 UTC with millisecond precision, e.g. `2024-05-01T09:30:00.000Z`.
    pub submission_date: String,
}

impl SubmissionPayload {
    pub fn new(record: &FieldRecord, submitted_at: DateTime<Utc>) -> Self {
        Self {
            name: record.name.clone(),
            mobile: record.mobile.clone(),
            email: record.email.clone(),
            department: record.department.clone(),
            role: record.role.clone(),
            address: record.address.clone(),
            submission_date: submitted_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    /// Stamp `record` with the current time.
    pub fn stamped_now(record: &FieldRecord) -> Self {
        Self::new(record, Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn serializes_with_storage_column_names() {
        let record = FieldRecord {
            name: "Jane Doe".into(),
            mobile: "9876543210".into(),
            email: "jane@co.com".into(),
            department: "Eng".into(),
            role: "SWE".into(),
            address: "1 Rd".into(),
        };
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
        let body = serde_json::to_value(SubmissionPayload::new(&record, at)).unwrap();
        assert_eq!(
            body,
            json!({
                "name": "Jane Doe",
                "mobile_number": "9876543210",
                "company_email": "jane@co.com",
                "department": "Eng",
                "role": "SWE",
                "current_address": "1 Rd",
                "submission_date": "2024-05-01T09:30:00.000Z",
            })
        );
    }

    #[test]
    fn timestamp_keeps_milliseconds() {
        let at = Utc.timestamp_millis_opt(1_714_555_800_123).unwrap();
        let payload = SubmissionPayload::new(&FieldRecord::default(), at);
        assert_eq!(payload.submission_date, "2024-05-01T09:30:00.123Z");
    }
}
