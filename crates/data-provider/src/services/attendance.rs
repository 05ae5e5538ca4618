use chrono::NaiveDate;
use crate::{
    error::ProviderError,
    provider::{CreateParams, DataProvider, ItemResult},
    session::SessionContext,
};
use models::{
    resource::Resource,
    school_data::{AttendanceEntry, AttendanceStatus, RecordId},
};
use serde_json::json;

/// Endpoint accepting a whole class's marks in one request
pub const BULK_ENDPOINT: &str = "attendance/bulk";

/// Wire format of an attendance day
const DATE_FORMAT: &str = "%Y-%m-%d";

pub struct AttendanceService;

impl AttendanceService {
    /// Builds one entry per marked student for `class_id` on `date`
    pub fn entries(
        class_id: &RecordId,
        date: NaiveDate,
        marks: &[(RecordId, AttendanceStatus)],
    ) -> Vec<AttendanceEntry> {
        let date = date.format(DATE_FORMAT).to_string();

        marks
            .iter()
            .map(|(student_id, status)| AttendanceEntry {
                class_id: class_id.clone(),
                student_id: student_id.clone(),
                date: date.clone(),
                status: *status,
            })
            .collect()
    }

    /// Submits a class's attendance for one day
    pub async fn mark<P>(
        provider: &P,
        ctx: &SessionContext,
        class_id: &RecordId,
        date: NaiveDate,
        marks: &[(RecordId, AttendanceStatus)],
    ) -> Result<ItemResult, ProviderError>
    where
        P: DataProvider + ?Sized,
    {
        if marks.is_empty() {
            return Err(ProviderError::InvalidInput(
                "Please mark attendance for at least one student".to_string(),
            ));
        }

        let records = Self::entries(class_id, date, marks);
        let params = CreateParams {
            endpoint: Some(BULK_ENDPOINT.to_string()),
            ..CreateParams::new(Resource::Attendance, json!({ "records": records }))
        };

        provider.create(ctx, params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries() {
        let entries = AttendanceService::entries(
            &RecordId::Number(4),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            &[
                (RecordId::Number(10), AttendanceStatus::Present),
                (RecordId::Number(11), AttendanceStatus::Absent),
            ],
        );

        assert_eq!(
            serde_json::to_value(&entries).unwrap(),
            json!([
                { "classId": 4, "studentId": 10, "date": "2024-03-01", "status": "present" },
                { "classId": 4, "studentId": 11, "date": "2024-03-01", "status": "absent" }
            ])
        );
    }
}
