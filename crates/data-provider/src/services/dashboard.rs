use crate::{
    error::ProviderError,
    provider::{DataProvider, ListParams},
    query::{CrudFilter, Pagination},
    session::SessionContext,
};
use futures::try_join;
use models::{resource::Resource, school_data::UserRole};
use serde::Serialize;
use serde_json::Value;

/// Page size used for the dashboard's summary lists
const SUMMARY_PAGE_SIZE: u64 = 100;

/// Status value of a class that is currently running
const ACTIVE_STATUS: &str = "active";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_classes: u64,
    /// Counted over the fetched summary page only, so with more than 100
    /// classes it can lag behind `total_classes`
    pub active_classes: u64,
    pub total_subjects: u64,
    pub total_teachers: u64,
}

pub struct DashboardService;

impl DashboardService {
    /// Fetches classes, subjects and teachers concurrently and summarizes them
    pub async fn stats<P>(
        provider: &P,
        ctx: &SessionContext,
    ) -> Result<DashboardStats, ProviderError>
    where
        P: DataProvider + ?Sized,
    {
        let summary = Pagination::new(1, SUMMARY_PAGE_SIZE);

        let (classes, subjects, teachers) = try_join!(
            provider.get_list(
                ctx,
                ListParams::new(Resource::Classes).with_pagination(summary)
            ),
            provider.get_list(
                ctx,
                ListParams::new(Resource::Subjects).with_pagination(summary)
            ),
            provider.get_list(
                ctx,
                ListParams::new(Resource::Users)
                    .with_pagination(summary)
                    .with_filter(CrudFilter::eq("role", UserRole::Teacher.as_ref()))
            ),
        )?;

        Ok(DashboardStats {
            total_classes: classes.total,
            active_classes: count_active(&classes.data),
            total_subjects: subjects.total,
            total_teachers: teachers.total,
        })
    }
}

/// Classes whose `status` is exactly `active`. Missing or unknown statuses
/// are not counted.
fn count_active(classes: &[Value]) -> u64 {
    classes
        .iter()
        .filter(|class| class.get("status").and_then(Value::as_str) == Some(ACTIVE_STATUS))
        .count() as u64
}
