use crate::{
    error::ProviderError,
    query::{CrudFilter, Pagination},
    session::SessionContext,
};
use async_trait::async_trait;
use models::{resource::Resource, school_data::RecordId};
use serde::de::DeserializeOwned;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct ListParams {
    pub resource: Resource,
    pub pagination: Pagination,
    pub filters: Vec<CrudFilter>,
}

impl ListParams {
    pub fn new(resource: Resource) -> Self {
        Self {
            resource,
            pagination: Pagination::default(),
            filters: Vec::new(),
        }
    }

    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = pagination;
        self
    }

    pub fn with_filter(mut self, filter: CrudFilter) -> Self {
        self.filters.push(filter);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GetOneParams {
    pub resource: Resource,
    pub id: RecordId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateParams {
    pub resource: Resource,
    pub variables: Value,
    /// Replaces the resolved collection path, e.g. `attendance/bulk`
    pub endpoint: Option<String>,
}

impl CreateParams {
    pub fn new(resource: Resource, variables: Value) -> Self {
        Self {
            resource,
            variables,
            endpoint: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateParams {
    pub resource: Resource,
    pub id: RecordId,
    pub variables: Value,
}

/// A page of records plus the total used for pagination
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListResult {
    pub data: Vec<Value>,
    pub total: u64,
}

impl ListResult {
    /// Decodes the records into a typed model
    pub fn decode<T: DeserializeOwned>(&self) -> Result<Vec<T>, ProviderError> {
        self.data
            .iter()
            .map(|record| T::deserialize(record).map_err(ProviderError::from))
            .collect()
    }
}

/// A single record, absent when the backend (or fixture set) has none
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemResult {
    pub data: Option<Value>,
}

impl ItemResult {
    pub fn decode<T: DeserializeOwned>(&self) -> Result<Option<T>, ProviderError> {
        self.data
            .as_ref()
            .map(|record| T::deserialize(record).map_err(ProviderError::from))
            .transpose()
    }
}

/// Uniform list/get-one/create/update contract consumed by the front end
///
/// Every call receives the caller's [`SessionContext`] explicitly instead of
/// reading ambient state.
#[async_trait]
pub trait DataProvider: Send + Sync {
    async fn get_list(
        &self,
        ctx: &SessionContext,
        params: ListParams,
    ) -> Result<ListResult, ProviderError>;

    async fn get_one(
        &self,
        ctx: &SessionContext,
        params: GetOneParams,
    ) -> Result<ItemResult, ProviderError>;

    async fn create(
        &self,
        ctx: &SessionContext,
        params: CreateParams,
    ) -> Result<ItemResult, ProviderError>;

    async fn update(
        &self,
        ctx: &SessionContext,
        params: UpdateParams,
    ) -> Result<ItemResult, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::school_data::Subject;
    use serde_json::json;

    #[test]
    fn test_list_result_decode() {
        let result = ListResult {
            data: vec![json!({ "id": 1, "name": "Algebra", "code": "ALG" })],
            total: 1,
        };

        let subjects: Vec<Subject> = result.decode().unwrap();
        assert_eq!(subjects[0].code, "ALG");
    }

    #[test]
    fn test_list_result_decode_failure() {
        let result = ListResult {
            data: vec![json!({ "id": 1 })],
            total: 1,
        };

        assert!(matches!(
            result.decode::<Subject>(),
            Err(ProviderError::Decode(_))
        ));
    }

    #[test]
    fn test_item_result_decode_absent() {
        let result = ItemResult::default();
        assert_eq!(result.decode::<Subject>().unwrap(), None);
    }

    #[test]
    fn test_list_params_builder() {
        let params = ListParams::new(Resource::Classes)
            .with_pagination(Pagination::new(2, 5))
            .with_filter(CrudFilter::eq("teacher", "t1"));

        assert_eq!(params.pagination.page(), 2);
        assert_eq!(params.filters.len(), 1);
    }
}
