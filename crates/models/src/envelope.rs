use serde::{Deserialize, Serialize};

/// Pagination block returned alongside list data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub total: Option<u64>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub total_pages: Option<u64>,
}

/// `{ data: T[], pagination: {...} }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResponse<T> {
    #[serde(default = "Option::default")]
    pub data: Option<Vec<T>>,
    #[serde(default = "Option::default")]
    pub pagination: Option<PaginationMeta>,
}

impl<T> ListResponse<T> {
    /// Records of the page, empty when the backend sent none
    pub fn into_records(self) -> Vec<T> {
        self.data.unwrap_or_default()
    }

    /// `pagination.total`, falling back to the number of records on the page
    pub fn total(&self) -> u64 {
        self.pagination
            .as_ref()
            .and_then(|p| p.total)
            .or_else(|| self.data.as_ref().map(|d| d.len() as u64))
            .unwrap_or(0)
    }
}

/// `{ data: T }` as returned by create, get-one and update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemResponse<T> {
    #[serde(default = "Option::default")]
    pub data: Option<T>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    #[test]
    fn test_total_prefers_pagination() {
        let body: ListResponse<Value> =
            serde_json::from_value(json!({ "data": [{ "id": 1 }], "pagination": { "total": 5 } }))
                .unwrap();

        assert_eq!(body.total(), 5);
        assert_eq!(body.into_records(), vec![json!({ "id": 1 })]);
    }

    #[test]
    fn test_total_falls_back_to_len() {
        let body: ListResponse<Value> =
            serde_json::from_value(json!({ "data": [{ "id": 1 }, { "id": 2 }] })).unwrap();
        assert_eq!(body.total(), 2);

        let body: ListResponse<Value> =
            serde_json::from_value(json!({ "data": [{ "id": 1 }], "pagination": { "page": 1 } }))
                .unwrap();
        assert_eq!(body.total(), 1);
    }

    #[test]
    fn test_empty_envelope() {
        let body: ListResponse<Value> = serde_json::from_value(json!({})).unwrap();
        assert_eq!(body.total(), 0);
        assert!(body.into_records().is_empty());

        let item: ItemResponse<Value> = serde_json::from_value(json!({})).unwrap();
        assert_eq!(item.data, None);
    }
}
