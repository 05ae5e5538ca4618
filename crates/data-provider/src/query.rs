//! Endpoint resolution and list query-parameter mapping.

use log::debug;
use models::{resource::Resource, school_data::RecordId};
use serde::Serialize;
use serde_json::Value;
use std::{
    collections::BTreeMap,
    fmt::{Display as FmtDisplay, Formatter, Result as FmtResult},
};
use strum::{Display, EnumString};

/// Page requested when the caller does not say
pub const DEFAULT_PAGE: u64 = 1;
/// Page size requested when the caller does not say
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Data operations the adapter knows how to route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "camelCase")]
pub enum Operation {
    List,
    Create,
    GetOne,
    Update,
}

/// Backend collection serving `resource` for `operation`
///
/// `teachers` are listed, created and fetched through the backend's `users`
/// collection. Updates and every other resource keep their own name.
pub fn resolve_endpoint(resource: Resource, operation: Operation) -> &'static str {
    match (resource, operation) {
        (Resource::Teachers, Operation::List | Operation::Create | Operation::GetOne) => {
            Resource::Users.as_str()
        }
        _ => resource.as_str(),
    }
}

/// Path of the request relative to the backend base URL
pub fn endpoint_path(resource: Resource, operation: Operation, id: Option<&RecordId>) -> String {
    let collection = resolve_endpoint(resource, operation);

    match (operation, id) {
        (Operation::GetOne | Operation::Update, Some(id)) => format!("{collection}/{id}"),
        _ => collection.to_string(),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pagination {
    pub current_page: Option<u64>,
    pub page_size: Option<u64>,
}

impl Pagination {
    pub fn new(current_page: u64, page_size: u64) -> Self {
        Self {
            current_page: Some(current_page),
            page_size: Some(page_size),
        }
    }

    pub fn page(&self) -> u64 {
        self.current_page.unwrap_or(DEFAULT_PAGE)
    }

    pub fn limit(&self) -> u64 {
        self.page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum FilterOperator {
    Eq,
    Ne,
    Lt,
    Gt,
    Lte,
    Gte,
    In,
    Nin,
    Contains,
    Ncontains,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum ConditionalOperator {
    And,
    Or,
}

/// One list-query constraint before translation
#[derive(Debug, Clone, PartialEq)]
pub enum CrudFilter {
    /// A (field, operator, value) triple
    Logical {
        field: String,
        operator: FilterOperator,
        value: Value,
    },
    /// A group of filters joined by and/or; it has no field of its own
    Conditional {
        operator: ConditionalOperator,
        value: Vec<CrudFilter>,
    },
}

impl CrudFilter {
    pub fn eq(field: &str, value: impl Into<Value>) -> Self {
        Self::Logical {
            field: field.to_string(),
            operator: FilterOperator::Eq,
            value: value.into(),
        }
    }

    pub fn contains(field: &str, value: impl Into<Value>) -> Self {
        Self::Logical {
            field: field.to_string(),
            operator: FilterOperator::Contains,
            value: value.into(),
        }
    }

    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Logical { field, .. } => Some(field),
            Self::Conditional { .. } => None,
        }
    }
}

/// A single query-string value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Number(u64),
    Text(String),
}

impl FmtDisplay for ParamValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<u64> for ParamValue {
    fn from(value: u64) -> Self {
        Self::Number(value)
    }
}

/// Flat query-parameter map sent with a list request
pub type QueryParams = BTreeMap<&'static str, ParamValue>;

/// Query parameter a filter on `field` becomes for `resource`, if any
pub fn map_filter_field(resource: Resource, field: &str) -> Option<&'static str> {
    match (resource, field) {
        (Resource::Subjects, "department") => Some("department"),
        (Resource::Subjects, "name" | "code") => Some("search"),

        (Resource::Classes, "name") => Some("search"),
        (Resource::Classes, "subject") => Some("subject"),
        (Resource::Classes, "teacher") => Some("teacher"),
        (Resource::Classes, "department") => Some("department"),

        (Resource::Users | Resource::Teachers | Resource::Students, "role") => Some("role"),
        (Resource::Users | Resource::Teachers | Resource::Students, "name") => Some("search"),
        (Resource::Users | Resource::Teachers | Resource::Students, "department") => {
            Some("department")
        }
        (Resource::Users | Resource::Teachers | Resource::Students, "gender") => Some("gender"),

        _ => None,
    }
}

/// Renders a filter value the way it appears in a query string
pub fn stringify_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(stringify_value)
            .collect::<Vec<_>>()
            .join(","),
        other => other.to_string(),
    }
}

/// Translates pagination and filters into query parameters for `resource`
///
/// `page` and `limit` are always present. Filters the resource does not
/// understand are dropped rather than failing the request. When two filters
/// map to the same parameter the later one wins.
pub fn build_query_params(
    resource: Resource,
    pagination: Pagination,
    filters: &[CrudFilter],
) -> QueryParams {
    let mut params = QueryParams::new();
    params.insert("page", ParamValue::Number(pagination.page()));
    params.insert("limit", ParamValue::Number(pagination.limit()));

    for filter in filters {
        let CrudFilter::Logical { field, value, .. } = filter else {
            debug!("Dropping conditional filter group on {resource}");
            continue;
        };

        match map_filter_field(resource, field) {
            Some(param) => {
                params.insert(param, ParamValue::Text(stringify_value(value)));
            }
            None => debug!("Dropping unsupported filter '{field}' on {resource}"),
        }
    }

    params
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    #[test]
    fn test_resolve_endpoint() {
        for operation in [Operation::List, Operation::Create, Operation::GetOne] {
            assert_eq!(resolve_endpoint(Resource::Teachers, operation), "users");

            for resource in Resource::all()
                .into_iter()
                .filter(|r| *r != Resource::Teachers)
            {
                assert_eq!(resolve_endpoint(resource, operation), resource.as_str());
            }
        }
    }

    #[test]
    fn test_endpoint_path() {
        let id = RecordId::Number(9);
        assert_eq!(
            endpoint_path(Resource::Teachers, Operation::GetOne, Some(&id)),
            "users/9"
        );
        assert_eq!(
            endpoint_path(Resource::Classes, Operation::Update, Some(&RecordId::from("c1"))),
            "classes/c1"
        );
        assert_eq!(
            endpoint_path(Resource::Students, Operation::Create, Some(&id)),
            "students"
        );
        assert_eq!(endpoint_path(Resource::Teachers, Operation::List, None), "users");
    }

    #[test]
    fn test_teacher_updates_keep_their_collection() {
        assert_eq!(resolve_endpoint(Resource::Teachers, Operation::Update), "teachers");
        assert_eq!(
            endpoint_path(Resource::Teachers, Operation::Update, Some(&RecordId::Number(7))),
            "teachers/7"
        );
    }

    #[test]
    fn test_classes_search() {
        let params = build_query_params(
            Resource::Classes,
            Pagination::new(1, 20),
            &[CrudFilter::contains("name", "Bio")],
        );

        let expected: QueryParams = [
            ("page", ParamValue::Number(1)),
            ("limit", ParamValue::Number(20)),
            ("search", ParamValue::from("Bio")),
        ]
        .into_iter()
        .collect();
        assert_eq!(params, expected);
    }

    #[test]
    fn test_default_pagination() {
        let params = build_query_params(Resource::Departments, Pagination::default(), &[]);

        assert_eq!(params.len(), 2);
        assert_eq!(params["page"], ParamValue::Number(DEFAULT_PAGE));
        assert_eq!(params["limit"], ParamValue::Number(DEFAULT_PAGE_SIZE));
    }

    #[test]
    fn test_unrecognized_filters_are_dropped() {
        let filters = [
            CrudFilter::eq("department", "d1"),
            CrudFilter::eq("capacity", 30),
            CrudFilter::eq("status", "active"),
        ];

        // departments understand no filters at all
        let params = build_query_params(Resource::Departments, Pagination::default(), &filters);
        assert_eq!(params.len(), 2);

        // classes understand only the department filter
        let params = build_query_params(Resource::Classes, Pagination::default(), &filters);
        assert_eq!(params.len(), 3);
        assert_eq!(params["department"], ParamValue::from("d1"));
    }

    #[test]
    fn test_conditional_filters_are_dropped() {
        let filters = [CrudFilter::Conditional {
            operator: ConditionalOperator::Or,
            value: vec![CrudFilter::eq("name", "A"), CrudFilter::eq("name", "B")],
        }];

        let params = build_query_params(Resource::Subjects, Pagination::default(), &filters);
        assert!(!params.contains_key("search"));
    }

    #[test]
    fn test_subject_code_and_name_share_search() {
        let params = build_query_params(
            Resource::Subjects,
            Pagination::default(),
            &[CrudFilter::eq("name", "Calc"), CrudFilter::eq("code", "MATH")],
        );

        assert_eq!(params["search"], ParamValue::from("MATH"));
    }

    #[test]
    fn test_people_filters() {
        let filters = [
            CrudFilter::eq("role", "teacher"),
            CrudFilter::contains("name", "Chen"),
            CrudFilter::eq("department", 3),
            CrudFilter::eq("gender", "female"),
            CrudFilter::eq("email", "x@y.z"),
        ];

        for resource in [Resource::Users, Resource::Teachers, Resource::Students] {
            let params = build_query_params(resource, Pagination::new(2, 50), &filters);

            assert_eq!(params.len(), 6);
            assert_eq!(params["role"], ParamValue::from("teacher"));
            assert_eq!(params["search"], ParamValue::from("Chen"));
            assert_eq!(params["department"], ParamValue::from("3"));
            assert_eq!(params["gender"], ParamValue::from("female"));
        }
    }

    #[test]
    fn test_operator_does_not_change_mapping() {
        let filter = CrudFilter::Logical {
            field: "teacher".to_string(),
            operator: FilterOperator::from_str("ne").unwrap(),
            value: json!("t1"),
        };

        let params = build_query_params(Resource::Classes, Pagination::default(), &[filter]);
        assert_eq!(params["teacher"], ParamValue::from("t1"));
    }

    #[test]
    fn test_stringify_value() {
        assert_eq!(stringify_value(&json!("Bio")), "Bio");
        assert_eq!(stringify_value(&json!(12)), "12");
        assert_eq!(stringify_value(&json!(true)), "true");
        assert_eq!(stringify_value(&json!(["a", 1])), "a,1");
    }
}
