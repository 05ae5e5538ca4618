//! The request adapter: turns provider calls into REST requests.

use crate::{
    error::ProviderError,
    payload::build_body_params,
    provider::{
        CreateParams, DataProvider, GetOneParams, ItemResult, ListParams, ListResult,
        UpdateParams,
    },
    query::{Operation, build_query_params, endpoint_path},
    response::{get_total_count, map_item_response, map_list_response, read_body},
    session::SessionContext,
};
use async_trait::async_trait;
use log::debug;
use reqwest::{Client, RequestBuilder, Url};

/// [`DataProvider`] backed by the school REST API
#[derive(Debug, Clone)]
pub struct RestDataProvider {
    client: Client,
    base_url: Url,
}

impl RestDataProvider {
    /// `base_url` should end with `/` (see [`crate::config::parse_base_url`])
    pub fn new(base_url: Url) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<Url, ProviderError> {
        self.base_url
            .join(path)
            .map_err(|e| ProviderError::InvalidInput(format!("Bad endpoint '{path}': {e}")))
    }

    fn authorize(builder: RequestBuilder, ctx: &SessionContext) -> RequestBuilder {
        match &ctx.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }
}

#[async_trait]
impl DataProvider for RestDataProvider {
    async fn get_list(
        &self,
        ctx: &SessionContext,
        params: ListParams,
    ) -> Result<ListResult, ProviderError> {
        let url = self.url(&endpoint_path(params.resource, Operation::List, None))?;
        let query = build_query_params(params.resource, params.pagination, &params.filters);
        debug!("GET {url} {query:?}");

        let request = Self::authorize(self.client.get(url).query(&query), ctx);
        let body = read_body(request.send().await?).await?;

        Ok(ListResult {
            data: map_list_response(&body)?,
            total: get_total_count(&body)?,
        })
    }

    async fn get_one(
        &self,
        ctx: &SessionContext,
        params: GetOneParams,
    ) -> Result<ItemResult, ProviderError> {
        let path = endpoint_path(params.resource, Operation::GetOne, Some(&params.id));
        let url = self.url(&path)?;
        debug!("GET {url}");

        let request = Self::authorize(self.client.get(url), ctx);
        let body = read_body(request.send().await?).await?;

        Ok(ItemResult {
            data: map_item_response(&body)?,
        })
    }

    async fn create(
        &self,
        ctx: &SessionContext,
        params: CreateParams,
    ) -> Result<ItemResult, ProviderError> {
        let path = params
            .endpoint
            .unwrap_or_else(|| endpoint_path(params.resource, Operation::Create, None));
        let url = self.url(&path)?;
        let body = build_body_params(params.resource, params.variables);
        debug!("POST {url}");

        let request = Self::authorize(self.client.post(url).json(&body), ctx);
        let body = read_body(request.send().await?).await?;

        Ok(ItemResult {
            data: map_item_response(&body)?,
        })
    }

    async fn update(
        &self,
        ctx: &SessionContext,
        params: UpdateParams,
    ) -> Result<ItemResult, ProviderError> {
        let path = endpoint_path(params.resource, Operation::Update, Some(&params.id));
        let url = self.url(&path)?;
        debug!("PATCH {url}");

        let request = Self::authorize(self.client.patch(url).json(&params.variables), ctx);
        let body = read_body(request.send().await?).await?;

        Ok(ItemResult {
            data: map_item_response(&body)?,
        })
    }
}
