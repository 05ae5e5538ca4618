//! Guest-mode interception in front of any [`DataProvider`].

use crate::{
    error::ProviderError,
    provider::{
        CreateParams, DataProvider, GetOneParams, ItemResult, ListParams, ListResult,
        UpdateParams,
    },
    session::SessionContext,
};
use async_trait::async_trait;
use log::debug;
use models::fixtures;

pub const GUEST_CREATE_MESSAGE: &str =
    "Guest users cannot create items. Please sign up to get full access.";
pub const GUEST_EDIT_MESSAGE: &str =
    "Guest users cannot edit items. Please sign up to get full access.";

/// Serves fixture data to guests and refuses their mutations. Authenticated
/// callers go straight through to the wrapped provider.
#[derive(Debug, Clone)]
pub struct GuestAwareProvider<P> {
    inner: P,
}

impl<P> GuestAwareProvider<P> {
    pub fn new(inner: P) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }
}

#[async_trait]
impl<P: DataProvider> DataProvider for GuestAwareProvider<P> {
    async fn get_list(
        &self,
        ctx: &SessionContext,
        params: ListParams,
    ) -> Result<ListResult, ProviderError> {
        if ctx.is_authenticated {
            return self.inner.get_list(ctx, params).await;
        }

        let data = fixtures::records(params.resource).to_vec();
        debug!(
            "Serving {} fixture records for {} to a guest",
            data.len(),
            params.resource
        );

        Ok(ListResult {
            total: data.len() as u64,
            data,
        })
    }

    async fn get_one(
        &self,
        ctx: &SessionContext,
        params: GetOneParams,
    ) -> Result<ItemResult, ProviderError> {
        if ctx.is_authenticated {
            return self.inner.get_one(ctx, params).await;
        }

        Ok(ItemResult {
            data: fixtures::find(params.resource, &params.id).cloned(),
        })
    }

    async fn create(
        &self,
        ctx: &SessionContext,
        params: CreateParams,
    ) -> Result<ItemResult, ProviderError> {
        if ctx.is_guest() {
            return Err(ProviderError::GuestForbidden(GUEST_CREATE_MESSAGE.to_string()));
        }

        self.inner.create(ctx, params).await
    }

    async fn update(
        &self,
        ctx: &SessionContext,
        params: UpdateParams,
    ) -> Result<ItemResult, ProviderError> {
        if ctx.is_guest() {
            return Err(ProviderError::GuestForbidden(GUEST_EDIT_MESSAGE.to_string()));
        }

        self.inner.update(ctx, params).await
    }
}
