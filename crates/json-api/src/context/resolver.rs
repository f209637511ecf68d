//! Context Resolver

use async_trait::async_trait;
use mockall::automock;
use salvo::http::HeaderMap;

use cakeshop_app::domain::tenants::records::TenantUuid;

/// Who a request is served for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct RequestContext {
    pub tenant: Option<TenantUuid>,
}

#[automock]
#[async_trait]
pub(crate) trait ContextResolver: Send + Sync {
    /// Resolve the request context from incoming headers.
    async fn resolve(&self, headers: &HeaderMap) -> RequestContext;
}

/// Serves every request for one configured tenant.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FixedContextResolver {
    tenant: Option<TenantUuid>,
}

impl FixedContextResolver {
    pub(crate) fn new(tenant: Option<TenantUuid>) -> Self {
        Self { tenant }
    }
}

#[async_trait]
impl ContextResolver for FixedContextResolver {
    async fn resolve(&self, _headers: &HeaderMap) -> RequestContext {
        RequestContext {
            tenant: self.tenant,
        }
    }
}
