//! Context middleware.

use std::sync::Arc;

use salvo::prelude::*;
use tracing::Span;

use crate::{extensions::*, state::State};

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let state = match depot.obtain_or_500::<Arc<State>>() {
        Ok(state) => Arc::clone(state),
        Err(error) => {
            res.render(error);
            ctrl.skip_rest();

            return;
        }
    };

    let context = state.context.resolve(req.headers()).await;

    // Handlers that need a tenant reject the request themselves.
    if let Some(tenant) = context.tenant {
        Span::current().record("tenant_uuid", tracing::field::display(tenant));
        depot.insert_tenant_uuid(tenant);
    }

    ctrl.call_next(req, depot, res).await;
}

#[cfg(test)]
mod tests {
    use cakeshop_app::domain::tenants::records::TenantUuid;
    use salvo::{
        affix_state::inject,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;
    use uuid::Uuid;

    use crate::{
        context::{MockContextResolver, RequestContext},
        envelope::ErrorEnvelope,
        test_helpers::state_with_context,
    };

    use super::*;

    #[salvo::handler]
    async fn echo_tenant(depot: &mut Depot, res: &mut Response) {
        match depot.tenant_uuid_or_400() {
            Ok(tenant) => res.render(tenant.to_string()),
            Err(error) => res.render(error),
        }
    }

    fn make_service(resolver: MockContextResolver) -> Service {
        let router = Router::new()
            .hoop(inject(state_with_context(resolver)))
            .hoop(handler)
            .push(Router::new().get(echo_tenant));

        Service::new(router)
    }

    #[tokio::test]
    async fn resolved_tenant_is_injected() -> TestResult {
        let tenant = TenantUuid::from_uuid(Uuid::now_v7());

        let mut resolver = MockContextResolver::new();

        resolver
            .expect_resolve()
            .once()
            .return_once(move |_| RequestContext {
                tenant: Some(tenant),
            });

        let mut res = TestClient::get("http://example.com")
            .send(&make_service(resolver))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(res.take_string().await?, tenant.to_string());

        Ok(())
    }

    #[tokio::test]
    async fn unresolved_tenant_returns_account_id_required() -> TestResult {
        let mut resolver = MockContextResolver::new();

        resolver
            .expect_resolve()
            .once()
            .return_once(|_| RequestContext::default());

        let mut res = TestClient::get("http://example.com")
            .send(&make_service(resolver))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        let body: ErrorEnvelope = res.take_json().await?;

        assert!(!body.success);
        assert_eq!(body.error.code, "accountIdRequired");

        Ok(())
    }
}
