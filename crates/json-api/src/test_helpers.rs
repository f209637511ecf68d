//! Test helpers.

use std::sync::Arc;

use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use cakeshop_app::{
    context::AppContext,
    domain::{carts::MockCartsService, products::MockProductsService, tenants::records::TenantUuid},
};

use crate::{
    context::{FixedContextResolver, MockContextResolver},
    extensions::*,
    state::State,
};

pub(crate) const TEST_TENANT_UUID: TenantUuid = TenantUuid::from_uuid(Uuid::nil());

#[salvo::handler]
pub(crate) async fn inject_tenant(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_tenant_uuid(TEST_TENANT_UUID);
    ctrl.call_next(req, depot, res).await;
}

fn strict_products_mock() -> MockProductsService {
    let mut products = MockProductsService::new();

    products.expect_list_products().never();
    products.expect_get_product().never();
    products.expect_related_products().never();

    products
}

fn strict_carts_mock() -> MockCartsService {
    let mut carts = MockCartsService::new();

    carts.expect_get_cart().never();
    carts.expect_add_item().never();

    carts
}

fn state(products: MockProductsService, carts: MockCartsService) -> Arc<State> {
    let app = AppContext {
        products: Arc::new(products),
        carts: Arc::new(carts),
    };

    State::from_app_context(app, Arc::new(FixedContextResolver::new(Some(TEST_TENANT_UUID))))
}

pub(crate) fn state_with_context(resolver: MockContextResolver) -> Arc<State> {
    let app = AppContext {
        products: Arc::new(strict_products_mock()),
        carts: Arc::new(strict_carts_mock()),
    };

    State::from_app_context(app, Arc::new(resolver))
}

fn service(state: Arc<State>, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state))
            .hoop(inject_tenant)
            .push(route),
    )
}

pub(crate) fn products_service(products: MockProductsService, route: Router) -> Service {
    service(state(products, strict_carts_mock()), route)
}

pub(crate) fn carts_service(carts: MockCartsService, route: Router) -> Service {
    service(state(strict_products_mock(), carts), route)
}

/// Route served without a tenant in the depot.
pub(crate) fn tenantless_service(route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state(strict_products_mock(), strict_carts_mock())))
            .push(route),
    )
}
