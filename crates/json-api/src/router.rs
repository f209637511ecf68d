//! App Router

use salvo::Router;

use crate::{carts, context, products};

/// Routes that need a request context.
pub(crate) fn app_router() -> Router {
    Router::new()
        .hoop(context::middleware::handler)
        .push(
            Router::with_path("product")
                .get(products::index::handler)
                .push(
                    Router::with_path("{product}")
                        .get(products::get::handler)
                        .push(Router::with_path("related").get(products::related::handler)),
                ),
        )
        .push(
            Router::with_path("cart")
                .get(carts::get::handler)
                .push(Router::with_path("item").post(carts::items::create::handler)),
        )
}
