//! State

use std::sync::Arc;

use cakeshop_app::context::AppContext;

use crate::context::ContextResolver;

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
    pub(crate) context: Arc<dyn ContextResolver>,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, context: Arc<dyn ContextResolver>) -> Self {
        Self { app, context }
    }

    #[must_use]
    pub(crate) fn from_app_context(app: AppContext, context: Arc<dyn ContextResolver>) -> Arc<Self> {
        Arc::new(Self::new(app, context))
    }
}
