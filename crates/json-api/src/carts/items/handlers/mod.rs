//! Cart Item Handlers

pub(crate) mod create;
