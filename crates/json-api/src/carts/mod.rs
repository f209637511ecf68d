//! Carts

mod errors;
mod handlers;
pub(crate) mod items;
mod session;

pub(crate) use handlers::*;
