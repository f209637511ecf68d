//! Cakeshop Domain Concerns

pub mod carts;
mod columns;
pub mod products;
pub mod tenants;
