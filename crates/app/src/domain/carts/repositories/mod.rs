//! Cart Repositories
//!
//! Both repositories run inside the caller's tenant transaction, so adding an
//! item commits or rolls back as one unit.

mod carts;
mod items;

pub(crate) use carts::PgCartsRepository;
pub(crate) use items::PgCartItemsRepository;
