//! Request context resolution

pub(crate) mod middleware;
mod resolver;

pub(crate) use resolver::*;
