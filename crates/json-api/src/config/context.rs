//! Request Context Config

use clap::Args;
use uuid::Uuid;

/// Tenant resolution settings.
#[derive(Debug, Args)]
pub struct ContextConfig {
    /// Tenant every request is served for; requests fail with
    /// `accountIdRequired` when unset
    #[arg(long, env = "DEFAULT_TENANT_UUID")]
    pub tenant_uuid: Option<Uuid>,
}
