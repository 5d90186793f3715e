//! Currency lookup port.
//!
//! The set of currencies a cycle may run in is provisioned by the wider
//! platform; templates only list them.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::foundation::DomainError;

/// A currency the platform allows savings-group cycles to use.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyOption {
    pub code: String,
    pub name: String,
    pub decimal_places: u32,
}

/// Lookup port for allowed currencies.
#[async_trait]
pub trait CurrencyRepository: Send + Sync {
    /// List every currency cycles may be denominated in, for template
    /// responses.
    async fn list_allowed(&self) -> Result<Vec<CurrencyOption>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn CurrencyRepository) {}
    }
}
