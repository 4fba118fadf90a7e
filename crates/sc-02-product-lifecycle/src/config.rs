//! # Contract Configuration
//!
//! Organization ids bound to the two lifecycle roles, and the bootstrap data
//! written by `InitLedger`.
//!
//! ## Environment Variables
//!
//! | Variable | Default |
//! |----------|---------|
//! | `SC_MANUFACTURER_MSP` | `Org1MSP` |
//! | `SC_CONSUMER_MSP` | `Org2MSP` |

use shared_types::OrganizationId;
use std::env;
use thiserror::Error;

use crate::domain::entities::ProductRecord;

pub const DEFAULT_MANUFACTURER_MSP: &str = "Org1MSP";
pub const DEFAULT_CONSUMER_MSP: &str = "Org2MSP";

/// Contract configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractConfig {
    /// Organization allowed to create, update, accept, ship and deliver.
    pub manufacturer_msp: OrganizationId,
    /// Organization allowed to place orders.
    pub consumer_msp: OrganizationId,
    /// Records written by `InitLedger`, in write order.
    pub seed_products: Vec<ProductRecord>,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            manufacturer_msp: OrganizationId::from(DEFAULT_MANUFACTURER_MSP),
            consumer_msp: OrganizationId::from(DEFAULT_CONSUMER_MSP),
            seed_products: default_seed_products(),
        }
    }
}

impl ContractConfig {
    /// Defaults overridden by `SC_MANUFACTURER_MSP` and `SC_CONSUMER_MSP`.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(msp) = env::var("SC_MANUFACTURER_MSP") {
            config.manufacturer_msp = OrganizationId::from(msp);
        }
        if let Ok(msp) = env::var("SC_CONSUMER_MSP") {
            config.consumer_msp = OrganizationId::from(msp);
        }
        config
    }

    /// Reject configurations under which the ACL would be meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.manufacturer_msp.is_empty() {
            return Err(ConfigError::EmptyOrganization { role: "manufacturer" });
        }
        if self.consumer_msp.is_empty() {
            return Err(ConfigError::EmptyOrganization { role: "consumer" });
        }
        if self.manufacturer_msp == self.consumer_msp {
            return Err(ConfigError::SharedOrganization(
                self.manufacturer_msp.to_string(),
            ));
        }
        if let Some(seed) = self.seed_products.iter().find(|seed| seed.id.is_empty()) {
            return Err(ConfigError::EmptySeedId {
                name: seed.name.clone(),
            });
        }
        Ok(())
    }
}

/// The two bootstrap products.
pub fn default_seed_products() -> Vec<ProductRecord> {
    vec![
        ProductRecord::seed("1", "apple", "good"),
        ProductRecord::seed("2", "orange", "good"),
    ]
}

/// Configuration errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{role} organization id must not be empty")]
    EmptyOrganization { role: &'static str },

    #[error("manufacturer and consumer must be different organizations, both are {0}")]
    SharedOrganization(String),

    #[error("seed product {name:?} has an empty id")]
    EmptySeedId { name: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ProductStatus;

    #[test]
    fn test_default_config_is_valid() {
        let config = ContractConfig::default();
        assert_eq!(config.manufacturer_msp.as_str(), "Org1MSP");
        assert_eq!(config.consumer_msp.as_str(), "Org2MSP");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_seeds() {
        let seeds = default_seed_products();
        assert_eq!(seeds.len(), 2);
        assert_eq!(seeds[0].id, "1");
        assert_eq!(seeds[0].name, "apple");
        assert_eq!(seeds[1].name, "orange");
        assert!(seeds.iter().all(|s| s.status == ProductStatus::Created));
    }

    #[test]
    fn test_validate_rejects_shared_organization() {
        let config = ContractConfig {
            consumer_msp: OrganizationId::from("Org1MSP"),
            ..ContractConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::SharedOrganization("Org1MSP".to_string()))
        );
    }

    #[test]
    fn test_validate_rejects_empty_ids() {
        let config = ContractConfig {
            manufacturer_msp: OrganizationId::from(""),
            ..ContractConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyOrganization { role: "manufacturer" })
        ));

        let mut config = ContractConfig::default();
        config.seed_products.push(ProductRecord::seed("", "pear", "ok"));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptySeedId { .. })
        ));
    }
}
