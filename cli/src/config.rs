//! Simulator configuration with TOML file support.
//!
//! Amounts are whole tokens because TOML integers are 64-bit; they are scaled
//! to raw 18-decimal units when converted into [`StakingParams`].

use crate::error::CliError;
use lpstake_types::{units, Address, StakingParams};
use lpstake_utils::LogFormat;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level simulator configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Admin/treasury account: a label or a `0x` address.
    #[serde(default = "default_admin")]
    pub admin: String,

    /// The pool's own account.
    #[serde(default = "default_vault")]
    pub vault: String,

    /// Clock reading (Unix seconds) at pool creation.
    #[serde(default = "default_genesis")]
    pub genesis_secs: u64,

    #[serde(default)]
    pub log_format: LogFormat,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub staking: StakingConfig,
}

/// [`StakingParams`] in whole tokens.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StakingConfig {
    pub min_stake: u64,
    pub whitelist_max_stake: u64,
    pub max_stake: u64,
    pub max_wallet_stake: u64,
    pub max_pool_usdc: u64,
    pub brbc_per_usdc: u64,
    pub whitelist_duration_secs: u64,
    pub lock_duration_secs: u64,
    pub early_exit_penalty_bps: u32,
    pub withdraw_cooldown_secs: u64,
}

fn default_admin() -> String {
    "admin".into()
}

fn default_vault() -> String {
    "vault".into()
}

fn default_genesis() -> u64 {
    1_700_000_000
}

fn default_log_level() -> String {
    "info".into()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl PoolConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self, CliError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CliError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, CliError> {
        toml::from_str(s).map_err(|e| CliError::Config(e.to_string()))
    }

    pub fn to_toml_string(&self) -> Result<String, CliError> {
        toml::to_string_pretty(self).map_err(|e| CliError::Config(e.to_string()))
    }

    pub fn admin_address(&self) -> Result<Address, CliError> {
        resolve_account(&self.admin)
    }

    pub fn vault_address(&self) -> Result<Address, CliError> {
        resolve_account(&self.vault)
    }

    /// Validated staking parameters in raw units.
    pub fn params(&self) -> Result<StakingParams, CliError> {
        let params = self.staking.to_params();
        params
            .validate()
            .map_err(|e| CliError::Config(e.to_string()))?;
        Ok(params)
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            admin: default_admin(),
            vault: default_vault(),
            genesis_secs: default_genesis(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
            staking: StakingConfig::default(),
        }
    }
}

impl StakingConfig {
    pub fn to_params(&self) -> StakingParams {
        StakingParams {
            min_stake: units(self.min_stake),
            whitelist_max_stake: units(self.whitelist_max_stake),
            max_stake: units(self.max_stake),
            max_wallet_stake: units(self.max_wallet_stake),
            max_pool_usdc: units(self.max_pool_usdc),
            brbc_per_usdc: u128::from(self.brbc_per_usdc),
            whitelist_duration_secs: self.whitelist_duration_secs,
            lock_duration_secs: self.lock_duration_secs,
            early_exit_penalty_bps: self.early_exit_penalty_bps,
            withdraw_cooldown_secs: self.withdraw_cooldown_secs,
        }
    }
}

impl Default for StakingConfig {
    fn default() -> Self {
        let params = StakingParams::observed_defaults();
        Self {
            min_stake: 500,
            whitelist_max_stake: 800,
            max_stake: 5_000,
            max_wallet_stake: 5_000,
            max_pool_usdc: 7_500,
            brbc_per_usdc: 4,
            whitelist_duration_secs: params.whitelist_duration_secs,
            lock_duration_secs: params.lock_duration_secs,
            early_exit_penalty_bps: params.early_exit_penalty_bps,
            withdraw_cooldown_secs: params.withdraw_cooldown_secs,
        }
    }
}

/// An account reference: a `0x`-prefixed hex address, or a label hashed to one.
pub fn resolve_account(reference: &str) -> Result<Address, CliError> {
    if reference.starts_with("0x") {
        Ok(reference.parse()?)
    } else if reference.is_empty() {
        Err(CliError::Config("account reference is empty".into()))
    } else {
        Ok(Address::from_label(reference))
    }
}
