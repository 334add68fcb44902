// crates/libra-sim/src/config.rs
//
// Simulation configuration for the Libra protocol simulator.
// Loaded from a TOML file or populated with sensible defaults.

use serde::Deserialize;
use std::fs;

use libra_core::error::LibraError;
use libra_core::WAD;
use libra_monetary::pool::DEFAULT_DURATION;
use libra_monetary::treasury::DEFAULT_EPOCH_PERIOD;

/// Parameters of one simulated protocol deployment.
#[derive(Debug, Clone, Deserialize)]
pub struct SimConfig {
    /// Unix time at which the treasury and the LP pool open.
    #[serde(default = "default_start_time")]
    pub start_time: u64,

    /// Treasury epoch length in seconds.
    #[serde(default = "default_epoch_period")]
    pub epoch_period: u64,

    /// LP pool emission period in seconds.
    #[serde(default = "default_pool_duration")]
    pub pool_duration: u64,

    /// Genesis share emission of the LP pool, in whole tokens.
    #[serde(default = "default_genesis_share_reward")]
    pub genesis_share_reward: u128,

    /// Percent of each seigniorage mint paid to the fund.
    #[serde(default = "default_fund_allocation_rate")]
    pub fund_allocation_rate: u8,

    /// Expansion/redemption threshold, e.g. 1.05.
    #[serde(default = "default_price_ceiling")]
    pub price_ceiling: f64,

    /// Primary supply at genesis, in whole tokens, split evenly across holders.
    #[serde(default = "default_initial_supply")]
    pub initial_supply: u128,

    /// Number of primary holders trading bonds.
    #[serde(default = "default_holders")]
    pub holders: u32,

    /// Percent of a holder's primary balance spent on bonds each epoch
    /// the price sits below peg.
    #[serde(default = "default_bond_purchase_percent")]
    pub bond_purchase_percent: u8,

    /// Number of LP stakers in the reward pool.
    #[serde(default = "default_lp_stakers")]
    pub lp_stakers: u32,

    /// LP tokens each staker deposits, in whole tokens.
    #[serde(default = "default_lp_stake")]
    pub lp_stake: u128,

    /// Number of share stakers in the boardroom.
    #[serde(default = "default_boardroom_stakers")]
    pub boardroom_stakers: u32,

    /// Shares each boardroom staker deposits, in whole tokens.
    #[serde(default = "default_boardroom_stake")]
    pub boardroom_stake: u128,

    /// Primary price observed at each epoch. Cycled if the run is longer.
    #[serde(default = "default_price_path")]
    pub price_path: Vec<f64>,
}

fn default_start_time() -> u64 {
    // 2021-01-01T00:00:00Z
    1_609_459_200
}

fn default_epoch_period() -> u64 {
    DEFAULT_EPOCH_PERIOD
}

fn default_pool_duration() -> u64 {
    DEFAULT_DURATION
}

fn default_genesis_share_reward() -> u128 {
    624_000
}

fn default_fund_allocation_rate() -> u8 {
    2
}

fn default_price_ceiling() -> f64 {
    1.05
}

fn default_initial_supply() -> u128 {
    10_000
}

fn default_holders() -> u32 {
    4
}

fn default_bond_purchase_percent() -> u8 {
    10
}

fn default_lp_stakers() -> u32 {
    2
}

fn default_lp_stake() -> u128 {
    100
}

fn default_boardroom_stakers() -> u32 {
    3
}

fn default_boardroom_stake() -> u128 {
    100
}

fn default_price_path() -> Vec<f64> {
    vec![0.95, 0.90, 0.97, 1.02, 1.10, 1.20, 1.15, 1.04, 0.98, 1.30]
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            start_time: default_start_time(),
            epoch_period: default_epoch_period(),
            pool_duration: default_pool_duration(),
            genesis_share_reward: default_genesis_share_reward(),
            fund_allocation_rate: default_fund_allocation_rate(),
            price_ceiling: default_price_ceiling(),
            initial_supply: default_initial_supply(),
            holders: default_holders(),
            bond_purchase_percent: default_bond_purchase_percent(),
            lp_stakers: default_lp_stakers(),
            lp_stake: default_lp_stake(),
            boardroom_stakers: default_boardroom_stakers(),
            boardroom_stake: default_boardroom_stake(),
            price_path: default_price_path(),
        }
    }
}

impl SimConfig {
    /// Load configuration from a TOML file at the given path.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(path)?;
        let config: SimConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), LibraError> {
        if self.price_path.is_empty() {
            return Err(LibraError::InvalidConfig("price_path is empty".to_string()));
        }
        if let Some(p) = self.price_path.iter().find(|p| !p.is_finite() || **p <= 0.0) {
            return Err(LibraError::InvalidConfig(format!("invalid price {} in price_path", p)));
        }
        if self.holders == 0 {
            return Err(LibraError::InvalidConfig("need at least one holder".to_string()));
        }
        if self.bond_purchase_percent > 100 {
            return Err(LibraError::InvalidConfig(
                "bond_purchase_percent exceeds 100".to_string(),
            ));
        }
        Ok(())
    }

    pub fn price_ceiling_wad(&self) -> u128 {
        price_to_wad(self.price_ceiling)
    }
}

/// Convert a decimal price to a wad, keeping six decimal places.
pub fn price_to_wad(price: f64) -> u128 {
    let micros = (price * 1_000_000.0).round().max(0.0) as u128;
    micros * (WAD / 1_000_000)
}
