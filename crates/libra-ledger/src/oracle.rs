// crates/libra-ledger/src/oracle.rs
//
// Manually driven price oracle implementing `PriceOracle`.
//
// The price is set from outside (tests, the simulator's price path). Both
// `consult` and `update` can be switched into a failing mode to exercise
// the treasury's handling of oracle outages.

use std::sync::RwLock;

use libra_core::error::LibraError;
use libra_core::math::mul_div;
use libra_core::traits::PriceOracle;
use libra_core::WAD;

#[derive(Debug)]
struct OracleState {
    /// Price of one whole unit, as a wad.
    price: u128,
    updates: u64,
    fail_consult: bool,
    fail_update: bool,
}

/// Oracle quoting a settable price.
#[derive(Debug)]
pub struct ManualOracle {
    state: RwLock<OracleState>,
}

impl ManualOracle {
    /// Create an oracle quoting `price` (a wad) per whole unit.
    pub fn new(price: u128) -> Self {
        Self {
            state: RwLock::new(OracleState {
                price,
                updates: 0,
                fail_consult: false,
                fail_update: false,
            }),
        }
    }

    pub fn set_price(&self, price: u128) {
        self.state.write().expect("RwLock poisoned").price = price;
    }

    pub fn price(&self) -> u128 {
        self.state.read().expect("RwLock poisoned").price
    }

    /// Number of successful `update()` calls.
    pub fn update_count(&self) -> u64 {
        self.state.read().expect("RwLock poisoned").updates
    }

    pub fn set_fail_consult(&self, fail: bool) {
        self.state.write().expect("RwLock poisoned").fail_consult = fail;
    }

    pub fn set_fail_update(&self, fail: bool) {
        self.state.write().expect("RwLock poisoned").fail_update = fail;
    }
}

impl PriceOracle for ManualOracle {
    fn consult(&self, asset: &str, amount_in: u128) -> Result<u128, LibraError> {
        let state = self.state.read().expect("RwLock poisoned");
        if state.fail_consult {
            return Err(LibraError::Oracle(format!("no observation for {}", asset)));
        }
        mul_div(state.price, amount_in, WAD)
    }

    fn update(&self) -> Result<(), LibraError> {
        let mut state = self.state.write().expect("RwLock poisoned");
        if state.fail_update {
            return Err(LibraError::Oracle("update window not elapsed".to_string()));
        }
        state.updates += 1;
        Ok(())
    }
}
