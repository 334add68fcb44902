// crates/libra-monetary/src/treasury.rs
//
// Treasury: epoch-gated monetary policy for the primary asset.
//
// Below peg, holders burn primary for discounted bonds. Above the price
// ceiling, bonds redeem one-for-one against the reserve, and once per
// epoch the treasury mints expansion seigniorage proportional to how far
// the price sits above peg. Seigniorage is split three ways:
//
//   1. `fund_allocation_rate`% to the contribution fund,
//   2. the reserve is topped up until it covers the outstanding bonds,
//   3. the rest goes to the boardroom.
//
// Lifecycle: `initialize` runs once and adopts the treasury's current
// primary holdings as the reserve. `migrate` runs once and hands every
// asset, role and balance to a successor, after which the treasury
// refuses all state-changing calls.
//
// Every entry point is atomic over the treasury's own state. Collaborator
// legs are checked before the first one moves anything, and seigniorage
// minted for a split that cannot be delivered is burned again. The only
// effect that survives a failed call is the best-effort oracle refresh.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use libra_core::authority::{Authority, Role};
use libra_core::context::ExecutionContext;
use libra_core::error::LibraError;
use libra_core::identity::AccountId;
use libra_core::math::{checked_add, checked_sub, format_wad, mul_div, percent_of};
use libra_core::traits::{AssetLedger, Operated, PriceOracle, SeigniorageFund, SeigniorageReceiver};
use libra_core::WAD;

use crate::epoch::EpochGate;
use crate::events::TreasuryEvent;
use crate::guard::OneCallPerBlockGuard;

/// Memo attached to seigniorage deposits into the fund.
pub const FUND_DEPOSIT_MEMO: &str = "Treasury: Seigniorage Allocation";

/// Default epoch length: one day.
pub const DEFAULT_EPOCH_PERIOD: u64 = 86_400;

/// Immutable peg parameters and initial settings of a treasury.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreasuryConfig {
    /// Account the treasury holds balances under.
    pub account: AccountId,
    /// Peg price, as a wad.
    pub price_one: u128,
    /// Price above which expansion and bond redemption are allowed.
    pub price_ceiling: u128,
    pub bond_depletion_floor: u128,
    /// Percent of each seigniorage mint sent to the fund.
    pub fund_allocation_rate: u8,
    pub epoch_period: u64,
    pub start_time: u64,
    pub start_epoch: u64,
}

impl Default for TreasuryConfig {
    fn default() -> Self {
        Self {
            account: AccountId::new("treasury"),
            price_one: WAD,
            price_ceiling: WAD * 105 / 100,
            bond_depletion_floor: 1_000 * WAD,
            fund_allocation_rate: 2,
            epoch_period: DEFAULT_EPOCH_PERIOD,
            start_time: 0,
            start_epoch: 0,
        }
    }
}

impl TreasuryConfig {
    pub fn validate(&self) -> Result<(), LibraError> {
        if self.price_one == 0 {
            return Err(LibraError::InvalidConfig("price_one must be non-zero".to_string()));
        }
        if self.price_ceiling < self.price_one {
            return Err(LibraError::InvalidConfig(format!(
                "price ceiling {} below peg {}",
                format_wad(self.price_ceiling),
                format_wad(self.price_one)
            )));
        }
        if self.fund_allocation_rate > 100 {
            return Err(LibraError::InvalidConfig(format!(
                "fund allocation rate {}% exceeds 100%",
                self.fund_allocation_rate
            )));
        }
        if self.epoch_period == 0 {
            return Err(LibraError::InvalidConfig(
                "epoch period must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Collaborators the treasury drives.
#[derive(Clone)]
pub struct TreasuryHandles {
    pub libra: Arc<dyn AssetLedger>,
    pub bond: Arc<dyn AssetLedger>,
    pub share: Arc<dyn AssetLedger>,
    pub bond_oracle: Arc<dyn PriceOracle>,
    pub seigniorage_oracle: Arc<dyn PriceOracle>,
    pub fund: Arc<dyn SeigniorageFund>,
    pub boardroom: Arc<dyn SeigniorageReceiver>,
}

/// Mutable treasury state. Snapshotted at the start of every call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreasuryState {
    pub initialized: bool,
    pub migrated: bool,
    /// Primary held back to redeem bonds. Never exceeds the treasury's
    /// primary balance.
    pub accumulated_seigniorage: u128,
    pub fund_allocation_rate: u8,
    pub authority: Authority,
    pub epoch: EpochGate,
    pub guard: OneCallPerBlockGuard,
    pub events: Vec<TreasuryEvent>,
}

/// How one `allocate_seigniorage` call split the newly minted supply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeigniorageSplit {
    /// Epoch that was closed.
    pub epoch: u64,
    /// Seigniorage oracle price observed.
    pub price: u128,
    pub seigniorage: u128,
    pub fund: u128,
    pub reserve: u128,
    pub boardroom: u128,
}

pub struct Treasury {
    config: TreasuryConfig,
    handles: TreasuryHandles,
    state: TreasuryState,
}

impl std::fmt::Debug for Treasury {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Treasury")
            .field("config", &self.config)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Treasury {
    /// Deploy a treasury. The deployer starts as owner and operator.
    ///
    /// # Errors
    /// Returns `LibraError::InvalidConfig` if the config does not validate.
    pub fn new(
        config: TreasuryConfig,
        handles: TreasuryHandles,
        deployer: AccountId,
    ) -> Result<Self, LibraError> {
        config.validate()?;
        let epoch = EpochGate::new(config.epoch_period, config.start_time, config.start_epoch)?;
        let state = TreasuryState {
            initialized: false,
            migrated: false,
            accumulated_seigniorage: 0,
            fund_allocation_rate: config.fund_allocation_rate,
            authority: Authority::new(deployer),
            epoch,
            guard: OneCallPerBlockGuard::new(),
            events: Vec::new(),
        };
        Ok(Self {
            config,
            handles,
            state,
        })
    }

    // -----------------------------------------------------------------
    // Read-only views
    // -----------------------------------------------------------------

    pub fn account(&self) -> &AccountId {
        &self.config.account
    }

    pub fn config(&self) -> &TreasuryConfig {
        &self.config
    }

    pub fn state(&self) -> &TreasuryState {
        &self.state
    }

    /// JSON dump of the treasury state.
    pub fn state_json(&self) -> Result<String, LibraError> {
        Ok(serde_json::to_string_pretty(&self.state)?)
    }

    pub fn is_initialized(&self) -> bool {
        self.state.initialized
    }

    pub fn is_migrated(&self) -> bool {
        self.state.migrated
    }

    /// Primary reserved for bond redemption.
    pub fn get_reserve(&self) -> u128 {
        self.state.accumulated_seigniorage
    }

    pub fn fund_allocation_rate(&self) -> u8 {
        self.state.fund_allocation_rate
    }

    pub fn current_epoch(&self) -> u64 {
        self.state.epoch.current_epoch()
    }

    pub fn next_epoch_point(&self) -> u64 {
        self.state.epoch.next_epoch_point()
    }

    pub fn price_ceiling(&self) -> u128 {
        self.config.price_ceiling
    }

    pub fn bond_depletion_floor(&self) -> u128 {
        self.config.bond_depletion_floor
    }

    pub fn fund(&self) -> &Arc<dyn SeigniorageFund> {
        &self.handles.fund
    }

    /// Price of one whole primary unit from the bond oracle.
    pub fn get_bond_oracle_price(&self) -> Result<u128, LibraError> {
        self.consult(self.handles.bond_oracle.as_ref())
    }

    /// Price of one whole primary unit from the seigniorage oracle.
    pub fn get_seigniorage_oracle_price(&self) -> Result<u128, LibraError> {
        self.consult(self.handles.seigniorage_oracle.as_ref())
    }

    pub fn drain_events(&mut self) -> Vec<TreasuryEvent> {
        std::mem::take(&mut self.state.events)
    }

    // -----------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------

    /// Adopt the current primary holdings as the bond reserve. Runs once.
    pub fn initialize(&mut self, ctx: &ExecutionContext) -> Result<(), LibraError> {
        self.transact(|t| {
            t.check_migration()?;
            if t.state.initialized {
                return Err(LibraError::AlreadyInitialized);
            }
            t.check_operator()?;

            t.state.accumulated_seigniorage = t.handles.libra.balance_of(&t.config.account);
            t.state.initialized = true;
            t.state.events.push(TreasuryEvent::Initialized {
                operator: ctx.caller.clone(),
                block: ctx.block,
            });
            tracing::info!(
                "Treasury initialized at block {} with reserve {}",
                ctx.block,
                format_wad(t.state.accumulated_seigniorage)
            );
            Ok(())
        })
    }

    /// Hand operator, ownership and all treasury balances of the three
    /// assets to `target`. Runs once; the treasury is inert afterwards.
    pub fn migrate(&mut self, ctx: &ExecutionContext, target: AccountId) -> Result<(), LibraError> {
        self.transact(|t| {
            t.check_migration()?;
            t.require_operator(ctx)?;

            let treasury = t.config.account.clone();
            let assets = [&t.handles.libra, &t.handles.bond, &t.handles.share];
            let mut balances = Vec::with_capacity(assets.len());
            for asset in assets {
                if asset.owner() != treasury || asset.operator() != treasury {
                    return Err(LibraError::PermissionDenied(format!(
                        "treasury does not own {}",
                        asset.symbol()
                    )));
                }
                let balance = asset.balance_of(&treasury);
                checked_add(asset.balance_of(&target), balance)?;
                balances.push(balance);
            }

            // Every transfer below moves a balance just read and credits a
            // target checked for overflow, so none of them can fail.
            for (asset, balance) in assets.iter().zip(balances) {
                if balance > 0 {
                    asset.transfer(&treasury, &target, balance)?;
                }
            }
            for asset in assets {
                asset.transfer_operator(&treasury, &target)?;
                asset.transfer_ownership(&treasury, &target)?;
            }

            t.state.migrated = true;
            t.state.events.push(TreasuryEvent::Migration {
                target: target.clone(),
            });
            tracing::info!("Treasury migrated to {}", target);
            Ok(())
        })
    }

    // -----------------------------------------------------------------
    // Administration
    // -----------------------------------------------------------------

    pub fn set_fund(
        &mut self,
        ctx: &ExecutionContext,
        fund: Arc<dyn SeigniorageFund>,
    ) -> Result<(), LibraError> {
        self.check_admin(ctx)?;
        let account = fund.account();
        self.handles.fund = fund;
        self.state.events.push(TreasuryEvent::FundChanged {
            operator: ctx.caller.clone(),
            fund: account.clone(),
        });
        tracing::info!("Treasury fund set to {}", account);
        Ok(())
    }

    /// # Errors
    /// Returns `LibraError::InvalidConfig` if `rate` exceeds 100.
    pub fn set_fund_allocation_rate(
        &mut self,
        ctx: &ExecutionContext,
        rate: u8,
    ) -> Result<(), LibraError> {
        self.check_admin(ctx)?;
        if rate > 100 {
            return Err(LibraError::InvalidConfig(format!(
                "fund allocation rate {}% exceeds 100%",
                rate
            )));
        }
        self.state.fund_allocation_rate = rate;
        self.state.events.push(TreasuryEvent::FundAllocationRateChanged {
            operator: ctx.caller.clone(),
            rate,
        });
        tracing::info!("Treasury fund allocation rate set to {}%", rate);
        Ok(())
    }

    pub fn set_bond_oracle(
        &mut self,
        ctx: &ExecutionContext,
        oracle: Arc<dyn PriceOracle>,
    ) -> Result<(), LibraError> {
        self.check_admin(ctx)?;
        self.handles.bond_oracle = oracle;
        self.state.events.push(TreasuryEvent::BondOracleChanged {
            operator: ctx.caller.clone(),
        });
        tracing::info!("Treasury bond oracle replaced");
        Ok(())
    }

    pub fn set_seigniorage_oracle(
        &mut self,
        ctx: &ExecutionContext,
        oracle: Arc<dyn PriceOracle>,
    ) -> Result<(), LibraError> {
        self.check_admin(ctx)?;
        self.handles.seigniorage_oracle = oracle;
        self.state.events.push(TreasuryEvent::SeigniorageOracleChanged {
            operator: ctx.caller.clone(),
        });
        tracing::info!("Treasury seigniorage oracle replaced");
        Ok(())
    }

    /// Change the epoch length. Epochs already closed keep their count;
    /// the next epoch point moves to `start + epoch * period`.
    pub fn set_epoch_period(&mut self, ctx: &ExecutionContext, period: u64) -> Result<(), LibraError> {
        self.check_admin(ctx)?;
        self.state.epoch.set_period(period)?;
        self.state.events.push(TreasuryEvent::EpochPeriodChanged {
            operator: ctx.caller.clone(),
            period,
        });
        tracing::info!("Treasury epoch period set to {}s", period);
        Ok(())
    }

    /// Hand the treasury's own operator role to `new_operator`. Owner only.
    pub fn transfer_operator(
        &mut self,
        ctx: &ExecutionContext,
        new_operator: AccountId,
    ) -> Result<(), LibraError> {
        self.state
            .authority
            .transfer_operator(&ctx.caller, new_operator.clone())?;
        tracing::info!("Treasury operator transferred to {}", new_operator);
        Ok(())
    }

    /// Hand the treasury's ownership to `new_owner`. Owner only.
    pub fn transfer_ownership(
        &mut self,
        ctx: &ExecutionContext,
        new_owner: AccountId,
    ) -> Result<(), LibraError> {
        self.state
            .authority
            .transfer_ownership(&ctx.caller, new_owner.clone())?;
        tracing::info!("Treasury ownership transferred to {}", new_owner);
        Ok(())
    }

    // -----------------------------------------------------------------
    // Market operations
    // -----------------------------------------------------------------

    /// Burn `amount` primary from the caller for bonds at the bond oracle
    /// price. The caller must have approved the treasury to burn.
    /// Returns the number of bonds minted.
    pub fn buy_bonds(
        &mut self,
        ctx: &ExecutionContext,
        amount: u128,
        target_price: u128,
    ) -> Result<u128, LibraError> {
        self.transact(|t| {
            t.check_market_call(ctx)?;
            if amount == 0 {
                return Err(LibraError::ZeroAmount);
            }

            let price = t.get_bond_oracle_price()?;
            if price != target_price {
                return Err(LibraError::PriceMoved {
                    target: target_price,
                    actual: price,
                });
            }
            if price >= t.config.price_one {
                return Err(LibraError::AboveBondThreshold {
                    price,
                    threshold: t.config.price_one,
                });
            }

            let bonds = mul_div(amount, WAD, price)?;
            let treasury = &t.config.account;
            t.handles.libra.burn_from(treasury, &ctx.caller, amount)?;
            t.handles.bond.mint(treasury, &ctx.caller, bonds)?;

            t.refresh_oracles();
            t.state.events.push(TreasuryEvent::BoughtBonds {
                account: ctx.caller.clone(),
                amount,
                bonds,
            });
            t.state.guard.mark(ctx);
            tracing::debug!(
                "{} bought {} bonds for {} at {}",
                ctx.caller,
                format_wad(bonds),
                format_wad(amount),
                format_wad(price)
            );
            Ok(bonds)
        })
    }

    /// Burn `amount` bonds from the caller and pay `amount` primary out of
    /// the treasury. The caller must have approved the treasury to burn.
    pub fn redeem_bonds(
        &mut self,
        ctx: &ExecutionContext,
        amount: u128,
        target_price: u128,
    ) -> Result<(), LibraError> {
        self.transact(|t| {
            t.check_market_call(ctx)?;
            if amount == 0 {
                return Err(LibraError::ZeroAmount);
            }

            let price = t.get_bond_oracle_price()?;
            if price != target_price {
                return Err(LibraError::PriceMoved {
                    target: target_price,
                    actual: price,
                });
            }
            if price <= t.config.price_ceiling {
                return Err(LibraError::BelowCeiling {
                    price,
                    ceiling: t.config.price_ceiling,
                });
            }
            let treasury = t.config.account.clone();
            let available = t.handles.libra.balance_of(&treasury);
            if available < amount {
                return Err(LibraError::InsufficientBudget {
                    requested: amount,
                    available,
                });
            }

            let reserve = t.state.accumulated_seigniorage;
            t.state.accumulated_seigniorage = reserve - reserve.min(amount);
            t.handles.bond.burn_from(&treasury, &ctx.caller, amount)?;
            t.handles.libra.transfer(&treasury, &ctx.caller, amount)?;

            t.refresh_oracles();
            t.state.events.push(TreasuryEvent::RedeemedBonds {
                account: ctx.caller.clone(),
                amount,
            });
            t.state.guard.mark(ctx);
            tracing::debug!(
                "{} redeemed {} bonds, reserve now {}",
                ctx.caller,
                format_wad(amount),
                format_wad(t.state.accumulated_seigniorage)
            );
            Ok(())
        })
    }

    /// Close the current epoch. Above the ceiling, mint seigniorage and
    /// split it between fund, reserve and boardroom; at or below the
    /// ceiling nothing is minted but the epoch still advances.
    pub fn allocate_seigniorage(
        &mut self,
        ctx: &ExecutionContext,
    ) -> Result<SeigniorageSplit, LibraError> {
        self.transact(|t| {
            t.check_market_call(ctx)?;
            t.state.epoch.check_epoch(ctx)?;

            t.refresh_oracles();
            let price = t.get_seigniorage_oracle_price()?;
            let mut split = SeigniorageSplit {
                epoch: t.state.epoch.current_epoch(),
                price,
                ..SeigniorageSplit::default()
            };

            if price > t.config.price_ceiling {
                t.expand_supply(ctx, &mut split)?;
            } else {
                tracing::info!(
                    "Epoch {}: price {} not above ceiling {}, no expansion",
                    split.epoch,
                    format_wad(price),
                    format_wad(t.config.price_ceiling)
                );
            }

            t.state.epoch.advance();
            t.state.guard.mark(ctx);
            Ok(split)
        })
    }

    // -----------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------

    fn transact<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, LibraError>,
    ) -> Result<T, LibraError> {
        let saved = self.state.clone();
        let result = f(self);
        if result.is_err() {
            self.state = saved;
        }
        result
    }

    fn check_migration(&self) -> Result<(), LibraError> {
        if self.state.migrated {
            return Err(LibraError::AlreadyMigrated);
        }
        Ok(())
    }

    /// The treasury must operate all three assets and the boardroom.
    fn check_operator(&self) -> Result<(), LibraError> {
        let treasury = &self.config.account;
        for asset in [&self.handles.libra, &self.handles.bond, &self.handles.share] {
            if &asset.operator() != treasury {
                return Err(LibraError::PermissionDenied(format!(
                    "treasury is not operator of {}",
                    asset.symbol()
                )));
            }
        }
        if &self.handles.boardroom.operator() != treasury {
            return Err(LibraError::PermissionDenied(
                "treasury is not operator of the boardroom".to_string(),
            ));
        }
        Ok(())
    }

    fn check_admin(&self, ctx: &ExecutionContext) -> Result<(), LibraError> {
        self.check_migration()?;
        self.require_operator(ctx)
    }

    /// Admin calls from anyone but the treasury operator.
    fn require_operator(&self, ctx: &ExecutionContext) -> Result<(), LibraError> {
        self.state
            .authority
            .require(ctx, Role::Operator)
            .map_err(|_| {
                LibraError::PermissionDenied(format!(
                    "{} is not the treasury operator",
                    ctx.caller
                ))
            })
    }

    /// Gates shared by bond trades and seigniorage allocation.
    fn check_market_call(&self, ctx: &ExecutionContext) -> Result<(), LibraError> {
        self.check_migration()?;
        self.state.guard.check(ctx)?;
        self.state.epoch.check_start_time(ctx)?;
        self.check_operator()
    }

    fn consult(&self, oracle: &dyn PriceOracle) -> Result<u128, LibraError> {
        oracle
            .consult(self.handles.libra.symbol(), WAD)
            .map_err(|e| LibraError::Oracle(format!("failed to consult primary price: {}", e)))
    }

    /// Ask both oracles to refresh. Failures are logged and ignored.
    fn refresh_oracles(&self) {
        if let Err(e) = self.handles.bond_oracle.update() {
            tracing::warn!("Bond oracle update failed: {}", e);
        }
        if let Err(e) = self.handles.seigniorage_oracle.update() {
            tracing::warn!("Seigniorage oracle update failed: {}", e);
        }
    }

    /// Mint the epoch's seigniorage and deliver the split.
    ///
    /// The split is fixed and the boardroom leg is pre-checked before the
    /// mint. If a leg still fails, whatever the treasury has not handed
    /// out is burned again so a failed epoch leaves supply unchanged.
    fn expand_supply(
        &mut self,
        ctx: &ExecutionContext,
        split: &mut SeigniorageSplit,
    ) -> Result<(), LibraError> {
        let treasury = self.config.account.clone();
        let libra = self.handles.libra.clone();

        let circulating = checked_sub(libra.total_supply(), self.state.accumulated_seigniorage)?;
        let premium = split.price - self.config.price_one;
        let seigniorage = mul_div(circulating, premium, WAD)?;
        split.seigniorage = seigniorage;
        if seigniorage == 0 {
            return Ok(());
        }

        let fund_reserve = percent_of(seigniorage, self.state.fund_allocation_rate)?;
        let remainder = seigniorage - fund_reserve;
        let bond_gap = self
            .handles
            .bond
            .total_supply()
            .saturating_sub(self.state.accumulated_seigniorage);
        let treasury_reserve = remainder.min(bond_gap);
        let boardroom_reserve = remainder - treasury_reserve;
        let reserve = checked_add(self.state.accumulated_seigniorage, treasury_reserve)?;
        if boardroom_reserve > 0 {
            self.handles
                .boardroom
                .check_allocation(&treasury, boardroom_reserve)?;
        }

        libra.mint(&treasury, &treasury, seigniorage)?;
        if let Err(e) = self.deposit_to_fund(fund_reserve) {
            self.burn_undelivered(seigniorage);
            return Err(e);
        }
        if let Err(e) = self.allocate_to_boardroom(boardroom_reserve) {
            tracing::error!(
                "Boardroom rejected a pre-checked allocation; fund keeps {}",
                format_wad(fund_reserve)
            );
            self.burn_undelivered(remainder);
            return Err(e);
        }

        self.state.accumulated_seigniorage = reserve;
        split.fund = fund_reserve;
        split.reserve = treasury_reserve;
        split.boardroom = boardroom_reserve;
        let timestamp = ctx.timestamp;
        if fund_reserve > 0 {
            self.state.events.push(TreasuryEvent::FundFunded {
                timestamp,
                amount: fund_reserve,
            });
        }
        if treasury_reserve > 0 {
            self.state.events.push(TreasuryEvent::TreasuryFunded {
                timestamp,
                amount: treasury_reserve,
            });
        }
        if boardroom_reserve > 0 {
            self.state.events.push(TreasuryEvent::BoardroomFunded {
                timestamp,
                amount: boardroom_reserve,
            });
        }

        tracing::info!(
            "Epoch {}: minted {} seigniorage at price {} (fund {}, reserve {}, boardroom {})",
            split.epoch,
            format_wad(seigniorage),
            format_wad(split.price),
            format_wad(split.fund),
            format_wad(split.reserve),
            format_wad(split.boardroom)
        );
        Ok(())
    }

    fn deposit_to_fund(&self, amount: u128) -> Result<(), LibraError> {
        if amount == 0 {
            return Ok(());
        }
        let treasury = &self.config.account;
        let libra = self.handles.libra.as_ref();
        let fund = &self.handles.fund;
        libra.approve(treasury, &fund.account(), amount)?;
        fund.deposit(treasury, libra, amount, FUND_DEPOSIT_MEMO)
    }

    fn allocate_to_boardroom(&self, amount: u128) -> Result<(), LibraError> {
        if amount == 0 {
            return Ok(());
        }
        let treasury = &self.config.account;
        let boardroom = &self.handles.boardroom;
        self.handles
            .libra
            .approve(treasury, &boardroom.account(), amount)?;
        boardroom.allocate_seigniorage(treasury, amount)
    }

    /// Revoke the split approvals and burn `amount` minted primary still
    /// held by the treasury.
    fn burn_undelivered(&self, amount: u128) {
        let treasury = &self.config.account;
        let libra = &self.handles.libra;
        for spender in [self.handles.fund.account(), self.handles.boardroom.account()] {
            if let Err(e) = libra.approve(treasury, &spender, 0) {
                tracing::warn!("Failed to revoke allowance of {}: {}", spender, e);
            }
        }
        match libra.burn_from(treasury, treasury, amount) {
            Ok(()) => tracing::warn!("Burned {} undelivered seigniorage", format_wad(amount)),
            Err(e) => tracing::error!(
                "Failed to burn {} undelivered seigniorage: {}",
                format_wad(amount),
                e
            ),
        }
    }
}
