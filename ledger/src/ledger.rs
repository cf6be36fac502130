//! The staking ledger — deposit recording, accrual, two-phase claims.

use std::collections::HashMap;

use granary_store::StakeStore;
use granary_tokens::{TokenIssuer, TokenVault};
use granary_types::{
    AccountAddress, LedgerParams, Timestamp, TokenId, MAX_ANNUAL_RATE_PCT, MAX_COOLDOWN_SECS,
};

use crate::accrual;
use crate::authority::Authority;
use crate::config::LedgerConfig;
use crate::error::LedgerError;
use crate::event::{EventBus, LedgerEvent};
use crate::position::{AccountState, PendingClaim, Position};

const META_PARAMS: &[u8] = b"params";
const META_AUTHORITY: &[u8] = b"authority";
const META_BASE_TOKEN: &[u8] = b"base_token";
const META_REWARD_TOKEN: &[u8] = b"reward_token";
const META_TOTAL_STAKED: &[u8] = b"total_staked";

/// The two reward figures visible for an account: the frozen pending
/// snapshot and the live accrual over open positions. Independent figures,
/// never summed — one is fixed, the other is still growing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RewardView {
    pub pending: u128,
    pub accruing: u128,
}

/// The staking ledger.
///
/// Operations are strictly serialized through `&mut self`; every mutation
/// either completes or leaves the ledger untouched. Token movement goes
/// through the collaborator traits passed in at the call site, and within
/// an operation all ledger state is finalized before any external call.
pub struct StakingLedger {
    params: LedgerParams,
    authority: Authority,
    base_token: TokenId,
    reward_token: TokenId,
    accounts: HashMap<AccountAddress, AccountState>,
    /// Sum of all outstanding principal: open positions plus pending
    /// claims. Decremented only at settlement.
    total_staked: u128,
    events: EventBus,
}

impl StakingLedger {
    /// Build a ledger from a configuration.
    pub fn new(config: &LedgerConfig) -> Self {
        Self::with_params(
            config.base_token.clone(),
            config.reward_token.clone(),
            LedgerParams::new(config.annual_rate_pct, config.cooldown_secs),
            config.owner.clone(),
        )
    }

    /// Build a ledger with explicit parameters.
    pub fn with_params(
        base_token: TokenId,
        reward_token: TokenId,
        params: LedgerParams,
        owner: Option<AccountAddress>,
    ) -> Self {
        Self {
            params,
            authority: match owner {
                Some(owner) => Authority::new(owner),
                None => Authority::renounced(),
            },
            base_token,
            reward_token,
            accounts: HashMap::new(),
            total_staked: 0,
            events: EventBus::new(),
        }
    }

    // ── Accessors ──────────────────────────────────────────────────────

    pub fn params(&self) -> LedgerParams {
        self.params
    }

    pub fn owner(&self) -> Option<&AccountAddress> {
        self.authority.owner()
    }

    pub fn base_token(&self) -> &TokenId {
        &self.base_token
    }

    pub fn reward_token(&self) -> &TokenId {
        &self.reward_token
    }

    /// Aggregate outstanding principal across all accounts.
    pub fn total_staked(&self) -> u128 {
        self.total_staked
    }

    pub fn account(&self, address: &AccountAddress) -> Option<&AccountState> {
        self.accounts.get(address)
    }

    pub fn accounts(&self) -> impl Iterator<Item = (&AccountAddress, &AccountState)> {
        self.accounts.iter()
    }

    /// Register an observer for ledger events.
    pub fn subscribe(&mut self, listener: Box<dyn Fn(&LedgerEvent) + Send + Sync>) {
        self.events.subscribe(listener);
    }

    // ── Core operations ────────────────────────────────────────────────

    /// Record a deposit of `amount` base tokens by `staker`.
    ///
    /// The custody transfer happens first; if it fails nothing changes.
    /// Staking is legal in every account state — while a claim is pending
    /// the new position starts an independent sequence.
    pub fn stake(
        &mut self,
        staker: &AccountAddress,
        amount: u128,
        now: Timestamp,
        vault: &mut dyn TokenVault,
    ) -> Result<(), LedgerError> {
        if amount == 0 {
            return Err(LedgerError::ZeroAmount);
        }
        let new_total = self
            .total_staked
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;

        vault.transfer_in(&self.base_token, staker, amount)?;

        let state = self.accounts.entry(staker.clone()).or_default();
        state.positions.push(Position {
            amount,
            created_at: now,
        });
        self.total_staked = new_total;

        tracing::debug!(account = %staker, amount, "stake recorded");
        self.events.emit(&LedgerEvent::Staked {
            account: staker.clone(),
            amount,
        });
        Ok(())
    }

    /// Freeze the account's open positions into a pending claim.
    ///
    /// Principal and reward are snapshotted under the current parameters;
    /// the position list is cleared in the same step. The aggregate total
    /// is untouched — it still represents funds owed by the ledger.
    pub fn apply_claim(
        &mut self,
        staker: &AccountAddress,
        now: Timestamp,
    ) -> Result<(), LedgerError> {
        let params = self.params;
        let state = self
            .accounts
            .get_mut(staker)
            .ok_or(LedgerError::NoStake)?;

        if state.pending.is_some() {
            return Err(LedgerError::ClaimAlreadyPending);
        }
        let principal = state.principal_checked().ok_or(LedgerError::Overflow)?;
        if principal == 0 {
            return Err(LedgerError::NoStake);
        }
        let reward =
            accrual::total_reward(&state.positions, &params, now).ok_or(LedgerError::Overflow)?;
        if reward == 0 {
            return Err(LedgerError::NoReward);
        }

        let unlock_at = now.add_secs(params.cooldown_secs);
        state.pending = Some(PendingClaim {
            principal,
            reward,
            unlock_at,
        });
        state.positions.clear();

        tracing::info!(
            account = %staker,
            principal,
            reward,
            unlock_at = %unlock_at,
            "claim applied"
        );
        self.events.emit(&LedgerEvent::ClaimApplied {
            account: staker.clone(),
            principal,
            reward,
        });
        Ok(())
    }

    /// Settle a pending claim once its cooldown has passed (inclusive).
    ///
    /// Ledger state is finalized before any external call: the claim is
    /// removed and the aggregate total decremented, then the principal is
    /// released and the reward minted. If either external step fails the
    /// whole operation is rolled back — no funds ever leave the books
    /// without a successful transfer.
    pub fn claim(
        &mut self,
        staker: &AccountAddress,
        now: Timestamp,
        vault: &mut dyn TokenVault,
        issuer: &mut dyn TokenIssuer,
    ) -> Result<(u128, u128), LedgerError> {
        let state = self
            .accounts
            .get_mut(staker)
            .ok_or(LedgerError::NoPendingClaim)?;
        let (unlock_at, principal) = match &state.pending {
            Some(claim) => (claim.unlock_at, claim.principal),
            None => return Err(LedgerError::NoPendingClaim),
        };
        if now.as_secs() < unlock_at.as_secs() {
            return Err(LedgerError::ClaimLocked { unlock_at, now });
        }
        let new_total = self
            .total_staked
            .checked_sub(principal)
            .ok_or(LedgerError::Overflow)?;

        let pending = state.pending.take().ok_or(LedgerError::NoPendingClaim)?;
        let restored_total = self.total_staked;
        self.total_staked = new_total;

        if let Err(e) = vault.transfer_out(&self.base_token, staker, pending.principal) {
            self.total_staked = restored_total;
            state.pending = Some(pending);
            return Err(e.into());
        }
        if pending.reward > 0 {
            if let Err(e) = issuer.issue(&self.reward_token, staker, pending.reward) {
                // Claw the principal back before restoring the claim.
                if let Err(comp) = vault.transfer_in(&self.base_token, staker, pending.principal)
                {
                    tracing::error!(
                        account = %staker,
                        error = %comp,
                        "principal claw-back failed while aborting claim"
                    );
                }
                self.total_staked = restored_total;
                state.pending = Some(pending);
                return Err(e.into());
            }
        }

        let principal = pending.principal;
        let reward = pending.reward;
        tracing::info!(account = %staker, principal, reward, "claim settled");
        self.events.emit(&LedgerEvent::Claimed {
            account: staker.clone(),
            principal,
            reward,
        });
        Ok((principal, reward))
    }

    // ── Read projections ───────────────────────────────────────────────

    /// Principal still owed to `account`: open positions plus any pending
    /// claim, as one figure.
    pub fn staked_total(&self, account: &AccountAddress) -> u128 {
        self.accounts
            .get(account)
            .map(|s| s.principal().saturating_add(s.pending_principal()))
            .unwrap_or(0)
    }

    /// The frozen pending reward and the live accrual over open positions.
    pub fn reward_view(&self, account: &AccountAddress, now: Timestamp) -> RewardView {
        match self.accounts.get(account) {
            Some(state) => RewardView {
                pending: state.pending_reward(),
                accruing: accrual::total_reward(&state.positions, &self.params, now).unwrap_or(0),
            },
            None => RewardView {
                pending: 0,
                accruing: 0,
            },
        }
    }

    // ── Privileged operations ──────────────────────────────────────────

    /// Set the annual interest rate. Applies to every future accrual
    /// computation, across each position's full elapsed life.
    pub fn set_annual_rate(
        &mut self,
        caller: &AccountAddress,
        pct: u64,
    ) -> Result<(), LedgerError> {
        self.authority.require(caller)?;
        if pct > MAX_ANNUAL_RATE_PCT {
            return Err(LedgerError::RateOutOfRange(pct));
        }
        self.params.annual_rate_pct = pct;
        tracing::info!(pct, "annual rate updated");
        Ok(())
    }

    /// Set the claim cooldown. Already-applied claims keep their original
    /// unlock time.
    pub fn set_cooldown(
        &mut self,
        caller: &AccountAddress,
        secs: u64,
    ) -> Result<(), LedgerError> {
        self.authority.require(caller)?;
        if secs > MAX_COOLDOWN_SECS {
            return Err(LedgerError::CooldownOutOfRange(secs));
        }
        self.params.cooldown_secs = secs;
        tracing::info!(secs, "cooldown updated");
        Ok(())
    }

    /// Swap the token identifier used for custody calls.
    pub fn set_base_token(
        &mut self,
        caller: &AccountAddress,
        token: TokenId,
    ) -> Result<(), LedgerError> {
        self.authority.require(caller)?;
        tracing::info!(token = %token, "base token updated");
        self.base_token = token;
        Ok(())
    }

    /// Swap the token identifier used for issuance calls.
    pub fn set_reward_token(
        &mut self,
        caller: &AccountAddress,
        token: TokenId,
    ) -> Result<(), LedgerError> {
        self.authority.require(caller)?;
        tracing::info!(token = %token, "reward token updated");
        self.reward_token = token;
        Ok(())
    }

    /// Hand the parameter-setting capability to `new_owner`.
    pub fn transfer_ownership(
        &mut self,
        caller: &AccountAddress,
        new_owner: AccountAddress,
    ) -> Result<(), LedgerError> {
        let previous = self.authority.owner().cloned();
        self.authority.transfer(caller, new_owner.clone())?;
        tracing::info!(new_owner = %new_owner, "ownership transferred");
        self.events.emit(&LedgerEvent::OwnershipTransferred {
            previous,
            new: Some(new_owner),
        });
        Ok(())
    }

    /// Give the capability up permanently.
    pub fn renounce_ownership(&mut self, caller: &AccountAddress) -> Result<(), LedgerError> {
        let previous = self.authority.owner().cloned();
        self.authority.renounce(caller)?;
        tracing::info!("ownership renounced");
        self.events.emit(&LedgerEvent::OwnershipTransferred {
            previous,
            new: None,
        });
        Ok(())
    }

    // ── Persistence ────────────────────────────────────────────────────

    /// Persist all ledger state through a store.
    pub fn save_to_store(&self, store: &dyn StakeStore) -> Result<(), LedgerError> {
        let params = bincode::serialize(&self.params)
            .map_err(|e| LedgerError::Serialization(e.to_string()))?;
        store
            .put_meta(META_PARAMS, &params)
            .map_err(|e| LedgerError::Store(e.to_string()))?;

        let authority = bincode::serialize(&self.authority)
            .map_err(|e| LedgerError::Serialization(e.to_string()))?;
        store
            .put_meta(META_AUTHORITY, &authority)
            .map_err(|e| LedgerError::Store(e.to_string()))?;

        let base = bincode::serialize(&self.base_token)
            .map_err(|e| LedgerError::Serialization(e.to_string()))?;
        store
            .put_meta(META_BASE_TOKEN, &base)
            .map_err(|e| LedgerError::Store(e.to_string()))?;

        let reward = bincode::serialize(&self.reward_token)
            .map_err(|e| LedgerError::Serialization(e.to_string()))?;
        store
            .put_meta(META_REWARD_TOKEN, &reward)
            .map_err(|e| LedgerError::Store(e.to_string()))?;

        store
            .put_meta(META_TOTAL_STAKED, &self.total_staked.to_be_bytes())
            .map_err(|e| LedgerError::Store(e.to_string()))?;

        for (address, state) in &self.accounts {
            let bytes = bincode::serialize(state)
                .map_err(|e| LedgerError::Serialization(e.to_string()))?;
            store
                .put_account_state(address, &bytes)
                .map_err(|e| LedgerError::Store(e.to_string()))?;
        }
        Ok(())
    }

    /// Restore a ledger from a store. Missing metadata falls back to
    /// defaults (fresh stores load as an empty, renounced ledger).
    pub fn load_from_store(store: &dyn StakeStore) -> Result<Self, LedgerError> {
        let params = match store
            .get_meta(META_PARAMS)
            .map_err(|e| LedgerError::Store(e.to_string()))?
        {
            Some(bytes) => bincode::deserialize(&bytes)
                .map_err(|e| LedgerError::Serialization(e.to_string()))?,
            None => LedgerParams::default(),
        };

        let authority = match store
            .get_meta(META_AUTHORITY)
            .map_err(|e| LedgerError::Store(e.to_string()))?
        {
            Some(bytes) => bincode::deserialize(&bytes)
                .map_err(|e| LedgerError::Serialization(e.to_string()))?,
            None => Authority::renounced(),
        };

        let base_token = match store
            .get_meta(META_BASE_TOKEN)
            .map_err(|e| LedgerError::Store(e.to_string()))?
        {
            Some(bytes) => bincode::deserialize(&bytes)
                .map_err(|e| LedgerError::Serialization(e.to_string()))?,
            None => TokenId::new("GRAIN"),
        };

        let reward_token = match store
            .get_meta(META_REWARD_TOKEN)
            .map_err(|e| LedgerError::Store(e.to_string()))?
        {
            Some(bytes) => bincode::deserialize(&bytes)
                .map_err(|e| LedgerError::Serialization(e.to_string()))?,
            None => TokenId::new("YIELD"),
        };

        let mut accounts = HashMap::new();
        for (address, bytes) in store
            .iter_account_states()
            .map_err(|e| LedgerError::Store(e.to_string()))?
        {
            let state: AccountState = bincode::deserialize(&bytes)
                .map_err(|e| LedgerError::Serialization(e.to_string()))?;
            accounts.insert(address, state);
        }

        let total_staked = match store
            .get_meta(META_TOTAL_STAKED)
            .map_err(|e| LedgerError::Store(e.to_string()))?
        {
            Some(bytes) if bytes.len() >= 16 => {
                u128::from_be_bytes(bytes[..16].try_into().unwrap())
            }
            _ => accounts.values().fold(0u128, |acc, s| {
                acc.saturating_add(s.principal().saturating_add(s.pending_principal()))
            }),
        };

        Ok(Self {
            params,
            authority,
            base_token,
            reward_token,
            accounts,
            total_staked,
            events: EventBus::new(),
        })
    }
}
