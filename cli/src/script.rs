//! Scripted simulation: a JSON list of steps replayed against an in-memory pool.
//!
//! Every step is executed independently. A rejected step is reported with
//! its error and leaves the pool untouched, so a script can exercise failure
//! paths and keep going.

use crate::config::{resolve_account, PoolConfig};
use crate::error::CliError;
use lpstake_assets::AssetLedger;
use lpstake_nullables::{NullAssetLedger, NullClock};
use lpstake_pool::{
    ExitReceipt, Payout, PoolError, PoolSummary, PositionId, PositionReport, StakingPool,
};
use lpstake_types::{parse_units, Address, Asset, Clock, ASSET_DECIMALS};
use lpstake_utils::format_secs;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// One scripted operation. Accounts are labels or `0x` addresses; amounts
/// are decimal token strings such as `"600"` or `"0.5"`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    /// Credit an account on the in-memory ledger.
    Mint {
        account: String,
        asset: Asset,
        amount: String,
    },
    /// Let the pool vault spend from `account`. Omitted amount means unlimited.
    Approve {
        account: String,
        asset: Asset,
        #[serde(default)]
        amount: Option<String>,
    },
    Advance {
        secs: u64,
    },
    SetWhitelist {
        accounts: Vec<String>,
    },
    RemoveFromWhitelist {
        accounts: Vec<String>,
    },
    SetMaxPool {
        amount: String,
    },
    WhitelistStake {
        account: String,
        amount: String,
    },
    Stake {
        account: String,
        amount: String,
    },
    Transfer {
        from: String,
        to: String,
        id: PositionId,
    },
    Claim {
        account: String,
        id: PositionId,
    },
    ViewRewards {
        id: PositionId,
    },
    RequestWithdraw {
        account: String,
        id: PositionId,
    },
    Withdraw {
        account: String,
        id: PositionId,
    },
    AddRewards {
        amount: String,
    },
    FundRequests,
    /// Position reports for `account`, or the pool summary when omitted.
    Report {
        #[serde(default)]
        account: Option<String>,
    },
}

impl Step {
    pub fn name(&self) -> &'static str {
        match self {
            Step::Mint { .. } => "mint",
            Step::Approve { .. } => "approve",
            Step::Advance { .. } => "advance",
            Step::SetWhitelist { .. } => "set_whitelist",
            Step::RemoveFromWhitelist { .. } => "remove_from_whitelist",
            Step::SetMaxPool { .. } => "set_max_pool",
            Step::WhitelistStake { .. } => "whitelist_stake",
            Step::Stake { .. } => "stake",
            Step::Transfer { .. } => "transfer",
            Step::Claim { .. } => "claim",
            Step::ViewRewards { .. } => "view_rewards",
            Step::RequestWithdraw { .. } => "request_withdraw",
            Step::Withdraw { .. } => "withdraw",
            Step::AddRewards { .. } => "add_rewards",
            Step::FundRequests => "fund_requests",
            Step::Report { .. } => "report",
        }
    }
}

/// What a successful step produced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum StepOutput {
    Position { id: PositionId },
    Amount { amount: u128 },
    Growth { reward_growth: u128 },
    Count { count: usize },
    Exit(ExitReceipt),
    Payout(Payout),
    Deposits(Vec<PositionReport>),
    Summary(Box<PoolSummary>),
    Done,
}

/// Outcome of one step, as emitted on stdout.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StepResult {
    pub step: usize,
    pub op: &'static str,
    pub now: u64,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<StepOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<String>,
}

/// Parse a script: a JSON array of steps.
pub fn parse_script(json: &str) -> Result<Vec<Step>, CliError> {
    serde_json::from_str(json).map_err(|e| CliError::Script(e.to_string()))
}

/// A pool over a [`NullAssetLedger`] whose clock only moves on `advance` steps.
pub struct Simulator {
    pool: StakingPool<NullAssetLedger, Arc<NullClock>>,
    clock: Arc<NullClock>,
}

impl Simulator {
    pub fn new(config: &PoolConfig) -> Result<Self, CliError> {
        let params = config.params()?;
        let admin = config.admin_address()?;
        let vault = config.vault_address()?;
        let clock = Arc::new(NullClock::new(config.genesis_secs));
        let pool = StakingPool::new(
            params,
            admin,
            vault,
            NullAssetLedger::new(),
            Arc::clone(&clock),
        )?;
        Ok(Self { pool, clock })
    }

    pub fn pool(&self) -> &StakingPool<NullAssetLedger, Arc<NullClock>> {
        &self.pool
    }

    pub fn now(&self) -> u64 {
        self.clock.now().as_secs()
    }

    /// Run every step in order, collecting one result per step.
    pub fn run(&mut self, steps: &[Step]) -> Vec<StepResult> {
        steps
            .iter()
            .enumerate()
            .map(|(index, step)| self.execute(index, step))
            .collect()
    }

    /// Execute one step and report it as step number `index`.
    pub fn execute(&mut self, index: usize, step: &Step) -> StepResult {
        let outcome = self.run_step(step);
        let now = self.now();
        match outcome {
            Ok(output) => StepResult {
                step: index,
                op: step.name(),
                now,
                ok: true,
                output: Some(output),
                error: None,
                error_kind: None,
            },
            Err(e) => {
                warn!(step = index, op = step.name(), error = %e, "step rejected");
                let error_kind = match &e {
                    CliError::Pool(pool_error) => format!("{:?}", pool_error.kind()),
                    _ => "Script".to_string(),
                };
                StepResult {
                    step: index,
                    op: step.name(),
                    now,
                    ok: false,
                    output: None,
                    error: Some(e.to_string()),
                    error_kind: Some(error_kind),
                }
            }
        }
    }

    /// Execute a single step.
    pub fn run_step(&mut self, step: &Step) -> Result<StepOutput, CliError> {
        let admin = *self.pool.admin();
        let output = match step {
            Step::Mint {
                account,
                asset,
                amount,
            } => {
                let to = resolve_account(account)?;
                let amount = amount_of(amount)?;
                self.pool.ledger_mut().mint(*asset, &to, amount);
                StepOutput::Amount {
                    amount: self.pool.ledger().balance_of(*asset, &to),
                }
            }
            Step::Approve {
                account,
                asset,
                amount,
            } => {
                let owner = resolve_account(account)?;
                let amount = match amount {
                    Some(a) => amount_of(a)?,
                    None => u128::MAX,
                };
                let vault = *self.pool.vault();
                self.pool
                    .ledger_mut()
                    .approve(*asset, &owner, &vault, amount)
                    .map_err(PoolError::from)?;
                StepOutput::Done
            }
            Step::Advance { secs } => {
                self.clock.advance(*secs);
                info!(
                    by = %format_secs(*secs),
                    now = self.now(),
                    phase = %self.pool.phase(),
                    "clock advanced"
                );
                StepOutput::Done
            }
            Step::SetWhitelist { accounts } => {
                let accounts = accounts_of(accounts)?;
                StepOutput::Count {
                    count: self.pool.set_whitelist(&admin, &accounts)?,
                }
            }
            Step::RemoveFromWhitelist { accounts } => {
                let accounts = accounts_of(accounts)?;
                StepOutput::Count {
                    count: self.pool.remove_from_whitelist(&admin, &accounts)?,
                }
            }
            Step::SetMaxPool { amount } => {
                self.pool.set_max_pool_usdc(&admin, amount_of(amount)?)?;
                StepOutput::Amount {
                    amount: self.pool.max_pool_usdc(),
                }
            }
            Step::WhitelistStake { account, amount } => {
                let caller = resolve_account(account)?;
                StepOutput::Position {
                    id: self.pool.whitelist_stake(&caller, amount_of(amount)?)?,
                }
            }
            Step::Stake { account, amount } => {
                let caller = resolve_account(account)?;
                StepOutput::Position {
                    id: self.pool.stake(&caller, amount_of(amount)?)?,
                }
            }
            Step::Transfer { from, to, id } => {
                let from = resolve_account(from)?;
                let to = resolve_account(to)?;
                self.pool.transfer(&from, &to, *id)?;
                StepOutput::Position { id: *id }
            }
            Step::Claim { account, id } => {
                let caller = resolve_account(account)?;
                StepOutput::Amount {
                    amount: self.pool.claim_rewards(&caller, *id)?,
                }
            }
            Step::ViewRewards { id } => StepOutput::Amount {
                amount: self.pool.view_rewards(*id),
            },
            Step::RequestWithdraw { account, id } => {
                let caller = resolve_account(account)?;
                StepOutput::Exit(self.pool.request_withdraw(&caller, *id)?)
            }
            Step::Withdraw { account, id } => {
                let caller = resolve_account(account)?;
                StepOutput::Payout(self.pool.withdraw(&caller, *id)?)
            }
            Step::AddRewards { amount } => StepOutput::Growth {
                reward_growth: self.pool.add_rewards(&admin, amount_of(amount)?)?,
            },
            Step::FundRequests => StepOutput::Payout(self.pool.fund_requests(&admin)?),
            Step::Report { account: Some(account) } => {
                let owner = resolve_account(account)?;
                StepOutput::Deposits(self.pool.deposits_of(&owner)?)
            }
            Step::Report { account: None } => StepOutput::Summary(Box::new(self.pool.summary())),
        };
        Ok(output)
    }
}

fn amount_of(s: &str) -> Result<u128, CliError> {
    Ok(parse_units(s, ASSET_DECIMALS)?)
}

fn accounts_of(references: &[String]) -> Result<Vec<Address>, CliError> {
    references.iter().map(|r| resolve_account(r)).collect()
}
