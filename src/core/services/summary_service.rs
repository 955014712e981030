//! Income, expense, balance and net worth of an account.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::TransferTreatment;
use crate::core::classifier::{classify, EntryRole};
use crate::core::context::EngineContext;
use crate::core::valuation;
use crate::domain::{Account, Amount, LedgerEntry, TimeWindow};
use crate::errors::{EngineError, Result};

/// Raw sums over a set of entries, before assets are considered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccountTotals {
    pub income: Amount,
    /// Non-positive.
    pub expense: Amount,
    pub entries_counted: usize,
}

impl AccountTotals {
    pub fn balance(&self) -> Amount {
        self.income + self.expense
    }

    /// Adds `amount` on the side `role` names. `None` when the sum leaves `Decimal` range.
    fn record(&mut self, role: EntryRole, amount: Amount) -> Option<()> {
        match role {
            EntryRole::Income => self.income = self.income.checked_add(amount)?,
            EntryRole::Expense => self.expense = self.expense.checked_sub(amount)?,
        }
        Some(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccountSummary {
    pub account_id: Uuid,
    pub window: TimeWindow,
    pub income: Amount,
    pub expense: Amount,
    pub balance: Amount,
    pub asset_value: Amount,
    pub net_worth: Amount,
    pub entries_counted: usize,
}

/// Sums the entries that count for `account` inside `window`. Pure; the order of
/// `entries` does not matter. Fails with [`EngineError::AmountOverflow`] when a sum
/// leaves `Decimal` range.
pub fn aggregate(
    account: &Account,
    entries: &[LedgerEntry],
    window: TimeWindow,
    transfers: TransferTreatment,
) -> Result<AccountTotals> {
    let classification = classify(account.kind);
    let mut totals = AccountTotals::default();
    for entry in entries
        .iter()
        .filter(|entry| !entry.removed && window.contains(entry.executed_at))
    {
        // A self-transfer is both sent and received.
        let mut roles = [None, None];
        if entry.kind.is_transfer() {
            if transfers == TransferTreatment::Directional {
                if entry.account == account.id {
                    roles[0] = Some(EntryRole::Expense);
                }
                if entry.receiver == Some(account.id) {
                    roles[1] = Some(EntryRole::Income);
                }
            }
        } else if entry.account == account.id {
            roles[0] = classification.role_of(entry.kind);
        }

        let mut counted = false;
        for role in roles.into_iter().flatten() {
            totals.record(role, entry.amount).ok_or_else(|| {
                tracing::warn!(account = %account.id, entry = %entry.id, "amount overflow");
                EngineError::AmountOverflow(account.id)
            })?;
            counted = true;
        }
        if counted {
            totals.entries_counted += 1;
        }
    }
    Ok(totals)
}

pub struct SummaryService;

impl SummaryService {
    pub fn income(ctx: &EngineContext<'_>, account_id: Uuid, window: TimeWindow) -> Result<Amount> {
        Ok(Self::totals(ctx, account_id, window)?.1.income)
    }

    pub fn expense(
        ctx: &EngineContext<'_>,
        account_id: Uuid,
        window: TimeWindow,
    ) -> Result<Amount> {
        Ok(Self::totals(ctx, account_id, window)?.1.expense)
    }

    pub fn balance(
        ctx: &EngineContext<'_>,
        account_id: Uuid,
        window: TimeWindow,
    ) -> Result<Amount> {
        Ok(Self::totals(ctx, account_id, window)?.1.balance())
    }

    pub fn net_worth(
        ctx: &EngineContext<'_>,
        account_id: Uuid,
        window: TimeWindow,
    ) -> Result<Amount> {
        Ok(Self::summarize(ctx, account_id, window)?.net_worth)
    }

    /// Every aggregate from a single fetch of entries and assets.
    pub fn summarize(
        ctx: &EngineContext<'_>,
        account_id: Uuid,
        window: TimeWindow,
    ) -> Result<AccountSummary> {
        let (account, totals) = Self::totals(ctx, account_id, window)?;
        let assets = ctx.assets.assets_of(account.id)?;
        let overflow = || EngineError::AmountOverflow(account.id);
        let asset_value = valuation::total_value(&assets, ctx.clock.now()).ok_or_else(overflow)?;
        let balance = totals.balance();
        let net_worth = balance.checked_add(asset_value).ok_or_else(overflow)?;
        let summary = AccountSummary {
            account_id: account.id,
            window,
            income: totals.income,
            expense: totals.expense,
            balance,
            asset_value,
            net_worth,
            entries_counted: totals.entries_counted,
        };
        tracing::debug!(
            account = %account.id,
            income = %summary.income,
            expense = %summary.expense,
            net_worth = %summary.net_worth,
            "account summarized"
        );
        Ok(summary)
    }

    fn load_account(ctx: &EngineContext<'_>, account_id: Uuid) -> Result<Account> {
        ctx.accounts.resolve_account(account_id)?.ok_or_else(|| {
            tracing::warn!(account = %account_id, "account not found");
            EngineError::AccountNotFound(account_id)
        })
    }

    fn totals(
        ctx: &EngineContext<'_>,
        account_id: Uuid,
        window: TimeWindow,
    ) -> Result<(Account, AccountTotals)> {
        let account = Self::load_account(ctx, account_id)?;
        let entries = ctx.entries.fetch_entries(account.id, window)?;
        let totals = aggregate(&account, &entries, window, ctx.config.transfer_treatment)?;
        Ok((account, totals))
    }
}
