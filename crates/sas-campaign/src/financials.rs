use rust_decimal::{Decimal, RoundingStrategy};

use sas_core::{CampaignPolicy, CountryLocaleRecord, Financials};

fn money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Derive the CPA guard rails and test budget from the commission.
///
/// Without a positive commission every CPA figure is zero and the test budget
/// falls back to the currency's minimum daily budget.
#[must_use]
pub fn compute_financials(
    policy: &CampaignPolicy,
    commission: Option<Decimal>,
    record: &CountryLocaleRecord,
) -> Financials {
    let minimum = record.min_daily_budget();
    let without_commission = || Financials {
        commission: Decimal::ZERO,
        target_cpa: Decimal::ZERO,
        max_cpa: Decimal::ZERO,
        stop_loss: Decimal::ZERO,
        test_budget: money(minimum),
    };
    let Some(commission) = commission.filter(|c| *c > Decimal::ZERO) else {
        return without_commission();
    };

    let scaled = (
        commission.checked_mul(policy.target_cpa_ratio),
        commission.checked_mul(policy.max_cpa_ratio),
        commission.checked_mul(policy.test_budget_multiplier),
    );
    let (Some(target_cpa), Some(max_cpa), Some(test_budget)) = scaled else {
        tracing::warn!(%commission, "commission too large to scale; treating it as missing");
        return without_commission();
    };

    Financials {
        commission: money(commission),
        target_cpa: money(target_cpa),
        max_cpa: money(max_cpa),
        stop_loss: money(commission),
        test_budget: money(test_budget.max(minimum)),
    }
}
