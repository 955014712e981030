//! Linear depreciation of assets between acquisition and residual price.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::{Amount, DepreciableAsset};

/// Current worth of `asset` at `now`. Removed assets and assets without a
/// complete schedule are worth nothing.
pub fn value(asset: &DepreciableAsset, now: DateTime<Utc>) -> Amount {
    if asset.removed {
        return Decimal::ZERO;
    }
    let (Some(start), Some(end)) = (asset.start_date, asset.end_date) else {
        return Decimal::ZERO;
    };
    let fraction = elapsed_fraction(start, end, now);
    asset.acquisition_price - (asset.acquisition_price - asset.depreciation_price) * fraction
}

/// Sum of `value` over the non-removed assets, `None` if the sum overflows.
pub fn total_value<'a, I>(assets: I, now: DateTime<Utc>) -> Option<Amount>
where
    I: IntoIterator<Item = &'a DepreciableAsset>,
{
    assets
        .into_iter()
        .filter(|asset| !asset.removed)
        .try_fold(Decimal::ZERO, |sum, asset| sum.checked_add(value(asset, now)))
}

/// Position of `now` within `[start, end]`, clamped to `[0, 1]`.
fn elapsed_fraction(start: DateTime<Utc>, end: DateTime<Utc>, now: DateTime<Utc>) -> Decimal {
    if now <= start {
        return Decimal::ZERO;
    }
    if now >= end {
        return Decimal::ONE;
    }
    // start < now < end, so total > elapsed > 0
    let total = (end - start).num_milliseconds();
    let elapsed = (now - start).num_milliseconds();
    (Decimal::from(elapsed) / Decimal::from(total)).clamp(Decimal::ZERO, Decimal::ONE)
}
