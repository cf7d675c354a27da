//! Compound-interest profit calculation

use crate::catalog::InvestmentCatalog;

/// Profit of investing `principal` in `target` for `years` years,
/// compounded annually at the target's catalog rate.
///
/// Returns `None` when the target is not in the catalog. The result is not
/// rounded; callers round for display.
pub fn calculate_profit(
    catalog: &InvestmentCatalog,
    principal: f64,
    target: &str,
    years: u32,
) -> Option<f64> {
    let rate = catalog.rate_of(target)?;
    Some(compound_profit(principal, rate, years))
}

/// `P × (1 + R)^N − P`
pub fn compound_profit(principal: f64, annual_rate: f64, years: u32) -> f64 {
    principal * (1.0 + annual_rate).powf(f64::from(years)) - principal
}
