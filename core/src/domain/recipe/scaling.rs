//! Serving-size scaling and amount formatting.
//!
//! Rounding is half away from zero (`f64::round`) at two decimals. Amounts
//! are never negative once validated, so this matches rounding half up.

use crate::domain::recipe::entities::{Amount, Ingredient};

/// Serving count every stored recipe is scaled from.
///
/// Recipes carry their own `portions`, but the detail view always scales
/// from this fixed baseline. Whether `portions` should be the divisor
/// instead is still undecided.
pub const BASELINE_PORTIONS: u32 = 4;

pub fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Rescales every numeric amount from `base_portions` to `target_portions`.
///
/// Ingredients without a finite numeric amount (empty, "nach Bedarf", bad
/// legacy data) are returned unchanged. `base_portions` must be positive;
/// callers reject a non-positive target before calling.
pub fn scale_ingredients(
    ingredients: &[Ingredient],
    base_portions: u32,
    target_portions: u32,
) -> Vec<Ingredient> {
    debug_assert!(base_portions > 0, "base portions must be positive");

    ingredients
        .iter()
        .map(|ingredient| match ingredient.amount.numeric_value() {
            Some(amount) => {
                let scaled = amount / f64::from(base_portions) * f64::from(target_portions);
                Ingredient {
                    amount: Amount::Quantity(round_to_hundredths(scaled)),
                    ..ingredient.clone()
                }
            }
            None => ingredient.clone(),
        })
        .collect()
}

/// Display text for an amount: whole numbers without decimals, everything
/// else numeric with exactly two. Non-numeric text is passed through.
pub fn format_amount(amount: &Amount) -> String {
    match (amount, amount.numeric_value()) {
        (_, Some(value)) => format_number(value),
        // includes the "nach Bedarf" sentinel
        (Amount::Text(text), None) => text.clone(),
        (Amount::Quantity(value), None) => value.to_string(),
    }
}

fn format_number(value: f64) -> String {
    // avoid "-0"
    let value = if value == 0.0 { 0.0 } else { value };

    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}
