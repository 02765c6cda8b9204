//! Monetary derivation for an order.
//!
//! All money is rounded half-to-even at two decimal places. The tax-rate
//! percentage division is carried at fifteen decimal places before the
//! final rounding so the intermediate quotient does not compound error.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use floorcraft_core::{Order, State};

const MONEY_SCALE: u32 = 2;
const RATE_SCALE: u32 = 15;

/// Round to cents, half-to-even, always carrying the two-decimal scale.
fn round_money(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointNearestEven);
    // round_dp never widens the scale; pad so 350 serializes as 350.00.
    rounded.rescale(MONEY_SCALE);
    rounded
}

/// Fill the computed monetary fields of an order.
///
/// Requires `area`, `cost_per_square_foot`, `labor_cost_per_square_foot`
/// and `state` to be set. The tax rate is looked up in the supplied state
/// table by abbreviation; with no match the tax falls back to zero rather
/// than failing, since upstream validation already constrains the choice.
pub fn calculate_prices(mut order: Order, states: &[State]) -> Order {
    let material_cost = round_money(order.area * order.cost_per_square_foot);
    let labor_cost = round_money(order.area * order.labor_cost_per_square_foot);

    let mut tax = round_money(Decimal::ZERO);
    for state in states {
        if state.abbreviation == order.state {
            let rate = (state.tax_rate / dec!(100))
                .round_dp_with_strategy(RATE_SCALE, RoundingStrategy::MidpointNearestEven);
            tax = round_money((material_cost + labor_cost) * rate);
            break;
        }
    }

    order.material_cost = material_cost;
    order.labor_cost = labor_cost;
    order.tax = tax;
    order.total = material_cost + labor_cost + tax;
    order
}
