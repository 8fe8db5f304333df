//! Portfolio advice for instruments with an open position: combines the
//! trading signal with the position's profit/loss and the RSI extreme.

use crate::domain::types::{Advice, PortfolioPosition, PositionResult, Signal};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

const RSI_OVERHEATED: f64 = 80.0;
const RSI_OVERSOLD: f64 = 20.0;

/// Map signal, P/L and RSI to an advice category.
///
/// Rules apply in priority order: buy-class signals first, then sell-class,
/// then the Wait refinements on RSI extremes.
pub fn advise(signal: Signal, pl: Decimal, rsi: f64) -> Advice {
    if signal.is_buy_class() {
        if pl > Decimal::ZERO {
            Advice::ExtendGains
        } else {
            Advice::HoldBuyDip
        }
    } else if signal.is_sell_class() {
        if pl > Decimal::ZERO {
            Advice::TakeProfit
        } else {
            Advice::StopLoss
        }
    } else if rsi > RSI_OVERHEATED {
        Advice::OverheatedCaution
    } else if rsi < RSI_OVERSOLD {
        Advice::Oversold
    } else {
        Advice::Watch
    }
}

/// Evaluate an open position against the latest close. Inactive (returns
/// `None`) unless the position carries a positive buy price.
pub fn evaluate_position(
    position: &PortfolioPosition,
    last_close: Decimal,
    signal: Signal,
    rsi: f64,
) -> Option<PositionResult> {
    if position.buy_price <= Decimal::ZERO {
        return None;
    }

    let pl = (last_close - position.buy_price) * position.quantity;
    let pl_pct = ((last_close - position.buy_price) / position.buy_price * Decimal::ONE_HUNDRED)
        .to_f64()
        .unwrap_or(0.0);

    Some(PositionResult {
        pl,
        pl_pct,
        advice: advise(signal, pl, rsi),
    })
}
