use serde::Serialize;

/// A shop line from `#SHOPS`: keeper mob, up to five traded item types
/// (unused slots stay 0), profit percentages and opening hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Shop {
    pub keeper_vnum: i64,
    pub buy_types: [i64; 5],
    pub profit_buy: i64,
    pub profit_sell: i64,
    pub open_hour: i64,
    pub close_hour: i64,
}
