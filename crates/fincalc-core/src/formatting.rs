//! Indian-rupee display helpers.
//!
//! Display only: nothing here feeds back into a simulation.

use rust_decimal::RoundingStrategy;

use crate::types::Money;

/// Round to whole rupees, halves away from zero.
pub fn round_rupees(amount: Money) -> Money {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Whole-rupee amount with Indian digit grouping: 12345678 -> "1,23,45,678".
pub fn format_grouped(amount: Money) -> String {
    let rounded = round_rupees(amount);
    if rounded.is_zero() {
        return "0".to_string();
    }
    let digits = rounded.abs().trunc().to_string();
    let grouped = group_indian(&digits);
    if rounded.is_sign_negative() {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Currency string in whole rupees: 12345678 -> "₹1,23,45,678", -500 -> "-₹500".
pub fn format_inr(amount: Money) -> String {
    let grouped = format_grouped(amount);
    match grouped.strip_prefix('-') {
        Some(rest) => format!("-₹{rest}"),
        None => format!("₹{grouped}"),
    }
}

// Last three digits form the first group, every group after that has two.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}
