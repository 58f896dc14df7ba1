//! Money helpers
//!
//! The backend speaks f64 amounts on the wire. All local arithmetic is
//! done in integer cents and converted back at the boundary.

/// Sales tax charged at checkout, in percent.
pub const TAX_RATE_PERCENT: i64 = 13;

/// Convert a wire amount to cents (rounds to the nearest cent)
///
/// # Examples
///
/// ```
/// use shared::money::to_cents;
///
/// assert_eq!(to_cents(12.50), 1250);
/// assert_eq!(to_cents(0.01), 1);
/// assert_eq!(to_cents(100.00), 10000);
/// ```
pub fn to_cents(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

/// Convert cents back to a wire amount
///
/// # Examples
///
/// ```
/// use shared::money::to_amount;
///
/// assert!((to_amount(1250) - 12.50).abs() < 0.001);
/// assert!((to_amount(1) - 0.01).abs() < 0.001);
/// ```
pub fn to_amount(cents: i64) -> f64 {
    cents as f64 / 100.0
}

/// Line total for a priced quantity, in cents
pub fn line_total_cents(unit_price: f64, quantity: u32) -> i64 {
    to_cents(unit_price) * quantity as i64
}

/// Tax due on a subtotal, in cents (rounds half up)
pub fn tax_cents(subtotal_cents: i64) -> i64 {
    (subtotal_cents * TAX_RATE_PERCENT + 50) / 100
}

/// Format cents as a currency string
///
/// # Examples
///
/// ```
/// use shared::money::format_cents;
///
/// assert_eq!(format_cents(1250, "₹"), "₹12.50");
/// assert_eq!(format_cents(5, "$"), "$0.05");
/// ```
pub fn format_cents(cents: i64, symbol: &str) -> String {
    format!("{}{:.2}", symbol, to_amount(cents))
}

/// Checkout totals in cents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    pub subtotal: i64,
    pub tax: i64,
    pub total: i64,
}

impl Totals {
    /// Compute totals over (unit price, quantity) lines
    pub fn from_lines<I: IntoIterator<Item = (f64, u32)>>(lines: I) -> Self {
        let subtotal: i64 = lines
            .into_iter()
            .map(|(price, quantity)| line_total_cents(price, quantity))
            .sum();
        let tax = tax_cents(subtotal);
        Totals {
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_cents() {
        assert_eq!(to_cents(12.50), 1250);
        assert_eq!(to_cents(0.01), 1);
        assert_eq!(to_cents(100.00), 10000);
        assert_eq!(to_cents(0.00), 0);
        // binary float artifacts round away
        assert_eq!(to_cents(0.1 + 0.2), 30);
    }

    #[test]
    fn test_to_amount() {
        assert!((to_amount(1250) - 12.50).abs() < 0.001);
        assert!((to_amount(1) - 0.01).abs() < 0.001);
        assert!((to_amount(2825) - 28.25).abs() < 0.001);
    }

    #[test]
    fn test_round_trip() {
        for price in [0.01, 0.99, 1.00, 12.50, 99.99, 100.00, 999.99] {
            let cents = to_cents(price);
            let back = to_amount(cents);
            assert!((back - price).abs() < 0.001, "Failed for {}", price);
        }
    }

    #[test]
    fn test_tax_cents() {
        assert_eq!(tax_cents(2500), 325);
        assert_eq!(tax_cents(0), 0);
        assert_eq!(tax_cents(100), 13);
        // 9.99 * 13% = 1.2987, rounds to 1.30
        assert_eq!(tax_cents(999), 130);
    }

    #[test]
    fn test_line_total_cents() {
        assert_eq!(line_total_cents(10.00, 2), 2000);
        assert_eq!(line_total_cents(5.00, 1), 500);
        assert_eq!(line_total_cents(3.33, 3), 999);
        assert_eq!(line_total_cents(9.99, 0), 0);
    }

    #[test]
    fn test_totals_from_lines() {
        // two of 10.00 plus one of 5.00 comes to 25.00 + 3.25 tax
        let totals = Totals::from_lines([(10.00, 2), (5.00, 1)]);
        assert_eq!(totals.subtotal, 2500);
        assert_eq!(totals.tax, 325);
        assert_eq!(totals.total, 2825);
    }

    #[test]
    fn test_totals_empty_cart() {
        let lines: [(f64, u32); 0] = [];
        let totals = Totals::from_lines(lines);
        assert_eq!(totals.subtotal, 0);
        assert_eq!(totals.tax, 0);
        assert_eq!(totals.total, 0);
    }

    #[test]
    fn test_format_cents() {
        assert_eq!(format_cents(1250, "₹"), "₹12.50");
        assert_eq!(format_cents(2825, "€"), "€28.25");
        assert_eq!(format_cents(0, "$"), "$0.00");
    }
}
