//! Class cost calculation: a flat per-student price times the class size,
//! with optional tax and a currency symbol for display.

use std::fmt;

use thiserror::Error;

use crate::roster::Roster;

/// Tax applied when the user opts in and no override is configured.
pub const DEFAULT_TAX_RATE: f64 = 7.0;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CostError {
    #[error("no students loaded, add or load a class first")]
    EmptyRoster,
    #[error("total cost is too large to compute")]
    Overflow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Currency {
    #[default]
    Dollar,
    Euro,
}

impl Currency {
    /// Menu choice as shown on the console: 1 = dollars, 2 = euros.
    pub fn from_choice(choice: i64) -> Option<Self> {
        match choice {
            1 => Some(Currency::Dollar),
            2 => Some(Currency::Euro),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Currency::Dollar => "$",
            Currency::Euro => "€",
        }
    }
}

/// Untaxed cost of the class. Exact for every input that fits in a `u64`.
pub fn class_cost(cost_per_student: u64, count: usize) -> Result<u64, CostError> {
    u64::try_from(count)
        .ok()
        .and_then(|count| cost_per_student.checked_mul(count))
        .ok_or(CostError::Overflow)
}

/// `cost * (1 + rate / 100)`.
pub fn taxed_cost(cost: u64, rate_percent: f64) -> f64 {
    cost as f64 * (1.0 + rate_percent / 100.0)
}

#[derive(Debug, Clone, PartialEq)]
/// A computed total ready to print.
pub struct CostQuote {
    pub subtotal: u64,
    /// Applied tax rate in percent, if the user asked for tax.
    pub tax_rate: Option<f64>,
    pub currency: Currency,
}

impl CostQuote {
    /// Price the given roster. Refuses an empty class since "cost of nobody"
    /// is almost always a forgotten load.
    pub fn for_roster(
        roster: &Roster,
        cost_per_student: u64,
        tax_rate: Option<f64>,
        currency: Currency,
    ) -> Result<Self, CostError> {
        if roster.is_empty() {
            return Err(CostError::EmptyRoster);
        }
        Ok(Self {
            subtotal: class_cost(cost_per_student, roster.count())?,
            tax_rate,
            currency,
        })
    }

    pub fn total(&self) -> f64 {
        match self.tax_rate {
            Some(rate) => taxed_cost(self.subtotal, rate),
            None => self.subtotal as f64,
        }
    }
}

impl fmt::Display for CostQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = self.currency.symbol();
        match self.tax_rate {
            Some(rate) => write!(
                f,
                "{symbol}{:.2} ({symbol}{} + {rate}% tax)",
                self.total(),
                self.subtotal
            ),
            None => write!(f, "{symbol}{}", self.subtotal),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Student;

    fn roster_of(count: usize) -> Roster {
        Roster::from_records(vec![Student::new("x", 1, 10); count])
    }

    #[test]
    fn cost_is_exact_product() {
        for (per, count) in [(0, 5), (25, 4), (1_000, 30), (u64::MAX, 1)] {
            assert_eq!(class_cost(per, count).unwrap(), per * count as u64);
        }
    }

    #[test]
    fn cost_overflow_is_reported() {
        assert_eq!(class_cost(u64::MAX, 2), Err(CostError::Overflow));
    }

    #[test]
    fn taxed_cost_matches_rate() {
        let taxed = taxed_cost(200, 7.0);
        assert!((taxed - 214.0).abs() < 1e-9);
        assert!((taxed_cost(200, 0.0) - 200.0).abs() < 1e-9);
    }

    #[test]
    fn empty_roster_has_no_cost() {
        let err = CostQuote::for_roster(&Roster::Empty, 10, None, Currency::Dollar).unwrap_err();
        assert_eq!(err, CostError::EmptyRoster);
    }

    #[test]
    fn quote_formats_with_currency() {
        let plain = CostQuote::for_roster(&roster_of(3), 50, None, Currency::Dollar).unwrap();
        assert_eq!(plain.to_string(), "$150");

        let taxed = CostQuote::for_roster(&roster_of(2), 50, Some(10.0), Currency::Euro).unwrap();
        assert_eq!(taxed.to_string(), "€110.00 (€100 + 10% tax)");
    }

    #[test]
    fn currency_choices() {
        assert_eq!(Currency::from_choice(1), Some(Currency::Dollar));
        assert_eq!(Currency::from_choice(2), Some(Currency::Euro));
        assert_eq!(Currency::from_choice(3), None);
    }
}
