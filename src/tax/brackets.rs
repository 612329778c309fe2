//! Progressive marginal brackets.
//!
//! Each bracket taxes only the slice of income that falls inside it. A
//! bracket the income has passed contributes its published fixed amount.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// One contiguous income range taxed at a single marginal rate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bracket {
    pub label: &'static str,
    /// Exclusive, except for the first bracket which starts at zero
    pub lower: Decimal,
    /// Inclusive. `None` for the open-ended top bracket.
    pub upper: Option<Decimal>,
    pub rate: Decimal,
    /// Contribution once income is above `upper`
    pub filled: Decimal,
}

pub const BRACKETS: [Bracket; 5] = [
    Bracket {
        label: "0-150,000",
        lower: dec!(0),
        upper: Some(dec!(150000)),
        rate: dec!(0),
        filled: dec!(0),
    },
    Bracket {
        label: "150,001-500,000",
        lower: dec!(150000),
        upper: Some(dec!(500000)),
        rate: dec!(0.10),
        filled: dec!(35000),
    },
    Bracket {
        label: "500,001-1,000,000",
        lower: dec!(500000),
        upper: Some(dec!(1000000)),
        rate: dec!(0.15),
        filled: dec!(95000),
    },
    Bracket {
        label: "1,000,001-2,000,000",
        lower: dec!(1000000),
        upper: Some(dec!(2000000)),
        rate: dec!(0.20),
        filled: dec!(335000),
    },
    Bracket {
        label: "2,000,001+",
        lower: dec!(2000000),
        upper: None,
        rate: dec!(0.35),
        filled: dec!(0),
    },
];

/// Tax attributed to one bracket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxLevel {
    pub label: &'static str,
    pub amount: Decimal,
}

impl Bracket {
    pub fn contribution(&self, taxable_income: Decimal) -> Decimal {
        match self.upper {
            Some(upper) if taxable_income > upper => self.filled,
            _ if taxable_income > self.lower => (taxable_income - self.lower) * self.rate,
            _ => Decimal::ZERO,
        }
    }

    fn contains(&self, taxable_income: Decimal) -> bool {
        taxable_income > self.lower && self.upper.is_none_or(|upper| taxable_income <= upper)
    }
}

/// Split the tax on `taxable_income` across every bracket, low to high.
/// Negative income is treated as zero.
pub fn apportion(taxable_income: Decimal) -> [TaxLevel; 5] {
    let income = taxable_income.max(Decimal::ZERO);
    BRACKETS.map(|bracket| TaxLevel {
        label: bracket.label,
        amount: bracket.contribution(income),
    })
}

pub fn total(levels: &[TaxLevel]) -> Decimal {
    levels.iter().map(|level| level.amount).sum()
}

/// Single-formula equivalent of summing [`apportion`]: the fixed amounts of
/// every bracket below the one containing the income, plus the marginal slice
/// above that bracket's lower bound.
pub fn progressive_tax(taxable_income: Decimal) -> Decimal {
    let income = taxable_income.max(Decimal::ZERO);
    let mut base = Decimal::ZERO;
    for bracket in &BRACKETS {
        if bracket.contains(income) {
            return base + (income - bracket.lower) * bracket.rate;
        }
        base += bracket.filled;
    }
    // income is zero
    Decimal::ZERO
}
