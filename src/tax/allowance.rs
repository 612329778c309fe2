use super::config::Deductions;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// The personal deduction is never applied below this, whatever is configured
pub const PERSONAL_DEDUCTION_FLOOR: Decimal = dec!(60000);

/// Upper clamp for donation allowances
pub const DONATION_CAP: Decimal = dec!(100000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllowanceKind {
    Donation,
    KReceipt,
}

impl AllowanceKind {
    pub fn from_str(s: &str) -> Option<AllowanceKind> {
        match s {
            "donation" => Some(AllowanceKind::Donation),
            "k-receipt" => Some(AllowanceKind::KReceipt),
            _ => None,
        }
    }
}

/// An itemized allowance as claimed. The amount is untrusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Allowance {
    pub kind: AllowanceKind,
    pub amount: Decimal,
}

impl Allowance {
    pub fn new(kind: AllowanceKind, amount: Decimal) -> Self {
        Allowance { kind, amount }
    }
}

/// Deduction amounts after clamping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedDeductions {
    pub personal: Decimal,
    pub donation: Decimal,
    pub k_receipt: Decimal,
}

impl ResolvedDeductions {
    pub fn total(&self) -> Decimal {
        self.personal + self.donation + self.k_receipt
    }
}

/// Resolve allowance claims into deduction amounts.
///
/// Out-of-range amounts are clamped silently. When a kind is claimed more
/// than once the last entry wins; entries are not summed.
pub fn resolve(allowances: &[Allowance], config: &Deductions) -> ResolvedDeductions {
    let mut donation = Decimal::ZERO;
    let mut k_receipt = Decimal::ZERO;

    for allowance in allowances {
        match allowance.kind {
            AllowanceKind::Donation => donation = clamp(allowance.amount, DONATION_CAP),
            AllowanceKind::KReceipt => {
                k_receipt = clamp(allowance.amount, config.k_receipt_cap)
            }
        }
    }

    ResolvedDeductions {
        personal: personal_deduction(config.personal_deduction),
        donation,
        k_receipt,
    }
}

/// Negative values go to zero first, then anything under the floor is raised
/// to it.
pub fn personal_deduction(configured: Decimal) -> Decimal {
    configured.max(Decimal::ZERO).max(PERSONAL_DEDUCTION_FLOOR)
}

fn clamp(amount: Decimal, cap: Decimal) -> Decimal {
    amount.max(Decimal::ZERO).min(cap)
}
