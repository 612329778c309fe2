//! Shared deduction settings and the admin mutators that replace them.

use super::allowance::Allowance;
use super::calculate::{calculate, CalculationResult};
use super::error::TaxError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::{Arc, PoisonError, RwLock};

/// Personal deduction applied when nothing else has been configured
pub const DEFAULT_PERSONAL_DEDUCTION: Decimal = dec!(60000);

/// K-receipt cap applied when nothing else has been configured
pub const DEFAULT_K_RECEIPT_CAP: Decimal = dec!(50000);

/// One committed set of deduction values. Never mutated once shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deductions {
    /// Stored personal deduction. The engine still raises it to the 60,000
    /// floor when this is lower.
    pub personal_deduction: Decimal,
    /// Upper clamp for k-receipt allowances
    pub k_receipt_cap: Decimal,
}

impl Default for Deductions {
    fn default() -> Self {
        Deductions {
            personal_deduction: DEFAULT_PERSONAL_DEDUCTION,
            k_receipt_cap: DEFAULT_K_RECEIPT_CAP,
        }
    }
}

/// Inclusive range an admin update must fall within.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminBounds {
    pub min: Decimal,
    pub max: Decimal,
}

impl Default for AdminBounds {
    fn default() -> Self {
        AdminBounds {
            min: dec!(10000),
            max: dec!(100000),
        }
    }
}

impl AdminBounds {
    pub fn check(&self, amount: Decimal) -> Result<(), TaxError> {
        if amount < self.min || amount > self.max {
            return Err(TaxError::InvalidDeductionAmount {
                amount,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// Process-wide deduction settings.
///
/// Readers take an `Arc` snapshot and compute against it without holding the
/// lock; writers swap in a whole new `Deductions`. A calculation therefore
/// observes exactly one committed configuration, never a mix of two.
#[derive(Debug)]
pub struct TaxSettings {
    current: RwLock<Arc<Deductions>>,
    bounds: AdminBounds,
}

impl Default for TaxSettings {
    fn default() -> Self {
        TaxSettings::new(Deductions::default(), AdminBounds::default())
    }
}

impl TaxSettings {
    pub fn new(initial: Deductions, bounds: AdminBounds) -> Self {
        TaxSettings {
            current: RwLock::new(Arc::new(initial)),
            bounds,
        }
    }

    /// Current committed configuration
    pub fn snapshot(&self) -> Arc<Deductions> {
        // A poisoned lock still holds a fully written Arc.
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    /// Values for the read-only details view
    pub fn details(&self) -> Deductions {
        *self.snapshot()
    }

    pub fn set_personal_deduction(&self, amount: Decimal) -> Result<Deductions, TaxError> {
        self.bounds.check(amount)?;
        let updated = self.replace(|d| d.personal_deduction = amount);
        log::info!("Personal deduction set to {}", amount);
        Ok(updated)
    }

    pub fn set_k_receipt_cap(&self, amount: Decimal) -> Result<Deductions, TaxError> {
        self.bounds.check(amount)?;
        let updated = self.replace(|d| d.k_receipt_cap = amount);
        log::info!("K-receipt cap set to {}", amount);
        Ok(updated)
    }

    /// Calculate against one snapshot of the current configuration
    pub fn calculate(
        &self,
        total_income: Decimal,
        wht: Decimal,
        allowances: &[Allowance],
    ) -> Result<CalculationResult, TaxError> {
        let config = self.snapshot();
        calculate(total_income, wht, allowances, &config)
    }

    fn replace<F>(&self, update: F) -> Deductions
    where
        F: FnOnce(&mut Deductions),
    {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let mut next = **guard;
        update(&mut next);
        *guard = Arc::new(next);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tax::allowance::AllowanceKind;
    use std::thread;

    #[test]
    fn defaults() {
        let settings = TaxSettings::default();
        let details = settings.details();
        assert_eq!(details.personal_deduction, dec!(60000));
        assert_eq!(details.k_receipt_cap, dec!(50000));
    }

    #[test]
    fn personal_deduction_within_bounds_is_committed() {
        let settings = TaxSettings::default();
        let updated = settings.set_personal_deduction(dec!(70000)).unwrap();
        assert_eq!(updated.personal_deduction, dec!(70000));
        assert_eq!(updated.k_receipt_cap, dec!(50000));
        assert_eq!(settings.details(), updated);
    }

    #[test]
    fn bounds_are_inclusive() {
        let settings = TaxSettings::default();
        assert!(settings.set_personal_deduction(dec!(10000)).is_ok());
        assert!(settings.set_personal_deduction(dec!(100000)).is_ok());
        assert!(settings.set_k_receipt_cap(dec!(10000)).is_ok());
        assert!(settings.set_k_receipt_cap(dec!(100000)).is_ok());
    }

    #[test]
    fn personal_deduction_above_upper_bound_rejected() {
        let settings = TaxSettings::default();
        let err = settings.set_personal_deduction(dec!(105000)).unwrap_err();
        assert_eq!(
            err,
            TaxError::InvalidDeductionAmount {
                amount: dec!(105000),
                min: dec!(10000),
                max: dec!(100000),
            }
        );
        assert_eq!(settings.details(), Deductions::default());
    }

    #[test]
    fn personal_deduction_below_lower_bound_rejected() {
        let settings = TaxSettings::default();
        assert!(settings.set_personal_deduction(dec!(5000)).is_err());
        assert_eq!(settings.details().personal_deduction, dec!(60000));
    }

    #[test]
    fn k_receipt_cap_rejections_leave_config_untouched() {
        let settings = TaxSettings::default();
        assert!(settings.set_k_receipt_cap(dec!(-1000)).is_err());
        assert!(settings.set_k_receipt_cap(dec!(105000)).is_err());
        assert_eq!(settings.details().k_receipt_cap, dec!(50000));

        let updated = settings.set_k_receipt_cap(dec!(70000)).unwrap();
        assert_eq!(updated.k_receipt_cap, dec!(70000));
    }

    #[test]
    fn custom_bounds() {
        let settings = TaxSettings::new(
            Deductions::default(),
            AdminBounds {
                min: dec!(0),
                max: dec!(200000),
            },
        );
        assert!(settings.set_k_receipt_cap(dec!(150000)).is_ok());
        assert!(settings.set_k_receipt_cap(dec!(250000)).is_err());
    }

    #[test]
    fn old_snapshot_survives_update() {
        let settings = TaxSettings::default();
        let before = settings.snapshot();
        settings.set_personal_deduction(dec!(80000)).unwrap();
        assert_eq!(before.personal_deduction, dec!(60000));
        assert_eq!(settings.snapshot().personal_deduction, dec!(80000));
    }

    #[test]
    fn personal_deduction_update_visible_to_next_calculation() {
        let settings = TaxSettings::default();
        let allowances = [Allowance::new(AllowanceKind::Donation, dec!(0))];

        let before = settings
            .calculate(dec!(500000), dec!(0), &allowances)
            .unwrap();
        assert_eq!(before.deductions.personal, dec!(60000));
        assert_eq!(before.tax_due, dec!(29000));

        settings.set_personal_deduction(dec!(80000)).unwrap();
        let after = settings
            .calculate(dec!(500000), dec!(0), &allowances)
            .unwrap();
        assert_eq!(after.deductions.personal, dec!(80000));
        assert_eq!(after.tax_due, dec!(27000));
    }

    #[test]
    fn k_receipt_cap_update_visible_to_next_calculation() {
        let settings = TaxSettings::default();
        let allowances = [Allowance::new(AllowanceKind::KReceipt, dec!(70000))];

        let before = settings
            .calculate(dec!(500000), dec!(0), &allowances)
            .unwrap();
        assert_eq!(before.deductions.k_receipt, dec!(50000));
        assert_eq!(before.tax_due, dec!(24000));

        settings.set_k_receipt_cap(dec!(70000)).unwrap();
        let after = settings
            .calculate(dec!(500000), dec!(0), &allowances)
            .unwrap();
        assert_eq!(after.deductions.k_receipt, dec!(70000));
        assert_eq!(after.tax_due, dec!(22000));
        assert_eq!(before.tax_due - after.tax_due, dec!(2000));
    }

    #[test]
    fn concurrent_readers_see_committed_snapshots() {
        let settings = Arc::new(TaxSettings::default());
        let readers: Vec<_> = (0..4)
            .map(|_| {
                let settings = Arc::clone(&settings);
                thread::spawn(move || {
                    for _ in 0..200 {
                        let snapshot = settings.snapshot();
                        let pair = (snapshot.personal_deduction, snapshot.k_receipt_cap);
                        let committed = [
                            (dec!(60000), dec!(50000)),
                            (dec!(90000), dec!(50000)),
                            (dec!(90000), dec!(20000)),
                        ];
                        assert!(committed.contains(&pair), "unexpected snapshot {:?}", pair);
                    }
                })
            })
            .collect();

        settings.set_personal_deduction(dec!(90000)).unwrap();
        settings.set_k_receipt_cap(dec!(20000)).unwrap();

        for reader in readers {
            reader.join().unwrap();
        }
        assert_eq!(
            settings.details(),
            Deductions {
                personal_deduction: dec!(90000),
                k_receipt_cap: dec!(20000),
            }
        );
    }
}
