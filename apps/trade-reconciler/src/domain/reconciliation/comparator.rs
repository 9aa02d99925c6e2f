//! Field-by-field comparison of expected and invoiced values.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{debug, warn};

use super::{ActualValues, ExpectedValues, Invoice, ReconciliationResult, ReconciliationStatus};
use crate::domain::dispute::{
    DisputeClassification, DisputeType, apply_classified_mutations, classify, invoice_counterparty,
};
use crate::domain::fees::{FeeField, derive_expected_costs};
use crate::domain::shared::Money;
use crate::domain::trade::TradeRecord;

/// Absolute tolerance for every numeric check.
pub const DEFAULT_TOLERANCE: Decimal = dec!(0.01);

/// Number of checks that feed status derivation.
pub const TOTAL_CHECKS: u8 = 8;

/// Discrepancy reported when an invoice references an unknown trade.
pub const NOT_FOUND_DISCREPANCY: &str = "Trade ID not found in uploaded dataset";

/// Compares trades against invoices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconciliationComparator {
    tolerance: Decimal,
}

impl Default for ReconciliationComparator {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

/// Running tally of checks for one trade.
struct CheckTally<'a> {
    classification: &'a DisputeClassification,
    discrepancies: Vec<String>,
    passed: u8,
}

impl<'a> CheckTally<'a> {
    const fn new(classification: &'a DisputeClassification) -> Self {
        Self {
            classification,
            discrepancies: Vec::new(),
            passed: 0,
        }
    }

    fn record(&mut self, ok: bool, message: impl FnOnce() -> String) -> bool {
        if ok {
            self.passed += 1;
        } else {
            self.discrepancies.push(message());
        }
        ok
    }

    fn numeric(
        &mut self,
        label: &str,
        expected: Decimal,
        actual: Decimal,
        tolerance: Decimal,
        dispute_trigger: Option<DisputeType>,
    ) -> bool {
        let ok = Money::new(expected).within(Money::new(actual), tolerance);
        if ok {
            self.passed += 1;
            return true;
        }

        self.discrepancies.push(format!(
            "{label} mismatch: Expected {}, Got {}",
            Money::new(expected),
            Money::new(actual)
        ));

        let flagged = match dispute_trigger {
            Some(required) => self.classification.has_dispute && self.classification.contains(required),
            None => self.classification.is_disputed(),
        };
        if flagged {
            self.discrepancies.push(format!(
                "Dispute detected: {} - {label} affected",
                self.classification.joined_labels()
            ));
        }
        false
    }
}

impl ReconciliationComparator {
    /// Create a comparator with a custom absolute tolerance.
    #[must_use]
    pub const fn new(tolerance: Decimal) -> Self {
        Self { tolerance }
    }

    /// Tolerance applied to numeric checks.
    #[must_use]
    pub const fn tolerance(&self) -> Decimal {
        self.tolerance
    }

    /// Reconcile `invoice` against the trade with the same id in `trades`.
    ///
    /// An invoice whose trade is absent yields a mismatch carrying
    /// [`NOT_FOUND_DISCREPANCY`], never an error.
    #[must_use]
    pub fn reconcile(&self, trades: &[TradeRecord], invoice: &Invoice) -> ReconciliationResult {
        match trades.iter().find(|t| t.trade_id() == &invoice.trade_id) {
            Some(trade) => self.reconcile_trade(trade, invoice),
            None => {
                warn!(trade_id = %invoice.trade_id, "Invoice references unknown trade");
                Self::not_found(invoice)
            }
        }
    }

    /// Reconcile `invoice` against a known trade.
    #[must_use]
    pub fn reconcile_trade(&self, trade: &TradeRecord, invoice: &Invoice) -> ReconciliationResult {
        let classification = classify(trade.trade_id().as_str());
        let expected = derive_expected_costs(trade);
        let actual = apply_classified_mutations(trade, expected, &classification);
        let actual_counterparty = invoice_counterparty(
            trade,
            classification.has_dispute,
            &classification.dispute_types,
        );

        let expected_total = expected.total();
        let actual_total = actual.total();
        let tolerance = self.tolerance;
        let mut tally = CheckTally::new(&classification);

        let trade_id_match = tally.record(trade.trade_id() == &invoice.trade_id, || {
            format!(
                "Trade ID mismatch: Expected {}, Got {}",
                trade.trade_id(),
                invoice.trade_id
            )
        });

        let expected_counterparty = trade.counterparty();
        let counterparty_match = tally.record(
            expected_counterparty.to_lowercase() == actual_counterparty.to_lowercase(),
            || {
                format!(
                    "Counterparty mismatch: Expected {expected_counterparty}, Got {actual_counterparty}"
                )
            },
        );

        let mut field_match = |field: FeeField, trigger: Option<DisputeType>| {
            tally.numeric(
                field.label(),
                expected.get(field),
                actual.get(field),
                tolerance,
                trigger,
            )
        };
        let commission_match = field_match(FeeField::Commission, None);
        let tax_match = field_match(FeeField::Taxes, Some(DisputeType::IncorrectTaxApplication));
        let custody_fee_match = field_match(FeeField::CustodyFee, None);
        let settlement_cost_match = field_match(FeeField::SettlementCost, None);
        let brokerage_fee_match = field_match(FeeField::BrokerageFee, None);

        let amount_match =
            tally.numeric("Total amount", expected_total, actual_total, tolerance, None);

        let overall_status = if classification.has_dispute {
            ReconciliationStatus::Mismatch
        } else if tally.passed == TOTAL_CHECKS {
            ReconciliationStatus::Reconciled
        } else if counterparty_match && amount_match && commission_match {
            ReconciliationStatus::Matched
        } else {
            ReconciliationStatus::Mismatch
        };

        debug!(
            trade_id = %trade.trade_id(),
            status = %overall_status,
            matched = tally.passed,
            has_dispute = classification.has_dispute,
            "Trade reconciled"
        );

        ReconciliationResult {
            trade_id: trade.trade_id().to_string(),
            trade_id_match,
            counterparty_match,
            amount_match,
            commission_match,
            tax_match,
            custody_fee_match,
            settlement_cost_match,
            brokerage_fee_match,
            date_match: true,
            match_count: tally.passed,
            overall_status,
            discrepancies: tally.discrepancies,
            has_dispute: classification.has_dispute,
            dispute_types: classification.dispute_types.clone(),
            expected_values: ExpectedValues {
                fees: expected,
                counterparty: expected_counterparty.to_string(),
                total_expected: expected_total,
            },
            actual_values: ActualValues {
                fees: actual,
                counterparty: actual_counterparty,
                total_actual: actual_total,
            },
        }
    }

    fn not_found(invoice: &Invoice) -> ReconciliationResult {
        ReconciliationResult {
            trade_id: invoice.trade_id.to_string(),
            trade_id_match: false,
            counterparty_match: false,
            amount_match: false,
            commission_match: false,
            tax_match: false,
            custody_fee_match: false,
            settlement_cost_match: false,
            brokerage_fee_match: false,
            date_match: true,
            match_count: 0,
            overall_status: ReconciliationStatus::Mismatch,
            discrepancies: vec![NOT_FOUND_DISCREPANCY.to_string()],
            has_dispute: false,
            dispute_types: Vec::new(),
            expected_values: ExpectedValues::default(),
            actual_values: ActualValues::default(),
        }
    }
}

/// Reconcile with the default tolerance. See [`ReconciliationComparator::reconcile`].
#[must_use]
pub fn reconcile(trades: &[TradeRecord], invoice: &Invoice) -> ReconciliationResult {
    ReconciliationComparator::default().reconcile(trades, invoice)
}

/// Reconcile with the default tolerance. See [`ReconciliationComparator::reconcile_trade`].
#[must_use]
pub fn reconcile_trade(trade: &TradeRecord, invoice: &Invoice) -> ReconciliationResult {
    ReconciliationComparator::default().reconcile_trade(trade, invoice)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::shared::TradeId;
    use crate::domain::trade::{EquityTrade, FxTrade};

    fn fx(id: &str) -> TradeRecord {
        TradeRecord::Fx(FxTrade {
            trade_id: TradeId::new(id),
            counterparty: "Acme".to_string(),
            commission_amount: dec!(1000),
            custody_fee: dec!(200),
            settlement_cost: dec!(100),
            brokerage_fee: dec!(50),
            ..Default::default()
        })
    }

    fn equity(id: &str) -> TradeRecord {
        TradeRecord::Equity(EquityTrade {
            trade_id: TradeId::new(id),
            counterparty: "Northwind Securities".to_string(),
            commission: dec!(100),
            taxes: dec!(40),
            ..Default::default()
        })
    }

    #[test]
    fn clean_trade_reconciles() {
        let trade = fx("TRD001");
        let result = reconcile_trade(&trade, &Invoice::for_trade(&trade));

        assert_eq!(result.overall_status, ReconciliationStatus::Reconciled);
        assert!(result.discrepancies.is_empty());
        assert_eq!(result.match_count, TOTAL_CHECKS);
        assert!(result.date_match);
        assert!(!result.has_dispute);
        assert_eq!(result.actual_values.total_actual, dec!(1350));
        assert_eq!(result.expected_values.total_expected, dec!(1350));
        assert_eq!(result.variance(), Decimal::ZERO);
    }

    #[test]
    fn missing_trade_yields_not_found_result() {
        let trades = vec![fx("TRD001")];
        let result = reconcile(&trades, &Invoice::new("TRD999"));

        assert_eq!(result.overall_status, ReconciliationStatus::Mismatch);
        assert_eq!(result.discrepancies, vec![NOT_FOUND_DISCREPANCY.to_string()]);
        assert!(!result.trade_id_match);
        assert!(!result.counterparty_match);
        assert!(!result.amount_match);
        assert!(result.date_match);
        assert!(!result.has_dispute);
        assert!(result.is_not_found());
    }

    #[test]
    fn lookup_finds_trade_by_id() {
        let trades = vec![fx("TRD001"), equity("EQ-42")];
        let result = reconcile(&trades, &Invoice::new("EQ-42"));
        assert_eq!(result.trade_id, "EQ-42");
        assert!(result.trade_id_match);
        assert!(!result.is_not_found());
    }

    #[test]
    fn overcharging_on_equity_reports_generic_and_dispute_messages() {
        // TRD107 classifies as Overcharging only
        let trade = equity("TRD107");
        let result = reconcile_trade(&trade, &Invoice::for_trade(&trade));

        assert_eq!(result.overall_status, ReconciliationStatus::Mismatch);
        assert!(result.has_dispute);
        assert_eq!(result.dispute_types, vec![DisputeType::Overcharging]);
        assert_eq!(
            result.discrepancies,
            vec![
                "Commission mismatch: Expected $100.00, Got $135.00".to_string(),
                "Dispute detected: Overcharging - Commission affected".to_string(),
                "Tax mismatch: Expected $40.00, Got $50.00".to_string(),
                "Total amount mismatch: Expected $140.00, Got $185.00".to_string(),
                "Dispute detected: Overcharging - Total amount affected".to_string(),
            ]
        );
        assert!(result.counterparty_match);
        assert!(!result.tax_match);
        assert!(result.custody_fee_match);
        assert_eq!(result.match_count, 5);
    }

    #[test]
    fn tax_dispute_message_requires_tax_dispute_type() {
        // FX7 classifies as Overcharging, Incorrect Tax Application
        let trade = fx("FX7");
        let result = reconcile_trade(&trade, &Invoice::for_trade(&trade));

        assert!(result.discrepancies.contains(
            &"Tax mismatch: Expected $0.00, Got $275.00".to_string()
        ));
        assert!(result.discrepancies.contains(
            &"Dispute detected: Overcharging, Incorrect Tax Application - Tax affected".to_string()
        ));
    }

    #[test]
    fn wrong_counterparty_dispute_breaks_counterparty_match() {
        // TRD1199 classifies as Wrong Counterparty or Account; hash mod 4 = 2
        let trade = fx("TRD1199");
        let result = reconcile_trade(&trade, &Invoice::for_trade(&trade));

        assert!(!result.counterparty_match);
        assert_eq!(result.actual_values.counterparty, "MISMATCHED CORP");
        assert_eq!(result.expected_values.counterparty, "Acme");
        assert_eq!(
            result.discrepancies[0],
            "Counterparty mismatch: Expected Acme, Got MISMATCHED CORP"
        );
        // commission 1000 + 25
        assert_eq!(result.actual_values.fees.commission, dec!(1025));
    }

    #[test]
    fn dispute_forces_mismatch_within_tolerance() {
        // FX0 classifies as Duplicate Charges: commission doubles 0.004 -> 0.008
        let trade = TradeRecord::Fx(FxTrade {
            trade_id: TradeId::new("FX0"),
            counterparty: "Acme".to_string(),
            commission_amount: dec!(0.004),
            ..Default::default()
        });
        let result = reconcile_trade(&trade, &Invoice::for_trade(&trade));

        assert!(result.has_dispute);
        assert_eq!(result.match_count, TOTAL_CHECKS);
        assert!(result.discrepancies.is_empty());
        assert_eq!(result.overall_status, ReconciliationStatus::Mismatch);
    }

    #[test]
    fn tolerance_boundary_is_inclusive() {
        let comparator = ReconciliationComparator::default();
        let classification = DisputeClassification::none();

        let mut tally = CheckTally::new(&classification);
        assert!(tally.numeric("Commission", dec!(100), dec!(100.01), comparator.tolerance(), None));
        assert!(!tally.numeric("Commission", dec!(100), dec!(100.011), comparator.tolerance(), None));
        assert_eq!(tally.passed, 1);
        assert_eq!(
            tally.discrepancies,
            vec!["Commission mismatch: Expected $100.00, Got $100.01".to_string()]
        );
    }

    #[test]
    fn partial_agreement_yields_matched() {
        // Invoice id differs from trade id; counterparty, amount, commission agree
        let trade = fx("TRD001");
        let result = reconcile_trade(&trade, &Invoice::new("TRD-OTHER"));

        assert!(!result.trade_id_match);
        assert_eq!(result.match_count, TOTAL_CHECKS - 1);
        assert_eq!(result.overall_status, ReconciliationStatus::Matched);
        assert_eq!(
            result.discrepancies,
            vec!["Trade ID mismatch: Expected TRD001, Got TRD-OTHER".to_string()]
        );
    }

    #[test]
    fn counterparty_comparison_ignores_case() {
        let comparator = ReconciliationComparator::new(dec!(0.5));
        let trade = TradeRecord::Equity(EquityTrade {
            trade_id: TradeId::new("TRD001"),
            counterparty: "acme".to_string(),
            ..Default::default()
        });
        let result = comparator.reconcile_trade(&trade, &Invoice::new("TRD001"));
        assert!(result.counterparty_match);
        assert_eq!(comparator.tolerance(), dec!(0.5));
    }

    #[test]
    fn near_limit_fees_saturate_on_disputed_trade() {
        // TRD107 is Overcharging: commission x1.35 would exceed the Decimal range.
        let trade = TradeRecord::Fx(FxTrade {
            trade_id: TradeId::new("TRD107"),
            counterparty: "Acme".to_string(),
            commission_amount: dec!(70000000000000000000000000000),
            ..Default::default()
        });

        let result = reconcile_trade(&trade, &Invoice::for_trade(&trade));

        assert_eq!(result.actual_values.fees.commission, Decimal::MAX);
        assert_eq!(result.actual_values.total_actual, Decimal::MAX);
        assert!(!result.commission_match);
        assert_eq!(result.overall_status, ReconciliationStatus::Mismatch);
        assert!(result.variance() > Decimal::ZERO);
    }
}
