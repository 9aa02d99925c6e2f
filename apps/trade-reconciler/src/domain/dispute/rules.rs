//! Invoice mutation rules, one per dispute type.
//!
//! Each rule maps a fee breakdown to a new one. The invoiced fees are the
//! fold of the classified rules over the expected fees, in classification
//! order, so two rules touching the same column compound.
//! Multiplicative adjustments skip zero columns; additive ones never do.

use rust_decimal_macros::dec;

use super::{DisputeClassification, DisputeType, classify};
use crate::domain::fees::{FeeBreakdown, FeeField};
use crate::domain::trade::{InstrumentClass, TradeRecord};

impl DisputeType {
    /// Apply this dispute's perturbation to `fees`.
    #[must_use]
    pub fn apply(&self, fees: FeeBreakdown, class: InstrumentClass) -> FeeBreakdown {
        use FeeField::{BrokerageFee, Commission, CustodyFee, SettlementCost, Taxes};

        match self {
            Self::Overcharging => fees
                .scale_if_set(Commission, dec!(1.35))
                .scale_if_set(Taxes, dec!(1.25))
                .scale_if_set(CustodyFee, dec!(1.45))
                .scale_if_set(SettlementCost, dec!(1.30))
                .scale_if_set(BrokerageFee, dec!(1.40)),
            Self::DuplicateCharges => {
                if fees.commission.is_zero() {
                    fees.scale_if_set(BrokerageFee, dec!(2))
                } else {
                    fees.scale_if_set(Commission, dec!(2))
                }
            }
            Self::MissingTrades => match class {
                InstrumentClass::Equity => fees.add_to(Commission, dec!(450)),
                InstrumentClass::Fx => fees.add_to(BrokerageFee, dec!(350)),
            },
            Self::WrongCounterpartyOrAccount => {
                if fees.commission.is_zero() {
                    fees
                } else {
                    fees.add_to(Commission, dec!(25))
                }
            }
            Self::IncorrectTaxApplication => match class {
                InstrumentClass::Equity => fees.add_to(Taxes, dec!(500)),
                InstrumentClass::Fx => fees.with(Taxes, dec!(275)),
            },
            Self::ServiceNotRendered => match class {
                InstrumentClass::Equity => fees.add_to(Commission, dec!(300)),
                InstrumentClass::Fx => fees.add_to(CustodyFee, dec!(750)),
            },
            Self::FailChargesDisputed => match class {
                InstrumentClass::Equity => fees.add_to(Commission, dec!(200)),
                InstrumentClass::Fx => fees.add_to(SettlementCost, dec!(150)),
            },
            Self::CurrencyConversionError => FeeField::ALL
                .into_iter()
                .fold(fees, |acc, field| acc.scale_if_set(field, dec!(1.20))),
            Self::WrongRateCardApplied => fees
                .scale_if_set(Commission, dec!(1.75))
                .scale_if_set(BrokerageFee, dec!(1.65))
                .scale_if_set(CustodyFee, dec!(1.55)),
            Self::IncorrectBillingPeriod => {
                let shifted = fees
                    .scale_if_set(Commission, dec!(1.30))
                    .scale_if_set(SettlementCost, dec!(1.40));
                match class {
                    InstrumentClass::Equity => shifted.add_to(Commission, dec!(125)),
                    InstrumentClass::Fx => shifted.add_to(BrokerageFee, dec!(85)),
                }
            }
        }
    }
}

/// Rule for labels that name no known dispute type.
#[must_use]
pub fn apply_fallback_rule(fees: FeeBreakdown) -> FeeBreakdown {
    fees.scale_if_set(FeeField::Commission, dec!(1.25))
}

/// Fold `types` over `expected`, in order.
#[must_use]
pub fn apply_dispute_types(
    class: InstrumentClass,
    expected: FeeBreakdown,
    types: &[DisputeType],
) -> FeeBreakdown {
    types
        .iter()
        .fold(expected, |fees, dispute| dispute.apply(fees, class))
}

/// Fold free-text dispute labels over `expected`.
///
/// Used for labels read back from stored results; unrecognized labels take
/// the fallback rule.
#[must_use]
pub fn apply_dispute_labels<S: AsRef<str>>(
    class: InstrumentClass,
    expected: FeeBreakdown,
    labels: &[S],
) -> FeeBreakdown {
    labels.iter().fold(expected, |fees, label| {
        label
            .as_ref()
            .parse::<DisputeType>()
            .map_or_else(|_| apply_fallback_rule(fees), |d| d.apply(fees, class))
    })
}

/// Invoiced fees for `trade` given an existing classification.
#[must_use]
pub fn apply_classified_mutations(
    trade: &TradeRecord,
    expected: FeeBreakdown,
    classification: &DisputeClassification,
) -> FeeBreakdown {
    if !classification.is_disputed() {
        return expected;
    }
    apply_dispute_types(
        trade.instrument_class(),
        expected,
        &classification.dispute_types,
    )
}

/// Invoiced fees for `trade`: the expected fees with its seeded disputes applied.
#[must_use]
pub fn apply_dispute_mutations(trade: &TradeRecord, expected: FeeBreakdown) -> FeeBreakdown {
    let classification = classify(trade.trade_id().as_str());
    apply_classified_mutations(trade, expected, &classification)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::shared::TradeId;
    use crate::domain::trade::{EquityTrade, FxTrade};
    use rust_decimal::Decimal;
    use test_case::test_case;

    fn equity_fees() -> FeeBreakdown {
        FeeBreakdown {
            commission: dec!(100),
            taxes: dec!(40),
            ..Default::default()
        }
    }

    fn fx_fees() -> FeeBreakdown {
        FeeBreakdown {
            commission: dec!(1000),
            custody_fee: dec!(200),
            settlement_cost: dec!(100),
            brokerage_fee: dec!(50),
            ..Default::default()
        }
    }

    fn fees(
        commission: Decimal,
        taxes: Decimal,
        custody: Decimal,
        settle: Decimal,
        brokerage: Decimal,
    ) -> FeeBreakdown {
        FeeBreakdown {
            commission,
            taxes,
            custody_fee: custody,
            settlement_cost: settle,
            brokerage_fee: brokerage,
        }
    }

    #[test_case(DisputeType::Overcharging, fees(dec!(135), dec!(50), dec!(0), dec!(0), dec!(0)) ; "overcharging")]
    #[test_case(DisputeType::DuplicateCharges, fees(dec!(200), dec!(40), dec!(0), dec!(0), dec!(0)) ; "duplicate")]
    #[test_case(DisputeType::MissingTrades, fees(dec!(550), dec!(40), dec!(0), dec!(0), dec!(0)) ; "missing trades")]
    #[test_case(DisputeType::WrongCounterpartyOrAccount, fees(dec!(125), dec!(40), dec!(0), dec!(0), dec!(0)) ; "wrong counterparty")]
    #[test_case(DisputeType::IncorrectTaxApplication, fees(dec!(100), dec!(540), dec!(0), dec!(0), dec!(0)) ; "incorrect tax")]
    #[test_case(DisputeType::ServiceNotRendered, fees(dec!(400), dec!(40), dec!(0), dec!(0), dec!(0)) ; "service not rendered")]
    #[test_case(DisputeType::FailChargesDisputed, fees(dec!(300), dec!(40), dec!(0), dec!(0), dec!(0)) ; "fail charges")]
    #[test_case(DisputeType::CurrencyConversionError, fees(dec!(120), dec!(48), dec!(0), dec!(0), dec!(0)) ; "currency conversion")]
    #[test_case(DisputeType::WrongRateCardApplied, fees(dec!(175), dec!(40), dec!(0), dec!(0), dec!(0)) ; "wrong rate card")]
    #[test_case(DisputeType::IncorrectBillingPeriod, fees(dec!(255), dec!(40), dec!(0), dec!(0), dec!(0)) ; "billing period")]
    fn equity_rule(dispute: DisputeType, expected: FeeBreakdown) {
        assert_eq!(dispute.apply(equity_fees(), InstrumentClass::Equity), expected);
    }

    #[test_case(DisputeType::Overcharging, fees(dec!(1350), dec!(0), dec!(290), dec!(130), dec!(70)) ; "overcharging")]
    #[test_case(DisputeType::DuplicateCharges, fees(dec!(2000), dec!(0), dec!(200), dec!(100), dec!(50)) ; "duplicate")]
    #[test_case(DisputeType::MissingTrades, fees(dec!(1000), dec!(0), dec!(200), dec!(100), dec!(400)) ; "missing trades")]
    #[test_case(DisputeType::WrongCounterpartyOrAccount, fees(dec!(1025), dec!(0), dec!(200), dec!(100), dec!(50)) ; "wrong counterparty")]
    #[test_case(DisputeType::IncorrectTaxApplication, fees(dec!(1000), dec!(275), dec!(200), dec!(100), dec!(50)) ; "incorrect tax")]
    #[test_case(DisputeType::ServiceNotRendered, fees(dec!(1000), dec!(0), dec!(950), dec!(100), dec!(50)) ; "service not rendered")]
    #[test_case(DisputeType::FailChargesDisputed, fees(dec!(1000), dec!(0), dec!(200), dec!(250), dec!(50)) ; "fail charges")]
    #[test_case(DisputeType::CurrencyConversionError, fees(dec!(1200), dec!(0), dec!(240), dec!(120), dec!(60)) ; "currency conversion")]
    #[test_case(DisputeType::WrongRateCardApplied, fees(dec!(1750), dec!(0), dec!(310), dec!(100), dec!(82.5)) ; "wrong rate card")]
    #[test_case(DisputeType::IncorrectBillingPeriod, fees(dec!(1300), dec!(0), dec!(200), dec!(140), dec!(135)) ; "billing period")]
    fn fx_rule(dispute: DisputeType, expected: FeeBreakdown) {
        assert_eq!(dispute.apply(fx_fees(), InstrumentClass::Fx), expected);
    }

    #[test]
    fn duplicate_charges_doubles_brokerage_without_commission() {
        let input = fees(dec!(0), dec!(0), dec!(0), dec!(0), dec!(60));
        let out = DisputeType::DuplicateCharges.apply(input, InstrumentClass::Fx);
        assert_eq!(out.brokerage_fee, dec!(120));
        assert_eq!(out.commission, Decimal::ZERO);
    }

    #[test]
    fn wrong_counterparty_leaves_zero_commission() {
        let input = FeeBreakdown::default();
        let out = DisputeType::WrongCounterpartyOrAccount.apply(input, InstrumentClass::Equity);
        assert_eq!(out, input);
    }

    #[test]
    fn incorrect_tax_overwrites_fx_taxes() {
        let input = fees(dec!(0), dec!(90), dec!(0), dec!(0), dec!(0));
        let out = DisputeType::IncorrectTaxApplication.apply(input, InstrumentClass::Fx);
        assert_eq!(out.taxes, dec!(275));
    }

    #[test]
    fn multiplicative_rules_keep_zero_columns_zero() {
        let zero = FeeBreakdown::default();
        for dispute in [
            DisputeType::Overcharging,
            DisputeType::CurrencyConversionError,
            DisputeType::WrongRateCardApplied,
        ] {
            assert_eq!(dispute.apply(zero, InstrumentClass::Fx), zero);
        }
    }

    #[test]
    fn rules_compound_sequentially() {
        let expected = fees(dec!(100), dec!(0), dec!(0), dec!(0), dec!(0));
        let out = apply_dispute_types(
            InstrumentClass::Equity,
            expected,
            &[DisputeType::Overcharging, DisputeType::WrongRateCardApplied],
        );
        // 100 * 1.35 = 135, then * 1.75 = 236.25
        assert_eq!(out.commission, dec!(236.25));
    }

    #[test]
    fn rule_order_matters_for_mixed_rules() {
        let expected = fees(dec!(100), dec!(0), dec!(0), dec!(0), dec!(0));
        let add_then_scale = apply_dispute_types(
            InstrumentClass::Equity,
            expected,
            &[DisputeType::FailChargesDisputed, DisputeType::Overcharging],
        );
        let scale_then_add = apply_dispute_types(
            InstrumentClass::Equity,
            expected,
            &[DisputeType::Overcharging, DisputeType::FailChargesDisputed],
        );
        assert_eq!(add_then_scale.commission, dec!(405));
        assert_eq!(scale_then_add.commission, dec!(335));
    }

    #[test]
    fn unknown_labels_use_fallback_rule() {
        let expected = fees(dec!(100), dec!(10), dec!(0), dec!(0), dec!(0));
        let out = apply_dispute_labels(
            InstrumentClass::Equity,
            expected,
            &["Late Delivery", "Overcharging"],
        );
        // 100 * 1.25 = 125, then * 1.35 = 168.75
        assert_eq!(out.commission, dec!(168.75));
        assert_eq!(out.taxes, dec!(12.5));
        assert_eq!(apply_fallback_rule(FeeBreakdown::default()), FeeBreakdown::default());
    }

    #[test]
    fn undisputed_trade_is_returned_unchanged() {
        let trade = TradeRecord::Fx(FxTrade {
            trade_id: TradeId::new("TRD001"),
            ..Default::default()
        });
        assert_eq!(apply_dispute_mutations(&trade, fx_fees()), fx_fees());
    }

    #[test]
    fn disputed_trade_is_mutated_by_its_classification() {
        // TRD107 classifies as Overcharging only
        let trade = TradeRecord::Equity(EquityTrade {
            trade_id: TradeId::new("TRD107"),
            ..Default::default()
        });
        let out = apply_dispute_mutations(&trade, equity_fees());
        assert_eq!(out.commission, dec!(135));
        assert_eq!(out.taxes, dec!(50));
    }
}
