//! Cash-flow schedule of a vanilla bond.

use serde::Serialize;

use crate::terms::BondTerms;

/// One scheduled payment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CashFlow {
    /// Period index, starting at 1.
    pub period: u32,
    /// Time of the payment in years (`period / periods_per_year`).
    pub time: f64,
    /// Amount paid: the coupon, plus face value on the final period.
    pub amount: f64,
}

/// Builds the full schedule for the given terms.
///
/// Every period pays the periodic coupon; the last one also redeems the
/// face value.
pub fn schedule(terms: &BondTerms) -> Vec<CashFlow> {
    let n = terms.num_periods();
    let m = f64::from(terms.periods_per_year());
    let coupon = terms.period_coupon();

    (1..=n)
        .map(|period| CashFlow {
            period,
            time: f64::from(period) / m,
            amount: if period == n {
                coupon + terms.face_value()
            } else {
                coupon
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_semiannual_schedule() {
        let terms = BondTerms::builder()
            .face_value(1000.0)
            .coupon_rate(0.05)
            .years_to_maturity(2.0)
            .periods_per_year(2)
            .build()
            .unwrap();

        let flows = schedule(&terms);

        assert_eq!(flows.len(), 4);
        assert_eq!(flows[0].time, 0.5);
        assert_eq!(flows[0].amount, 25.0);
        assert_eq!(flows[3].period, 4);
        assert_eq!(flows[3].time, 2.0);
        assert_eq!(flows[3].amount, 1025.0);
    }

    #[test]
    fn test_zero_coupon_schedule() {
        let terms = BondTerms::builder()
            .face_value(100.0)
            .coupon_rate(0.0)
            .years_to_maturity(3.0)
            .build()
            .unwrap();

        let flows = schedule(&terms);
        let total: f64 = flows.iter().map(|cf| cf.amount).sum();

        assert_eq!(flows.len(), 3);
        assert_eq!(total, 100.0);
    }
}
