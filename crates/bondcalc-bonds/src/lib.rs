//! # bondcalc Bonds
//!
//! Textbook analytics for a vanilla fixed-coupon bond.
//!
//! This crate provides:
//!
//! - **Terms**: Validated, immutable bond terms ([`BondTerms`])
//! - **Cash Flows**: The periodic coupon and redemption schedule
//! - **Pricing**: Present value at a flat annual yield
//! - **Risk**: Macaulay duration, modified duration, convexity
//! - **Yield**: Yield-to-maturity from a market price via bracketing root finding
//!
//! The model assumes a flat yield, a fixed coupon, a whole number of
//! compounding periods and redemption at par. Day counts, accrued interest,
//! calendars and embedded options are out of scope.
//!
//! ## Example
//!
//! ```rust
//! use bondcalc_bonds::prelude::*;
//!
//! let terms = BondTerms::builder()
//!     .face_value(1000.0)
//!     .coupon_rate(0.06)
//!     .years_to_maturity(5.0)
//!     .periods_per_year(2)
//!     .build()
//!     .unwrap();
//! let bond = BondModel::new(terms);
//!
//! let analytics = bond.analytics(0.03).unwrap();
//! assert!((analytics.price - 1138.33).abs() < 0.01);
//! assert!(analytics.modified_duration < analytics.macaulay_duration);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::float_cmp)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::return_self_not_must_use)]

pub mod analytics;
pub mod cashflows;
pub mod error;
pub mod model;
pub mod terms;
pub mod ytm;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::analytics::BondAnalytics;
    pub use crate::cashflows::CashFlow;
    pub use crate::error::{BondError, BondResult};
    pub use crate::model::BondModel;
    pub use crate::terms::{BondTerms, BondTermsBuilder, PeriodPolicy};
    pub use crate::ytm::{YtmMethod, YtmResult, YtmSolver};
}

pub use analytics::BondAnalytics;
pub use error::{BondError, BondResult};
pub use model::BondModel;
pub use terms::{BondTerms, BondTermsBuilder, PeriodPolicy};
pub use ytm::{YtmMethod, YtmResult, YtmSolver};
