//! Butcher coefficients of low-storage Runge-Kutta schemes.
//!
//! A low-storage (2N) scheme with s stages advances u from t to t + dt as
//!
//! ```text
//! k = 0
//! for j in 0..s:
//!     k = a_j k + dt L(u, t + c_j dt)
//!     u = u + b_j k
//! ```
//!
//! so only the solution and one residual register are kept.

use crate::error::{DgError, Result};

/// Coefficients (a, b, c) of a low-storage Runge-Kutta scheme.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ButcherCoefficients {
    /// Order of accuracy
    pub order: usize,
    /// Residual weights a_j (a_0 = 0)
    pub a: &'static [f64],
    /// Solution update weights b_j
    pub b: &'static [f64],
    /// Stage time fractions c_j
    pub c: &'static [f64],
}

impl ButcherCoefficients {
    /// Number of stages.
    pub fn num_stages(&self) -> usize {
        self.a.len()
    }
}

/// Five-stage fourth-order scheme of Carpenter & Kennedy (1994), solution 3.
pub const CARPENTER_KENNEDY_4_5: ButcherCoefficients = ButcherCoefficients {
    order: 4,
    a: &[
        0.0,
        -567_301_805_773.0 / 1_357_537_059_087.0,
        -2_404_267_990_393.0 / 2_016_746_695_238.0,
        -3_550_918_686_646.0 / 2_091_501_179_385.0,
        -1_275_806_237_668.0 / 842_570_457_699.0,
    ],
    b: &[
        1_432_997_174_477.0 / 9_575_080_441_755.0,
        5_161_836_677_717.0 / 13_612_068_292_357.0,
        1_720_146_321_549.0 / 2_090_206_949_498.0,
        3_134_564_353_537.0 / 4_481_467_310_338.0,
        2_277_821_191_437.0 / 14_882_151_754_819.0,
    ],
    c: &[
        0.0,
        1_432_997_174_477.0 / 9_575_080_441_755.0,
        2_526_269_341_429.0 / 6_820_363_962_896.0,
        2_006_345_519_317.0 / 3_224_310_063_776.0,
        2_802_321_613_138.0 / 2_924_317_926_251.0,
    ],
};

/// All available low-storage schemes.
const TABLES: [ButcherCoefficients; 1] = [CARPENTER_KENNEDY_4_5];

/// Look up the coefficients of the scheme with the given order and stage count.
///
/// # Errors
/// `NotImplemented` when no such scheme is tabulated.
pub fn get_butcher_coeffs(order: usize, stages: usize) -> Result<ButcherCoefficients> {
    TABLES
        .iter()
        .find(|t| t.order == order && t.num_stages() == stages)
        .copied()
        .ok_or_else(|| {
            DgError::not_implemented(format!(
                "Low-storage Runge-Kutta scheme of order {} and stage {} currently not implemented.",
                order, stages
            ))
        })
}
