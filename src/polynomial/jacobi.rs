//! Orthonormal Jacobi polynomials.
//!
//! The Jacobi polynomials P_n^{α,β}(x) are orthogonal on [-1, 1] with weight
//! (1-x)^α (1+x)^β. They are evaluated here in orthonormal form, i.e.
//!
//! ∫ P_i^{α,β}(x) P_j^{α,β}(x) (1-x)^α (1+x)^β dx = δ_{ij}
//!
//! using the three-term recurrence from Hesthaven & Warburton, "Nodal
//! Discontinuous Galerkin Methods", Appendix A. The Legendre polynomials are the
//! case α = β = 0, so the Vandermonde matrix built from them has V V^T = M^{-1}.

use crate::error::{DgError, Result};

/// Gamma function Γ(x) for x > 0.
///
/// Lanczos approximation (g = 7, 9 coefficients), accurate to about 1e-15 in the
/// relative sense on the range used for polynomial normalization. Integer and
/// half-integer arguments below 20 are evaluated exactly.
pub(crate) fn gamma(x: f64) -> f64 {
    if x > 0.0 && x < 20.0 && x.fract() == 0.0 {
        let mut acc = 1.0;
        let mut k = 2.0;
        while k < x {
            acc *= k;
            k += 1.0;
        }
        return acc;
    }
    if x > 0.0 && x < 20.0 && (x - 0.5).fract() == 0.0 {
        // Γ(1/2) = sqrt(π), Γ(x + 1) = x Γ(x)
        let mut acc = std::f64::consts::PI.sqrt();
        let mut k = 0.5;
        while k < x {
            acc *= k;
            k += 1.0;
        }
        return acc;
    }
    lanczos_gamma(x)
}

fn lanczos_gamma(x: f64) -> f64 {
    const G: f64 = 7.0;
    const COEFFS: [f64; 9] = [
        0.999_999_999_999_809_9,
        676.520_368_121_885_1,
        -1_259.139_216_722_402_8,
        771.323_428_777_653_1,
        -176.615_029_162_140_6,
        12.507_343_278_686_905,
        -0.138_571_095_265_720_12,
        9.984_369_578_019_572e-6,
        1.505_632_735_149_311_6e-7,
    ];

    if x < 0.5 {
        // Reflection formula
        let pi = std::f64::consts::PI;
        return pi / ((pi * x).sin() * lanczos_gamma(1.0 - x));
    }

    let x = x - 1.0;
    let mut a = COEFFS[0];
    let t = x + G + 0.5;
    for (i, &c) in COEFFS.iter().enumerate().skip(1) {
        a += c / (x + i as f64);
    }
    (2.0 * std::f64::consts::PI).sqrt() * t.powf(x + 0.5) * (-t).exp() * a
}

fn check_parameters(alpha: f64, beta: f64) -> Result<()> {
    if alpha <= -1.0 {
        return Err(DgError::invalid_argument(format!(
            "Jacobi parameter alpha = {} must be greater than -1",
            alpha
        )));
    }
    if beta <= -1.0 {
        return Err(DgError::invalid_argument(format!(
            "Jacobi parameter beta = {} must be greater than -1",
            beta
        )));
    }
    if alpha + beta == -1.0 {
        return Err(DgError::invalid_argument(format!(
            "Jacobi parameters alpha = {} and beta = {} must not sum to -1",
            alpha, beta
        )));
    }
    Ok(())
}

/// Evaluate the orthonormal Jacobi polynomial P_n^{α,β}(x).
///
/// Orders 0 and 1 are closed forms; higher orders use the recurrence
///
/// x P_i = a_i P_{i-1} + b_i P_i + a_{i+1} P_{i+1}
///
/// which is stable for large n, unlike expanding the monomial form.
///
/// # Errors
/// `InvalidArgument` when α ≤ -1, β ≤ -1 or α + β = -1.
pub fn jacobi_polynomial(alpha: f64, beta: f64, n: usize, x: f64) -> Result<f64> {
    check_parameters(alpha, beta)?;

    let ab = alpha + beta;
    let gamma0 = 2f64.powf(ab + 1.0) / (ab + 1.0) * gamma(alpha + 1.0) * gamma(beta + 1.0)
        / gamma(ab + 1.0);
    let p0 = 1.0 / gamma0.sqrt();
    if n == 0 {
        return Ok(p0);
    }

    let gamma1 = (alpha + 1.0) * (beta + 1.0) / (ab + 3.0) * gamma0;
    let p1 = ((ab + 2.0) * x + (alpha - beta)) / 2.0 / gamma1.sqrt();
    if n == 1 {
        return Ok(p1);
    }

    let mut a_old = 2.0 / (2.0 + ab) * ((alpha + 1.0) * (beta + 1.0) / (ab + 3.0)).sqrt();
    let mut p_prev = p0;
    let mut p_curr = p1;

    for i in 0..n - 1 {
        let i = i as f64;
        let h1 = 2.0 * (i + 1.0) + ab;
        let a_new = 2.0 / (h1 + 2.0)
            * ((i + 2.0) * (i + 2.0 + ab) * (i + 2.0 + alpha) * (i + 2.0 + beta)
                / (h1 + 1.0)
                / (h1 + 3.0))
                .sqrt();
        let b_new = -(alpha * alpha - beta * beta) / (h1 * h1 + 2.0 * h1);
        let p_next = 1.0 / a_new * (-a_old * p_prev + (x - b_new) * p_curr);

        a_old = a_new;
        p_prev = p_curr;
        p_curr = p_next;
    }

    Ok(p_curr)
}

/// Evaluate the derivative of the orthonormal Jacobi polynomial P_n^{α,β}(x).
///
/// d/dx P_n^{α,β}(x) = sqrt(n (n + α + β + 1)) P_{n-1}^{α+1,β+1}(x)
pub fn jacobi_polynomial_gradient(alpha: f64, beta: f64, n: usize, x: f64) -> Result<f64> {
    check_parameters(alpha, beta)?;
    if n == 0 {
        return Ok(0.0);
    }
    let nf = n as f64;
    let scale = (nf * (nf + alpha + beta + 1.0)).sqrt();
    Ok(scale * jacobi_polynomial(alpha + 1.0, beta + 1.0, n - 1, x)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_gamma_values() {
        assert_eq!(gamma(1.0), 1.0);
        assert_eq!(gamma(5.0), 24.0);
        assert_relative_eq!(gamma(0.5), std::f64::consts::PI.sqrt(), max_relative = 1e-15);
        assert_relative_eq!(gamma(2.5), 1.329_340_388_179_137, max_relative = 1e-14);
        assert_relative_eq!(gamma(1.3), 0.897_470_696_306_277_2, max_relative = 1e-13);
    }

    #[test]
    fn test_order_zero_is_constant() {
        for &x in &[-1.0, -0.3, 0.0, 0.7, 1.0, 4.2] {
            let p = jacobi_polynomial(1.0, 2.0, 0, x).unwrap();
            assert_relative_eq!(p, 0.866025403784439, max_relative = 1e-14);
        }
    }

    #[test]
    fn test_reference_values() {
        let cases = [
            (1.0, 3.0, 1, 1.0, 1.479019945774904),
            (1.0, 3.0, 1, 5.379, 11.193962459597360),
            (1.0, 3.0, 2, 1.0, 2.25),
            (3.0, 1.0, 2, 0.14, 0.0954),
            (4.0, 2.0, 3, 0.2527, -0.720585645170871),
        ];
        for (alpha, beta, n, x, expected) in cases {
            let p = jacobi_polynomial(alpha, beta, n, x).unwrap();
            assert_relative_eq!(p, expected, max_relative = 1e-13);
        }
    }

    #[test]
    fn test_gradient_reference_values() {
        assert_eq!(jacobi_polynomial_gradient(0.0, 0.0, 0, 0.3).unwrap(), 0.0);
        assert_relative_eq!(
            jacobi_polynomial_gradient(0.0, 0.0, 1, 2.0).unwrap(),
            1.224744871391589,
            max_relative = 1e-14
        );
        assert_relative_eq!(
            jacobi_polynomial_gradient(1.0, 3.0, 1, 0.2657).unwrap(),
            2.218529918662356,
            max_relative = 1e-14
        );
        assert_relative_eq!(
            jacobi_polynomial_gradient(1.0, 3.0, 2, 2.0).unwrap(),
            18.375,
            max_relative = 1e-14
        );
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(matches!(
            jacobi_polynomial(-1.0, 0.0, 2, 0.5),
            Err(DgError::InvalidArgument(_))
        ));
        assert!(matches!(
            jacobi_polynomial(0.0, -1.5, 2, 0.5),
            Err(DgError::InvalidArgument(_))
        ));
        assert!(matches!(
            jacobi_polynomial(-0.5, -0.5, 2, 0.5),
            Err(DgError::InvalidArgument(_))
        ));
        assert!(jacobi_polynomial_gradient(-2.0, 0.0, 3, 0.1).is_err());
    }

    #[test]
    fn test_legendre_orthonormality() {
        // 5-point Gauss-Legendre rule is exact to degree 9
        let nodes = [
            -0.906_179_845_938_664,
            -0.538_469_310_105_683,
            0.0,
            0.538_469_310_105_683,
            0.906_179_845_938_664,
        ];
        let weights = [
            0.236_926_885_056_189,
            0.478_628_670_499_366,
            0.568_888_888_888_889,
            0.478_628_670_499_366,
            0.236_926_885_056_189,
        ];
        for i in 0..4 {
            for j in 0..4 {
                let integral: f64 = nodes
                    .iter()
                    .zip(weights.iter())
                    .map(|(&x, &w)| {
                        w * jacobi_polynomial(0.0, 0.0, i, x).unwrap()
                            * jacobi_polynomial(0.0, 0.0, j, x).unwrap()
                    })
                    .sum();
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!(
                    (integral - expected).abs() < 1e-12,
                    "<P_{}, P_{}> = {}",
                    i,
                    j,
                    integral
                );
            }
        }
    }
}
