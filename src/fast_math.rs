//! # Fast Approximate Math
//!
//! Small, branch-light numeric routines for placing marks on the dial. They
//! trade accuracy for speed and carry no state, so they can be called from any
//! tick without setup.
//!
//! ## Error Bounds
//!
//! | Function        | Method                                   | Max abs error |
//! |-----------------|------------------------------------------|---------------|
//! | [`sin`], [`cos`]| quadrant fold + Bhaskara I               | ≈ 0.0017      |
//! | [`sqrt`]        | bit-pattern guess + 2 Newton-Raphson     | ≈ 5e-6 · √x   |
//! | [`atan`]        | odd polynomial / rational / reflection   | ≈ 0.005 rad   |
//! | [`asin`]        | Taylor series + half-angle reduction     | ≈ 0.003 rad   |
//!
//! With a 50 px dial radius the sine/cosine error is under a tenth of a pixel,
//! well below what integer pixel placement can show. Results are not
//! bit-exact with `f32::sin` and friends and must never be compared as such.

pub const PI: f32 = core::f32::consts::PI;
pub const FRAC_PI_2: f32 = core::f32::consts::FRAC_PI_2;
pub const TAU: f32 = core::f32::consts::TAU;

/// Maximum absolute error of [`sin`] and [`cos`] over all inputs.
pub const SIN_MAX_ERROR: f32 = 0.002;

/// Maximum absolute error, in radians, of [`atan`] and [`asin`].
pub const ANGLE_MAX_ERROR: f32 = 0.01;

/// Absolute value by clearing the sign bit.
pub fn abs(x: f32) -> f32 {
    f32::from_bits(x.to_bits() & 0x7FFF_FFFF)
}

/// Largest integer value not greater than `x`.
pub fn floor(x: f32) -> f32 {
    let truncated = x as i32 as f32;
    if x >= 0.0 || x == truncated {
        truncated
    } else {
        truncated - 1.0
    }
}

/// Nearest integer value, halves rounded away from zero.
pub fn round(x: f32) -> f32 {
    if x >= 0.0 {
        (x + 0.5) as i32 as f32
    } else {
        (x - 0.5) as i32 as f32
    }
}

/// Square root from the classic inverse-square-root bit trick.
///
/// Non-positive inputs return `0.0`.
pub fn sqrt(x: f32) -> f32 {
    if x <= 0.0 {
        return 0.0;
    }

    let half = x * 0.5;
    let mut z = f32::from_bits(0x5f37_59df_u32.wrapping_sub(x.to_bits() >> 1));
    z *= 1.5 - half * z * z;
    z *= 1.5 - half * z * z;

    x * z
}

/// Fold any angle into `[0, π/2]`, returning the folded angle and the sign
/// the sine must carry.
fn fold_quadrant(x: f32) -> (f32, f32) {
    let mut sign = 1.0;

    // Into (-2π, 2π)
    let mut x = x - (x / TAU) as i32 as f32 * TAU;

    if x < 0.0 {
        x = -x;
        sign = -1.0;
    }
    if x > PI {
        x = TAU - x;
        sign = -sign;
    }
    if x > FRAC_PI_2 {
        x = PI - x;
    }

    (x, sign)
}

/// Sine via Bhaskara I's rational approximation.
pub fn sin(x: f32) -> f32 {
    let (x, sign) = fold_quadrant(x);
    let p = x * (PI - x);
    sign * 16.0 * p / (5.0 * PI * PI - 4.0 * p)
}

pub fn cos(x: f32) -> f32 {
    sin(x + FRAC_PI_2)
}

/// Tangent; saturates to ±1e6 near the poles.
pub fn tan(x: f32) -> f32 {
    let s = sin(x);
    let c = cos(x);

    if abs(c) < 1e-6 {
        return if s > 0.0 { 1e6 } else { -1e6 };
    }

    s / c
}

/// Arctangent.
///
/// - `|x| < 0.4375`: odd minimax polynomial
/// - `|x| <= 1`: `x / (1 + 0.28x²)`
/// - otherwise: `±π/2 − atan(1/x)`, where `|1/x| < 1`
///
/// NaN is returned unchanged.
pub fn atan(x: f32) -> f32 {
    if x.is_nan() {
        return x;
    }
    let ax = abs(x);

    if ax < 0.4375 {
        let x2 = x * x;
        return x
            * (0.999_977_26
                + x2 * (-0.332_623_47
                    + x2 * (0.193_543_46 + x2 * (-0.116_432_87 + x2 * 0.052_653_32))));
    }

    if ax <= 1.0 {
        return x / (1.0 + 0.28 * x * x);
    }

    let quarter = if x > 0.0 { FRAC_PI_2 } else { -FRAC_PI_2 };
    quarter - atan(1.0 / x)
}

/// Taylor series of asin, accurate on `|x| <= 1/√2`.
fn asin_series(x: f32) -> f32 {
    let x2 = x * x;
    x * (1.0
        + x2 * (1.0 / 6.0
            + x2 * (3.0 / 40.0 + x2 * (15.0 / 336.0 + x2 * (35.0 / 1152.0)))))
}

/// Arcsine. Inputs outside `[-1, 1]` are clamped.
///
/// Above `|x| = 0.5` the half-angle identity
/// `asin(x) = π/2 − 2·asin(√((1 − x)/2))` keeps the series in its accurate range.
pub fn asin(x: f32) -> f32 {
    let x = x.clamp(-1.0, 1.0);
    let ax = abs(x);

    if ax <= 0.5 {
        return asin_series(x);
    }

    let folded = FRAC_PI_2 - 2.0 * asin_series(sqrt((1.0 - ax) * 0.5));
    if x < 0.0 {
        -folded
    } else {
        folded
    }
}

pub fn acos(x: f32) -> f32 {
    FRAC_PI_2 - asin(x)
}
