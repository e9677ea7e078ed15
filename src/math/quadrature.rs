//! Adaptive Gauss–Kronrod quadrature.
//!
//! Globally adaptive bisection over 15-point Kronrod rules with an embedded
//! 7-point Gauss rule, following QUADPACK's `QAG` scheme:
//!
//! - integrate the whole interval with K15 and estimate the error from `|K15 - G7|`
//! - repeatedly bisect the subinterval with the largest error estimate
//! - stop once the summed error estimate meets `max(epsabs, epsrel * |I|)`
//!
//! Running out of subintervals is reported as [`Error::Quadrature`] together
//! with the last estimate's diagnostics; a partial result is never returned.

use log::debug;

use crate::domain::QuadratureConfig;
use crate::error::{Error, Result};

/// Kronrod abscissae on [-1, 1] (non-negative half, descending). Odd indices are Gauss nodes.
const XGK: [f64; 8] = [
    0.991_455_371_120_812_639_206_854_697_526_329,
    0.949_107_912_342_758_524_526_189_684_047_851,
    0.864_864_423_359_769_072_789_712_788_640_926,
    0.741_531_185_599_394_439_863_864_773_280_788,
    0.586_087_235_467_691_130_294_144_845_693_013,
    0.405_845_151_377_397_166_906_606_412_076_961,
    0.207_784_955_007_898_467_600_689_403_773_245,
    0.0,
];

const WGK: [f64; 8] = [
    0.022_935_322_010_529_224_963_732_008_058_970,
    0.063_092_092_629_978_553_290_700_663_189_204,
    0.104_790_010_322_250_183_839_876_322_541_518,
    0.140_653_259_715_525_918_745_189_590_510_238,
    0.169_004_726_639_267_902_826_583_426_598_550,
    0.190_350_578_064_785_409_913_256_402_421_014,
    0.204_432_940_075_298_892_414_161_999_234_649,
    0.209_482_141_084_727_828_012_999_174_891_714,
];

/// Gauss weights; the last entry belongs to the centre node.
const WG: [f64; 4] = [
    0.129_484_966_168_869_693_270_611_432_679_082,
    0.279_705_391_489_276_667_901_467_771_423_780,
    0.381_830_050_505_118_944_950_369_775_488_975,
    0.417_959_183_673_469_387_755_102_040_816_327,
];

/// Outcome of a converged integration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quadrature {
    pub value: f64,
    /// Estimated absolute error.
    pub abs_error: f64,
    /// Number of subintervals in the final partition.
    pub subdivisions: usize,
    /// Number of integrand evaluations.
    pub evaluations: usize,
}

#[derive(Debug, Clone, Copy)]
struct Segment {
    a: f64,
    b: f64,
    value: f64,
    error: f64,
}

/// Integrate `f` over `[a, b]`.
///
/// `a == b` yields exactly zero. `a > b` integrates over `[b, a]` and negates.
pub fn integrate<F>(f: F, a: f64, b: f64, config: &QuadratureConfig) -> Result<Quadrature>
where
    F: Fn(f64) -> f64,
{
    config.validate()?;

    if a == b {
        return Ok(Quadrature {
            value: 0.0,
            abs_error: 0.0,
            subdivisions: 0,
            evaluations: 0,
        });
    }
    if a > b {
        let q = integrate(f, b, a, config).map_err(|e| match e {
            Error::Quadrature {
                abs_error,
                tolerance,
                subdivisions,
                ..
            } => Error::Quadrature {
                lower: a,
                upper: b,
                abs_error,
                tolerance,
                subdivisions,
            },
            other => other,
        })?;
        return Ok(Quadrature { value: -q.value, ..q });
    }

    let first = kronrod15(&f, a, b);
    let mut segments = vec![first];
    let mut evaluations = 15;

    loop {
        let value: f64 = segments.iter().map(|s| s.value).sum();
        let abs_error: f64 = segments.iter().map(|s| s.error).sum();
        let tolerance = config.epsabs.max(config.epsrel * value.abs());

        if abs_error <= tolerance {
            return Ok(Quadrature {
                value,
                abs_error,
                subdivisions: segments.len(),
                evaluations,
            });
        }

        if segments.len() >= config.limit || !value.is_finite() {
            debug!(
                "quadrature over [{a}, {b}] stopped: value={value}, abs_error={abs_error:e}, tolerance={tolerance:e}, subdivisions={}",
                segments.len()
            );
            return Err(Error::Quadrature {
                lower: a,
                upper: b,
                abs_error,
                tolerance,
                subdivisions: segments.len(),
            });
        }

        let worst = worst_segment(&segments);
        let seg = segments.swap_remove(worst);
        let mid = 0.5 * (seg.a + seg.b);
        if !(seg.a < mid && mid < seg.b) {
            // Interval cannot be split further in floating point.
            return Err(Error::Quadrature {
                lower: a,
                upper: b,
                abs_error,
                tolerance,
                subdivisions: segments.len() + 1,
            });
        }
        segments.push(kronrod15(&f, seg.a, mid));
        segments.push(kronrod15(&f, mid, seg.b));
        evaluations += 30;
    }
}

fn worst_segment(segments: &[Segment]) -> usize {
    let mut worst = 0;
    for (i, s) in segments.iter().enumerate() {
        if s.error > segments[worst].error {
            worst = i;
        }
    }
    worst
}

/// 15-point Kronrod rule on `[a, b]` with QUADPACK's error scaling.
fn kronrod15<F>(f: &F, a: f64, b: f64) -> Segment
where
    F: Fn(f64) -> f64,
{
    let centr = 0.5 * (a + b);
    let hlgth = 0.5 * (b - a);
    let dhlgth = hlgth.abs();

    let fc = f(centr);
    let mut resg = fc * WG[3];
    let mut resk = fc * WGK[7];
    let mut resabs = resk.abs();

    let mut fv1 = [0.0; 7];
    let mut fv2 = [0.0; 7];

    for j in 0..3 {
        let jtw = 2 * j + 1;
        let absc = hlgth * XGK[jtw];
        let f1 = f(centr - absc);
        let f2 = f(centr + absc);
        fv1[jtw] = f1;
        fv2[jtw] = f2;
        let fsum = f1 + f2;
        resg += WG[j] * fsum;
        resk += WGK[jtw] * fsum;
        resabs += WGK[jtw] * (f1.abs() + f2.abs());
    }

    for j in 0..4 {
        let jtwm1 = 2 * j;
        let absc = hlgth * XGK[jtwm1];
        let f1 = f(centr - absc);
        let f2 = f(centr + absc);
        fv1[jtwm1] = f1;
        fv2[jtwm1] = f2;
        let fsum = f1 + f2;
        resk += WGK[jtwm1] * fsum;
        resabs += WGK[jtwm1] * (f1.abs() + f2.abs());
    }

    let reskh = resk * 0.5;
    let mut resasc = WGK[7] * (fc - reskh).abs();
    for j in 0..7 {
        resasc += WGK[j] * ((fv1[j] - reskh).abs() + (fv2[j] - reskh).abs());
    }

    let value = resk * hlgth;
    let resabs = resabs * dhlgth;
    let resasc = resasc * dhlgth;
    let mut error = ((resk - resg) * hlgth).abs();

    if resasc != 0.0 && error != 0.0 {
        error = resasc * (200.0 * error / resasc).powf(1.5).min(1.0);
    }
    if resabs > f64::MIN_POSITIVE / (50.0 * f64::EPSILON) {
        error = error.max(50.0 * f64::EPSILON * resabs);
    }

    Segment { a, b, value, error }
}
