//! Importance sampling routines for Monte Carlo integrators
//!
//! Like everything in this crate the functions are deterministic: the caller supplies the
//! uniform random numbers in `[0, 1)` as a [`Vec2d`], e.g. from [`crate::rng::SampleRng`] or a
//! low discrepancy sequence. The returned directions are in world space, around the given normal.
//! Pdfs are not returned, use the matching `*_pdf` function.
use std::f64::consts;

use crate::{utils::FloatExt, Vec2d, Vec3d};

/// Returns a vector orthogonal to `u` without branching on its direction. The result is not
/// normalized, but its length is at least `0.8 * |u|`, so it never degenerates for non zero `u`.
#[must_use]
pub fn perpendicular(u: Vec3d) -> Vec3d {
    let a = u.abs();
    // cross with the axis of the smallest component
    let xm = u32::from(a.x - a.y < 0.0 && a.x - a.z < 0.0);
    let ym = u32::from(a.y - a.z < 0.0) & (1 ^ xm);
    let zm = 1 ^ (xm | ym);
    u.cross(Vec3d::new(f64::from(xm), f64::from(ym), f64::from(zm)))
}

/// Completes `n` and a tangent hint `t` to an orthonormal frame `(t, b)`. Falls back to
/// [`perpendicular`] if `t` is parallel to `n`.
fn tangent_frame(n: Vec3d, t: Vec3d) -> (Vec3d, Vec3d) {
    let b = n
        .cross(t)
        .try_normalize()
        .unwrap_or_else(|| n.cross(perpendicular(n)).normalize());
    (b.cross(n), b)
}

/// Samples a direction around `n` with density `cos(theta) / pi`. `t` only orients the
/// frame, it does not need to be orthogonal to `n`.
#[must_use]
pub fn cosine_hemisphere_sample(u: Vec2d, n: Vec3d, t: Vec3d) -> Vec3d {
    let (t, b) = tangent_frame(n, t);
    let r = u.x.sqrt();
    let phi = 2.0 * consts::PI * u.y;
    let (sin_phi, cos_phi) = phi.sin_cos();
    let z = (1.0 - u.x).max(0.0).sqrt();
    #[allow(clippy::suboptimal_flops)]
    (t * (r * cos_phi) + b * (r * sin_phi) + n * z).normalize()
}

#[must_use]
pub fn cosine_hemisphere_pdf(cos_theta: f64) -> f64 {
    cos_theta.max(0.0) * consts::FRAC_1_PI
}

/// GGX normal distribution function for `alpha = linear_roughness^2`
#[must_use]
pub fn ggx_ndf(n_dot_h: f64, alpha: f64) -> f64 {
    if n_dot_h <= 0.0 {
        return 0.0;
    }
    let a2 = alpha.sq();
    #[allow(clippy::suboptimal_flops)]
    let d = n_dot_h.sq() * (a2 - 1.0) + 1.0;
    a2 / (consts::PI * d.sq())
}

/// Samples a microfacet normal `h` around `n` proportional to `D(h) * dot(n, h)`.
///
/// `alpha` is the GGX roughness, i.e. the squared perceptual roughness. The density of the
/// resulting reflected direction is `D(h) * n_dot_h / (4 * h_dot_v)`, see [`ggx_pdf`].
#[must_use]
pub fn ggx_microfacet_sample(u: Vec2d, n: Vec3d, alpha: f64) -> Vec3d {
    let a2 = alpha.sq();
    let phi = 2.0 * consts::PI * u.x;
    #[allow(clippy::suboptimal_flops)]
    let cos_theta2 = ((1.0 - u.y) / (1.0 + (a2 - 1.0) * u.y)).saturate();
    let cos_theta = cos_theta2.sqrt();
    let sin_theta = (1.0 - cos_theta2).max(0.0).sqrt();
    let (sin_phi, cos_phi) = phi.sin_cos();

    let t = perpendicular(n).normalize();
    let b = n.cross(t);
    #[allow(clippy::suboptimal_flops)]
    (t * (sin_theta * cos_phi) + b * (sin_theta * sin_phi) + n * cos_theta).normalize()
}

/// Density of the direction obtained by reflecting the view vector on a normal from
/// [`ggx_microfacet_sample`]. Returns `0.0` for back facing half vectors.
#[must_use]
pub fn ggx_pdf(alpha: f64, n_dot_h: f64, h_dot_v: f64) -> f64 {
    if h_dot_v <= 0.0 {
        return 0.0;
    }
    ggx_ndf(n_dot_h, alpha) * n_dot_h / (4.0 * h_dot_v)
}

/// Samples a direction uniformly from the cone of directions within `acos(cos_theta_max)` of
/// `n`
#[must_use]
pub fn uniform_cone_sample(u: Vec2d, n: Vec3d, cos_theta_max: f64) -> Vec3d {
    let cos_theta_max = cos_theta_max.clamp(-1.0, 1.0);
    #[allow(clippy::suboptimal_flops)]
    let cos_theta = (1.0 - u.x) + u.x * cos_theta_max;
    let sin_theta = (1.0 - cos_theta.sq()).max(0.0).sqrt();
    let phi = 2.0 * consts::PI * u.y;
    let (sin_phi, cos_phi) = phi.sin_cos();

    let t = perpendicular(n).normalize();
    let b = n.cross(t);
    #[allow(clippy::suboptimal_flops)]
    (t * (sin_theta * cos_phi) + b * (sin_theta * sin_phi) + n * cos_theta).normalize()
}

/// `1 / (2 pi (1 - cos_theta_max))`. A cone with zero opening angle is a delta distribution,
/// for which this returns [`f64::INFINITY`].
#[must_use]
pub fn uniform_cone_pdf(cos_theta_max: f64) -> f64 {
    let solid_angle = 2.0 * consts::PI * (1.0 - cos_theta_max.clamp(-1.0, 1.0));
    if solid_angle <= 0.0 {
        f64::INFINITY
    } else {
        1.0 / solid_angle
    }
}

/// Multiple importance sampling weight of strategy `f` against `g` with the power heuristic
/// (exponent 2). `nf` and `ng` are the sample counts of the strategies.
///
/// Returns `0.0` when both densities are zero.
#[must_use]
pub fn power_heuristic(nf: u32, f_pdf: f64, ng: u32, g_pdf: f64) -> f64 {
    let f = f64::from(nf) * f_pdf;
    let g = f64::from(ng) * g_pdf;
    let denom = f.sq() + g.sq();
    if denom <= 0.0 {
        0.0
    } else {
        f.sq() / denom
    }
}
