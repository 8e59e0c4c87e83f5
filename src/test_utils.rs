use std::{
    cell::{Cell, RefCell},
    f64::consts,
};

use crate::{
    core::{Brdf, Image, Light, LightProbe, LightSample},
    RgbF, RgbaF, SamplerState, ShadingData, Vec2d, Vec2f, Vec3d, Vec3f,
};

pub trait ApproxEqual: Copy {
    fn equals_approx_abs(self, other: Self, eps: Self) -> bool;
}

macro_rules! assert_eq_approx_abs {
    ($lhs:expr, $rhs:expr, $eps_abs:expr) => {
        assert!(
            $crate::test_utils::ApproxEqual::equals_approx_abs($lhs, $rhs, $eps_abs),
            r#"assert_eq_abs failed:
    {}: {:?}
    {}: {:?}
    {} (maximum absolute error): {:?}"#,
            stringify!($lhs),
            $lhs,
            stringify!($rhs),
            $rhs,
            stringify!($eps_abs),
            $eps_abs,
        )
    };

    ($lhs:expr, $rhs:expr, $eps_abs:expr, $($arg:tt)+) => {
        assert!($crate::test_utils::ApproxEqual::equals_approx_abs($lhs, $rhs, $eps_abs),
        $($arg)*);
    };
}

macro_rules! assert_in_range {
    ($value:expr, $lower:expr, $upper:expr) => {
        assert!(
            $lower <= $value && $value <= $upper,
            r#"assert_in_range failed:
    {} (value): {:?}
    {} (lower bound): {:?}
    {} (upper bound): {:?}"#,
            stringify!($value),
            $value,
            stringify!($lower),
            $lower,
            stringify!($upper),
            $upper
        )
    };
}

macro_rules! impl_approx_equal {
    ($scalar:ty, $vector:ty) => {
        impl ApproxEqual for $scalar {
            fn equals_approx_abs(self, other: Self, eps: Self) -> bool {
                #[allow(clippy::float_cmp)]
                if self == other {
                    true
                } else {
                    (self - other).abs() <= eps
                }
            }
        }

        impl ApproxEqual for $vector {
            fn equals_approx_abs(self, other: Self, eps: Self) -> bool {
                $crate::test_utils::ApproxEqual::equals_approx_abs(self.x, other.x, eps.x)
                    && $crate::test_utils::ApproxEqual::equals_approx_abs(self.y, other.y, eps.y)
                    && $crate::test_utils::ApproxEqual::equals_approx_abs(self.z, other.z, eps.z)
            }
        }
    };
}

impl_approx_equal!(f64, Vec3d);
impl_approx_equal!(f32, Vec3f);

pub(crate) use assert_eq_approx_abs;
pub(crate) use assert_in_range;

pub trait SamplerExt {
    fn vec2d(&mut self) -> Vec2d;
}

impl SamplerExt for fastrand::Rng {
    fn vec2d(&mut self) -> Vec2d {
        Vec2d::new(self.f64(), self.f64())
    }
}

/** sample a direction with density 1 / 4pi */
pub fn spherical_sample(rd: &mut fastrand::Rng) -> Vec3d {
    let u = rd.f64();
    let v = rd.f64();
    #[allow(clippy::suboptimal_flops)]
    let cos_theta = 2.0 * u - 1.0;
    #[allow(clippy::suboptimal_flops)]
    let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();
    let phi = v * 2.0 * consts::PI;
    let (sin_phi, cos_phi) = phi.sin_cos();
    Vec3d::new(sin_theta * sin_phi, sin_theta * cos_phi, cos_theta)
}

/// Pearson's chi-square statistic of `counts` against a uniform distribution of `total` samples
#[allow(clippy::cast_lossless)]
pub fn chi_square(counts: &[u32], total: u32) -> f64 {
    let expected = total as f64 / counts.len() as f64;
    counts
        .iter()
        .map(|&c| (c as f64 - expected).powi(2) / expected)
        .sum()
}

/// An image that returns the same value for every fetch
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstantImage(pub RgbaF);

impl Image for ConstantImage {
    fn sample(&self, _sampler: &SamplerState, _uv: Vec2f) -> RgbaF {
        self.0
    }

    fn sample_level(&self, _sampler: &SamplerState, _uv: Vec2f, _lod: f32) -> RgbaF {
        self.0
    }

    fn sample_grad(&self, _: &SamplerState, _: Vec2f, _: Vec2f, _: Vec2f) -> RgbaF {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RecordedFetch {
    Implicit {
        uv: Vec2f,
    },
    Level {
        uv: Vec2f,
        lod: f32,
    },
    Grad {
        uv: Vec2f,
        duv_dx: Vec2f,
        duv_dy: Vec2f,
    },
}

impl RecordedFetch {
    pub const fn uv(self) -> Vec2f {
        match self {
            Self::Implicit { uv } | Self::Level { uv, .. } | Self::Grad { uv, .. } => uv,
        }
    }
}

/// A constant image that remembers how it was sampled
#[derive(Debug, Default)]
pub struct RecordingImage {
    pub value: RgbaF,
    fetches: RefCell<Vec<RecordedFetch>>,
    count: Cell<usize>,
}

impl RecordingImage {
    pub fn new(value: RgbaF) -> Self {
        Self {
            value,
            ..Self::default()
        }
    }

    pub fn last(&self) -> Option<RecordedFetch> {
        self.fetches.borrow().last().copied()
    }

    pub fn fetch_count(&self) -> usize {
        self.count.get()
    }

    pub fn uvs(&self) -> Vec<Vec2f> {
        self.fetches.borrow().iter().map(|f| f.uv()).collect()
    }

    fn record(&self, fetch: RecordedFetch) -> RgbaF {
        self.fetches.borrow_mut().push(fetch);
        self.count.set(self.count.get() + 1);
        self.value
    }
}

impl Image for RecordingImage {
    fn sample(&self, _sampler: &SamplerState, uv: Vec2f) -> RgbaF {
        self.record(RecordedFetch::Implicit { uv })
    }

    fn sample_level(&self, _sampler: &SamplerState, uv: Vec2f, lod: f32) -> RgbaF {
        self.record(RecordedFetch::Level { uv, lod })
    }

    fn sample_grad(&self, _: &SamplerState, uv: Vec2f, duv_dx: Vec2f, duv_dy: Vec2f) -> RgbaF {
        self.record(RecordedFetch::Grad { uv, duv_dx, duv_dy })
    }
}

/// A light infinitely far away
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectionalLight {
    /// Normalized direction towards the light
    pub l: Vec3f,
    pub radiance: RgbF,
}

impl DirectionalLight {
    pub fn new(l: Vec3f, radiance: RgbF) -> Self {
        Self {
            l: l.normalize(),
            radiance,
        }
    }

    pub fn n_dot_l(&self, sd: &ShadingData) -> f32 {
        sd.n.dot(self.l)
    }
}

impl Light for DirectionalLight {
    fn eval(&self, sd: &ShadingData) -> LightSample {
        let h = (self.l + sd.v).normalize_or_zero();
        LightSample {
            l: self.l,
            h,
            diffuse: self.radiance,
            specular: self.radiance,
            n_dot_l: self.n_dot_l(sd),
            n_dot_h: sd.n.dot(h),
            l_dot_h: self.l.dot(h),
        }
    }
}

/// Uniform ambient light
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstantProbe {
    pub diffuse: RgbF,
    pub specular: RgbF,
}

impl LightProbe for ConstantProbe {
    fn eval(&self, sd: &ShadingData) -> LightSample {
        LightSample {
            l: sd.n,
            h: sd.n,
            diffuse: self.diffuse,
            specular: self.specular,
            n_dot_l: 1.0,
            n_dot_h: 1.0,
            l_dot_h: 1.0,
        }
    }
}

/// BRDFs with fixed weights
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstantBrdf {
    pub diffuse: RgbF,
    pub specular: RgbF,
}

impl Brdf for ConstantBrdf {
    fn diffuse(&self, _sd: &ShadingData, _ls: &LightSample) -> RgbF {
        self.diffuse
    }

    fn specular(&self, _sd: &ShadingData, _ls: &LightSample) -> RgbF {
        self.specular
    }
}
