//! How the texture level of detail is chosen when material channels are sampled
//!
//! Rasterization passes use [`ImplicitLod`], where the image service picks the level from the
//! screen space derivatives of the calling context. Passes without such derivatives, e.g. ray
//! tracing, pass a fixed level ([`ExplicitLod`]) or their own ray differentials
//! ([`GradientLod`]). Material decoding is generic over the strategy, so each call site is
//! monomorphized. [`LodSelector`] covers the cases where the strategy is only known at runtime.
use crate::{core::Image, flags::ChannelMode, RgbaF, SamplerState, Vec2f};

/// Samples an image with a specific way of choosing the level of detail
pub trait LodStrategy {
    fn sample<I: Image + ?Sized>(&self, image: &I, sampler: &SamplerState, uv: Vec2f) -> RgbaF;
}

/// Uses the derivatives of the calling context
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ImplicitLod;

/// Samples a fixed mip level
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ExplicitLod {
    pub lod: f32,
}

/// Samples with caller supplied texture coordinate derivatives
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GradientLod {
    /// `d uv / d x` in screen space
    pub duv_dx: Vec2f,
    /// `d uv / d y` in screen space
    pub duv_dy: Vec2f,
}

impl LodStrategy for ImplicitLod {
    fn sample<I: Image + ?Sized>(&self, image: &I, sampler: &SamplerState, uv: Vec2f) -> RgbaF {
        image.sample(sampler, uv)
    }
}

impl LodStrategy for ExplicitLod {
    fn sample<I: Image + ?Sized>(&self, image: &I, sampler: &SamplerState, uv: Vec2f) -> RgbaF {
        image.sample_level(sampler, uv, self.lod)
    }
}

impl LodStrategy for GradientLod {
    fn sample<I: Image + ?Sized>(&self, image: &I, sampler: &SamplerState, uv: Vec2f) -> RgbaF {
        image.sample_grad(sampler, uv, self.duv_dx, self.duv_dy)
    }
}

/// A strategy chosen at runtime
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum LodSelector {
    #[default]
    Implicit,
    Explicit(ExplicitLod),
    Gradient(GradientLod),
}

impl From<ImplicitLod> for LodSelector {
    fn from(_: ImplicitLod) -> Self {
        Self::Implicit
    }
}

impl From<ExplicitLod> for LodSelector {
    fn from(lod: ExplicitLod) -> Self {
        Self::Explicit(lod)
    }
}

impl From<GradientLod> for LodSelector {
    fn from(lod: GradientLod) -> Self {
        Self::Gradient(lod)
    }
}

impl LodStrategy for LodSelector {
    fn sample<I: Image + ?Sized>(&self, image: &I, sampler: &SamplerState, uv: Vec2f) -> RgbaF {
        match self {
            Self::Implicit => ImplicitLod.sample(image, sampler, uv),
            Self::Explicit(lod) => lod.sample(image, sampler, uv),
            Self::Gradient(lod) => lod.sample(image, sampler, uv),
        }
    }
}

/// Fetches the value of one material channel. Every channel of a material goes through here, no
/// matter which strategy is active.
///
/// A textured channel without a bound image reads as its constant.
#[must_use]
pub fn sample_channel<L, I>(
    lod: &L,
    mode: ChannelMode,
    image: Option<&I>,
    sampler: &SamplerState,
    uv: Vec2f,
    constant: RgbaF,
) -> RgbaF
where
    L: LodStrategy,
    I: Image + ?Sized,
{
    match (mode, image) {
        (ChannelMode::Unused, _) => RgbaF::ZERO,
        (ChannelMode::Constant, _) => constant,
        (ChannelMode::Textured, Some(image)) => lod.sample(image, sampler, uv),
        (ChannelMode::Textured, None) => {
            log::trace!("textured channel without image, using the constant {constant}");
            constant
        }
    }
}
