/// used for colors
pub type RgbF = glam::f32::Vec3;
/// used for colors with opacity in `w`
pub type RgbaF = glam::f32::Vec4;

/// used for shading positions and directions
pub type Vec3f = glam::f32::Vec3;
/// used for texture coordinates
pub type Vec2f = glam::f32::Vec2;

/// used for direction vectors produced by the sampling routines
pub type Vec3d = glam::f64::DVec3;
/// used for random numbers and low discrepancy points
pub type Vec2d = glam::f64::DVec2;

/// Lower bound for [`ShadingData::linear_roughness`]. Lower values make the GGX lobe so
/// narrow that BRDF evaluation becomes numerically singular.
pub const MIN_LINEAR_ROUGHNESS: f32 = 0.08;

/// Lower bound for every component of [`ShadingData::diffuse`]
pub const MIN_DIFFUSE_ALBEDO: f32 = 1e-4;

/// Identifies which BRDF family a surface uses
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MaterialClass {
    /// Lambertian diffuse with a dielectric specular layer
    #[default]
    Diffuse,
    /// GGX metal
    GgxMetal,
}

impl MaterialClass {
    /// Decodes the id that is stored in a texture channel. Id `2` is reserved and everything that
    /// is not a known id collapses to [`MaterialClass::Diffuse`].
    #[must_use]
    pub const fn from_id(id: u32) -> Self {
        match id {
            1 => Self::GgxMetal,
            _ => Self::Diffuse,
        }
    }

    #[must_use]
    pub const fn id(self) -> u32 {
        match self {
            Self::Diffuse => 0,
            Self::GgxMetal => 1,
        }
    }
}

/// The resolved surface state of one fragment.
///
/// A [`ShadingData`] is built by [`crate::material::prepare_shading_data`] for exactly one
/// fragment and is consumed by [`crate::shading::eval_material`]. It is never shared between
/// fragments.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadingData {
    /// World space position
    pub pos_w: Vec3f,
    /// Normalized direction from the surface towards the camera
    pub v: Vec3f,
    /// Shading normal
    pub n: Vec3f,
    /// Shading tangent, `t = b x n`
    pub t: Vec3f,
    /// Shading bitangent
    pub b: Vec3f,
    /// Texture coordinate used for every material channel except the light map
    pub uv: Vec2f,
    /// `dot(n, v)`. Non negative for double sided materials.
    pub n_dot_v: f32,

    /// Diffuse albedo, never exactly zero
    pub diffuse: RgbF,
    pub opacity: f32,
    /// Specular reflectance at normal incidence
    pub specular: RgbF,
    /// Perceptual roughness, clamped to [`MIN_LINEAR_ROUGHNESS`]
    pub linear_roughness: f32,
    /// GGX alpha, `linear_roughness^2`
    pub roughness: f32,
    pub metalness: f32,
    pub emissive: RgbF,
    pub occlusion: f32,
    pub light_map: RgbF,
    pub height: f32,
    pub ior: f32,
    pub double_sided: bool,
    pub material_class: MaterialClass,
}

impl Default for ShadingData {
    fn default() -> Self {
        Self {
            pos_w: Vec3f::ZERO,
            v: Vec3f::Z,
            n: Vec3f::Z,
            t: Vec3f::X,
            b: Vec3f::Y,
            uv: Vec2f::ZERO,
            n_dot_v: 1.0,
            diffuse: RgbF::splat(MIN_DIFFUSE_ALBEDO),
            opacity: 1.0,
            specular: RgbF::ZERO,
            linear_roughness: MIN_LINEAR_ROUGHNESS,
            roughness: MIN_LINEAR_ROUGHNESS * MIN_LINEAR_ROUGHNESS,
            metalness: 0.0,
            emissive: RgbF::ZERO,
            occlusion: 1.0,
            light_map: RgbF::ZERO,
            height: 0.0,
            ior: 1.5,
            double_sided: false,
            material_class: MaterialClass::Diffuse,
        }
    }
}

/// The outcome of shading one fragment with one light
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadingResult {
    /// The weight the diffuse BRDF returned
    pub diffuse_brdf: RgbF,
    /// The weight the specular BRDF returned
    pub specular_brdf: RgbF,
    /// Diffuse contribution of the light
    pub diffuse: RgbF,
    /// Specular contribution of the light
    pub specular: RgbF,
    /// Final color. The opacity of the surface is stored in `w`.
    pub color: RgbaF,
}

impl ShadingResult {
    /// The result of a light that does not reach the surface
    pub const ZERO: Self = Self {
        diffuse_brdf: RgbF::ZERO,
        specular_brdf: RgbF::ZERO,
        diffuse: RgbF::ZERO,
        specular: RgbF::ZERO,
        color: RgbaF::W,
    };
}

impl Default for ShadingResult {
    fn default() -> Self {
        Self::ZERO
    }
}

/// What a light or light probe contributes at a shading point
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LightSample {
    /// Normalized direction from the surface towards the light
    pub l: Vec3f,
    /// Half vector between `l` and [`ShadingData::v`]
    pub h: Vec3f,
    /// Radiance reaching the surface, weighting the diffuse BRDF
    pub diffuse: RgbF,
    /// Radiance reaching the surface, weighting the specular BRDF
    pub specular: RgbF,
    pub n_dot_l: f32,
    pub n_dot_h: f32,
    pub l_dot_h: f32,
}

/// Sampler configuration handed through to the image service
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SamplerState {
    pub filter: Filter,
    pub address: AddressMode,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Filter {
    Point,
    #[default]
    Linear,
    Anisotropic,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AddressMode {
    #[default]
    Wrap,
    Mirror,
    Clamp,
}

/// A readable image. This is the texture fetch service of the host renderer.
///
/// The three methods correspond to the three ways a texture level of detail can be chosen, see
/// [`crate::lod`].
pub trait Image {
    /// Samples using the screen space derivatives of the calling context to pick the level of
    /// detail
    fn sample(&self, sampler: &SamplerState, uv: Vec2f) -> RgbaF;

    /// Samples the given mip level
    fn sample_level(&self, sampler: &SamplerState, uv: Vec2f, lod: f32) -> RgbaF;

    /// Samples with explicit texture coordinate derivatives along the screen x and y axes
    fn sample_grad(&self, sampler: &SamplerState, uv: Vec2f, duv_dx: Vec2f, duv_dy: Vec2f)
        -> RgbaF;
}

impl<T: Image + ?Sized> Image for &T {
    fn sample(&self, sampler: &SamplerState, uv: Vec2f) -> RgbaF {
        (**self).sample(sampler, uv)
    }

    fn sample_level(&self, sampler: &SamplerState, uv: Vec2f, lod: f32) -> RgbaF {
        (**self).sample_level(sampler, uv, lod)
    }

    fn sample_grad(
        &self,
        sampler: &SamplerState,
        uv: Vec2f,
        duv_dx: Vec2f,
        duv_dy: Vec2f,
    ) -> RgbaF {
        (**self).sample_grad(sampler, uv, duv_dx, duv_dy)
    }
}

/// A light source that can be evaluated at a shading point
pub trait Light {
    /// Returns the incident light at the shading point. `n_dot_l <= 0.0` means the light does
    /// not illuminate the surface.
    fn eval(&self, sd: &ShadingData) -> LightSample;
}

/// A prefiltered environment light. Probes are treated as always visible.
pub trait LightProbe {
    fn eval(&self, sd: &ShadingData) -> LightSample;
}

/// The diffuse and specular BRDFs the shading state is evaluated with.
///
/// The returned weights do **not** contain the `n_dot_l` cosine term. Like in the rest of this
/// crate, the caller multiplies it in.
pub trait Brdf {
    fn diffuse(&self, sd: &ShadingData, ls: &LightSample) -> RgbF;
    fn specular(&self, sd: &ShadingData, ls: &LightSample) -> RgbF;
}
