//! Turns a material and a surface interaction into a [`ShadingData`]
use crate::{
    alpha_test::{eval_alpha_test, ScreenDerivatives, Visibility},
    config::MaterialConfig,
    core::{Image, MaterialClass, MIN_DIFFUSE_ALBEDO, MIN_LINEAR_ROUGHNESS},
    flags::{ChannelMode, MaterialFlags, NormalMapType},
    lod::{sample_channel, LodStrategy},
    sampling::perpendicular,
    utils::FloatExt,
    RgbF, RgbaF, SamplerState, ShadingData, Vec2f, Vec3f,
};

/// Specular reflectance of dielectrics at normal incidence
const DIELECTRIC_SPECULAR: f32 = 0.04;

/// Interpolated vertex attributes at the point being shaded
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceInteraction {
    pub pos_w: Vec3f,
    /// Interpolated normal, does not need to be normalized
    pub normal_w: Vec3f,
    /// Interpolated bitangent, does not need to be orthogonal to the normal
    pub bitangent_w: Vec3f,
    pub uv: Vec2f,
    pub light_map_uv: Vec2f,
    /// Screen space derivatives of `pos_w`. Only available in rasterization passes.
    pub derivatives: Option<ScreenDerivatives>,
}

impl Default for SurfaceInteraction {
    fn default() -> Self {
        Self {
            pos_w: Vec3f::ZERO,
            normal_w: Vec3f::Z,
            bitangent_w: Vec3f::Y,
            uv: Vec2f::ZERO,
            light_map_uv: Vec2f::ZERO,
            derivatives: None,
        }
    }
}

/// Images a material may read. A channel whose flags say it is textured but has no image here
/// reads as its constant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaterialTextures<I> {
    pub base_color: Option<I>,
    /// `r`: material class id, `g`: linear roughness, `b`: metalness
    pub specular: Option<I>,
    pub emissive: Option<I>,
    pub normal_map: Option<I>,
    pub occlusion: Option<I>,
    pub light_map: Option<I>,
    pub height_map: Option<I>,
}

impl<I> Default for MaterialTextures<I> {
    fn default() -> Self {
        Self {
            base_color: None,
            specular: None,
            emissive: None,
            normal_map: None,
            occlusion: None,
            light_map: None,
            height_map: None,
        }
    }
}

/// A decoded material description
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material<I> {
    /// Base color and alpha used when the diffuse channel is constant
    pub base_color: RgbaF,
    /// Used when the specular channel is constant, see [`MaterialTextures::specular`]
    pub specular: RgbaF,
    pub emissive: RgbF,
    pub alpha_threshold: f32,
    pub ior: f32,
    /// Applied to height map samples as `h * x + y`
    pub height_scale_offset: Vec2f,
    pub flags: MaterialFlags,
    pub sampler: SamplerState,
    pub textures: MaterialTextures<I>,
}

impl<I> Default for Material<I> {
    fn default() -> Self {
        Self {
            base_color: RgbaF::ONE,
            specular: RgbaF::new(0.0, 1.0, 0.0, 1.0),
            emissive: RgbF::ZERO,
            alpha_threshold: 0.5,
            ior: 1.5,
            height_scale_offset: Vec2f::new(1.0, 0.0),
            flags: MaterialFlags::default()
                .with_diffuse(ChannelMode::Constant)
                .with_specular(ChannelMode::Constant),
            sampler: SamplerState::default(),
            textures: MaterialTextures::default(),
        }
    }
}

impl<I: Image> Material<I> {
    fn channel<L: LodStrategy>(
        &self,
        lod: &L,
        mode: ChannelMode,
        image: Option<&I>,
        uv: Vec2f,
        constant: RgbaF,
    ) -> RgbaF {
        sample_channel(lod, mode, image, &self.sampler, uv, constant)
    }
}

/// What the specular channel encodes
#[derive(Clone, Copy, Debug, PartialEq)]
struct SpecularParams {
    class: MaterialClass,
    linear_roughness: f32,
    metalness: f32,
}

fn decode_specular(spec: RgbaF) -> SpecularParams {
    let metalness = spec.z.saturate();
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let id = if spec.x.is_finite() && spec.x >= 0.0 {
        (spec.x + 0.5) as u32
    } else {
        0
    };
    let class = if metalness > 0.0 {
        MaterialClass::GgxMetal
    } else {
        MaterialClass::from_id(id)
    };
    SpecularParams {
        class,
        linear_roughness: spec.y.clamp(MIN_LINEAR_ROUGHNESS, 1.0),
        metalness,
    }
}

/// Builds an orthonormal `(t, b, n)` frame. `b` is the part of `bitangent` orthogonal to `n`,
/// or an arbitrary orthogonal direction if there is none.
fn orthonormal_frame(normal: Vec3f, bitangent: Vec3f) -> (Vec3f, Vec3f, Vec3f) {
    let n = normal.try_normalize().unwrap_or(Vec3f::Z);
    let b = (bitangent - n * bitangent.dot(n))
        .try_normalize()
        .unwrap_or_else(|| perpendicular(n.as_dvec3()).normalize().as_vec3());
    let t = b.cross(n).normalize();
    (t, b, n)
}

fn decode_normal_map(ty: NormalMapType, texel: RgbaF) -> Option<Vec3f> {
    let n = match ty {
        NormalMapType::None | NormalMapType::Unknown => return None,
        NormalMapType::Rgb => texel.truncate() * 2.0 - 1.0,
        NormalMapType::Rg => {
            let xy = Vec2f::new(texel.x, texel.y) * 2.0 - 1.0;
            // block compression error can push the length above one
            let z = (1.0 - xy.dot(xy).saturate()).sqrt();
            xy.extend(z)
        }
    };
    n.try_normalize()
}

fn apply_normal_map<I: Image, L: LodStrategy>(
    sd: &mut ShadingData,
    material: &Material<I>,
    flags: MaterialFlags,
    lod: &L,
) {
    let ty = flags.normal_map();
    if matches!(ty, NormalMapType::None | NormalMapType::Unknown) {
        return;
    }
    let flat = RgbaF::new(0.5, 0.5, 1.0, 1.0);
    let texel = material.channel(
        lod,
        ChannelMode::Textured,
        material.textures.normal_map.as_ref(),
        sd.uv,
        flat,
    );
    let Some(mapped) = decode_normal_map(ty, texel) else {
        return;
    };
    let Some(n) = (sd.t * mapped.x + sd.b * mapped.y + sd.n * mapped.z).try_normalize() else {
        return;
    };
    let (t, b, n) = orthonormal_frame(n, sd.b);
    sd.t = t;
    sd.b = b;
    sd.n = n;
}

fn sample_base_color<I: Image, L: LodStrategy>(
    interaction: &SurfaceInteraction,
    material: &Material<I>,
    flags: MaterialFlags,
    lod: &L,
) -> RgbaF {
    material.channel(
        lod,
        flags.diffuse(),
        material.textures.base_color.as_ref(),
        interaction.uv,
        material.base_color,
    )
}

/// Samples the base color of `material` and runs the alpha test on its alpha
pub fn alpha_test<I: Image, L: LodStrategy>(
    interaction: &SurfaceInteraction,
    material: &Material<I>,
    lod: &L,
    config: &MaterialConfig,
) -> Visibility {
    let flags = config.resolve_flags(material.flags);
    let base_color = sample_base_color(interaction, material, flags, lod);
    eval_alpha_test(
        flags,
        base_color.w,
        material.alpha_threshold,
        interaction.pos_w,
        interaction.derivatives.as_ref(),
        config,
    )
}

/// Resolves the shading state of one fragment.
///
/// Returns `None` if the fragment is discarded by the alpha test. The caller must then stop
/// processing the fragment.
///
/// # Arguments
/// * `interaction` - The surface point being shaded
/// * `material` - The material of the surface
/// * `camera_pos` - World space position of the camera
/// * `lod` - How textures choose their level of detail, see [`crate::lod`]
/// * `config` - Alpha test policy and flag overrides
#[must_use]
pub fn prepare_shading_data<I: Image, L: LodStrategy>(
    interaction: &SurfaceInteraction,
    material: &Material<I>,
    camera_pos: Vec3f,
    lod: &L,
    config: &MaterialConfig,
) -> Option<ShadingData> {
    let flags = config.resolve_flags(material.flags);
    let textures = &material.textures;
    let uv = interaction.uv;

    let base_color = sample_base_color(interaction, material, flags, lod);
    let visibility = eval_alpha_test(
        flags,
        base_color.w,
        material.alpha_threshold,
        interaction.pos_w,
        interaction.derivatives.as_ref(),
        config,
    );
    if visibility.is_discard() {
        log::trace!("discarding fragment at {}", interaction.pos_w);
        return None;
    }

    let (t, b, n) = orthonormal_frame(interaction.normal_w, interaction.bitangent_w);
    let spec = material.channel(
        lod,
        flags.specular(),
        textures.specular.as_ref(),
        uv,
        material.specular,
    );
    let SpecularParams {
        class,
        linear_roughness,
        metalness,
    } = decode_specular(spec);
    let base = base_color.truncate();

    let emissive = material
        .channel(
            lod,
            flags.emissive(),
            textures.emissive.as_ref(),
            uv,
            material.emissive.extend(1.0),
        )
        .truncate();

    let occlusion = match flags.occlusion_map() {
        ChannelMode::Textured => {
            material
                .channel(lod, ChannelMode::Textured, textures.occlusion.as_ref(), uv, RgbaF::ONE)
                .x
        }
        ChannelMode::Unused | ChannelMode::Constant => 1.0,
    };

    let light_map = material
        .channel(
            lod,
            flags.light_map(),
            textures.light_map.as_ref(),
            interaction.light_map_uv,
            RgbaF::ZERO,
        )
        .truncate();

    let height = match flags.height_map() {
        ChannelMode::Textured => {
            let h = material
                .channel(lod, ChannelMode::Textured, textures.height_map.as_ref(), uv, RgbaF::ZERO)
                .x;
            h.mul_add(material.height_scale_offset.x, material.height_scale_offset.y)
        }
        ChannelMode::Unused | ChannelMode::Constant => 0.0,
    };

    let mut sd = ShadingData {
        pos_w: interaction.pos_w,
        v: Vec3f::ZERO,
        n,
        t,
        b,
        uv,
        n_dot_v: 0.0,
        diffuse: base
            .lerp(RgbF::ZERO, metalness)
            .max(RgbF::splat(MIN_DIFFUSE_ALBEDO)),
        opacity: base_color.w,
        specular: RgbF::splat(DIELECTRIC_SPECULAR).lerp(base, metalness),
        linear_roughness,
        roughness: linear_roughness.sq(),
        metalness,
        emissive,
        occlusion,
        light_map,
        height,
        ior: material.ior,
        double_sided: flags.double_sided(),
        material_class: class,
    };

    apply_normal_map(&mut sd, material, flags, lod);

    sd.v = (camera_pos - sd.pos_w).try_normalize().unwrap_or(sd.n);
    sd.n_dot_v = sd.n.dot(sd.v);
    if sd.n_dot_v <= 0.0 && sd.double_sided {
        sd.n = -sd.n;
        sd.t = sd.b.cross(sd.n);
        sd.n_dot_v = -sd.n_dot_v;
    }

    Some(sd)
}
