//! Combines a resolved [`ShadingData`] with a light into a [`ShadingResult`]
use crate::{
    core::{Brdf, Light, LightProbe, LightSample},
    ShadingData, ShadingResult,
};

fn compose<B: Brdf>(sd: &ShadingData, ls: &LightSample, brdf: &B, cos_term: f32) -> ShadingResult {
    let diffuse_brdf = brdf.diffuse(sd, ls);
    let specular_brdf = brdf.specular(sd, ls);
    let diffuse = ls.diffuse * diffuse_brdf * cos_term;
    let specular = ls.specular * specular_brdf * cos_term;
    ShadingResult {
        diffuse_brdf,
        specular_brdf,
        diffuse,
        specular,
        color: (diffuse + specular).extend(sd.opacity),
    }
}

/// Shades `sd` with a single light.
///
/// Returns [`ShadingResult::ZERO`] if the light does not illuminate the surface. `shadow_factor`
/// only scales the rgb part of [`ShadingResult::color`].
#[must_use]
pub fn eval_material<L: Light, B: Brdf>(
    sd: &ShadingData,
    light: &L,
    brdf: &B,
    shadow_factor: f32,
) -> ShadingResult {
    let ls = light.eval(sd);
    if ls.n_dot_l <= 0.0 {
        return ShadingResult::ZERO;
    }

    let mut result = compose(sd, &ls, brdf, ls.n_dot_l);
    let rgb = result.color.truncate() * shadow_factor;
    result.color = rgb.extend(result.color.w);
    result
}

/// Shades `sd` with a light probe. Probes are neither gated on `n_dot_l` nor shadowed.
#[must_use]
pub fn eval_material_probe<P: LightProbe, B: Brdf>(
    sd: &ShadingData,
    probe: &P,
    brdf: &B,
) -> ShadingResult {
    let ls = probe.eval(sd);
    compose(sd, &ls, brdf, 1.0)
}
