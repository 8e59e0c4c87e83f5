#![warn(clippy::pedantic)]
#![warn(clippy::perf)]
#![warn(clippy::nursery)]
#![warn(clippy::suboptimal_flops)]
#![deny(clippy::return_self_not_must_use)]
#![allow(clippy::similar_names)]
#![deny(clippy::semicolon_if_nothing_returned)]
#![deny(clippy::must_use_candidate)]
#![deny(clippy::double_must_use)]
#![deny(clippy::use_self)]
#![deny(clippy::unreadable_literal)]
#![deny(clippy::explicit_iter_loop)]
// these are lints to enable later
#![allow(clippy::cast_lossless)]

//! This crate covers the per-fragment part of a material system: decoding a material into a
//! shading state, alpha testing it and composing the result of a light. Furthermore, the Monte
//! Carlo sampling primitives a renderer needs around it are provided.
//!
//! # Design Decisions
//! **NOTE: This crate is pretty much in alpha state. Therefore a lot of the following things may
//! or may not change in the future**
//!
//! The crate does not own any GPU or image resources. Texture fetches, lights, light probes and
//! the BRDFs themselves are supplied by the host through the traits in this crate ([`Image`],
//! [`Light`], [`LightProbe`] and [`Brdf`]). Full BRDF models are **not implemented** here.
//!
//! Sampling calculations are done in [f64]s, while material parameters and everything that is
//! decoded from textures are stored as [f32]s. Conversions happen at the boundary, e.g. the
//! shading frame fallback in [`material`] builds on [`sampling::perpendicular`].
//!
//! Every function is a pure computation over its inputs. The only mutable state is the random
//! number generator in [`rng`], which is owned by the caller and must not be shared between
//! concurrently shaded fragments.
//!
//! The `n_dot_l` term is not part of a [`Brdf`] weight. [`shading::eval_material`] multiplies it
//! in.
//!
//! Alpha tested fragments are not discarded by a side effect. [`alpha_test::eval_alpha_test`]
//! returns a [`alpha_test::Visibility`] and [`material::prepare_shading_data`] returns `None`
//! for discarded fragments. The caller must stop processing them.
//!
//! `sample_...` functions are deterministic. That means you are responsible for generating [f64] in the
//! range of `0.0..1.0`. This allows you to control the sampling process and the random generator
//! or low discrepancy sequence in use. These random floats are passed as a [Vec2d].
//!
//! # Features
//! * `sequences` (default): [`rng`] and [`low_discrepancy`]
//! * `octahedral` (default): [`octahedral`] direction packing, pulls in [half]
//! * `serde`: `Serialize`/`Deserialize` for the configuration types
//!
//! This crate is built on [glam] for a simple but fast vector math library at the core.
//!
//! # References
//! * Chris Wyman and Morgan McGuire. Hashed alpha testing. In *Proceedings of the 21st ACM
//!     SIGGRAPH Symposium on Interactive 3D Graphics and Games,* 2017.
//! * Eric Veach. *Robust monte carlo methods for light transport simulation.* PhD thesis, Stanford University, 1997.
//! * Bruce Walter, Stephen R. Marschner, Hongsong Li, and Kenneth E. Torrance. Microfacet models for refraction through rough surfaces. In *Proceedings of the Eurographics Symposium on Rendering,* 2007.
//! * Zina H. Cigolle, Sam Donow, Daniel Evangelakos, Michael Mara, Morgan McGuire, and Quirin
//!     Meyer. A survey of efficient representations for independent unit vectors. *Journal of
//!     Computer Graphics Techniques (JCGT)*, vol. 3, no. 2, 1–30, 2014.
//!     <http://jcgt.org/published/0003/02/01/>
//! * Fahad Zafar, Marc Olano, and Aaron Curtis. GPU random numbers via the tiny encryption
//!     algorithm. In *Proceedings of the Conference on High Performance Graphics,* 2010.
//! * Michael M. Stark. Efficient construction of perpendicular vectors without branching.
//!     *Journal of Graphics, GPU, and Game Tools,* 14(1):55–62, 2009.

mod core;

pub use crate::core::{
    AddressMode, Brdf, Filter, Image, Light, LightProbe, LightSample, MaterialClass, RgbF, RgbaF,
    SamplerState, ShadingData, ShadingResult, Vec2d, Vec2f, Vec3d, Vec3f, MIN_DIFFUSE_ALBEDO,
    MIN_LINEAR_ROUGHNESS,
};

#[cfg(test)]
pub(crate) mod test_utils;
pub(crate) mod utils;

pub mod config;
pub mod flags;
pub mod lod;
pub mod material;
pub mod sampling;
pub mod shading;

#[cfg(feature = "sequences")]
pub mod low_discrepancy;
#[cfg(feature = "sequences")]
pub mod rng;

#[cfg(feature = "octahedral")]
pub mod octahedral;
