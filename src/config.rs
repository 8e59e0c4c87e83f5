//! Options that a shader build would bake in as defines
use std::{fmt, str::FromStr};

use crate::flags::MaterialFlags;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown alpha test policy `{0}`, expected one of `basic`, `hashed-isotropic`, `hashed-anisotropic`")]
    UnknownAlphaTestPolicy(String),
    #[error("hashed alpha scale must be finite and positive, got {0}")]
    InvalidHashScale(f32),
}

/// How alpha masked materials decide visibility
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum AlphaTestPolicy {
    /// Compare against the material threshold. Works in every context, including ray tracing.
    Basic,
    /// Hashed alpha testing with one noise scale per fragment. Needs screen space derivatives.
    #[default]
    HashedIsotropic,
    /// Hashed alpha testing with a noise scale per axis. Needs screen space derivatives.
    HashedAnisotropic,
}

impl AlphaTestPolicy {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::HashedIsotropic => "hashed-isotropic",
            Self::HashedAnisotropic => "hashed-anisotropic",
        }
    }
}

impl fmt::Display for AlphaTestPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AlphaTestPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let policy = match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Self::Basic,
            "hashed" | "hashed-isotropic" => Self::HashedIsotropic,
            "hashed-anisotropic" => Self::HashedAnisotropic,
            _ => return Err(ConfigError::UnknownAlphaTestPolicy(s.to_owned())),
        };
        log::debug!("alpha test policy: {policy}");
        Ok(policy)
    }
}

/// Configuration shared by every material evaluation of a pass
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MaterialConfig {
    pub alpha_test: AlphaTestPolicy,
    /// Scales the noise of hashed alpha testing. Larger values give finer noise.
    pub hashed_alpha_scale: f32,
    /// Used instead of the flags of every material
    pub flags_override: Option<MaterialFlags>,
    pub alpha_test_disabled: bool,
}

impl Default for MaterialConfig {
    fn default() -> Self {
        Self {
            alpha_test: AlphaTestPolicy::default(),
            hashed_alpha_scale: 1.0,
            flags_override: None,
            alpha_test_disabled: false,
        }
    }
}

impl MaterialConfig {
    #[must_use]
    pub fn with_alpha_test(self, alpha_test: AlphaTestPolicy) -> Self {
        log::debug!("alpha test policy: {alpha_test}");
        Self { alpha_test, ..self }
    }

    /// # Errors
    /// [`ConfigError::InvalidHashScale`] if `scale` is not finite or not positive
    pub fn with_hashed_alpha_scale(self, scale: f32) -> Result<Self, ConfigError> {
        if !scale.is_finite() || scale <= 0.0 {
            log::warn!("rejecting hashed alpha scale {scale}");
            return Err(ConfigError::InvalidHashScale(scale));
        }
        log::debug!("hashed alpha scale: {scale}");
        Ok(Self {
            hashed_alpha_scale: scale,
            ..self
        })
    }

    #[must_use]
    pub fn with_flags_override(self, flags: MaterialFlags) -> Self {
        log::debug!("overriding material flags with {:#x}", flags.bits());
        Self {
            flags_override: Some(flags),
            ..self
        }
    }

    #[must_use]
    pub fn without_alpha_test(self) -> Self {
        log::debug!("alpha test disabled");
        Self {
            alpha_test_disabled: true,
            ..self
        }
    }

    /// The flags a material with `flags` is evaluated with
    #[must_use]
    pub fn resolve_flags(&self, flags: MaterialFlags) -> MaterialFlags {
        self.flags_override.unwrap_or(flags)
    }

    /// The hash scale with invalid values, e.g. from deserialized configs, replaced by `1.0`
    #[must_use]
    pub fn effective_hash_scale(&self) -> f32 {
        if self.hashed_alpha_scale.is_finite() && self.hashed_alpha_scale > 0.0 {
            self.hashed_alpha_scale
        } else {
            1.0
        }
    }
}
