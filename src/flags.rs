//! The packed material flag word
//!
//! Layout, least significant bit first:
//!
//! | bits  | field                |
//! |-------|----------------------|
//! | 0-1   | diffuse channel      |
//! | 2-3   | specular channel     |
//! | 4-5   | emissive channel     |
//! | 6-7   | normal map type      |
//! | 8     | occlusion map        |
//! | 9     | light map            |
//! | 10    | height map           |
//! | 11    | reserved             |
//! | 12    | alpha mode           |
//! | 13    | double sided         |
//!
//! The layout matches material assets authored for the GPU shaders, so it must not change.

const CHANNEL_BITS: u32 = 2;
const NORMAL_MAP_BITS: u32 = 2;

const DIFFUSE_OFFSET: u32 = 0;
const SPECULAR_OFFSET: u32 = DIFFUSE_OFFSET + CHANNEL_BITS;
const EMISSIVE_OFFSET: u32 = SPECULAR_OFFSET + CHANNEL_BITS;
const NORMAL_MAP_OFFSET: u32 = EMISSIVE_OFFSET + CHANNEL_BITS;
const OCCLUSION_OFFSET: u32 = NORMAL_MAP_OFFSET + NORMAL_MAP_BITS;
const LIGHT_MAP_OFFSET: u32 = OCCLUSION_OFFSET + 1;
const HEIGHT_MAP_OFFSET: u32 = LIGHT_MAP_OFFSET + 1;
const ALPHA_MODE_OFFSET: u32 = HEIGHT_MAP_OFFSET + 2;
const DOUBLE_SIDED_OFFSET: u32 = ALPHA_MODE_OFFSET + 1;

const fn extract(bits: u32, offset: u32, width: u32) -> u32 {
    (bits >> offset) & ((1 << width) - 1)
}

const fn insert(bits: u32, offset: u32, width: u32, value: u32) -> u32 {
    let mask = ((1 << width) - 1) << offset;
    (bits & !mask) | ((value << offset) & mask)
}

/// Where the value of a material channel comes from
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChannelMode {
    /// The channel reads as zero
    #[default]
    Unused,
    /// The constant stored in the material
    Constant,
    /// A texture fetch
    Textured,
}

impl ChannelMode {
    /// The reserved encoding `3` decodes as [`ChannelMode::Unused`]
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        match bits {
            1 => Self::Constant,
            2 => Self::Textured,
            _ => Self::Unused,
        }
    }

    #[must_use]
    pub const fn bits(self) -> u32 {
        match self {
            Self::Unused => 0,
            Self::Constant => 1,
            Self::Textured => 2,
        }
    }

    /// One bit maps: set means textured
    const fn from_map_bit(bit: u32) -> Self {
        if bit == 1 {
            Self::Textured
        } else {
            Self::Unused
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NormalMapType {
    #[default]
    None,
    /// Three channels, `xyz * 2 - 1`
    Rgb,
    /// Two channels, `z` is reconstructed
    Rg,
    /// An encoding this crate does not know. Normal mapping is skipped.
    Unknown,
}

impl NormalMapType {
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        match bits {
            0 => Self::None,
            1 => Self::Rgb,
            2 => Self::Rg,
            _ => Self::Unknown,
        }
    }

    #[must_use]
    pub const fn bits(self) -> u32 {
        match self {
            Self::None => 0,
            Self::Rgb => 1,
            Self::Rg => 2,
            Self::Unknown => 3,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AlphaMode {
    #[default]
    Opaque,
    /// Fragments below the alpha threshold are discarded
    Mask,
}

/// Accessors over the packed flag word of a material
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct MaterialFlags(pub u32);

impl MaterialFlags {
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    #[must_use]
    pub const fn diffuse(self) -> ChannelMode {
        ChannelMode::from_bits(extract(self.0, DIFFUSE_OFFSET, CHANNEL_BITS))
    }

    #[must_use]
    pub const fn specular(self) -> ChannelMode {
        ChannelMode::from_bits(extract(self.0, SPECULAR_OFFSET, CHANNEL_BITS))
    }

    #[must_use]
    pub const fn emissive(self) -> ChannelMode {
        ChannelMode::from_bits(extract(self.0, EMISSIVE_OFFSET, CHANNEL_BITS))
    }

    #[must_use]
    pub const fn normal_map(self) -> NormalMapType {
        NormalMapType::from_bits(extract(self.0, NORMAL_MAP_OFFSET, NORMAL_MAP_BITS))
    }

    #[must_use]
    pub const fn occlusion_map(self) -> ChannelMode {
        ChannelMode::from_map_bit(extract(self.0, OCCLUSION_OFFSET, 1))
    }

    #[must_use]
    pub const fn light_map(self) -> ChannelMode {
        ChannelMode::from_map_bit(extract(self.0, LIGHT_MAP_OFFSET, 1))
    }

    #[must_use]
    pub const fn height_map(self) -> ChannelMode {
        ChannelMode::from_map_bit(extract(self.0, HEIGHT_MAP_OFFSET, 1))
    }

    #[must_use]
    pub const fn alpha_mode(self) -> AlphaMode {
        if extract(self.0, ALPHA_MODE_OFFSET, 1) == 1 {
            AlphaMode::Mask
        } else {
            AlphaMode::Opaque
        }
    }

    #[must_use]
    pub const fn double_sided(self) -> bool {
        extract(self.0, DOUBLE_SIDED_OFFSET, 1) == 1
    }

    #[must_use]
    pub const fn with_diffuse(self, mode: ChannelMode) -> Self {
        Self(insert(self.0, DIFFUSE_OFFSET, CHANNEL_BITS, mode.bits()))
    }

    #[must_use]
    pub const fn with_specular(self, mode: ChannelMode) -> Self {
        Self(insert(self.0, SPECULAR_OFFSET, CHANNEL_BITS, mode.bits()))
    }

    #[must_use]
    pub const fn with_emissive(self, mode: ChannelMode) -> Self {
        Self(insert(self.0, EMISSIVE_OFFSET, CHANNEL_BITS, mode.bits()))
    }

    #[must_use]
    pub const fn with_normal_map(self, ty: NormalMapType) -> Self {
        Self(insert(self.0, NORMAL_MAP_OFFSET, NORMAL_MAP_BITS, ty.bits()))
    }

    #[must_use]
    pub const fn with_occlusion_map(self, enabled: bool) -> Self {
        Self(insert(self.0, OCCLUSION_OFFSET, 1, enabled as u32))
    }

    #[must_use]
    pub const fn with_light_map(self, enabled: bool) -> Self {
        Self(insert(self.0, LIGHT_MAP_OFFSET, 1, enabled as u32))
    }

    #[must_use]
    pub const fn with_height_map(self, enabled: bool) -> Self {
        Self(insert(self.0, HEIGHT_MAP_OFFSET, 1, enabled as u32))
    }

    #[must_use]
    pub const fn with_alpha_mode(self, mode: AlphaMode) -> Self {
        let bit = match mode {
            AlphaMode::Opaque => 0,
            AlphaMode::Mask => 1,
        };
        Self(insert(self.0, ALPHA_MODE_OFFSET, 1, bit))
    }

    #[must_use]
    pub const fn with_double_sided(self, double_sided: bool) -> Self {
        Self(insert(self.0, DOUBLE_SIDED_OFFSET, 1, double_sided as u32))
    }
}
