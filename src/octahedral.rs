//! Compact storage of unit directions
//!
//! A direction is projected onto the octahedron `|x| + |y| + |z| = 1`, the lower half is folded
//! over the upper one and the resulting point in `[-1, 1]^2` is stored as two IEEE half floats.
//! Decoding is accurate up to half precision quantization, not bit exact.
//!
//! **Note: This code is only available with the `octahedral` feature**
use half::f16;

use crate::{Vec2f, Vec3f};

fn sign_not_zero(v: Vec2f) -> Vec2f {
    Vec2f::new(
        if v.x >= 0.0 { 1.0 } else { -1.0 },
        if v.y >= 0.0 { 1.0 } else { -1.0 },
    )
}

/// Mirrors a point of the lower hemisphere to the outer triangles of the square
fn wrap(v: Vec2f) -> Vec2f {
    (Vec2f::ONE - Vec2f::new(v.y, v.x).abs()) * sign_not_zero(v)
}

/// Maps a direction to `[-1, 1]^2`. The input does not need to be normalized. The zero vector
/// maps to the origin.
#[must_use]
pub fn encode_octahedral_unit(n: Vec3f) -> Vec2f {
    let l1_norm = n.x.abs() + n.y.abs() + n.z.abs();
    if l1_norm <= 0.0 {
        return Vec2f::ZERO;
    }
    let p = Vec2f::new(n.x, n.y) / l1_norm;
    if n.z < 0.0 {
        wrap(p)
    } else {
        p
    }
}

/// Maps a point of `[-1, 1]^2` back to a unit direction
#[must_use]
pub fn decode_octahedral_unit(p: Vec2f) -> Vec3f {
    let p = p.clamp(Vec2f::NEG_ONE, Vec2f::ONE);
    let z = 1.0 - p.x.abs() - p.y.abs();
    let xy = if z < 0.0 { wrap(p) } else { p };
    Vec3f::new(xy.x, xy.y, z).normalize_or_zero()
}

/// Packs a direction into 32 bits: `x` in the low and `y` in the high half, both as
/// half floats
#[must_use]
pub fn encode_octahedral(n: Vec3f) -> u32 {
    let p = encode_octahedral_unit(n);
    let x = u32::from(f16::from_f32(p.x).to_bits());
    let y = u32::from(f16::from_f32(p.y).to_bits());
    x | (y << 16)
}

/// Inverse of [`encode_octahedral`]
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn decode_octahedral(code: u32) -> Vec3f {
    let x = f16::from_bits((code & 0xffff) as u16).to_f32();
    let y = f16::from_bits((code >> 16) as u16).to_f32();
    decode_octahedral_unit(Vec2f::new(x, y))
}
