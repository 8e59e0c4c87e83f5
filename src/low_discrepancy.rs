//! Low discrepancy point sets and sequences in `[0, 1)^2`
//!
//! **Note: This code is only available with the `sequences` feature**
use crate::Vec2d;

/// `2^-32`
const INV_2_POW_32: f64 = 2.328_306_436_538_696_3e-10;

/// Base 2 radical inverse, the van der Corput sequence
#[must_use]
pub fn radical_inverse(i: u32) -> f64 {
    f64::from(i.reverse_bits()) * INV_2_POW_32
}

/// The `i`-th point of a Hammersley set with `n` points. Unlike [`Halton23`] this is a fixed
/// set addressed by index, the points are only well distributed when all `n` are used.
#[must_use]
pub fn hammersley(i: u32, n: u32) -> Vec2d {
    Vec2d::new(f64::from(i) / f64::from(n.max(1)), radical_inverse(i))
}

/// The `index`-th element of the van der Corput sequence in the given base. Bases below 2 are
/// treated as 2.
#[must_use]
pub fn halton(base: u32, index: u32) -> f64 {
    let base = base.max(2);
    let inv_base = 1.0 / f64::from(base);
    let mut f = 1.0;
    let mut result = 0.0;
    let mut i = index;
    while i > 0 {
        f *= inv_base;
        result += f * f64::from(i % base);
        i /= base;
    }
    result
}

/// The 2D Halton point for bases 2 and 3 at `index`. Does not advance anything.
#[must_use]
pub fn halton23_fixed(index: u32) -> Vec2d {
    Vec2d::new(halton(2, index), halton(3, index))
}

/// Returns the point at `index` and advances `index` by one
pub fn halton23(index: &mut u32) -> Vec2d {
    let point = halton23_fixed(*index);
    *index = index.wrapping_add(1);
    point
}

/// An infinite, restartable 2D Halton sequence
///
/// ```
/// use shading_core::low_discrepancy::{halton23_fixed, Halton23};
///
/// let mut seq = Halton23::new();
/// let first: Vec<_> = seq.by_ref().take(4).collect();
/// assert_eq!(first[3], halton23_fixed(3));
/// seq.reset();
/// assert_eq!(seq.next(), Some(halton23_fixed(0)));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Halton23 {
    index: u32,
}

impl Halton23 {
    #[must_use]
    pub const fn new() -> Self {
        Self { index: 0 }
    }

    #[must_use]
    pub const fn with_index(index: u32) -> Self {
        Self { index }
    }

    /// The index of the point the next draw returns
    #[must_use]
    pub const fn index(&self) -> u32 {
        self.index
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }
}

impl Iterator for Halton23 {
    type Item = Vec2d;

    fn next(&mut self) -> Option<Self::Item> {
        Some(halton23(&mut self.index))
    }
}

#[cfg(test)]
mod tests {
    use super::{halton, halton23, halton23_fixed, hammersley, radical_inverse, Halton23};
    use crate::{test_utils::assert_eq_approx_abs, Vec2d};

    /// Star discrepancy estimate over anchored boxes `[0,x) x [0,y)` on a grid
    fn grid_discrepancy(points: &[Vec2d]) -> f64 {
        let steps = 32;
        let n = points.len() as f64;
        let mut worst: f64 = 0.0;
        for ix in 1..=steps {
            for iy in 1..=steps {
                let x = f64::from(ix) / f64::from(steps);
                let y = f64::from(iy) / f64::from(steps);
                let inside = points.iter().filter(|p| p.x < x && p.y < y).count() as f64;
                worst = worst.max((inside / n - x * y).abs());
            }
        }
        worst
    }

    #[test]
    fn radical_inverse_values() {
        assert_eq!(radical_inverse(0), 0.0);
        assert_eq!(radical_inverse(1), 0.5);
        assert_eq!(radical_inverse(2), 0.25);
        assert_eq!(radical_inverse(3), 0.75);
        assert_eq!(radical_inverse(4), 0.125);
        assert!(radical_inverse(u32::MAX) < 1.0);
    }

    #[test]
    fn halton_matches_radical_inverse_in_base_2() {
        for i in 0..1024 {
            assert_eq_approx_abs!(halton(2, i), radical_inverse(i), 1e-12);
        }
        assert_eq_approx_abs!(halton(3, 1), 1.0 / 3.0, 1e-12);
        assert_eq_approx_abs!(halton(3, 5), 2.0 / 3.0 + 1.0 / 9.0, 1e-12);
    }

    #[test]
    fn halton23_advances_by_one() {
        let mut index = 5;
        let p = halton23(&mut index);
        assert_eq!(index, 6);
        assert_eq!(p, halton23_fixed(5));

        let mut seq = Halton23::with_index(5);
        assert_eq!(seq.next(), Some(p));
        assert_eq!(seq.index(), 6);
    }

    #[test]
    fn halton23_resumes_after_partial_take() {
        let mut seq = Halton23::new();
        assert_eq!(seq.by_ref().take(4).count(), 4);
        assert_eq!(seq.index(), 4);
        assert_eq!(seq.next(), Some(halton23_fixed(4)));
    }

    #[test]
    fn hammersley_points_are_distinct_and_well_spread() {
        let n = 256;
        let points: Vec<Vec2d> = (0..n).map(|i| hammersley(i, n)).collect();
        for (i, a) in points.iter().enumerate() {
            assert!(a.x >= 0.0 && a.x < 1.0 && a.y >= 0.0 && a.y < 1.0);
            for b in &points[i + 1..] {
                assert_ne!(a, b);
            }
        }

        let mut rd = fastrand::Rng::with_seed(0x5eed);
        let random_best = (0..16)
            .map(|_| {
                let random: Vec<Vec2d> = (0..n).map(|_| Vec2d::new(rd.f64(), rd.f64())).collect();
                grid_discrepancy(&random)
            })
            .fold(f64::INFINITY, f64::min);

        let hammersley_discrepancy = grid_discrepancy(&points);
        assert!(
            hammersley_discrepancy < random_best,
            "hammersley: {hammersley_discrepancy}, best of random: {random_best}"
        );
    }

    #[test]
    fn halton_sequence_is_well_spread() {
        let points: Vec<Vec2d> = Halton23::new().skip(1).take(256).collect();
        assert!(grid_discrepancy(&points) < 0.04);
    }
}
