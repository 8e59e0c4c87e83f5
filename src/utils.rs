pub trait FloatExt {
    #[must_use]
    fn sq(self) -> Self;
    #[must_use]
    fn lerp(self, other: Self, t: Self) -> Self;
    /// Clamps to `[0, 1]`
    #[must_use]
    fn saturate(self) -> Self;
    /// `self - floor(self)`, always in `[0, 1)` for finite inputs
    #[must_use]
    fn frac(self) -> Self;
}

macro_rules! impl_float_ext {
    ($scalar:ty) => {
        impl FloatExt for $scalar {
            fn sq(self) -> Self {
                self * self
            }

            fn lerp(self, other: Self, t: Self) -> Self {
                #[allow(clippy::suboptimal_flops)]
                {
                    self * (1.0 - t) + other * t
                }
            }

            fn saturate(self) -> Self {
                self.clamp(0.0, 1.0)
            }

            fn frac(self) -> Self {
                let f = self - self.floor();
                // tiny negative inputs round up to exactly 1.0
                if f >= 1.0 {
                    0.0
                } else {
                    f
                }
            }
        }
    };
}

impl_float_ext!(f32);
impl_float_ext!(f64);
