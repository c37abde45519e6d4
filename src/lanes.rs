use core::ops::{Add, Mul};

/// `W` signed 32-bit lanes with wrapping arithmetic.
///
/// This is the portable stand-in for a 256-bit integer vector (`W = 8`).
/// Every operation is a fixed-length loop over the lanes, so the compiler
/// unrolls it and usually maps it onto native vector instructions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(transparent)]
pub struct Lanes<const W: usize>([i32; W]);

impl<const W: usize> Lanes<W> {
    pub const ZERO: Self = Self([0; W]);

    #[inline(always)]
    pub const fn from_array(lanes: [i32; W]) -> Self {
        Self(lanes)
    }

    #[inline(always)]
    pub const fn to_array(self) -> [i32; W] {
        self.0
    }

    /// The same value in every lane.
    #[inline(always)]
    pub const fn splat(v: i32) -> Self {
        Self([v; W])
    }

    /// `[h, 0, 0, ..., 0]`: a scalar accumulator embedded in lane 0.
    ///
    /// Multiplying by a broadcast step and summing the lanes afterwards gives
    /// the same result as advancing `h` as a scalar.
    #[inline(always)]
    pub const fn seed(h: i32) -> Self {
        let mut lanes = [0; W];
        lanes[0] = h;
        Self(lanes)
    }

    /// Sign-extends the first `W` bytes of `bytes` into the lanes.
    ///
    /// # Panics
    ///
    /// Panics if `bytes` is shorter than `W`.
    #[inline(always)]
    pub fn load(bytes: &[u8]) -> Self {
        assert!(bytes.len() >= W, "need at least W bytes to load");
        let mut lanes = [0; W];
        for (lane, &b) in lanes.iter_mut().zip(&bytes[..W]) {
            *lane = b as i8 as i32;
        }
        Self(lanes)
    }

    /// Horizontal sum of all lanes, mod 2^32.
    #[inline(always)]
    pub fn reduce_add(self) -> i32 {
        self.0.iter().fold(0i32, |acc, &x| acc.wrapping_add(x))
    }
}

impl<const W: usize> Mul for Lanes<W> {
    type Output = Self;

    #[inline(always)]
    fn mul(mut self, rhs: Self) -> Self {
        for (a, b) in self.0.iter_mut().zip(rhs.0) {
            *a = a.wrapping_mul(b);
        }
        self
    }
}

impl<const W: usize> Add for Lanes<W> {
    type Output = Self;

    #[inline(always)]
    fn add(mut self, rhs: Self) -> Self {
        for (a, b) in self.0.iter_mut().zip(rhs.0) {
            *a = a.wrapping_add(b);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_sign_extends() {
        let x = Lanes::<4>::load(&[0x00, 0x7f, 0x80, 0xff, 0x42]);
        assert_eq!(x.to_array(), [0, 127, -128, -1]);
    }

    #[test]
    #[should_panic(expected = "need at least W bytes to load")]
    fn load_short_input() {
        Lanes::<8>::load(&[1, 2, 3]);
    }

    #[test]
    fn arithmetic_wraps() {
        let a = Lanes::<2>::from_array([i32::MAX, i32::MIN]);
        assert_eq!((a + Lanes::splat(1)).to_array(), [i32::MIN, i32::MIN + 1]);
        assert_eq!((a * Lanes::splat(2)).to_array(), [-2, 0]);
        assert_eq!(Lanes::<3>::splat(i32::MAX).reduce_add(), i32::MAX.wrapping_mul(3));
    }

    #[test]
    fn seed_occupies_lane_zero() {
        assert_eq!(Lanes::<4>::seed(7).to_array(), [7, 0, 0, 0]);
        assert_eq!(Lanes::<4>::seed(7).reduce_add(), 7);
        assert_eq!(Lanes::<4>::ZERO.reduce_add(), 0);
    }
}
