//! Lane-parallel kernels.
//!
//! The hash is a polynomial in 31:
//!
//! ```text
//! h = 31^l
//!   + 31^(l - 1) * a[0]
//!   + 31^(l - 2) * a[1]
//!   + ...
//!   + 31 * a[l - 2]
//!   + a[l - 1]
//! ```
//!
//! so a block of `W` bytes can be weighted by `W` consecutive powers in
//! parallel, and the state carried so far only has to be multiplied by
//! 31^W to make room for it. Each kernel consumes whole blocks and hands the
//! remaining `len % block` bytes to the scalar fold.

use crate::coefficients::Coefficients;
use crate::lanes::Lanes;
use crate::scalar::fold;

/// One horizontal reduction per block; the accumulator stays scalar.
pub fn reduce_per_iter<const W: usize>(c: &Coefficients<W>, seed: i32, buf: &[u8]) -> i32 {
    let step = c.step_x1();
    let weights = *c.weights(3);
    let mut h = seed;
    let mut blocks = buf.chunks_exact(W);
    for block in blocks.by_ref() {
        let x = Lanes::<W>::load(block);
        h = h.wrapping_mul(step).wrapping_add((x * weights).reduce_add());
    }
    fold(h, blocks.remainder())
}

/// The accumulator stays in lanes until every block has been consumed.
pub fn deferred<const W: usize>(c: &Coefficients<W>, seed: i32, buf: &[u8]) -> i32 {
    let step = Lanes::<W>::splat(c.step_x1());
    let weights = *c.weights(3);
    let mut h = Lanes::<W>::seed(seed);
    let mut blocks = buf.chunks_exact(W);
    for block in blocks.by_ref() {
        let x = Lanes::<W>::load(block);
        h = h * step + x * weights;
    }
    fold(h.reduce_add(), blocks.remainder())
}

/// Two independent accumulators over `2W`-byte macro-blocks.
///
/// `h1` takes the first half of every macro-block with 31^(2W-1) .. 31^W,
/// `h2` the second half with 31^(W-1) .. 31^0. Both advance by 31^(2W), so
/// their sum is the single-accumulator state.
pub fn dual<const W: usize>(c: &Coefficients<W>, seed: i32, buf: &[u8]) -> i32 {
    let step = Lanes::<W>::splat(c.step_x2());
    let (w1, w2) = (*c.weights(2), *c.weights(3));
    let mut h1 = Lanes::<W>::seed(seed);
    let mut h2 = Lanes::<W>::ZERO;
    let mut blocks = buf.chunks_exact(2 * W);
    for block in blocks.by_ref() {
        let x = Lanes::<W>::load(block);
        h1 = h1 * step + x * w1;

        let x = Lanes::<W>::load(&block[W..]);
        h2 = h2 * step + x * w2;
    }
    let h = h1.reduce_add().wrapping_add(h2.reduce_add());
    fold(h, blocks.remainder())
}

/// Four independent accumulators over `4W`-byte macro-blocks.
///
/// Quarter `q` of a macro-block is weighted by `weights(q)`, i.e.
/// 31^(4W-1-qW) .. 31^(3W-qW), and every accumulator advances by 31^(4W).
pub fn quad<const W: usize>(c: &Coefficients<W>, seed: i32, buf: &[u8]) -> i32 {
    let step = Lanes::<W>::splat(c.step_x4());
    let (w1, w2, w3, w4) = (*c.weights(0), *c.weights(1), *c.weights(2), *c.weights(3));
    let mut h1 = Lanes::<W>::seed(seed);
    let mut h2 = Lanes::<W>::ZERO;
    let mut h3 = Lanes::<W>::ZERO;
    let mut h4 = Lanes::<W>::ZERO;
    let mut blocks = buf.chunks_exact(4 * W);
    for block in blocks.by_ref() {
        let x = Lanes::<W>::load(block);
        h1 = h1 * step + x * w1;

        let x = Lanes::<W>::load(&block[W..]);
        h2 = h2 * step + x * w2;

        let x = Lanes::<W>::load(&block[2 * W..]);
        h3 = h3 * step + x * w3;

        let x = Lanes::<W>::load(&block[3 * W..]);
        h4 = h4 * step + x * w4;
    }
    let h = h1
        .reduce_add()
        .wrapping_add(h2.reduce_add())
        .wrapping_add(h3.reduce_add())
        .wrapping_add(h4.reduce_add());
    fold(h, blocks.remainder())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(len: usize) -> Vec<u8> {
        let mut x = 0x9e3779b9u32;
        (0..len)
            .map(|_| {
                x ^= x << 13;
                x ^= x >> 17;
                x ^= x << 5;
                x as u8
            })
            .collect()
    }

    fn check_width<const W: usize>() {
        let c = Coefficients::<W>::new();
        let buf = data(12 * W + 3);
        for len in 0..=buf.len() {
            let buf = &buf[..len];
            for seed in [1, 0, -7] {
                let expected = fold(seed, buf);
                assert_eq!(reduce_per_iter(&c, seed, buf), expected, "W={} len={}", W, len);
                assert_eq!(deferred(&c, seed, buf), expected, "W={} len={}", W, len);
                assert_eq!(dual(&c, seed, buf), expected, "W={} len={}", W, len);
                assert_eq!(quad(&c, seed, buf), expected, "W={} len={}", W, len);
            }
        }
    }

    #[test]
    fn eight_lanes() {
        check_width::<8>();
    }

    #[test]
    fn narrower_and_wider_loads() {
        check_width::<1>();
        check_width::<4>();
        check_width::<16>();
    }

    #[test]
    fn extreme_bytes() {
        let c = Coefficients::<8>::new();
        for fill in [0x00u8, 0x7f, 0x80, 0xff] {
            let buf = vec![fill; 257];
            let expected = fold(1, &buf);
            assert_eq!(deferred(&c, 1, &buf), expected);
            assert_eq!(dual(&c, 1, &buf), expected);
            assert_eq!(quad(&c, 1, &buf), expected);
        }
    }
}
