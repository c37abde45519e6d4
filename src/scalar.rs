use crate::coefficients::pow31;

/// Continues `h = 31 * h + b` over `buf`, starting from `h`.
#[inline]
pub fn fold(mut h: i32, buf: &[u8]) -> i32 {
    for &b in buf {
        h = h.wrapping_mul(31).wrapping_add(b as i8 as i32);
    }
    h
}

const P1: i32 = pow31(1);
const P2: i32 = pow31(2);
const P3: i32 = pow31(3);
const P4: i32 = pow31(4);
const P5: i32 = pow31(5);
const P6: i32 = pow31(6);
const P7: i32 = pow31(7);
const P8: i32 = pow31(8);

/// Eight bytes per step:
///
/// h' = h*31^8 + b0*31^7 + b1*31^6 + ... + b6*31 + b7
///
/// The remaining `len % 8` bytes go through `fold`.
pub fn unrolled(mut h: i32, buf: &[u8]) -> i32 {
    let mut chunks = buf.chunks_exact(8);
    for c in chunks.by_ref() {
        let b = |i: usize| c[i] as i8 as i32;
        h = h
            .wrapping_mul(P8)
            .wrapping_add(b(0).wrapping_mul(P7))
            .wrapping_add(b(1).wrapping_mul(P6))
            .wrapping_add(b(2).wrapping_mul(P5))
            .wrapping_add(b(3).wrapping_mul(P4))
            .wrapping_add(b(4).wrapping_mul(P3))
            .wrapping_add(b(5).wrapping_mul(P2))
            .wrapping_add(b(6).wrapping_mul(P1))
            .wrapping_add(b(7));
    }
    fold(h, chunks.remainder())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fold_known_values() {
        assert_eq!(fold(1, b""), 1);
        assert_eq!(fold(1, b"a"), 128);
        assert_eq!(fold(1, b"abc"), 126145);
        assert_eq!(fold(1, &[0xff]), 30);
        assert_eq!(fold(1, &[0x80]), 31 - 128);
    }

    #[test]
    fn unrolled_matches_fold() {
        let buf: Vec<u8> = (0..100u32).map(|i| (i * 151 + 7) as u8).collect();
        for len in 0..=buf.len() {
            for seed in [0, 1, -1, i32::MAX] {
                assert_eq!(unrolled(seed, &buf[..len]), fold(seed, &buf[..len]));
            }
        }
    }
}
