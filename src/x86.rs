#[cfg(target_arch = "x86")]
use core::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;

use crate::scalar::fold;
use crate::{COEFFICIENTS, LANES};

const MACRO_BLOCK: usize = 4 * LANES;

#[inline]
#[target_feature(enable = "avx2")]
unsafe fn load_weights(o: usize) -> __m256i {
    let w = COEFFICIENTS.weights(o).to_array();
    _mm256_loadu_si256(w.as_ptr() as *const __m256i)
}

// 8 bytes, sign-extended to 8 x i32 (vpmovsxbd).
#[inline]
#[target_feature(enable = "avx2")]
unsafe fn load_bytes(p: *const u8) -> __m256i {
    _mm256_cvtepi8_epi32(_mm_loadl_epi64(p as *const __m128i))
}

#[inline]
#[target_feature(enable = "avx2")]
unsafe fn reduce_add(v: __m256i) -> i32 {
    let s = _mm_add_epi32(_mm256_castsi256_si128(v), _mm256_extracti128_si256::<1>(v));
    let s = _mm_add_epi32(s, _mm_shuffle_epi32::<0b01_00_11_10>(s));
    let s = _mm_add_epi32(s, _mm_shuffle_epi32::<0b10_11_00_01>(s));
    _mm_cvtsi128_si32(s)
}

/// Four-accumulator kernel on 256-bit registers.
///
/// Same arithmetic as `vector::quad` with `W = 8`; each macro-block is four
/// 8-byte loads widened to 8 lanes.
///
/// # Safety
///
/// The CPU must support AVX2.
#[target_feature(enable = "avx2")]
pub unsafe fn hash_quad_avx2(seed: i32, buf: &[u8]) -> i32 {
    let step = _mm256_set1_epi32(COEFFICIENTS.step_x4());
    let w1 = load_weights(0);
    let w2 = load_weights(1);
    let w3 = load_weights(2);
    let w4 = load_weights(3);

    let mut h1 = _mm256_setr_epi32(seed, 0, 0, 0, 0, 0, 0, 0);
    let mut h2 = _mm256_setzero_si256();
    let mut h3 = _mm256_setzero_si256();
    let mut h4 = _mm256_setzero_si256();

    let mut blocks = buf.chunks_exact(MACRO_BLOCK);
    for block in blocks.by_ref() {
        let p = block.as_ptr();
        let x = load_bytes(p);
        h1 = _mm256_add_epi32(_mm256_mullo_epi32(h1, step), _mm256_mullo_epi32(x, w1));
        let x = load_bytes(p.add(LANES));
        h2 = _mm256_add_epi32(_mm256_mullo_epi32(h2, step), _mm256_mullo_epi32(x, w2));
        let x = load_bytes(p.add(2 * LANES));
        h3 = _mm256_add_epi32(_mm256_mullo_epi32(h3, step), _mm256_mullo_epi32(x, w3));
        let x = load_bytes(p.add(3 * LANES));
        h4 = _mm256_add_epi32(_mm256_mullo_epi32(h4, step), _mm256_mullo_epi32(x, w4));
    }

    let h = reduce_add(h1)
        .wrapping_add(reduce_add(h2))
        .wrapping_add(reduce_add(h3))
        .wrapping_add(reduce_add(h4));
    fold(h, blocks.remainder())
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;

    #[test]
    fn matches_scalar() {
        if !is_x86_feature_detected!("avx2") {
            return;
        }
        let buf: Vec<u8> = (0..1000u32).map(|i| (i.wrapping_mul(2654435761) >> 13) as u8).collect();
        for len in 0..=buf.len() {
            let got = unsafe { hash_quad_avx2(1, &buf[..len]) };
            assert_eq!(got, fold(1, &buf[..len]), "len={}", len);
        }
        let ones = vec![0xffu8; 300];
        assert_eq!(unsafe { hash_quad_avx2(-3, &ones) }, fold(-3, &ones));
    }
}
