//! The 31-based polynomial byte hash.
//!
//! Every function in this crate computes
//!
//! ```text
//! h = 1
//! for b in bytes: h = 31 * h + (b as i8)
//! ```
//!
//! with 32-bit wrapping arithmetic, i.e. `31^l + sum(b[i] * 31^(l-1-i))`
//! mod 2^32. Bytes are sign-extended, so the values agree bit for bit with
//! the classic `hashCode` of a signed byte array.
//!
//! The variants differ only in how they get there: a scalar fold, an 8-way
//! unrolled fold, and four lane-parallel kernels that trade horizontal
//! reductions for independent accumulators. [`hash`] picks the fastest one
//! available on the running CPU.

#![cfg_attr(not(any(feature = "std", test)), no_std)]

use core::hash::{BuildHasherDefault, Hasher};

mod coefficients;
mod lanes;
mod scalar;
mod vector;
#[cfg(all(
    any(target_arch = "x86", target_arch = "x86_64"),
    any(feature = "std", target_feature = "avx2")
))]
mod x86;

pub use coefficients::{pow31, Coefficients};
pub use lanes::Lanes;

/// Number of 32-bit lanes used by the vector kernels.
pub const LANES: usize = 8;

/// Coefficient table shared by every hash call.
pub static COEFFICIENTS: Coefficients<LANES> = Coefficients::new();

/// Scalar reference: `h = 31 * h + b` over every byte.
pub fn hash_scalar(buf: impl AsRef<[u8]>) -> i32 {
    scalar::fold(1, buf.as_ref())
}

/// Eight bytes per step with the powers of 31 spelled out.
pub fn hash_unrolled(buf: impl AsRef<[u8]>) -> i32 {
    scalar::unrolled(1, buf.as_ref())
}

/// One block of [`LANES`] bytes per step, reduced to a scalar every step.
pub fn hash_vec_reduce_per_iter(buf: impl AsRef<[u8]>) -> i32 {
    vector::reduce_per_iter(&COEFFICIENTS, 1, buf.as_ref())
}

/// One block per step, lanes reduced once at the end.
pub fn hash_vec_deferred(buf: impl AsRef<[u8]>) -> i32 {
    vector::deferred(&COEFFICIENTS, 1, buf.as_ref())
}

/// Two blocks per step into two independent accumulators.
pub fn hash_vec_dual(buf: impl AsRef<[u8]>) -> i32 {
    vector::dual(&COEFFICIENTS, 1, buf.as_ref())
}

/// Four blocks per step into four independent accumulators.
pub fn hash_vec_quad(buf: impl AsRef<[u8]>) -> i32 {
    vector::quad(&COEFFICIENTS, 1, buf.as_ref())
}

/// Hashes `buf` with the fastest kernel available on this CPU.
pub fn hash(buf: impl AsRef<[u8]>) -> i32 {
    hash_from(1, buf.as_ref())
}

/// The hash of `a ++ b`, given `hash(a)`, `hash(b)` and `b.len()`.
pub const fn combine(h_a: i32, h_b: i32, len_b: u64) -> i32 {
    h_a.wrapping_sub(1)
        .wrapping_mul(pow31(len_b))
        .wrapping_add(h_b)
}

type HashFn = unsafe fn(i32, &[u8]) -> i32;

#[cfg(any(
    feature = "std",
    not(all(
        any(target_arch = "x86", target_arch = "x86_64"),
        target_feature = "avx2"
    ))
))]
fn hash_portable(seed: i32, buf: &[u8]) -> i32 {
    vector::quad(&COEFFICIENTS, seed, buf)
}

#[cfg(feature = "std")]
fn select() -> HashFn {
    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    {
        if std::is_x86_feature_detected!("avx2") {
            return x86::hash_quad_avx2;
        }
    }
    hash_portable
}

#[inline]
fn hash_from(seed: i32, buf: &[u8]) -> i32 {
    #[cfg(feature = "std")]
    let func: HashFn = {
        static IMPL: std::sync::OnceLock<HashFn> = std::sync::OnceLock::new();
        *IMPL.get_or_init(select)
    };

    #[cfg(all(
        not(feature = "std"),
        any(target_arch = "x86", target_arch = "x86_64"),
        target_feature = "avx2"
    ))]
    let func: HashFn = x86::hash_quad_avx2;

    #[cfg(all(
        not(feature = "std"),
        not(all(
            any(target_arch = "x86", target_arch = "x86_64"),
            target_feature = "avx2"
        ))
    ))]
    let func: HashFn = hash_portable;

    unsafe { func(seed, buf) }
}

/// Incremental hashing: any split of the input gives the same result as
/// hashing it in one piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hashcode31 {
    h: i32,
}

impl Hashcode31 {
    pub const fn new() -> Self {
        Self { h: 1 }
    }

    pub fn update(&mut self, buf: impl AsRef<[u8]>) {
        self.h = hash_from(self.h, buf.as_ref());
    }

    pub const fn finalize(&self) -> i32 {
        self.h
    }
}

impl Default for Hashcode31 {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher for Hashcode31 {
    fn write(&mut self, bytes: &[u8]) {
        self.update(bytes);
    }

    fn finish(&self) -> u64 {
        self.h as u32 as u64
    }
}

pub type BuildHashcode31 = BuildHasherDefault<Hashcode31>;

/// The hashing strategies, in order of the reference measurements.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Variant {
    Scalar,
    Unrolled,
    VecReducePerIter,
    VecDeferred,
    VecDual,
    VecQuad,
}

impl Variant {
    pub const ALL: [Variant; 6] = [
        Variant::Scalar,
        Variant::Unrolled,
        Variant::VecReducePerIter,
        Variant::VecDeferred,
        Variant::VecDual,
        Variant::VecQuad,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Variant::Scalar => "scalar",
            Variant::Unrolled => "unrolled",
            Variant::VecReducePerIter => "vec_reduce_per_iter",
            Variant::VecDeferred => "vec_deferred",
            Variant::VecDual => "vec_dual",
            Variant::VecQuad => "vec_quad",
        }
    }

    pub fn hash(self, buf: impl AsRef<[u8]>) -> i32 {
        let buf = buf.as_ref();
        match self {
            Variant::Scalar => hash_scalar(buf),
            Variant::Unrolled => hash_unrolled(buf),
            Variant::VecReducePerIter => hash_vec_reduce_per_iter(buf),
            Variant::VecDeferred => hash_vec_deferred(buf),
            Variant::VecDual => hash_vec_dual(buf),
            Variant::VecQuad => hash_vec_quad(buf),
        }
    }
}

#[test]
fn test() {
    let mut t: u64 = 0;

    for i in 0..256u32 {
        let mut size = 1;
        loop {
            let mut m = vec![0u8; size];
            m.iter_mut()
                .enumerate()
                .for_each(|(j, x)| *x = (i as usize ^ j) as u8);
            let res = hash(&m);
            for v in Variant::ALL {
                assert_eq!(v.hash(&m), res, "{} size={}", v.name(), size);
            }
            t = t.wrapping_add(res as u32 as u64);
            if size >= 4096 {
                break;
            }
            size = size * 3 + 1;
        }
    }

    assert_eq!(t, 0x4428d591c80);
}

#[cfg(feature = "std")]
#[test]
fn dispatch_matches_portable() {
    let m: Vec<u8> = (0..1000u32).map(|i| (i * 131 + 17) as u8).collect();
    for len in [0, 1, 31, 32, 33, 64, 999, 1000] {
        assert_eq!(hash_from(1, &m[..len]), hash_portable(1, &m[..len]));
        assert_eq!(hash_from(-9, &m[..len]), hash_portable(-9, &m[..len]));
    }
}
