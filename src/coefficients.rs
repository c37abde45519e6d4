use crate::lanes::Lanes;

/// 31^n mod 2^32, by square-and-multiply.
pub const fn pow31(mut n: u64) -> i32 {
    let mut base: i32 = 31;
    let mut acc: i32 = 1;
    while n > 0 {
        if n & 1 != 0 {
            acc = acc.wrapping_mul(base);
        }
        base = base.wrapping_mul(base);
        n >>= 1;
    }
    acc
}

/// Powers of 31 laid out for kernels with `W` lanes.
///
/// A macro-block is four blocks of `W` bytes. Byte `j` of a macro-block is
/// weighted by 31^(4W-1-j), so `weights(0)` holds 31^(4W-1) .. 31^(3W)
/// and `weights(3)` holds 31^(W-1) .. 31^0, descending with the lane index.
/// Kernels that consume fewer blocks per iteration use the trailing weight
/// vectors: one block uses `weights(3)`, two blocks use `weights(2)` and
/// `weights(3)`.
#[derive(Clone, Debug)]
pub struct Coefficients<const W: usize> {
    steps: [i32; 3],
    weights: [Lanes<W>; 4],
}

impl<const W: usize> Coefficients<W> {
    pub const fn new() -> Self {
        assert!(W > 0, "lane count must be non-zero");

        let mut raw = [[0i32; W]; 4];
        let mut p = 1i32;
        let mut k = 0;
        while k < 4 * W {
            raw[3 - k / W][W - 1 - k % W] = p;
            p = p.wrapping_mul(31);
            k += 1;
        }
        let steps = [raw[2][W - 1], raw[1][W - 1], p];

        Self {
            steps,
            weights: [
                Lanes::from_array(raw[0]),
                Lanes::from_array(raw[1]),
                Lanes::from_array(raw[2]),
                Lanes::from_array(raw[3]),
            ],
        }
    }

    /// 31^k for `k` in `0..=4W`.
    pub const fn power(&self, k: usize) -> i32 {
        assert!(k <= 4 * W, "power out of table range");
        if k == 4 * W {
            return self.steps[2];
        }
        self.weights[3 - k / W].to_array()[W - 1 - k % W]
    }

    /// 31^W: advances an accumulator past one block.
    #[inline(always)]
    pub const fn step_x1(&self) -> i32 {
        self.steps[0]
    }

    /// 31^(2W): advances an accumulator past two blocks.
    #[inline(always)]
    pub const fn step_x2(&self) -> i32 {
        self.steps[1]
    }

    /// 31^(4W): advances an accumulator past a whole macro-block.
    #[inline(always)]
    pub const fn step_x4(&self) -> i32 {
        self.steps[2]
    }

    /// Weights for block `o` (`0..4`) of a macro-block.
    #[inline(always)]
    pub const fn weights(&self, o: usize) -> &Lanes<W> {
        assert!(o < 4, "weight block out of range");
        &self.weights[o]
    }
}

impl<const W: usize> Default for Coefficients<W> {
    fn default() -> Self {
        Self::new()
    }
}
