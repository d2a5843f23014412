// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
2x2 complex (Jones) matrix algebra.

A [`Jones`] matrix describes a station or element's complex voltage response
to an incoming polarized electric field. The matrix is stored row-major as
`[a, b, c, d]`:

```text
[ a  b ]
[ c  d ]
```

Everything here is generic over the float precision; single- and
double-precision matrices have identical structure and differ only in
magnitude tolerance. The hot accumulation path of the simulator uses the
in-place multiplies to avoid shuffling temporaries around.
 */


use std::ops::{Add, AddAssign, Deref, DerefMut, Mul, Sub};

use num_complex::Complex;
use num_traits::{Float, Zero};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Jones<F: Float>([Complex<F>; 4]);

impl<F: Float> Default for Jones<F> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<F: Float> Jones<F> {
    /// The zero matrix. This is the correct initial value for a visibility
    /// accumulator.
    pub fn zero() -> Jones<F> {
        Self([
            Complex::zero(),
            Complex::zero(),
            Complex::zero(),
            Complex::zero(),
        ])
    }

    /// The identity matrix.
    pub fn identity() -> Jones<F> {
        Self([
            Complex::new(F::one(), F::zero()),
            Complex::zero(),
            Complex::zero(),
            Complex::new(F::one(), F::zero()),
        ])
    }

    /// The conjugate transpose (Hermitian transpose) of this matrix.
    #[inline]
    pub fn h(self) -> Jones<F> {
        Self([
            self[0].conj(),
            self[2].conj(),
            self[1].conj(),
            self[3].conj(),
        ])
    }

    /// Multiply this matrix in place by a Hermitian matrix on the right.
    ///
    /// Only the upper triangle and the (real) diagonal of `b` are read; the
    /// lower-left entry is taken to be the conjugate of the upper-right, and
    /// the imaginary parts of the diagonal are taken to be zero.
    #[inline]
    pub fn mul_assign_hermitian(&mut self, b: &Jones<F>) {
        let b00 = b[0].re;
        let b01 = b[1];
        let b11 = b[3].re;
        let a = self.0;
        self.0 = [
            a[0].scale(b00) + a[1] * b01.conj(),
            a[0] * b01 + a[1].scale(b11),
            a[2].scale(b00) + a[3] * b01.conj(),
            a[2] * b01 + a[3].scale(b11),
        ];
    }

    /// As [`Jones::mul_assign_hermitian`], but returning a new matrix.
    #[inline]
    pub fn mul_hermitian(mut self, b: &Jones<F>) -> Jones<F> {
        self.mul_assign_hermitian(b);
        self
    }

    /// Multiply this matrix in place by the conjugate transpose of `b`.
    #[inline]
    pub fn mul_assign_conj_transpose(&mut self, b: &Jones<F>) {
        let a = self.0;
        self.0 = [
            a[0] * b[0].conj() + a[1] * b[1].conj(),
            a[0] * b[2].conj() + a[1] * b[3].conj(),
            a[2] * b[0].conj() + a[3] * b[1].conj(),
            a[2] * b[2].conj() + a[3] * b[3].conj(),
        ];
    }

}

impl<F: Float> Deref for Jones<F> {
    type Target = [Complex<F>; 4];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<F: Float> DerefMut for Jones<F> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<F: Float> From<[Complex<F>; 4]> for Jones<F> {
    fn from(arr: [Complex<F>; 4]) -> Self {
        Self(arr)
    }
}

impl<F: Float> From<[F; 8]> for Jones<F> {
    fn from(f: [F; 8]) -> Self {
        Self([
            Complex::new(f[0], f[1]),
            Complex::new(f[2], f[3]),
            Complex::new(f[4], f[5]),
            Complex::new(f[6], f[7]),
        ])
    }
}

impl From<Jones<f64>> for Jones<f32> {
    fn from(j: Jones<f64>) -> Self {
        Self([
            Complex::new(j[0].re as f32, j[0].im as f32),
            Complex::new(j[1].re as f32, j[1].im as f32),
            Complex::new(j[2].re as f32, j[2].im as f32),
            Complex::new(j[3].re as f32, j[3].im as f32),
        ])
    }
}

impl From<Jones<f32>> for Jones<f64> {
    fn from(j: Jones<f32>) -> Self {
        Self([
            Complex::new(j[0].re as f64, j[0].im as f64),
            Complex::new(j[1].re as f64, j[1].im as f64),
            Complex::new(j[2].re as f64, j[2].im as f64),
            Complex::new(j[3].re as f64, j[3].im as f64),
        ])
    }
}

impl<F: Float> Mul<Jones<F>> for Jones<F> {
    type Output = Jones<F>;

    #[inline]
    fn mul(self, b: Jones<F>) -> Jones<F> {
        let a = self.0;
        Jones([
            a[0] * b[0] + a[1] * b[2],
            a[0] * b[1] + a[1] * b[3],
            a[2] * b[0] + a[3] * b[2],
            a[2] * b[1] + a[3] * b[3],
        ])
    }
}

impl<F: Float> Mul<Complex<F>> for Jones<F> {
    type Output = Jones<F>;

    #[inline]
    fn mul(self, rhs: Complex<F>) -> Jones<F> {
        Jones([self[0] * rhs, self[1] * rhs, self[2] * rhs, self[3] * rhs])
    }
}

impl<F: Float> Mul<F> for Jones<F> {
    type Output = Jones<F>;

    #[inline]
    fn mul(self, rhs: F) -> Jones<F> {
        Jones([
            self[0].scale(rhs),
            self[1].scale(rhs),
            self[2].scale(rhs),
            self[3].scale(rhs),
        ])
    }
}

impl<F: Float> Add<Jones<F>> for Jones<F> {
    type Output = Jones<F>;

    #[inline]
    fn add(self, rhs: Jones<F>) -> Jones<F> {
        Jones([
            self[0] + rhs[0],
            self[1] + rhs[1],
            self[2] + rhs[2],
            self[3] + rhs[3],
        ])
    }
}

impl<F: Float> Sub<Jones<F>> for Jones<F> {
    type Output = Jones<F>;

    #[inline]
    fn sub(self, rhs: Jones<F>) -> Jones<F> {
        Jones([
            self[0] - rhs[0],
            self[1] - rhs[1],
            self[2] - rhs[2],
            self[3] - rhs[3],
        ])
    }
}

impl<F: Float> AddAssign<Jones<F>> for Jones<F> {
    #[inline]
    fn add_assign(&mut self, rhs: Jones<F>) {
        self.0[0] = self.0[0] + rhs[0];
        self.0[1] = self.0[1] + rhs[1];
        self.0[2] = self.0[2] + rhs[2];
        self.0[3] = self.0[3] + rhs[3];
    }
}

#[cfg(test)]
impl<F: Float + approx::AbsDiffEq<Epsilon = F>> approx::AbsDiffEq for Jones<F> {
    type Epsilon = F;

    fn default_epsilon() -> F {
        F::epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: F) -> bool {
        self.iter().zip(other.iter()).all(|(a, b)| {
            F::abs_diff_eq(&a.re, &b.re, epsilon) && F::abs_diff_eq(&a.im, &b.im, epsilon)
        })
    }
}
