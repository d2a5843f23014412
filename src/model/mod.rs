// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Generating visibilities from a sky model and a telescope model.

For every baseline (p,q) and sky source, the contribution to the
visibility is

```text
V_pq += J_p . B . J_q^H . k
```

where `J_p` and `J_q` are the stations' 2x2 responses towards the source,
`B` is the source brightness matrix, and `k` is a real scalar folding in
the geometric phase's smearing terms and the source's spectral scaling.
Accumulation is in double precision; the result is demoted to single
precision only when it lands in the output cube.
 */

mod cpu;
mod error;

pub use cpu::{ObservationParams, VisSimulator};
pub use error::ModelError;

use num_complex::Complex;

use crate::jones::Jones;

/// Accumulate one source's contribution to one baseline's visibility.
///
/// `brightness` must be Hermitian (it is multiplied with
/// [`Jones::mul_assign_hermitian`], which never reads its lower-left
/// entry), and `phase` is the geometric phase term exp(2 pi i (ul + vm +
/// w(n-1))) already combined with any real smearing factors.
#[inline]
pub fn accumulate_baseline_visibility(
    v_pq: &mut Jones<f64>,
    j_p: &Jones<f64>,
    j_q: &Jones<f64>,
    brightness: &Jones<f64>,
    phase: Complex<f64>,
) {
    let mut m = *j_p;
    m.mul_assign_hermitian(brightness);
    m.mul_assign_conj_transpose(j_q);
    *v_pq += m * phase;
}

/// The unnormalised sinc function, continuous through zero.
#[inline]
pub(crate) fn sinc(x: f64) -> f64 {
    if x.abs() < 1e-9 {
        1.0
    } else {
        x.sin() / x
    }
}
