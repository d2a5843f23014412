// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Useful constants.

All constants *must* be double precision. `skysim` should do as many
calculations as possible in double precision before converting to a lower
precision, if it is ever required.
 */

pub use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// The speed of light \[metres/second\].
pub const VEL_C: f64 = 299_792_458.0;

/// Factor to convert a Gaussian FWHM to a standard deviation.
pub const FWHM_TO_SIGMA: f64 = 0.42466090014400953; // 1 / (2 sqrt(2 ln 2))

/// The exponent constant of a Gaussian source's visibility envelope,
/// -(pi^2) / (4 ln 2). Multiplied by the squared product of the FWHM and
/// the projected baseline length, in consistent units.
pub const GAUSSIAN_EXP_CONST: f64 = -(FRAC_PI_2 * FRAC_PI_2) / std::f64::consts::LN_2;
