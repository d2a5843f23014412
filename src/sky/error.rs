// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SkyError {
    #[error("Radius filter has outer radius {outer_rad} rad smaller than inner radius {inner_rad} rad")]
    InvalidRadiusRange { inner_rad: f64, outer_rad: f64 },

    #[error("A Gaussian source must have non-negative FWHM axes (got major {major_rad} rad, minor {minor_rad} rad)")]
    InvalidGaussianShape { major_rad: f64, minor_rad: f64 },
}
