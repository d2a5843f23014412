// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

use crate::coord::CoordError;

#[derive(Error, Debug)]
pub enum ImageError {
    #[error("Image field of view {fov_rad} rad is not positive")]
    BadFieldOfView { fov_rad: f64 },

    #[error("The FFT transform is not implemented; use the DFT")]
    UnsupportedTransform,

    #[error("Cannot image polarisation {pol} from scalar visibility amplitudes")]
    PolarisationUnavailable { pol: String },

    #[error("Requested {axis} range {start}..{end} is outside the visibility data (0..{max})")]
    BadRange {
        axis: &'static str,
        start: usize,
        end: usize,
        max: usize,
    },

    #[error("No visibilities were selected for imaging")]
    NoVisibilities,

    #[error(transparent)]
    Coord(#[from] CoordError),
}
