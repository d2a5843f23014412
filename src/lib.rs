// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Radio-interferometer simulator: synthetic visibilities and DFT imaging for
aperture-array telescopes.

Given a sky model (point and Gaussian sources with Stokes parameters) and a
telescope model (station positions, element layouts and patterns), `skysim`
computes synthetic visibilities for every (baseline, time, channel) cell, or
turns stored visibilities back into sky images with a direct 2D Fourier
transform.
 */

pub mod constants;
pub mod coord;
mod error;
pub mod image;
pub mod jones;
pub mod model;
pub mod sky;
pub mod station;
pub mod vis;

// Re-exports.
pub use error::SkysimError;
pub use jones::Jones;
pub use sky::{SkyModel, Source, StokesParams};
pub use station::{ElementModel, ElementPattern, StationModel, TelescopeModel};
pub use vis::VisCube;

// External re-exports.
pub use hifitime::{Duration, Epoch};

/// A shorthand for a single-precision complex number.
#[allow(non_camel_case_types)]
pub type c32 = num_complex::Complex<f32>;
/// A shorthand for a double-precision complex number.
#[allow(non_camel_case_types)]
pub type c64 = num_complex::Complex<f64>;
