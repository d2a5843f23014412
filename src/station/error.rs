// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StationError {
    #[error("Cannot evaluate an element response at frequency {freq_hz} Hz; frequencies must be positive")]
    InvalidFrequency { freq_hz: f64 },

    #[error("A spline element pattern must carry at least one frequency table")]
    EmptySplineSet,

    #[error("Station has {num_elements} element positions but column '{column}' has {len} entries")]
    LayoutMismatch {
        num_elements: usize,
        column: &'static str,
        len: usize,
    },

    #[error("Station has no elements")]
    NoElements,
}
