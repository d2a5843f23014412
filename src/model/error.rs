// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

use crate::station::StationError;
use crate::vis::VisIoError;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("The sky model has no sources")]
    NoSources,

    #[error("Cannot simulate cross-correlations with {got} station(s); at least 2 are needed")]
    TooFewStations { got: usize },

    #[error("The observation needs at least one timestep and one channel")]
    EmptyObservation,

    #[error("The observation's start frequency {freq_hz} Hz is not positive")]
    InvalidStartFrequency { freq_hz: f64 },

    #[error(transparent)]
    Station(#[from] StationError),

    #[error(transparent)]
    Vis(#[from] VisIoError),
}
