// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error type for all skysim-related errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SkysimError {
    #[error(transparent)]
    Coord(#[from] crate::coord::CoordError),

    #[error(transparent)]
    Sky(#[from] crate::sky::SkyError),

    #[error(transparent)]
    Station(#[from] crate::station::StationError),

    #[error(transparent)]
    Model(#[from] crate::model::ModelError),

    #[error(transparent)]
    VisIo(#[from] crate::vis::VisIoError),

    #[error(transparent)]
    Image(#[from] crate::image::ImageError),
}
