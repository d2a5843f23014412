// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoordError {
    #[error("A beam pointing specified in horizontal (az/el) coordinates cannot be used with an equatorial coordinate grid; specify the pointing in RA/Dec instead")]
    UnsupportedPointing,

    #[error("HEALPix nside must be at least 1")]
    BadNside,

    #[error("The image-grid side length must be at least 1")]
    BadGridSize,
}
