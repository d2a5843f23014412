// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VisIoError {
    #[error("Bad magic number 0x{got:08x}; this is not a visibility file")]
    BadMagic { got: u32 },

    #[error("Unsupported visibility file version {got}; this build reads version {expected}")]
    UnsupportedVersion { got: u32, expected: u32 },

    #[error("Unknown baseline coordinate type tag {got}")]
    UnknownCoordType { got: u32 },

    #[error("Unknown amplitude type tag {got}")]
    UnknownAmpType { got: u32 },

    #[error("Visibility dimensions ({num_times} times x {num_baselines} baselines x {num_channels} channels) overflow")]
    DimensionOverflow {
        num_times: usize,
        num_baselines: usize,
        num_channels: usize,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
