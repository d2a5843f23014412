// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
The visibility cube and its on-disk binary format.

Amplitudes are laid out channel-slowest: the amplitude of (channel `c`,
time `t`, baseline `b`) lives at `(c * num_times + t) * num_baselines + b`.
Baseline (u,v,w) coordinates are stored once per time and baseline, in
metres; they are shared by all channels.

The file format is little-endian throughout: a magic number, a format
version, the three dimensions, a coordinate-precision tag, an
amplitude-type tag, the three coordinate arrays, and the amplitudes.
 */

mod error;

pub use error::VisIoError;

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use log::debug;

use crate::c32;
use crate::jones::Jones;

const MAGIC: u32 = u32::from_le_bytes(*b"SVIS");
const FORMAT_VERSION: u32 = 1;

const COORD_TAG_DOUBLE: u32 = 1;
const AMP_TAG_SCALAR_SINGLE: u32 = 1;
const AMP_TAG_MATRIX_SINGLE: u32 = 2;

/// Visibility amplitudes: one complex scalar per sample, or a full 2x2
/// polarisation matrix.
#[derive(Clone, Debug, PartialEq)]
pub enum VisAmps {
    Scalar(Vec<c32>),
    Matrix(Vec<Jones<f32>>),
}

impl VisAmps {
    pub fn len(&self) -> usize {
        match self {
            VisAmps::Scalar(v) => v.len(),
            VisAmps::Matrix(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A cube of simulated visibilities plus the baseline coordinates and
/// observation metadata needed to image them.
#[derive(Clone, Debug)]
pub struct VisCube {
    pub num_times: usize,
    pub num_baselines: usize,
    pub num_channels: usize,

    /// Baseline coordinates \[metres\], indexed by `t * num_baselines + b`.
    pub uu: Vec<f64>,
    pub vv: Vec<f64>,
    pub ww: Vec<f64>,

    pub amps: VisAmps,

    /// Centre frequency of the first channel \[Hz\]
    pub freq_start_hz: f64,
    /// Channel spacing \[Hz\]
    pub freq_inc_hz: f64,
    /// Width of one channel \[Hz\], for bandwidth smearing.
    pub channel_bandwidth_hz: f64,
    /// Integration time of one time sample \[seconds\]
    pub time_int_s: f64,
}

impl VisCube {
    /// A zero-filled cube. `matrix` selects full polarisation matrices over
    /// complex scalars.
    pub fn new(
        num_times: usize,
        num_baselines: usize,
        num_channels: usize,
        matrix: bool,
    ) -> Result<VisCube, VisIoError> {
        let num_coords = num_times
            .checked_mul(num_baselines)
            .ok_or(VisIoError::DimensionOverflow {
                num_times,
                num_baselines,
                num_channels,
            })?;
        let num_amps =
            num_coords
                .checked_mul(num_channels)
                .ok_or(VisIoError::DimensionOverflow {
                    num_times,
                    num_baselines,
                    num_channels,
                })?;
        Ok(VisCube {
            num_times,
            num_baselines,
            num_channels,
            uu: vec![0.0; num_coords],
            vv: vec![0.0; num_coords],
            ww: vec![0.0; num_coords],
            amps: if matrix {
                VisAmps::Matrix(vec![Jones::zero(); num_amps])
            } else {
                VisAmps::Scalar(vec![c32::new(0.0, 0.0); num_amps])
            },
            freq_start_hz: 0.0,
            freq_inc_hz: 0.0,
            channel_bandwidth_hz: 0.0,
            time_int_s: 0.0,
        })
    }

    /// The flat amplitude index of (channel, time, baseline).
    pub fn amp_index(&self, channel: usize, time: usize, baseline: usize) -> usize {
        (channel * self.num_times + time) * self.num_baselines + baseline
    }

    /// The flat coordinate index of (time, baseline).
    pub fn coord_index(&self, time: usize, baseline: usize) -> usize {
        time * self.num_baselines + baseline
    }

    /// The centre frequency of a channel.
    pub fn channel_freq_hz(&self, channel: usize) -> f64 {
        self.freq_start_hz + channel as f64 * self.freq_inc_hz
    }

    /// Write the cube to a writer in the little-endian binary format.
    pub fn write<W: Write>(&self, mut w: W) -> Result<(), VisIoError> {
        w.write_u32::<LittleEndian>(MAGIC)?;
        w.write_u32::<LittleEndian>(FORMAT_VERSION)?;
        w.write_u32::<LittleEndian>(self.num_times as u32)?;
        w.write_u32::<LittleEndian>(self.num_baselines as u32)?;
        w.write_u32::<LittleEndian>(self.num_channels as u32)?;
        w.write_u32::<LittleEndian>(COORD_TAG_DOUBLE)?;
        w.write_u32::<LittleEndian>(match self.amps {
            VisAmps::Scalar(_) => AMP_TAG_SCALAR_SINGLE,
            VisAmps::Matrix(_) => AMP_TAG_MATRIX_SINGLE,
        })?;
        w.write_f64::<LittleEndian>(self.freq_start_hz)?;
        w.write_f64::<LittleEndian>(self.freq_inc_hz)?;
        w.write_f64::<LittleEndian>(self.channel_bandwidth_hz)?;
        w.write_f64::<LittleEndian>(self.time_int_s)?;

        for coords in [&self.uu, &self.vv, &self.ww] {
            for &c in coords.iter() {
                w.write_f64::<LittleEndian>(c)?;
            }
        }
        match &self.amps {
            VisAmps::Scalar(amps) => {
                for amp in amps {
                    w.write_f32::<LittleEndian>(amp.re)?;
                    w.write_f32::<LittleEndian>(amp.im)?;
                }
            }
            VisAmps::Matrix(amps) => {
                for j in amps {
                    for c in j.iter() {
                        w.write_f32::<LittleEndian>(c.re)?;
                        w.write_f32::<LittleEndian>(c.im)?;
                    }
                }
            }
        }
        w.flush()?;
        Ok(())
    }

    /// Read a cube from a reader.
    pub fn read<R: Read>(mut r: R) -> Result<VisCube, VisIoError> {
        let magic = r.read_u32::<LittleEndian>()?;
        if magic != MAGIC {
            return Err(VisIoError::BadMagic { got: magic });
        }
        let version = r.read_u32::<LittleEndian>()?;
        if version != FORMAT_VERSION {
            return Err(VisIoError::UnsupportedVersion {
                got: version,
                expected: FORMAT_VERSION,
            });
        }
        let num_times = r.read_u32::<LittleEndian>()? as usize;
        let num_baselines = r.read_u32::<LittleEndian>()? as usize;
        let num_channels = r.read_u32::<LittleEndian>()? as usize;
        let coord_tag = r.read_u32::<LittleEndian>()?;
        if coord_tag != COORD_TAG_DOUBLE {
            return Err(VisIoError::UnknownCoordType { got: coord_tag });
        }
        let amp_tag = r.read_u32::<LittleEndian>()?;
        let matrix = match amp_tag {
            AMP_TAG_SCALAR_SINGLE => false,
            AMP_TAG_MATRIX_SINGLE => true,
            _ => return Err(VisIoError::UnknownAmpType { got: amp_tag }),
        };

        let mut cube = VisCube::new(num_times, num_baselines, num_channels, matrix)?;
        cube.freq_start_hz = r.read_f64::<LittleEndian>()?;
        cube.freq_inc_hz = r.read_f64::<LittleEndian>()?;
        cube.channel_bandwidth_hz = r.read_f64::<LittleEndian>()?;
        cube.time_int_s = r.read_f64::<LittleEndian>()?;

        for coords in [&mut cube.uu, &mut cube.vv, &mut cube.ww] {
            for c in coords.iter_mut() {
                *c = r.read_f64::<LittleEndian>()?;
            }
        }
        match &mut cube.amps {
            VisAmps::Scalar(amps) => {
                for amp in amps.iter_mut() {
                    let re = r.read_f32::<LittleEndian>()?;
                    let im = r.read_f32::<LittleEndian>()?;
                    *amp = c32::new(re, im);
                }
            }
            VisAmps::Matrix(amps) => {
                for j in amps.iter_mut() {
                    for c in j.iter_mut() {
                        c.re = r.read_f32::<LittleEndian>()?;
                        c.im = r.read_f32::<LittleEndian>()?;
                    }
                }
            }
        }
        Ok(cube)
    }

    pub fn write_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), VisIoError> {
        debug!(
            "Writing {}x{}x{} visibilities to {}",
            self.num_times,
            self.num_baselines,
            self.num_channels,
            path.as_ref().display()
        );
        let file = BufWriter::new(File::create(path)?);
        self.write(file)
    }

    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<VisCube, VisIoError> {
        debug!("Reading visibilities from {}", path.as_ref().display());
        let file = BufReader::new(File::open(path)?);
        VisCube::read(file)
    }
}
