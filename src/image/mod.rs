// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Direct-Fourier-transform imaging of a visibility cube.

Each image plane is the real part of the DFT of a set of visibilities over
an (l,m) pixel grid, normalised by the number of visibilities. Times and
channels are either collapsed into one synthesis plane or imaged as
individual snapshots.
 */

mod error;
#[cfg(test)]
mod tests;

pub use error::ImageError;

use std::ops::Range;

use itertools::Itertools;
use log::debug;
use ndarray::{s, Array4, ArrayView1};
use rayon::prelude::*;
use strum_macros::{Display, EnumString};

use crate::c64;
use crate::constants::{TAU, VEL_C};
use crate::coord::grid::image_lm_grid;
use crate::vis::{VisAmps, VisCube};

/// A single image polarisation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumString)]
pub enum ImagePol {
    I,
    Q,
    U,
    V,
    XX,
    XY,
    YX,
    YY,
}

/// Which polarisation planes to image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PolSelection {
    Single(ImagePol),
    /// I, Q, U and V.
    FullStokes,
    /// XX, XY, YX and YY.
    FullLinear,
}

impl PolSelection {
    pub fn pols(self) -> Vec<ImagePol> {
        match self {
            PolSelection::Single(pol) => vec![pol],
            PolSelection::FullStokes => {
                vec![ImagePol::I, ImagePol::Q, ImagePol::U, ImagePol::V]
            }
            PolSelection::FullLinear => {
                vec![ImagePol::XX, ImagePol::XY, ImagePol::YX, ImagePol::YY]
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumString)]
pub enum TransformType {
    Dft2d,
    Fft2d,
}

/// What to image and how.
#[derive(Clone, Debug)]
pub struct ImageSettings {
    /// Image side length \[pixels\]
    pub side: usize,
    /// Field of view across the image \[radians\]
    pub fov_rad: f64,
    pub pol: PolSelection,
    pub transform: TransformType,

    /// One image plane per time sample instead of one synthesis plane.
    pub time_snapshots: bool,
    /// One image plane per channel instead of one synthesis plane.
    pub channel_snapshots: bool,

    /// Input time samples to image; `None` images all of them.
    pub time_range: Option<Range<usize>>,
    /// Input channels to image; `None` images all of them.
    pub channel_range: Option<Range<usize>>,
}

impl ImageSettings {
    /// A full-synthesis Stokes I DFT image.
    pub fn stokes_i(side: usize, fov_rad: f64) -> ImageSettings {
        ImageSettings {
            side,
            fov_rad,
            pol: PolSelection::Single(ImagePol::I),
            transform: TransformType::Dft2d,
            time_snapshots: false,
            channel_snapshots: false,
            time_range: None,
            channel_range: None,
        }
    }
}

/// The imaging output: planes indexed by (channel, time, polarisation),
/// each a flat pixel array with `l` varying fastest.
pub struct ImageCube {
    pub side: usize,
    pub fov_rad: f64,
    pub pols: Vec<ImagePol>,
    /// The mean frequency of the input channels behind each channel plane
    /// \[Hz\].
    pub channel_freqs_hz: Vec<f64>,
    /// Shape: (channel planes, time planes, polarisations, pixels).
    pub data: Array4<f64>,
}

impl ImageCube {
    pub fn num_channel_planes(&self) -> usize {
        self.data.dim().0
    }

    pub fn num_time_planes(&self) -> usize {
        self.data.dim().1
    }

    pub fn plane(&self, channel: usize, time: usize, pol: usize) -> ArrayView1<'_, f64> {
        self.data.slice(s![channel, time, pol, ..])
    }

    /// The value of pixel (i,j), with `i` along `l`.
    pub fn pixel(&self, channel: usize, time: usize, pol: usize, i: usize, j: usize) -> f64 {
        self.data[[channel, time, pol, j * self.side + i]]
    }
}

/// Image a visibility cube.
pub fn make_image(vis: &VisCube, settings: &ImageSettings) -> Result<ImageCube, ImageError> {
    match settings.transform {
        TransformType::Dft2d => (),
        TransformType::Fft2d => return Err(ImageError::UnsupportedTransform),
    }
    if settings.fov_rad <= 0.0 {
        return Err(ImageError::BadFieldOfView {
            fov_rad: settings.fov_rad,
        });
    }

    let time_range = check_range(
        settings.time_range.clone(),
        vis.num_times,
        "time",
    )?;
    let channel_range = check_range(
        settings.channel_range.clone(),
        vis.num_channels,
        "channel",
    )?;

    let pols = settings.pol.pols();
    if matches!(vis.amps, VisAmps::Scalar(_)) {
        if let Some(pol) = pols.iter().find(|&&p| p != ImagePol::I) {
            return Err(ImageError::PolarisationUnavailable {
                pol: pol.to_string(),
            });
        }
    }

    let (l, m) = image_lm_grid(settings.side, settings.fov_rad)?;
    let num_pixels = l.len();
    debug!(
        "Imaging {} over times {:?} and channels {:?} into {side}x{side} pixels",
        pols.iter().join("/"),
        time_range,
        channel_range,
        side = settings.side
    );

    let time_sets: Vec<Vec<usize>> = if settings.time_snapshots {
        time_range.map(|t| vec![t]).collect()
    } else {
        vec![time_range.collect()]
    };
    let channel_sets: Vec<Vec<usize>> = if settings.channel_snapshots {
        channel_range.map(|c| vec![c]).collect()
    } else {
        vec![channel_range.collect()]
    };
    let channel_freqs_hz: Vec<f64> = channel_sets
        .iter()
        .map(|set| {
            set.iter().map(|&c| vis.channel_freq_hz(c)).sum::<f64>() / set.len() as f64
        })
        .collect();

    let mut data = Array4::zeros((channel_sets.len(), time_sets.len(), pols.len(), num_pixels));
    for (ci, channels) in channel_sets.iter().enumerate() {
        for (ti, times) in time_sets.iter().enumerate() {
            for (pi, &pol) in pols.iter().enumerate() {
                // Gather this plane's visibilities with their coordinates
                // in wavelengths.
                let mut us = Vec::new();
                let mut vs = Vec::new();
                let mut amps = Vec::new();
                for (&c, &t) in channels.iter().cartesian_product(times.iter()) {
                    let inv_lambda = vis.channel_freq_hz(c) / VEL_C;
                    for b in 0..vis.num_baselines {
                        let k = vis.coord_index(t, b);
                        us.push(vis.uu[k] * inv_lambda);
                        vs.push(vis.vv[k] * inv_lambda);
                        amps.push(pol_amp(vis, c, t, b, pol)?);
                    }
                }
                if amps.is_empty() {
                    return Err(ImageError::NoVisibilities);
                }

                let norm = 1.0 / amps.len() as f64;
                let pixels: Vec<f64> = (0..num_pixels)
                    .into_par_iter()
                    .map(|pix| {
                        let mut sum = 0.0;
                        for k in 0..amps.len() {
                            // Re(V exp(-2 pi i (ul + vm))).
                            let (s, c) = (TAU * (us[k] * l[pix] + vs[k] * m[pix])).sin_cos();
                            sum += amps[k].re * c + amps[k].im * s;
                        }
                        sum * norm
                    })
                    .collect();
                data.slice_mut(s![ci, ti, pi, ..])
                    .iter_mut()
                    .zip(pixels)
                    .for_each(|(dst, src)| *dst = src);
            }
        }
    }

    Ok(ImageCube {
        side: settings.side,
        fov_rad: settings.fov_rad,
        pols,
        channel_freqs_hz,
        data,
    })
}

fn check_range(
    range: Option<Range<usize>>,
    max: usize,
    axis: &'static str,
) -> Result<Range<usize>, ImageError> {
    let range = range.unwrap_or(0..max);
    if range.start >= range.end || range.end > max {
        return Err(ImageError::BadRange {
            axis,
            start: range.start,
            end: range.end,
            max,
        });
    }
    Ok(range)
}

/// The complex amplitude of one polarisation of one visibility sample.
fn pol_amp(
    vis: &VisCube,
    channel: usize,
    time: usize,
    baseline: usize,
    pol: ImagePol,
) -> Result<c64, ImageError> {
    let idx = vis.amp_index(channel, time, baseline);
    match &vis.amps {
        VisAmps::Scalar(amps) => {
            if pol == ImagePol::I {
                let a = amps[idx];
                Ok(c64::new(a.re as f64, a.im as f64))
            } else {
                Err(ImageError::PolarisationUnavailable {
                    pol: pol.to_string(),
                })
            }
        }
        VisAmps::Matrix(amps) => {
            let j = amps[idx];
            let xx = c64::new(j[0].re as f64, j[0].im as f64);
            let xy = c64::new(j[1].re as f64, j[1].im as f64);
            let yx = c64::new(j[2].re as f64, j[2].im as f64);
            let yy = c64::new(j[3].re as f64, j[3].im as f64);
            Ok(match pol {
                ImagePol::XX => xx,
                ImagePol::XY => xy,
                ImagePol::YX => yx,
                ImagePol::YY => yy,
                ImagePol::I => (xx + yy) * 0.5,
                ImagePol::Q => (xx - yy) * 0.5,
                ImagePol::U => (xy + yx) * 0.5,
                ImagePol::V => (xy - yx) * c64::new(0.0, -0.5),
            })
        }
    }
}
