// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Direction-cosine grid generation.

Beam patterns and images are evaluated over either a regular grid of image
pixels or a HEALPix sphere, in either the equatorial or the horizon frame.
The output of [`generate_coordinates`] is three flat arrays of direction
cosines plus a [`CoordKind`] tag saying which frame they live in.
 */

use strum_macros::Display;

use super::{CoordError, RADec};
use crate::constants::{FRAC_PI_2, PI};

/// The coordinate frame the grid is generated in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum CoordFrame {
    Equatorial,
    Horizon,
}

/// The shape of the evaluation grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CoordGrid {
    /// A regular image grid with `side`×`side` pixels across a field of view.
    Image { side: usize, fov_rad: f64 },

    /// A HEALPix sphere in the ring scheme.
    HealpixRing { nside: usize },
}

/// Where the beam is pointing. Equatorial grids need an equatorial pointing;
/// a horizontal pointing with an equatorial grid is explicitly unsupported.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Pointing {
    Equatorial(RADec),
    Horizontal { az: f64, el: f64 },
}

/// A tag saying what kind of direction cosines were generated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum CoordKind {
    /// (l,m,n) relative to the phase/pointing centre.
    RelativeLmn,
    /// (x,y,z) horizontal east-north-up direction cosines.
    EnuDirections,
}

/// Generated direction cosines and their frame tag.
#[derive(Clone, Debug)]
pub struct DirectionSet {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
    pub kind: CoordKind,
}

impl DirectionSet {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// Generate the direction cosines for a frame/grid combination.
pub fn generate_coordinates(
    frame: CoordFrame,
    grid: CoordGrid,
    pointing: Pointing,
) -> Result<DirectionSet, CoordError> {
    match frame {
        CoordFrame::Equatorial => {
            let centre = match pointing {
                Pointing::Equatorial(radec) => radec,
                // Deliberately unsupported: converting an az/el pointing to
                // RA/Dec needs a time and location this interface does not
                // carry.
                Pointing::Horizontal { .. } => return Err(CoordError::UnsupportedPointing),
            };
            let (x, y, z) = match grid {
                CoordGrid::Image { side, fov_rad } => image_lmn_grid(side, fov_rad)?,
                CoordGrid::HealpixRing { nside } => {
                    let (theta, phi) = healpix_ring_to_theta_phi(nside)?;
                    let mut l = Vec::with_capacity(theta.len());
                    let mut m = Vec::with_capacity(theta.len());
                    let mut n = Vec::with_capacity(theta.len());
                    for (&t, &p) in theta.iter().zip(phi.iter()) {
                        // HEALPix theta is a colatitude; the declination is
                        // its complement.
                        let radec = RADec::from_radians(p, FRAC_PI_2 - t);
                        let lmn = radec.to_lmn(centre);
                        l.push(lmn.l);
                        m.push(lmn.m);
                        n.push(lmn.n);
                    }
                    (l, m, n)
                }
            };
            Ok(DirectionSet {
                x,
                y,
                z,
                kind: CoordKind::RelativeLmn,
            })
        }

        CoordFrame::Horizon => {
            let (x, y, z) = match grid {
                // Assumed to be an image centred on the zenith.
                CoordGrid::Image { side, fov_rad } => image_lmn_grid(side, fov_rad)?,
                CoordGrid::HealpixRing { nside } => {
                    let (theta, phi) = healpix_ring_to_theta_phi(nside)?;
                    let mut x = Vec::with_capacity(theta.len());
                    let mut y = Vec::with_capacity(theta.len());
                    let mut z = Vec::with_capacity(theta.len());
                    for (&t, &p) in theta.iter().zip(phi.iter()) {
                        let (s_t, c_t) = t.sin_cos();
                        let (s_p, c_p) = p.sin_cos();
                        x.push(s_t * c_p);
                        y.push(s_t * s_p);
                        z.push(c_t);
                    }
                    (x, y, z)
                }
            };
            Ok(DirectionSet {
                x,
                y,
                z,
                kind: CoordKind::EnuDirections,
            })
        }
    }
}

/// Generate a regular grid of (l,m) direction cosines across a field of view.
/// `l` is the fastest-varying dimension. Used by the DFT imager, which
/// doesn't need `n`.
pub fn image_lm_grid(side: usize, fov_rad: f64) -> Result<(Vec<f64>, Vec<f64>), CoordError> {
    if side == 0 {
        return Err(CoordError::BadGridSize);
    }
    let num_pixels = side * side;
    let max = (fov_rad / 2.0).sin();
    // Pixel centres, so the grid is symmetric about zero for even sides.
    let inc = 2.0 * max / side as f64;
    let mut l = Vec::with_capacity(num_pixels);
    let mut m = Vec::with_capacity(num_pixels);
    for j in 0..side {
        let m_val = -max + (j as f64 + 0.5) * inc;
        for i in 0..side {
            l.push(-max + (i as f64 + 0.5) * inc);
            m.push(m_val);
        }
    }
    Ok((l, m))
}

/// As [`image_lm_grid`], but also evaluating `n`. Pixels outside the unit
/// circle get `n = 0`, marking them as invalid/below-horizon.
pub fn image_lmn_grid(
    side: usize,
    fov_rad: f64,
) -> Result<(Vec<f64>, Vec<f64>, Vec<f64>), CoordError> {
    let (l, m) = image_lm_grid(side, fov_rad)?;
    let n = l
        .iter()
        .zip(m.iter())
        .map(|(&l, &m)| {
            let r_sq = l * l + m * m;
            if r_sq < 1.0 {
                (1.0 - r_sq).sqrt()
            } else {
                0.0
            }
        })
        .collect();
    Ok((l, m, n))
}

/// The number of HEALPix pixels for an nside.
pub fn healpix_nside_to_npix(nside: usize) -> usize {
    12 * nside * nside
}

/// Convert every pixel of a ring-scheme HEALPix sphere to its (colatitude,
/// longitude) angles.
pub fn healpix_ring_to_theta_phi(nside: usize) -> Result<(Vec<f64>, Vec<f64>), CoordError> {
    if nside == 0 {
        return Err(CoordError::BadNside);
    }
    let npix = healpix_nside_to_npix(nside);
    let ncap = 2 * nside * (nside - 1);
    let fact2 = 4.0 / npix as f64;
    let fact1 = 2.0 * nside as f64 * fact2;

    let mut theta = Vec::with_capacity(npix);
    let mut phi = Vec::with_capacity(npix);
    for ipix in 0..npix {
        let (z, ph) = if ipix < ncap {
            // North polar cap.
            let iring = (1 + isqrt(1 + 2 * ipix)) >> 1;
            let iphi = ipix + 1 - 2 * iring * (iring - 1);
            let z = 1.0 - (iring * iring) as f64 * fact2;
            (z, (iphi as f64 - 0.5) * FRAC_PI_2 / iring as f64)
        } else if ipix < npix - ncap {
            // Equatorial belt.
            let ip = ipix - ncap;
            let iring = ip / (4 * nside) + nside;
            let iphi = ip % (4 * nside) + 1;
            let fodd = if (iring + nside) & 1 == 1 { 1.0 } else { 0.5 };
            let z = ((2 * nside) as f64 - iring as f64) * fact1;
            (z, (iphi as f64 - fodd) * PI / (2.0 * nside as f64))
        } else {
            // South polar cap.
            let ip = npix - ipix;
            let iring = (1 + isqrt(2 * ip - 1)) >> 1;
            let iphi = 4 * iring + 1 - (ip - 2 * iring * (iring - 1));
            let z = -1.0 + (iring * iring) as f64 * fact2;
            (z, (iphi as f64 - 0.5) * FRAC_PI_2 / iring as f64)
        };
        theta.push(z.acos());
        phi.push(ph);
    }
    Ok((theta, phi))
}

/// Integer square root, rounding down.
fn isqrt(n: usize) -> usize {
    let mut r = (n as f64).sqrt() as usize;
    while r * r > n {
        r -= 1;
    }
    while (r + 1) * (r + 1) <= n {
        r += 1;
    }
    r
}
