// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Sky-model types.

A [`SkyModel`] is a struct-of-arrays collection of point and Gaussian
sources. Keeping each quantity in its own contiguous column lets the
visibility loops iterate over exactly the data they need without chasing
per-source structs.
 */

mod error;

pub use error::SkyError;

use serde::{Deserialize, Serialize};

use crate::c64;
use crate::constants::PI;
use crate::coord::{RADec, LMN};
use crate::jones::Jones;

/// The four Stokes parameters of a source's flux density \[Jy\].
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StokesParams {
    pub i: f64,
    pub q: f64,
    pub u: f64,
    pub v: f64,
}

impl StokesParams {
    /// The source brightness matrix in the linear polarisation basis:
    ///
    /// ```text
    /// B = | I+Q    U+iV |
    ///     | U-iV   I-Q  |
    /// ```
    ///
    /// This matrix is Hermitian, so consumers may multiply by it with
    /// [`Jones::mul_assign_hermitian`].
    pub fn brightness(self) -> Jones<f64> {
        Jones::from([
            c64::new(self.i + self.q, 0.0),
            c64::new(self.u, self.v),
            c64::new(self.u, -self.v),
            c64::new(self.i - self.q, 0.0),
        ])
    }
}

/// The extent of a Gaussian source. Point sources carry no shape.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GaussianShape {
    /// Major-axis FWHM \[radians\]
    pub fwhm_major_rad: f64,
    /// Minor-axis FWHM \[radians\]
    pub fwhm_minor_rad: f64,
    /// Position angle, north through east \[radians\]
    pub position_angle_rad: f64,
}

/// A single source, used when building or editing a model. The simulator
/// itself works on [`SkyModel`] columns.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Source {
    pub radec: RADec,
    pub stokes: StokesParams,
    /// The frequency at which `stokes` applies \[Hz\]
    pub ref_freq_hz: f64,
    /// Power-law spectral index used to scale the flux to other frequencies.
    pub spectral_index: f64,
    /// `None` for a point source.
    pub shape: Option<GaussianShape>,
}

/// A collection of sources stored column-wise.
#[derive(Clone, Debug, Default)]
pub struct SkyModel {
    pub ra: Vec<f64>,
    pub dec: Vec<f64>,
    pub i: Vec<f64>,
    pub q: Vec<f64>,
    pub u: Vec<f64>,
    pub v: Vec<f64>,
    pub ref_freq_hz: Vec<f64>,
    pub spectral_index: Vec<f64>,

    /// Direction cosines relative to the current phase centre. Populated by
    /// [`SkyModel::evaluate_relative_lmn`]; stale after the columns are
    /// edited.
    pub l: Vec<f64>,
    pub m: Vec<f64>,
    pub n: Vec<f64>,

    /// Zero FWHMs mark a point source.
    pub fwhm_major: Vec<f64>,
    pub fwhm_minor: Vec<f64>,
    pub position_angle: Vec<f64>,
}

impl SkyModel {
    pub fn with_capacity(capacity: usize) -> SkyModel {
        SkyModel {
            ra: Vec::with_capacity(capacity),
            dec: Vec::with_capacity(capacity),
            i: Vec::with_capacity(capacity),
            q: Vec::with_capacity(capacity),
            u: Vec::with_capacity(capacity),
            v: Vec::with_capacity(capacity),
            ref_freq_hz: Vec::with_capacity(capacity),
            spectral_index: Vec::with_capacity(capacity),
            l: Vec::with_capacity(capacity),
            m: Vec::with_capacity(capacity),
            n: Vec::with_capacity(capacity),
            fwhm_major: Vec::with_capacity(capacity),
            fwhm_minor: Vec::with_capacity(capacity),
            position_angle: Vec::with_capacity(capacity),
        }
    }

    pub fn from_sources(sources: &[Source]) -> Result<SkyModel, SkyError> {
        let mut model = SkyModel::with_capacity(sources.len());
        for source in sources {
            model.push(*source)?;
        }
        Ok(model)
    }

    pub fn push(&mut self, source: Source) -> Result<(), SkyError> {
        let (major, minor, pa) = match source.shape {
            Some(shape) => {
                if shape.fwhm_major_rad < 0.0 || shape.fwhm_minor_rad < 0.0 {
                    return Err(SkyError::InvalidGaussianShape {
                        major_rad: shape.fwhm_major_rad,
                        minor_rad: shape.fwhm_minor_rad,
                    });
                }
                (
                    shape.fwhm_major_rad,
                    shape.fwhm_minor_rad,
                    shape.position_angle_rad,
                )
            }
            None => (0.0, 0.0, 0.0),
        };
        self.ra.push(source.radec.ra);
        self.dec.push(source.radec.dec);
        self.i.push(source.stokes.i);
        self.q.push(source.stokes.q);
        self.u.push(source.stokes.u);
        self.v.push(source.stokes.v);
        self.ref_freq_hz.push(source.ref_freq_hz);
        self.spectral_index.push(source.spectral_index);
        self.l.push(0.0);
        self.m.push(0.0);
        self.n.push(1.0);
        self.fwhm_major.push(major);
        self.fwhm_minor.push(minor);
        self.position_angle.push(pa);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.ra.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ra.is_empty()
    }

    /// The sky position of source `i`.
    pub fn radec(&self, i: usize) -> RADec {
        RADec::from_radians(self.ra[i], self.dec[i])
    }

    /// The Stokes parameters of source `i` at its reference frequency.
    pub fn stokes(&self, i: usize) -> StokesParams {
        StokesParams {
            i: self.i[i],
            q: self.q[i],
            u: self.u[i],
            v: self.v[i],
        }
    }

    /// Power-law flux scale factor for source `i` at an observing frequency.
    pub fn flux_scale(&self, i: usize, freq_hz: f64) -> f64 {
        (freq_hz / self.ref_freq_hz[i]).powf(self.spectral_index[i])
    }

    /// Scale every source's Stokes parameters to an observing frequency by
    /// its power law, and make that frequency the new reference.
    pub fn scale_to_frequency(&mut self, freq_hz: f64) {
        for i in 0..self.len() {
            let scale = self.flux_scale(i, freq_hz);
            self.i[i] *= scale;
            self.q[i] *= scale;
            self.u[i] *= scale;
            self.v[i] *= scale;
            self.ref_freq_hz[i] = freq_hz;
        }
    }

    /// Whether source `i` is a Gaussian (as opposed to a point).
    pub fn is_gaussian(&self, i: usize) -> bool {
        self.fwhm_major[i] > 0.0 || self.fwhm_minor[i] > 0.0
    }

    /// Fill the `l`/`m`/`n` columns with direction cosines relative to a
    /// phase centre.
    pub fn evaluate_relative_lmn(&mut self, phase_centre: RADec) {
        for i in 0..self.len() {
            let LMN { l, m, n } = self.radec(i).to_lmn(phase_centre);
            self.l[i] = l;
            self.m[i] = m;
            self.n[i] = n;
        }
    }

    /// Append all sources of another model. The `l`/`m`/`n` columns carry
    /// over as-is; re-evaluate them if the two models used different phase
    /// centres.
    pub fn append(&mut self, other: &SkyModel) {
        self.ra.extend_from_slice(&other.ra);
        self.dec.extend_from_slice(&other.dec);
        self.i.extend_from_slice(&other.i);
        self.q.extend_from_slice(&other.q);
        self.u.extend_from_slice(&other.u);
        self.v.extend_from_slice(&other.v);
        self.ref_freq_hz.extend_from_slice(&other.ref_freq_hz);
        self.spectral_index.extend_from_slice(&other.spectral_index);
        self.l.extend_from_slice(&other.l);
        self.m.extend_from_slice(&other.m);
        self.n.extend_from_slice(&other.n);
        self.fwhm_major.extend_from_slice(&other.fwhm_major);
        self.fwhm_minor.extend_from_slice(&other.fwhm_minor);
        self.position_angle.extend_from_slice(&other.position_angle);
    }

    /// Remove every source whose angular separation from `centre` lies
    /// outside `[inner_rad, outer_rad]`. Surviving sources are compacted
    /// towards the front, preserving their relative order.
    ///
    /// The degenerate range covering the whole sky is a no-op, so callers
    /// can pass user-supplied limits through unconditionally.
    pub fn filter_by_radius(
        &mut self,
        inner_rad: f64,
        outer_rad: f64,
        centre: RADec,
    ) -> Result<(), SkyError> {
        if outer_rad < inner_rad {
            return Err(SkyError::InvalidRadiusRange {
                inner_rad,
                outer_rad,
            });
        }
        if inner_rad <= 0.0 && outer_rad >= PI {
            return Ok(());
        }

        let mut out = 0;
        for i in 0..self.len() {
            let sep = centre.separation(self.radec(i));
            if sep < inner_rad || sep > outer_rad {
                continue;
            }
            if out != i {
                self.ra[out] = self.ra[i];
                self.dec[out] = self.dec[i];
                self.i[out] = self.i[i];
                self.q[out] = self.q[i];
                self.u[out] = self.u[i];
                self.v[out] = self.v[i];
                self.ref_freq_hz[out] = self.ref_freq_hz[i];
                self.spectral_index[out] = self.spectral_index[i];
                self.l[out] = self.l[i];
                self.m[out] = self.m[i];
                self.n[out] = self.n[i];
                self.fwhm_major[out] = self.fwhm_major[i];
                self.fwhm_minor[out] = self.fwhm_minor[i];
                self.position_angle[out] = self.position_angle[i];
            }
            out += 1;
        }
        self.truncate(out);
        Ok(())
    }

    fn truncate(&mut self, len: usize) {
        self.ra.truncate(len);
        self.dec.truncate(len);
        self.i.truncate(len);
        self.q.truncate(len);
        self.u.truncate(len);
        self.v.truncate(len);
        self.ref_freq_hz.truncate(len);
        self.spectral_index.truncate(len);
        self.l.truncate(len);
        self.m.truncate(len);
        self.n.truncate(len);
        self.fwhm_major.truncate(len);
        self.fwhm_minor.truncate(len);
        self.position_angle.truncate(len);
    }
}
