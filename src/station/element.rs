// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Element (antenna) response patterns.

An element response is a 2x2 Jones matrix per direction: the first row is
the X port's (E_theta, E_phi) field components, the second row the Y
port's. Patterns are evaluated in spherical angles derived from horizontal
direction cosines, with each port's azimuthal angle offset by the port's
orientation on the ground.
 */

use crate::c64;
use crate::constants::{FRAC_PI_2, FWHM_TO_SIGMA, PI, VEL_C};
use crate::jones::Jones;

use super::StationError;

/// How a dipole's length is expressed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LengthUnits {
    Metres,
    Wavelengths,
}

/// A numerically-fitted pattern surface, evaluated at a spherical angle
/// pair. Implemented by fitted spline surfaces and, in tests, by closures.
pub trait SplineSurface: Send + Sync {
    fn evaluate(&self, theta: f64, phi: f64) -> f64;
}

impl<F: Fn(f64, f64) -> f64 + Send + Sync> SplineSurface for F {
    fn evaluate(&self, theta: f64, phi: f64) -> f64 {
        self(theta, phi)
    }
}

/// The four fitted surfaces of one port at one frequency: real and
/// imaginary parts of the Ludwig-3 horizontal and vertical components.
pub struct PortSurfaces {
    pub h_re: Box<dyn SplineSurface>,
    pub h_im: Box<dyn SplineSurface>,
    pub v_re: Box<dyn SplineSurface>,
    pub v_im: Box<dyn SplineSurface>,
}

impl PortSurfaces {
    /// Evaluate the Ludwig-3 components and convert them to spherical
    /// (E_theta, E_phi) components.
    fn evaluate(&self, theta: f64, phi: f64) -> (c64, c64) {
        let h = c64::new(self.h_re.evaluate(theta, phi), self.h_im.evaluate(theta, phi));
        let v = c64::new(self.v_re.evaluate(theta, phi), self.v_im.evaluate(theta, phi));
        let (s_phi, c_phi) = phi.sin_cos();
        (h * c_phi + v * s_phi, -h * s_phi + v * c_phi)
    }
}

/// Fitted pattern data for both ports over a set of frequencies.
pub struct SplinePatternSet {
    pub freqs_hz: Vec<f64>,
    /// One entry per frequency, in the same order as `freqs_hz`.
    pub x: Vec<PortSurfaces>,
    pub y: Vec<PortSurfaces>,
}

impl SplinePatternSet {
    /// The index of the closest fitted frequency.
    fn nearest_freq(&self, freq_hz: f64) -> Result<usize, StationError> {
        if self.freqs_hz.is_empty() {
            return Err(StationError::EmptySplineSet);
        }
        let mut best = 0;
        for (i, &f) in self.freqs_hz.iter().enumerate() {
            if (f - freq_hz).abs() < (self.freqs_hz[best] - freq_hz).abs() {
                best = i;
            }
        }
        Ok(best)
    }
}

/// The functional form of an element's response.
pub enum ElementPattern {
    /// Unity response in both ports.
    Isotropic,

    /// An analytic thin dipole of a given length.
    Dipole { length: f64, units: LengthUnits },

    /// An ideal infinitesimal dipole; only the geometric projection of the
    /// field onto the port axes.
    GeometricDipole,

    /// Numerically-fitted surfaces, e.g. from an electromagnetic simulation.
    Spline(SplinePatternSet),
}

/// How the response is tapered away from the zenith.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Taper {
    None,
    /// Multiply by cos(theta)^power.
    Cosine { power: f64 },
    /// A Gaussian in the zenith angle with the given FWHM.
    Gaussian { fwhm_rad: f64 },
}

/// An element pattern plus its mounting: the orientations of the two ports
/// and an overall taper.
pub struct ElementModel {
    pub pattern: ElementPattern,
    pub taper: Taper,
    /// Orientation of the X port, east of north \[radians\]
    pub orientation_x_rad: f64,
    /// Orientation of the Y port, east of north \[radians\]
    pub orientation_y_rad: f64,
}

impl Default for ElementModel {
    fn default() -> ElementModel {
        ElementModel {
            pattern: ElementPattern::Isotropic,
            taper: Taper::None,
            orientation_x_rad: FRAC_PI_2,
            orientation_y_rad: 0.0,
        }
    }
}

impl ElementModel {
    /// Evaluate the full 2x2 element response for horizontal direction
    /// cosines `(x, y, z)`. The output is resized to match the input length.
    pub fn evaluate(
        &self,
        x: &[f64],
        y: &[f64],
        z: &[f64],
        freq_hz: f64,
        out: &mut Vec<Jones<f64>>,
    ) -> Result<(), StationError> {
        if freq_hz <= 0.0 {
            return Err(StationError::InvalidFrequency { freq_hz });
        }
        let n = x.len().min(y.len()).min(z.len());
        out.clear();
        out.resize(n, Jones::zero());

        match &self.pattern {
            ElementPattern::Isotropic => {
                for j in out.iter_mut() {
                    *j = Jones::identity();
                }
            }

            ElementPattern::Dipole { length, units } => {
                let kl2 = match units {
                    LengthUnits::Wavelengths => PI * length,
                    LengthUnits::Metres => PI * length * freq_hz / VEL_C,
                };
                let delta_x = self.orientation_x_rad - FRAC_PI_2;
                let delta_y = self.orientation_y_rad - FRAC_PI_2;
                for (i, j) in out.iter_mut().enumerate() {
                    let theta = z[i].clamp(-1.0, 1.0).acos();
                    let phi = y[i].atan2(x[i]);
                    let (et, ep) = dipole_response(theta, phi + delta_x, kl2);
                    j[0] = c64::new(et, 0.0);
                    j[1] = c64::new(ep, 0.0);
                    let (et, ep) = dipole_response(theta, phi + delta_y, kl2);
                    j[2] = c64::new(et, 0.0);
                    j[3] = c64::new(ep, 0.0);
                }
            }

            ElementPattern::GeometricDipole => {
                let delta_x = self.orientation_x_rad - FRAC_PI_2;
                let delta_y = self.orientation_y_rad - FRAC_PI_2;
                for (i, j) in out.iter_mut().enumerate() {
                    let theta = z[i].clamp(-1.0, 1.0).acos();
                    let phi = y[i].atan2(x[i]);
                    let c_theta = theta.cos();
                    let (s_px, c_px) = (phi + delta_x).sin_cos();
                    j[0] = c64::new(c_theta * c_px, 0.0);
                    j[1] = c64::new(-s_px, 0.0);
                    let (s_py, c_py) = (phi + delta_y).sin_cos();
                    j[2] = c64::new(c_theta * c_py, 0.0);
                    j[3] = c64::new(-s_py, 0.0);
                }
            }

            ElementPattern::Spline(set) => {
                let fi = set.nearest_freq(freq_hz)?;
                // Fitted surfaces are tabulated against the port's own frame,
                // which is rotated the opposite way to the analytic patterns.
                let delta_x = FRAC_PI_2 - self.orientation_x_rad;
                let delta_y = FRAC_PI_2 - self.orientation_y_rad;
                for (i, j) in out.iter_mut().enumerate() {
                    let theta = z[i].clamp(-1.0, 1.0).acos();
                    let phi = y[i].atan2(x[i]);
                    let (et, ep) = set.x[fi].evaluate(theta, phi + delta_x);
                    j[0] = et;
                    j[1] = ep;
                    let (et, ep) = set.y[fi].evaluate(theta, phi + delta_y);
                    j[2] = et;
                    j[3] = ep;
                }
            }
        }

        match self.taper {
            Taper::None => (),
            Taper::Cosine { power } => {
                for (i, j) in out.iter_mut().enumerate() {
                    let c_theta = z[i].clamp(-1.0, 1.0);
                    *j = *j * c_theta.max(0.0).powf(power);
                }
            }
            Taper::Gaussian { fwhm_rad } => {
                let sigma = fwhm_rad * FWHM_TO_SIGMA;
                for (i, j) in out.iter_mut().enumerate() {
                    let theta = z[i].clamp(-1.0, 1.0).acos();
                    *j = *j * (-theta * theta / (2.0 * sigma * sigma)).exp();
                }
            }
        }

        Ok(())
    }
}

/// The (E_theta, E_phi) field of a thin dipole lying along the azimuth of
/// `phi = 0`, with `kl2` being half the product of the wavenumber and the
/// dipole length.
fn dipole_response(theta: f64, phi: f64, kl2: f64) -> (f64, f64) {
    let (s_phi, c_phi) = phi.sin_cos();
    let (s_theta, c_theta) = theta.sin_cos();
    let cos_xi = s_theta * c_phi;
    let denom = 1.0 - cos_xi * cos_xi;
    let amp = if denom < 1e-12 {
        // The limit along the dipole axis.
        kl2 * kl2.sin() / 2.0
    } else {
        ((kl2 * cos_xi).cos() - kl2.cos()) / denom
    };
    (amp * c_theta * c_phi, -amp * s_phi)
}

/// DFT beamforming weights for an array of element positions, pointing the
/// main lobe towards `(x0, y0, z0)` at the given wavenumber. `extra_phase`
/// carries per-element instrumental phase (calibration phase plus cable
/// delay), and `gains` the per-element amplitude.
pub fn beamforming_weights(
    enu_x: &[f64],
    enu_y: &[f64],
    enu_z: &[f64],
    gains: &[f64],
    extra_phase: &[f64],
    wavenumber: f64,
    (x0, y0, z0): (f64, f64, f64),
    out: &mut Vec<c64>,
) {
    let n = enu_x.len();
    out.clear();
    out.reserve(n);
    for i in 0..n {
        let geometric = -wavenumber * (enu_x[i] * x0 + enu_y[i] * y0 + enu_z[i] * z0);
        out.push(c64::from_polar(gains[i], extra_phase[i] + geometric));
    }
}
