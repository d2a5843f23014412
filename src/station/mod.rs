// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Station and telescope models.

A station is an array of identical elements beamformed towards a pointing
direction. Its response in a sky direction is the element's 2x2 Jones
response scaled by the normalised array factor, the DFT of the beamforming
weights over the element layout.
 */

pub mod element;
mod error;

pub use element::{ElementModel, ElementPattern, LengthUnits, SplinePatternSet, Taper};
pub use error::StationError;

use crate::c64;
use crate::constants::{TAU, VEL_C};
use crate::coord::{EnuDirection, Xyz};
use crate::jones::Jones;

/// An aperture-array station: element positions, per-element instrumental
/// errors, and the shared element model.
pub struct StationModel {
    /// Element positions in the local east-north-up frame \[metres\]
    pub enu_x: Vec<f64>,
    pub enu_y: Vec<f64>,
    pub enu_z: Vec<f64>,

    /// Per-element amplitude gain (1.0 when unperturbed).
    pub element_gain: Vec<f64>,
    /// Per-element phase offset \[radians\]
    pub element_phase: Vec<f64>,
    /// Per-element signal-path length error \[metres\]; enters the weights
    /// as a frequency-dependent phase.
    pub cable_length_error: Vec<f64>,

    pub element: ElementModel,
}

impl StationModel {
    /// A station of ideal elements at the given ENU positions.
    pub fn from_positions(
        enu_x: Vec<f64>,
        enu_y: Vec<f64>,
        enu_z: Vec<f64>,
        element: ElementModel,
    ) -> Result<StationModel, StationError> {
        let n = enu_x.len();
        if n == 0 {
            return Err(StationError::NoElements);
        }
        for (column, len) in [("enu_y", enu_y.len()), ("enu_z", enu_z.len())] {
            if len != n {
                return Err(StationError::LayoutMismatch {
                    num_elements: n,
                    column,
                    len,
                });
            }
        }
        Ok(StationModel {
            enu_x,
            enu_y,
            enu_z,
            element_gain: vec![1.0; n],
            element_phase: vec![0.0; n],
            cable_length_error: vec![0.0; n],
            element,
        })
    }

    pub fn num_elements(&self) -> usize {
        self.enu_x.len()
    }

    /// Check that the per-element columns all have the same length.
    pub fn validate(&self) -> Result<(), StationError> {
        let n = self.num_elements();
        if n == 0 {
            return Err(StationError::NoElements);
        }
        for (column, len) in [
            ("enu_y", self.enu_y.len()),
            ("enu_z", self.enu_z.len()),
            ("element_gain", self.element_gain.len()),
            ("element_phase", self.element_phase.len()),
            ("cable_length_error", self.cable_length_error.len()),
        ] {
            if len != n {
                return Err(StationError::LayoutMismatch {
                    num_elements: n,
                    column,
                    len,
                });
            }
        }
        Ok(())
    }

    /// The beamforming weights towards a pointing direction at a frequency.
    pub fn beamforming_weights(
        &self,
        freq_hz: f64,
        pointing: EnuDirection,
        out: &mut Vec<c64>,
    ) -> Result<(), StationError> {
        if freq_hz <= 0.0 {
            return Err(StationError::InvalidFrequency { freq_hz });
        }
        let wavenumber = TAU * freq_hz / VEL_C;
        // Fold the cable-length error into each element's phase.
        let extra_phase: Vec<f64> = self
            .element_phase
            .iter()
            .zip(self.cable_length_error.iter())
            .map(|(&phase, &cable)| phase + wavenumber * cable)
            .collect();
        element::beamforming_weights(
            &self.enu_x,
            &self.enu_y,
            &self.enu_z,
            &self.element_gain,
            &extra_phase,
            wavenumber,
            (pointing.x, pointing.y, pointing.z),
            out,
        );
        Ok(())
    }

    /// The station's full 2x2 response in each of the given horizontal
    /// directions: element response times normalised array factor. The
    /// output is resized to match the input length.
    pub fn beam_response(
        &self,
        x: &[f64],
        y: &[f64],
        z: &[f64],
        freq_hz: f64,
        pointing: EnuDirection,
        out: &mut Vec<Jones<f64>>,
    ) -> Result<(), StationError> {
        self.validate()?;
        self.element.evaluate(x, y, z, freq_hz, out)?;

        let mut weights = Vec::new();
        self.beamforming_weights(freq_hz, pointing, &mut weights)?;
        let wavenumber = TAU * freq_hz / VEL_C;
        let norm = 1.0 / self.num_elements() as f64;

        for (i, j) in out.iter_mut().enumerate() {
            let mut af = c64::new(0.0, 0.0);
            for (e, w) in weights.iter().enumerate() {
                let phase =
                    wavenumber * (self.enu_x[e] * x[i] + self.enu_y[e] * y[i] + self.enu_z[e] * z[i]);
                af += w * c64::from_polar(1.0, phase);
            }
            *j = *j * (af * norm);
        }
        Ok(())
    }
}

/// The whole interferometer: its location and its stations.
pub struct TelescopeModel {
    /// Array reference longitude \[radians\]
    pub longitude_rad: f64,
    /// Array reference latitude \[radians\]
    pub latitude_rad: f64,

    /// Station positions in the local east-north-up frame \[metres\]
    pub station_east: Vec<f64>,
    pub station_north: Vec<f64>,
    pub station_up: Vec<f64>,

    pub stations: Vec<StationModel>,
}

impl TelescopeModel {
    pub fn num_stations(&self) -> usize {
        self.stations.len()
    }

    pub fn num_cross_baselines(&self) -> usize {
        let n = self.num_stations();
        n * n.saturating_sub(1) / 2
    }

    /// Station positions in the local equatorial frame used for (u,v,w)
    /// evaluation.
    pub fn station_xyzs(&self) -> Vec<Xyz> {
        self.station_east
            .iter()
            .zip(self.station_north.iter())
            .zip(self.station_up.iter())
            .map(|((&e, &n), &u)| Xyz::from_enu(e, n, u, self.latitude_rad))
            .collect()
    }
}
