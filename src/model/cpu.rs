// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! CPU visibility synthesis, parallel over baselines.

use hifitime::{Duration, Epoch};
use log::{debug, trace};
use rayon::prelude::*;

use super::{accumulate_baseline_visibility, sinc, ModelError};
use crate::{c32, c64};
use crate::constants::{GAUSSIAN_EXP_CONST, PI, TAU, VEL_C};
use crate::coord::{
    cross_baseline_pairs, get_lmst, timestep_centroid, xyzs_to_cross_uvws, RADec, Xyz, UVW,
};
use crate::jones::Jones;
use crate::sky::SkyModel;
use crate::station::TelescopeModel;
use crate::vis::{VisAmps, VisCube};

/// Everything about the observation other than the telescope and the sky.
#[derive(Clone, Debug)]
pub struct ObservationParams {
    pub phase_centre: RADec,
    pub start_time: Epoch,
    /// Length of one time sample \[seconds\]
    pub time_inc_s: f64,
    pub num_times: usize,

    /// Centre frequency of the first channel \[Hz\]
    pub freq_start_hz: f64,
    pub freq_inc_hz: f64,
    pub num_channels: usize,

    /// Channel width for bandwidth smearing \[Hz\]; zero disables it.
    pub channel_bandwidth_hz: f64,
    /// Correlator averaging interval for time smearing \[seconds\]; zero
    /// disables it.
    pub time_average_s: f64,
}

/// Simulates a visibility cube for a telescope, sky model and observation.
pub struct VisSimulator<'a> {
    telescope: &'a TelescopeModel,
    sky: SkyModel,
    params: ObservationParams,

    /// Station positions in the local equatorial frame.
    xyzs: Vec<Xyz>,
    /// Cross-correlation station pairs, in baseline order.
    pairs: Vec<(usize, usize)>,
}

impl<'a> VisSimulator<'a> {
    /// The sky model's relative direction cosines are (re-)evaluated against
    /// the observation's phase centre.
    pub fn new(
        telescope: &'a TelescopeModel,
        mut sky: SkyModel,
        params: ObservationParams,
    ) -> Result<VisSimulator<'a>, ModelError> {
        if telescope.num_stations() < 2 {
            return Err(ModelError::TooFewStations {
                got: telescope.num_stations(),
            });
        }
        if sky.is_empty() {
            return Err(ModelError::NoSources);
        }
        if params.num_times == 0 || params.num_channels == 0 {
            return Err(ModelError::EmptyObservation);
        }
        if params.freq_start_hz <= 0.0 {
            return Err(ModelError::InvalidStartFrequency {
                freq_hz: params.freq_start_hz,
            });
        }
        for station in &telescope.stations {
            station.validate()?;
        }

        sky.evaluate_relative_lmn(params.phase_centre);
        let xyzs = telescope.station_xyzs();
        let pairs = cross_baseline_pairs(telescope.num_stations());
        debug!(
            "Simulating {} sources over {} baselines, {} timesteps, {} channels",
            sky.len(),
            pairs.len(),
            params.num_times,
            params.num_channels
        );
        Ok(VisSimulator {
            telescope,
            sky,
            params,
            xyzs,
            pairs,
        })
    }

    /// Run the full simulation into a polarised (2x2 matrix) cube.
    pub fn simulate(&self) -> Result<VisCube, ModelError> {
        self.run(true)
    }

    /// As [`VisSimulator::simulate`], but producing a scalar Stokes I cube:
    /// each cell is (XX + YY) / 2.
    pub fn simulate_stokes_i(&self) -> Result<VisCube, ModelError> {
        self.run(false)
    }

    fn run(&self, matrix: bool) -> Result<VisCube, ModelError> {
        let p = &self.params;
        let mut cube = VisCube::new(p.num_times, self.pairs.len(), p.num_channels, matrix)?;
        cube.freq_start_hz = p.freq_start_hz;
        cube.freq_inc_hz = p.freq_inc_hz;
        cube.channel_bandwidth_hz = p.channel_bandwidth_hz;
        cube.time_int_s = p.time_inc_s;
        for t in 0..p.num_times {
            self.model_timestep(&mut cube, t)?;
        }
        Ok(cube)
    }

    /// Model all channels and baselines of one timestep into the cube.
    fn model_timestep(&self, cube: &mut VisCube, timestep: usize) -> Result<(), ModelError> {
        let p = &self.params;
        let lat = self.telescope.latitude_rad;
        let num_baselines = self.pairs.len();
        let num_sources = self.sky.len();

        let epoch = timestep_centroid(p.start_time, p.time_inc_s, timestep);
        let lst = get_lmst(self.telescope.longitude_rad, epoch);
        let hadec = p.phase_centre.to_hadec(lst);
        trace!("Timestep {timestep}: LST {lst} rad");

        let uvws_m = xyzs_to_cross_uvws(&self.xyzs, hadec);
        for (bl, uvw) in uvws_m.iter().enumerate() {
            let ci = cube.coord_index(timestep, bl);
            cube.uu[ci] = uvw.u;
            cube.vv[ci] = uvw.v;
            cube.ww[ci] = uvw.w;
        }

        // Baseline drift over the averaging interval, for time smearing.
        let duvws_m: Option<Vec<UVW>> = if p.time_average_s > 0.0 {
            let half = Duration::from_seconds(p.time_average_s / 2.0);
            let ha_a = p
                .phase_centre
                .to_hadec(get_lmst(self.telescope.longitude_rad, epoch - half));
            let ha_b = p
                .phase_centre
                .to_hadec(get_lmst(self.telescope.longitude_rad, epoch + half));
            let uvws_a = xyzs_to_cross_uvws(&self.xyzs, ha_a);
            let uvws_b = xyzs_to_cross_uvws(&self.xyzs, ha_b);
            Some(
                uvws_a
                    .iter()
                    .zip(uvws_b.iter())
                    .map(|(&a, &b)| b - a)
                    .collect(),
            )
        } else {
            None
        };

        // Horizontal direction cosines of every source at this time.
        let mut x = Vec::with_capacity(num_sources);
        let mut y = Vec::with_capacity(num_sources);
        let mut z = Vec::with_capacity(num_sources);
        for i in 0..num_sources {
            let enu = self.sky.radec(i).to_hadec(lst).to_enu_direction(lat);
            x.push(enu.x);
            y.push(enu.y);
            z.push(enu.z);
        }
        let pointing = hadec.to_enu_direction(lat);

        for c in 0..p.num_channels {
            let freq_hz = cube.channel_freq_hz(c);
            let inv_lambda = freq_hz / VEL_C;
            let frac_bw = p.channel_bandwidth_hz / freq_hz;

            // Per-station responses towards every source.
            let mut beams: Vec<Vec<Jones<f64>>> = Vec::with_capacity(self.telescope.stations.len());
            for station in &self.telescope.stations {
                let mut response = Vec::new();
                station.beam_response(&x, &y, &z, freq_hz, pointing, &mut response)?;
                beams.push(response);
            }

            // Channel-scaled brightness matrices.
            let brightness: Vec<Jones<f64>> = (0..num_sources)
                .map(|i| self.sky.stokes(i).brightness() * self.sky.flux_scale(i, freq_hz))
                .collect();

            let row: Vec<Jones<f64>> = {
                let sky = &self.sky;
                let pairs = &self.pairs;
                let uvws_m = &uvws_m;
                let duvws_m = duvws_m.as_deref();
                let z = &z;
                (0..num_baselines)
                    .into_par_iter()
                    .map(|bl| {
                        let (p_st, q_st) = pairs[bl];
                        let uvw = uvws_m[bl] * inv_lambda;
                        let duvw = duvws_m.map(|d| d[bl] * inv_lambda);
                        let mut acc = Jones::zero();
                        for i in 0..num_sources {
                            // Sources below the horizon contribute nothing.
                            if z[i] <= 0.0 {
                                continue;
                            }
                            let (l, m, n) = (sky.l[i], sky.m[i], sky.n[i]);
                            let arg = uvw.u * l + uvw.v * m + uvw.w * (n - 1.0);
                            let mut k = 1.0;
                            if frac_bw > 0.0 {
                                k *= sinc(PI * frac_bw * arg);
                            }
                            if let Some(d) = duvw {
                                k *= sinc(PI * (d.u * l + d.v * m + d.w * (n - 1.0)));
                            }
                            if sky.is_gaussian(i) {
                                let (s_pa, c_pa) = sky.position_angle[i].sin_cos();
                                let k_x = uvw.u * s_pa + uvw.v * c_pa;
                                let k_y = uvw.u * c_pa - uvw.v * s_pa;
                                k *= (GAUSSIAN_EXP_CONST
                                    * ((sky.fwhm_major[i] * k_x).powi(2)
                                        + (sky.fwhm_minor[i] * k_y).powi(2)))
                                .exp();
                            }
                            let phase = c64::from_polar(k, TAU * arg);
                            accumulate_baseline_visibility(
                                &mut acc,
                                &beams[p_st][i],
                                &beams[q_st][i],
                                &brightness[i],
                                phase,
                            );
                        }
                        acc
                    })
                    .collect()
            };

            let offset = (c * p.num_times + timestep) * num_baselines;
            match &mut cube.amps {
                VisAmps::Matrix(amps) => {
                    for (out, acc) in amps[offset..offset + num_baselines].iter_mut().zip(&row) {
                        *out = Jones::<f32>::from(*acc);
                    }
                }
                VisAmps::Scalar(amps) => {
                    for (out, acc) in amps[offset..offset + num_baselines].iter_mut().zip(&row) {
                        let stokes_i = (acc[0] + acc[3]) * 0.5;
                        *out = c32::new(stokes_i.re as f32, stokes_i.im as f32);
                    }
                }
            }
        }
        Ok(())
    }
}
