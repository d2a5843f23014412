// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Coordinate types and conversions.

All angles are in radians and all positions are in metres unless noted
otherwise. The simulator works in three frames: equatorial (RA/Dec or hour
angle/Dec), horizontal (azimuth/elevation or ENU direction cosines), and the
projected Fourier (u,v,w) frame of a baseline.
 */

mod error;
pub mod grid;
#[cfg(test)]
mod tests;

pub use error::CoordError;

use hifitime::Epoch;
use serde::{Deserialize, Serialize};

use crate::constants::TAU;

/// An equatorial position: right ascension and declination.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct RADec {
    /// Right ascension \[radians\]
    pub ra: f64,
    /// Declination \[radians\]
    pub dec: f64,
}

impl RADec {
    pub fn from_radians(ra: f64, dec: f64) -> RADec {
        Self { ra, dec }
    }

    pub fn from_degrees(ra: f64, dec: f64) -> RADec {
        Self {
            ra: ra.to_radians(),
            dec: dec.to_radians(),
        }
    }

    /// Convert to an hour angle and declination given a local sidereal time.
    pub fn to_hadec(self, lst_rad: f64) -> HADec {
        HADec {
            ha: (lst_rad - self.ra) % TAU,
            dec: self.dec,
        }
    }

    /// The angular separation between two sky positions (haversine formula).
    pub fn separation(self, other: RADec) -> f64 {
        let sin_half_dec = ((other.dec - self.dec) / 2.0).sin();
        let sin_half_ra = ((other.ra - self.ra) / 2.0).sin();
        let a = sin_half_dec.powi(2) + self.dec.cos() * other.dec.cos() * sin_half_ra.powi(2);
        2.0 * a.sqrt().asin()
    }

    /// Direction cosines of this position relative to a phase centre.
    pub fn to_lmn(self, phase_centre: RADec) -> LMN {
        let d_ra = self.ra - phase_centre.ra;
        let (s_d_ra, c_d_ra) = d_ra.sin_cos();
        let (s_dec, c_dec) = self.dec.sin_cos();
        let (s_dec0, c_dec0) = phase_centre.dec.sin_cos();
        LMN {
            l: c_dec * s_d_ra,
            m: s_dec * c_dec0 - c_dec * s_dec0 * c_d_ra,
            n: s_dec * s_dec0 + c_dec * c_dec0 * c_d_ra,
        }
    }
}

/// An hour angle and declination.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HADec {
    /// Hour angle \[radians\]
    pub ha: f64,
    /// Declination \[radians\]
    pub dec: f64,
}

impl HADec {
    /// Convert to azimuth and elevation for an observer at a latitude.
    /// Azimuth is measured from north through east.
    pub fn to_azel(self, latitude_rad: f64) -> AzEl {
        let (s_ha, c_ha) = self.ha.sin_cos();
        let (s_dec, c_dec) = self.dec.sin_cos();
        let (s_lat, c_lat) = latitude_rad.sin_cos();
        let el = (s_lat * s_dec + c_lat * c_dec * c_ha).asin();
        let az = (-c_dec * s_ha).atan2(c_lat * s_dec - s_lat * c_dec * c_ha);
        AzEl { az, el }
    }

    /// Horizontal (ENU) direction cosines of this position for an observer at
    /// a latitude. Directions with a negative `z` are below the horizon.
    pub fn to_enu_direction(self, latitude_rad: f64) -> EnuDirection {
        let (s_ha, c_ha) = self.ha.sin_cos();
        let (s_dec, c_dec) = self.dec.sin_cos();
        let (s_lat, c_lat) = latitude_rad.sin_cos();
        EnuDirection {
            x: -c_dec * s_ha,
            y: s_dec * c_lat - c_dec * c_ha * s_lat,
            z: s_dec * s_lat + c_dec * c_ha * c_lat,
        }
    }
}

/// An azimuth and elevation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AzEl {
    /// Azimuth \[radians\]
    pub az: f64,
    /// Elevation \[radians\]
    pub el: f64,
}

/// Direction cosines relative to a phase centre.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct LMN {
    pub l: f64,
    pub m: f64,
    pub n: f64,
}

/// Horizontal direction cosines: `x` east, `y` north, `z` up.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct EnuDirection {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// A position in the local equatorial frame used for (u,v,w) evaluation:
/// `x` towards the meridian at the equator, `y` east, `z` towards the north
/// celestial pole.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Xyz {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Xyz {
    /// Convert local east-north-up station coordinates to the equatorial
    /// frame, given the array latitude.
    pub fn from_enu(east: f64, north: f64, up: f64, latitude_rad: f64) -> Xyz {
        let (s_lat, c_lat) = latitude_rad.sin_cos();
        Xyz {
            x: -north * s_lat + up * c_lat,
            y: east,
            z: north * c_lat + up * s_lat,
        }
    }

    /// Project this position into the (u,v,w) frame of a phase centre.
    pub fn to_uvw(self, phase_centre: HADec) -> UVW {
        let (s_ha, c_ha) = phase_centre.ha.sin_cos();
        let (s_dec, c_dec) = phase_centre.dec.sin_cos();
        UVW {
            u: s_ha * self.x + c_ha * self.y,
            v: -s_dec * c_ha * self.x + s_dec * s_ha * self.y + c_dec * self.z,
            w: c_dec * c_ha * self.x - c_dec * s_ha * self.y + s_dec * self.z,
        }
    }
}

/// Baseline coordinates in the Fourier plane. Units follow the input station
/// positions (metres here; divide by the wavelength for dimensionless
/// coordinates).
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct UVW {
    pub u: f64,
    pub v: f64,
    pub w: f64,
}

impl std::ops::Sub<UVW> for UVW {
    type Output = UVW;

    fn sub(self, rhs: UVW) -> UVW {
        UVW {
            u: self.u - rhs.u,
            v: self.v - rhs.v,
            w: self.w - rhs.w,
        }
    }
}

impl std::ops::Mul<f64> for UVW {
    type Output = UVW;

    fn mul(self, rhs: f64) -> UVW {
        UVW {
            u: self.u * rhs,
            v: self.v * rhs,
            w: self.w * rhs,
        }
    }
}

/// Generate the cross-correlation baseline [`UVW`]s for a set of station
/// positions. Baselines are ordered by the upper triangle of the station
/// pair matrix: (0,1), (0,2), ..., (1,2), ... with the coordinate being
/// station `p` minus station `q`.
pub fn xyzs_to_cross_uvws(xyzs: &[Xyz], phase_centre: HADec) -> Vec<UVW> {
    let station_uvws: Vec<UVW> = xyzs.iter().map(|xyz| xyz.to_uvw(phase_centre)).collect();
    let mut uvws = Vec::with_capacity(xyzs.len() * (xyzs.len().saturating_sub(1)) / 2);
    for (i, uvw_p) in station_uvws.iter().enumerate() {
        for uvw_q in station_uvws.iter().skip(i + 1) {
            uvws.push(*uvw_p - *uvw_q);
        }
    }
    uvws
}

/// Enumerate the cross-correlation station pairs in baseline order.
pub fn cross_baseline_pairs(num_stations: usize) -> Vec<(usize, usize)> {
    let mut pairs = Vec::with_capacity(num_stations * num_stations.saturating_sub(1) / 2);
    for p in 0..num_stations {
        for q in p + 1..num_stations {
            pairs.push((p, q));
        }
    }
    pairs
}

/// The local mean sidereal time for a longitude at an epoch, from the Earth
/// rotation angle. UT1 is approximated by UTC; the sub-second DUT1 offset is
/// negligible for smearing and beam pointing purposes.
pub fn get_lmst(longitude_rad: f64, epoch: Epoch) -> f64 {
    let jd_ut1 = epoch.to_jde_utc_days();
    let era = TAU * (0.779_057_273_264_0 + 1.002_737_811_911_354_48 * (jd_ut1 - 2_451_545.0));
    (era + longitude_rad).rem_euclid(TAU)
}

/// The epoch at the centre of a time sample, given the sample index and the
/// integration interval.
pub fn timestep_centroid(start: Epoch, time_inc_s: f64, timestep: usize) -> Epoch {
    start + hifitime::Duration::from_seconds((timestep as f64 + 0.5) * time_inc_s)
}
