// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use approx::assert_abs_diff_eq;
use hifitime::Epoch;

use super::grid::*;
use super::*;
use crate::constants::{FRAC_PI_2, PI, TAU};

#[test]
fn lmn_at_phase_centre_is_the_pole() {
    let pc = RADec::from_degrees(30.0, -26.7);
    let lmn = pc.to_lmn(pc);
    assert_abs_diff_eq!(lmn.l, 0.0);
    assert_abs_diff_eq!(lmn.m, 0.0);
    assert_abs_diff_eq!(lmn.n, 1.0);
}

#[test]
fn lmn_small_offset_in_ra_is_mostly_l() {
    let pc = RADec::from_degrees(0.0, 0.0);
    let src = RADec::from_degrees(1.0, 0.0);
    let lmn = src.to_lmn(pc);
    assert_abs_diff_eq!(lmn.l, 1.0_f64.to_radians().sin(), epsilon = 1e-12);
    assert_abs_diff_eq!(lmn.m, 0.0, epsilon = 1e-12);
    assert!(lmn.n < 1.0);
}

#[test]
fn separation_matches_declination_offset() {
    let a = RADec::from_degrees(45.0, 10.0);
    let b = RADec::from_degrees(45.0, 12.5);
    assert_abs_diff_eq!(a.separation(b), 2.5_f64.to_radians(), epsilon = 1e-12);
    // Symmetric.
    assert_abs_diff_eq!(a.separation(b), b.separation(a));
}

#[test]
fn source_on_meridian_is_due_north_or_south() {
    let lat = -0.5;
    // Transiting source north of the observer's zenith.
    let hd = HADec { ha: 0.0, dec: 0.2 };
    let azel = hd.to_azel(lat);
    assert_abs_diff_eq!(azel.az, 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(azel.el, FRAC_PI_2 - (0.2 - lat).abs(), epsilon = 1e-12);
}

#[test]
fn enu_direction_of_zenith_source() {
    let lat = 0.7;
    let hd = HADec { ha: 0.0, dec: lat };
    let enu = hd.to_enu_direction(lat);
    assert_abs_diff_eq!(enu.x, 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(enu.y, 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(enu.z, 1.0, epsilon = 1e-12);
}

#[test]
fn cross_uvws_are_antisymmetric_in_station_order() {
    let xyzs = [
        Xyz {
            x: 10.0,
            y: -20.0,
            z: 5.0,
        },
        Xyz {
            x: -3.0,
            y: 7.0,
            z: 1.0,
        },
    ];
    let pc = HADec { ha: 0.3, dec: -0.4 };
    let fwd = xyzs_to_cross_uvws(&xyzs, pc);
    let rev = xyzs_to_cross_uvws(&[xyzs[1], xyzs[0]], pc);
    assert_eq!(fwd.len(), 1);
    assert_abs_diff_eq!(fwd[0].u, -rev[0].u);
    assert_abs_diff_eq!(fwd[0].v, -rev[0].v);
    assert_abs_diff_eq!(fwd[0].w, -rev[0].w);
}

#[test]
fn baseline_pair_count() {
    assert_eq!(cross_baseline_pairs(2), vec![(0, 1)]);
    assert_eq!(cross_baseline_pairs(4).len(), 6);
}

#[test]
fn lmst_advances_with_time() {
    let lon = 0.4;
    let t0 = Epoch::from_gregorian_utc_at_midnight(2020, 1, 1);
    let lst0 = get_lmst(lon, t0);
    // One sidereal day later the LST wraps back to nearly the same value; a
    // quarter of a solar day later it has advanced by a bit over pi/2.
    let lst1 = get_lmst(lon, t0 + hifitime::Duration::from_seconds(21600.0));
    let diff = (lst1 - lst0).rem_euclid(TAU);
    assert_abs_diff_eq!(diff, FRAC_PI_2, epsilon = 0.01);
}

#[test]
fn image_lm_grid_shape_and_order() {
    let (l, m) = image_lm_grid(4, 0.1).unwrap();
    assert_eq!(l.len(), 16);
    assert_eq!(m.len(), 16);
    // l is fastest-varying: the first row has constant m.
    assert_abs_diff_eq!(m[0], m[3]);
    assert!(l[0] < l[1]);
    // Symmetric about zero.
    assert_abs_diff_eq!(l[0], -l[3]);
}

#[test]
fn healpix_pixel_count() {
    for nside in [1, 2, 4] {
        let (theta, phi) = healpix_ring_to_theta_phi(nside).unwrap();
        assert_eq!(theta.len(), healpix_nside_to_npix(nside));
        assert_eq!(phi.len(), theta.len());
        // Colatitudes are in [0, pi], longitudes in [0, 2 pi].
        assert!(theta.iter().all(|&t| (0.0..=PI).contains(&t)));
        assert!(phi.iter().all(|&p| (0.0..=TAU).contains(&p)));
    }
}

#[test]
fn healpix_nside_1_first_and_last_rings() {
    let (theta, _) = healpix_ring_to_theta_phi(1).unwrap();
    // nside=1 in the ring scheme: 4 pixels at z=2/3, 4 at the equator, 4 at
    // z=-2/3.
    assert_abs_diff_eq!(theta[0].cos(), 2.0 / 3.0, epsilon = 1e-12);
    assert_abs_diff_eq!(theta[5].cos(), 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(theta[11].cos(), -2.0 / 3.0, epsilon = 1e-12);
}

#[test]
fn equatorial_grid_with_horizontal_pointing_fails_fast() {
    let result = generate_coordinates(
        CoordFrame::Equatorial,
        CoordGrid::HealpixRing { nside: 1 },
        Pointing::Horizontal { az: 0.0, el: 1.0 },
    );
    assert!(matches!(result, Err(CoordError::UnsupportedPointing)));
}

#[test]
fn horizon_healpix_directions_are_unit_vectors() {
    let dirs = generate_coordinates(
        CoordFrame::Horizon,
        CoordGrid::HealpixRing { nside: 2 },
        Pointing::Horizontal { az: 0.0, el: FRAC_PI_2 },
    )
    .unwrap();
    assert_eq!(dirs.kind, CoordKind::EnuDirections);
    assert_eq!(dirs.len(), 48);
    for i in 0..dirs.len() {
        let r = dirs.x[i].powi(2) + dirs.y[i].powi(2) + dirs.z[i].powi(2);
        assert_abs_diff_eq!(r, 1.0, epsilon = 1e-12);
    }
}

#[test]
fn equatorial_healpix_tags_relative_lmn() {
    let dirs = generate_coordinates(
        CoordFrame::Equatorial,
        CoordGrid::HealpixRing { nside: 1 },
        Pointing::Equatorial(RADec::from_degrees(0.0, 90.0)),
    )
    .unwrap();
    assert_eq!(dirs.kind, CoordKind::RelativeLmn);
    // Pointing at the pole: n is the sine of each pixel's declination, so the
    // first ring (dec ~ 41.8 deg) has n = 2/3.
    assert_abs_diff_eq!(dirs.z[0], 2.0 / 3.0, epsilon = 1e-12);
}
