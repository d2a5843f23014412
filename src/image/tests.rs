// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use approx::assert_abs_diff_eq;

use super::*;
use crate::c32;
use crate::constants::TAU;
use crate::jones::Jones;
use crate::vis::{VisAmps, VisCube};

/// A cube whose baselines all sit at (u,v,w) = 0, so every pixel of a DFT
/// image is just the mean visibility.
fn zero_baseline_cube(num_times: usize, matrix: bool) -> VisCube {
    let mut cube = VisCube::new(num_times, 3, 2, matrix).unwrap();
    cube.freq_start_hz = 150e6;
    cube.freq_inc_hz = 1e6;
    cube
}

fn set_all_scalar(cube: &mut VisCube, value: c32) {
    if let VisAmps::Scalar(amps) = &mut cube.amps {
        for a in amps.iter_mut() {
            *a = value;
        }
    }
}

#[test]
fn zero_baselines_give_a_uniform_image() {
    let mut cube = zero_baseline_cube(1, false);
    set_all_scalar(&mut cube, c32::new(2.0, -1.0));
    let image = make_image(&cube, &ImageSettings::stokes_i(4, 0.1)).unwrap();
    assert_eq!(image.data.dim(), (1, 1, 1, 16));
    for &px in image.plane(0, 0, 0).iter() {
        assert_abs_diff_eq!(px, 2.0, epsilon = 1e-6);
    }
}

#[test]
fn point_source_peaks_at_its_pixel() {
    // One time, one channel, six baselines, wavelength of exactly 1 m so
    // the stored coordinates are already in wavelengths.
    let mut cube = VisCube::new(1, 6, 1, false).unwrap();
    cube.freq_start_hz = crate::constants::VEL_C;
    let uv = [
        (0.0, 0.0),
        (50.0, 0.0),
        (0.0, 50.0),
        (30.0, -70.0),
        (-80.0, 20.0),
        (120.0, 40.0),
    ];
    let side = 8;
    let fov = 0.2;
    let max = (fov / 2.0_f64).sin();
    let inc = 2.0 * max / side as f64;
    let (i0, j0) = (5, 6);
    let l0 = -max + (i0 as f64 + 0.5) * inc;
    let m0 = -max + (j0 as f64 + 0.5) * inc;
    for (b, &(u, v)) in uv.iter().enumerate() {
        cube.uu[b] = u;
        cube.vv[b] = v;
        if let VisAmps::Scalar(amps) = &mut cube.amps {
            let phase = TAU * (u * l0 + v * m0);
            amps[b] = c32::new(phase.cos() as f32, phase.sin() as f32);
        }
    }

    let image = make_image(&cube, &ImageSettings::stokes_i(side, fov)).unwrap();
    let peak = image.pixel(0, 0, 0, i0, j0);
    assert_abs_diff_eq!(peak, 1.0, epsilon = 1e-5);
    for &px in image.plane(0, 0, 0).iter() {
        assert!(px <= peak + 1e-6);
    }
}

#[test]
fn stokes_planes_from_matrix_amplitudes() {
    let mut cube = zero_baseline_cube(1, true);
    if let VisAmps::Matrix(amps) = &mut cube.amps {
        for j in amps.iter_mut() {
            *j = Jones::from([
                c32::new(2.0, 0.0),
                c32::new(0.5, 0.25),
                c32::new(0.5, -0.25),
                c32::new(1.0, 0.0),
            ]);
        }
    }
    let mut settings = ImageSettings::stokes_i(2, 0.1);
    settings.pol = PolSelection::FullStokes;
    let image = make_image(&cube, &settings).unwrap();
    assert_eq!(image.pols.len(), 4);
    // I = (xx+yy)/2, Q = (xx-yy)/2, U = Re(xy+yx)/2, V = Re(-i(xy-yx))/2.
    assert_abs_diff_eq!(image.pixel(0, 0, 0, 0, 0), 1.5, epsilon = 1e-6);
    assert_abs_diff_eq!(image.pixel(0, 0, 1, 0, 0), 0.5, epsilon = 1e-6);
    assert_abs_diff_eq!(image.pixel(0, 0, 2, 0, 0), 0.5, epsilon = 1e-6);
    assert_abs_diff_eq!(image.pixel(0, 0, 3, 0, 0), 0.25, epsilon = 1e-6);
}

#[test]
fn time_snapshots_versus_synthesis() {
    let mut cube = zero_baseline_cube(2, false);
    let (num_times, num_baselines) = (cube.num_times, cube.num_baselines);
    if let VisAmps::Scalar(amps) = &mut cube.amps {
        for c in 0..2 {
            for b in 0..num_baselines {
                amps[num_times * num_baselines * c + b] = c32::new(1.0, 0.0);
                amps[num_times * num_baselines * c + num_baselines + b] = c32::new(3.0, 0.0);
            }
        }
    }
    let mut settings = ImageSettings::stokes_i(2, 0.1);
    settings.time_snapshots = true;
    let snapshots = make_image(&cube, &settings).unwrap();
    assert_eq!(snapshots.num_time_planes(), 2);
    assert_abs_diff_eq!(snapshots.pixel(0, 0, 0, 0, 0), 1.0, epsilon = 1e-6);
    assert_abs_diff_eq!(snapshots.pixel(0, 1, 0, 0, 0), 3.0, epsilon = 1e-6);

    settings.time_snapshots = false;
    let synthesis = make_image(&cube, &settings).unwrap();
    assert_eq!(synthesis.num_time_planes(), 1);
    assert_abs_diff_eq!(synthesis.pixel(0, 0, 0, 0, 0), 2.0, epsilon = 1e-6);
}

#[test]
fn channel_snapshots_versus_synthesis() {
    let mut cube = zero_baseline_cube(1, false);
    if let VisAmps::Scalar(amps) = &mut cube.amps {
        for b in 0..3 {
            amps[b] = c32::new(1.0, 0.0);
            amps[3 + b] = c32::new(5.0, 0.0);
        }
    }
    let mut settings = ImageSettings::stokes_i(2, 0.1);
    settings.channel_snapshots = true;
    let snapshots = make_image(&cube, &settings).unwrap();
    assert_eq!(snapshots.num_channel_planes(), 2);
    assert_abs_diff_eq!(snapshots.pixel(0, 0, 0, 0, 0), 1.0, epsilon = 1e-6);
    assert_abs_diff_eq!(snapshots.pixel(1, 0, 0, 0, 0), 5.0, epsilon = 1e-6);
    assert_abs_diff_eq!(snapshots.channel_freqs_hz[0], 150e6);
    assert_abs_diff_eq!(snapshots.channel_freqs_hz[1], 151e6);

    settings.channel_snapshots = false;
    let synthesis = make_image(&cube, &settings).unwrap();
    assert_eq!(synthesis.num_channel_planes(), 1);
    assert_abs_diff_eq!(synthesis.pixel(0, 0, 0, 0, 0), 3.0, epsilon = 1e-6);
    assert_abs_diff_eq!(synthesis.channel_freqs_hz[0], 150.5e6);
}

#[test]
fn channel_range_selects_input_channels() {
    let mut cube = zero_baseline_cube(1, false);
    if let VisAmps::Scalar(amps) = &mut cube.amps {
        // Channel 0 amplitudes 1, channel 1 amplitudes 5.
        for b in 0..3 {
            amps[b] = c32::new(1.0, 0.0);
            amps[3 + b] = c32::new(5.0, 0.0);
        }
    }
    let mut settings = ImageSettings::stokes_i(2, 0.1);
    settings.channel_range = Some(1..2);
    let image = make_image(&cube, &settings).unwrap();
    assert_abs_diff_eq!(image.pixel(0, 0, 0, 0, 0), 5.0, epsilon = 1e-6);
    assert_abs_diff_eq!(image.channel_freqs_hz[0], 151e6);
}

#[test]
fn linear_pols_from_scalar_amplitudes_are_rejected() {
    let cube = zero_baseline_cube(1, false);
    let mut settings = ImageSettings::stokes_i(2, 0.1);
    settings.pol = PolSelection::Single(ImagePol::XX);
    assert!(matches!(
        make_image(&cube, &settings),
        Err(ImageError::PolarisationUnavailable { .. })
    ));
}

#[test]
fn fft_transform_is_unsupported() {
    let cube = zero_baseline_cube(1, false);
    let mut settings = ImageSettings::stokes_i(2, 0.1);
    settings.transform = TransformType::Fft2d;
    assert!(matches!(
        make_image(&cube, &settings),
        Err(ImageError::UnsupportedTransform)
    ));
}

#[test]
fn pols_and_transforms_parse_from_strings() {
    assert_eq!("I".parse::<ImagePol>().unwrap(), ImagePol::I);
    assert_eq!("YX".parse::<ImagePol>().unwrap(), ImagePol::YX);
    assert!("XZ".parse::<ImagePol>().is_err());
    assert_eq!(
        "Dft2d".parse::<TransformType>().unwrap(),
        TransformType::Dft2d
    );
}

#[test]
fn out_of_bounds_time_range_is_rejected() {
    let cube = zero_baseline_cube(1, false);
    let mut settings = ImageSettings::stokes_i(2, 0.1);
    settings.time_range = Some(0..2);
    assert!(matches!(
        make_image(&cube, &settings),
        Err(ImageError::BadRange { axis: "time", .. })
    ));
}
