// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use criterion::{criterion_group, criterion_main, Criterion};

use skysim::coord::{get_lmst, timestep_centroid, RADec};
use skysim::image::{make_image, ImageSettings};
use skysim::jones::Jones;
use skysim::model::{accumulate_baseline_visibility, ObservationParams, VisSimulator};
use skysim::sky::{SkyModel, Source, StokesParams};
use skysim::station::{ElementModel, StationModel};
use skysim::{c64, Epoch, TelescopeModel};

fn jones_accumulation(c: &mut Criterion) {
    let num_sources = 10_000;
    let j_p: Vec<Jones<f64>> = (0..num_sources)
        .map(|i| Jones::identity() * (1.0 + i as f64 * 1e-4))
        .collect();
    let j_q = j_p.clone();
    let brightness = StokesParams {
        i: 1.0,
        q: 0.1,
        u: 0.05,
        v: 0.0,
    }
    .brightness();
    c.bench_function("accumulate 10k source visibilities", |b| {
        b.iter(|| {
            let mut acc = Jones::zero();
            for i in 0..num_sources {
                let phase = c64::from_polar(1.0, i as f64 * 1e-3);
                accumulate_baseline_visibility(&mut acc, &j_p[i], &j_q[i], &brightness, phase);
            }
            acc
        })
    });
}

fn model_observation(c: &mut Criterion) {
    let num_stations = 16;
    let stations = (0..num_stations)
        .map(|_| {
            StationModel::from_positions(vec![0.0], vec![0.0], vec![0.0], ElementModel::default())
                .unwrap()
        })
        .collect();
    let telescope = TelescopeModel {
        longitude_rad: 0.0,
        latitude_rad: -0.5,
        station_east: (0..num_stations).map(|i| i as f64 * 57.0).collect(),
        station_north: (0..num_stations).map(|i| (i % 5) as f64 * 31.0).collect(),
        station_up: vec![0.0; num_stations],
        stations,
    };

    let start = Epoch::from_gregorian_utc_at_midnight(2020, 1, 1);
    let lst = get_lmst(0.0, timestep_centroid(start, 2.0, 0));
    let phase_centre = RADec::from_radians(lst, -0.5);
    let sources: Vec<Source> = (0..256)
        .map(|i| Source {
            radec: RADec::from_radians(
                phase_centre.ra + (i % 16) as f64 * 1e-3,
                phase_centre.dec + (i / 16) as f64 * 1e-3,
            ),
            stokes: StokesParams {
                i: 1.0,
                ..Default::default()
            },
            ref_freq_hz: 150e6,
            spectral_index: -0.8,
            shape: None,
        })
        .collect();
    let sky = SkyModel::from_sources(&sources).unwrap();

    let params = ObservationParams {
        phase_centre,
        start_time: start,
        time_inc_s: 2.0,
        num_times: 2,
        freq_start_hz: 150e6,
        freq_inc_hz: 80e3,
        num_channels: 2,
        channel_bandwidth_hz: 80e3,
        time_average_s: 2.0,
    };
    let simulator = VisSimulator::new(&telescope, sky, params).unwrap();
    c.bench_function(
        "model 256 sources, 16 stations, 2 times, 2 channels",
        |b| b.iter(|| simulator.simulate().unwrap()),
    );
}

fn dft_image(c: &mut Criterion) {
    let num_stations = 16;
    let stations = (0..num_stations)
        .map(|_| {
            StationModel::from_positions(vec![0.0], vec![0.0], vec![0.0], ElementModel::default())
                .unwrap()
        })
        .collect();
    let telescope = TelescopeModel {
        longitude_rad: 0.0,
        latitude_rad: -0.5,
        station_east: (0..num_stations).map(|i| i as f64 * 57.0).collect(),
        station_north: (0..num_stations).map(|i| (i % 5) as f64 * 31.0).collect(),
        station_up: vec![0.0; num_stations],
        stations,
    };
    let start = Epoch::from_gregorian_utc_at_midnight(2020, 1, 1);
    let lst = get_lmst(0.0, timestep_centroid(start, 2.0, 0));
    let phase_centre = RADec::from_radians(lst, -0.5);
    let sky = SkyModel::from_sources(&[Source {
        radec: phase_centre,
        stokes: StokesParams {
            i: 1.0,
            ..Default::default()
        },
        ref_freq_hz: 150e6,
        spectral_index: 0.0,
        shape: None,
    }])
    .unwrap();
    let params = ObservationParams {
        phase_centre,
        start_time: start,
        time_inc_s: 2.0,
        num_times: 4,
        freq_start_hz: 150e6,
        freq_inc_hz: 80e3,
        num_channels: 4,
        channel_bandwidth_hz: 0.0,
        time_average_s: 0.0,
    };
    let cube = VisSimulator::new(&telescope, sky, params)
        .unwrap()
        .simulate()
        .unwrap();
    let settings = ImageSettings::stokes_i(64, 0.05);
    c.bench_function("DFT image, 64x64 pixels, 1920 visibilities", |b| {
        b.iter(|| make_image(&cube, &settings).unwrap())
    });
}

criterion_group!(
    name = benches;
    config = Criterion::default().sample_size(10);
    targets = jones_accumulation, model_observation, dft_image
);
criterion_main!(benches);
