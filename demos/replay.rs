//! Magnetometer replay demonstration
//!
//! Feeds a recorded magnetometer log through the view model and plots the raw
//! heading next to the unwrapped dial rotation. The raw heading jumps at
//! north; the rotation does not.
//!
//! Run with: `RUST_LOG=debug cargo run --example replay`

use compass_dial::{CompassSettings, CompassViewModel, Convention};
use nalgebra::Vector3;
use plotters::prelude::*;
use serde::Deserialize;
use std::error::Error;

#[derive(Debug, Deserialize)]
struct MagnetometerSample {
    #[serde(rename = "Time (s)")]
    time: f32,
    #[serde(rename = "Magnetometer X (uT)")]
    mag_x: f32,
    #[serde(rename = "Magnetometer Y (uT)")]
    mag_y: f32,
    #[serde(rename = "Magnetometer Z (uT)")]
    mag_z: f32,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut reader = csv::Reader::from_path("testdata/magnetometer.csv")?;
    let mut samples = Vec::new();
    for result in reader.deserialize() {
        let record: MagnetometerSample = result?;
        samples.push(record);
    }

    let settings = CompassSettings {
        convention: Convention::Nwu,
        ..Default::default()
    };
    let mut view_model = CompassViewModel::with_settings(settings, ());

    // (time, raw heading, dial rotation)
    let mut trace = Vec::with_capacity(samples.len());
    let mut dropped = 0;

    for sample in &samples {
        let magnetometer = Vector3::new(sample.mag_x, sample.mag_y, sample.mag_z);
        if view_model.on_magnetometer(magnetometer).is_err() {
            dropped += 1;
            continue;
        }

        let reading = view_model.reading();
        // Plot precision is plenty for a short recording
        trace.push((sample.time, reading.heading, reading.rotation as f32));
    }

    let last = view_model.reading();
    println!(
        "Replayed {} samples ({} dropped), final heading {}° {}, rotation {:.1}°",
        samples.len(),
        dropped,
        last.rounded_heading(),
        last.direction,
        last.rotation
    );

    create_plot(&trace)?;
    println!("✓ Plot saved to replay.png");
    Ok(())
}

/// Plot raw heading (top) and unwrapped dial rotation (bottom)
fn create_plot(trace: &[(f32, f32, f32)]) -> Result<(), Box<dyn Error>> {
    if trace.is_empty() {
        return Ok(());
    }

    let root = BitMapBackend::new("replay.png", (1000, 700)).into_drawing_area();
    root.fill(&WHITE)?;
    let (upper, lower) = root.split_vertically(350);

    let time_range = trace[0].0..trace[trace.len() - 1].0;

    let mut heading_chart = ChartBuilder::on(&upper)
        .caption("Raw heading", ("sans-serif", 20))
        .margin(5)
        .x_label_area_size(30)
        .y_label_area_size(50)
        .build_cartesian_2d(time_range.clone(), 0f32..360f32)?;
    heading_chart.configure_mesh().y_desc("Degrees").draw()?;
    heading_chart.draw_series(LineSeries::new(
        trace.iter().map(|&(t, heading, _)| (t, heading)),
        &RED,
    ))?;

    let min_rotation = trace.iter().map(|s| s.2).fold(f32::MAX, f32::min) - 10.0;
    let max_rotation = trace.iter().map(|s| s.2).fold(f32::MIN, f32::max) + 10.0;

    let mut rotation_chart = ChartBuilder::on(&lower)
        .caption("Dial rotation", ("sans-serif", 20))
        .margin(5)
        .x_label_area_size(30)
        .y_label_area_size(50)
        .build_cartesian_2d(time_range, min_rotation..max_rotation)?;
    rotation_chart
        .configure_mesh()
        .x_desc("Time (s)")
        .y_desc("Degrees")
        .draw()?;
    rotation_chart.draw_series(LineSeries::new(
        trace.iter().map(|&(t, _, rotation)| (t, rotation)),
        &BLUE,
    ))?;

    root.present()?;
    Ok(())
}
