use std::fs;

use ndarray::Axis;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ifsresc::{ScaleCubeOptions, check_scal_vector, frame_px_resampling, scale_cube};

use super::args::CliArgs;
use super::errors::AppError;
use super::synthetic::{DemoParams, ring_radius};

#[derive(Debug, Serialize)]
struct Report {
    frames: usize,
    size: usize,
    method: String,
    scales: Vec<f64>,
    padded_shape: [usize; 2],
    center: [f64; 2],
    ring_spread_before: f64,
    ring_spread_after: f64,
    round_trip_rms: f64,
    resampled_shape: Option<[usize; 2]>,
}

fn load_params(args: &CliArgs) -> Result<DemoParams, AppError> {
    let mut params = match &args.config {
        Some(path) => {
            info!("Loading parameters from {:?}", path);
            serde_json::from_str(&fs::read_to_string(path)?)?
        }
        None => DemoParams::default(),
    };

    if let Some(frames) = args.frames {
        params.frames = frames;
    }
    if let Some(size) = args.size {
        params.size = size;
    }
    if let Some(l) = args.lambda_min {
        params.lambda_min = l;
    }
    if let Some(l) = args.lambda_max {
        params.lambda_max = l;
    }
    if let Some(r) = args.speckle_radius {
        params.speckle_radius = r;
    }
    if let Some(m) = args.method {
        params.method = m;
    }
    if args.resample.is_some() {
        params.resample = args.resample;
    }
    if let Some(i) = args.interpolation {
        params.interpolation = i;
    }

    if params.frames == 0 {
        return Err(AppError::InvalidArgument {
            arg: "frames",
            value: params.frames.to_string(),
        });
    }
    if params.size < 2 {
        return Err(AppError::InvalidArgument {
            arg: "size",
            value: params.size.to_string(),
        });
    }
    if !(params.lambda_min > 0.0 && params.lambda_min <= params.lambda_max) {
        return Err(AppError::InvalidArgument {
            arg: "lambda_min",
            value: format!("{} (lambda_max={})", params.lambda_min, params.lambda_max),
        });
    }
    Ok(params)
}

fn ring_spread(radii: &[f64]) -> f64 {
    let max = radii.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = radii.iter().copied().fold(f64::INFINITY, f64::min);
    max - min
}

fn run_check(params: &DemoParams) -> Result<Report, AppError> {
    let cube = params.build_cube();
    let core_radius = params.fwhm * 1.5;

    let lambdas = params.wavelengths();
    let scales = check_scal_vector(lambdas.mapv(|l| params.lambda_max / l))?;
    info!("Scale factors: {:?}", scales.to_vec());

    let before: Vec<f64> = cube
        .axis_iter(Axis(0))
        .map(|f| ring_radius(f, core_radius))
        .collect();

    let forward_opts = ScaleCubeOptions::default().with_method(params.method);
    let aligned = scale_cube(&cube, &scales, &forward_opts)?;
    let after: Vec<f64> = aligned
        .cube
        .axis_iter(Axis(0))
        .map(|f| ring_radius(f, core_radius))
        .collect();
    info!(
        "Aligned cube: {}x{} about ({}, {})",
        aligned.y, aligned.x, aligned.cy, aligned.cx
    );

    let inverse_opts =
        ScaleCubeOptions::inverse(params.size, params.size).with_method(params.method);
    let restored = scale_cube(&aligned.cube, &scales, &inverse_opts)?;
    let diff = &restored.cube - &cube;
    let round_trip_rms = (diff.mapv(|d| f64::from(d) * f64::from(d)).mean().unwrap_or(0.0)).sqrt();
    info!("Round-trip RMS error: {:.3e}", round_trip_rms);

    let resampled_shape = match params.resample {
        Some(factor) => {
            let resampled = frame_px_resampling(&aligned.median, factor, params.interpolation)?;
            let (rows, cols) = resampled.dim();
            info!("Median frame resampled by {} to {}x{}", factor, rows, cols);
            Some([rows, cols])
        }
        None => None,
    };

    Ok(Report {
        frames: params.frames,
        size: params.size,
        method: params.method.to_string(),
        scales: scales.to_vec(),
        padded_shape: [aligned.y, aligned.x],
        center: [aligned.cy, aligned.cx],
        ring_spread_before: ring_spread(&before),
        ring_spread_after: ring_spread(&after),
        round_trip_rms,
        resampled_shape,
    })
}

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.log {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .with_writer(std::io::stderr)
            .init();
    }

    let params = load_params(&args)?;
    info!("Running alignment check with {:?}", params);

    let report = run_check(&params)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
