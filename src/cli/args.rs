use clap::Parser;
use std::path::PathBuf;

use ifsresc::{Interpolation, RescaleMethod};

#[derive(Parser)]
#[command(name = "ifsresc", version, about = "ifsresc synthetic IFS alignment check")]
pub struct CliArgs {
    /// JSON file with demo parameters; flags below override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Number of spectral channels (frames) in the synthetic cube
    #[arg(short = 'n', long)]
    pub frames: Option<usize>,

    /// Frame side in pixels
    #[arg(short, long)]
    pub size: Option<usize>,

    /// Shortest wavelength of the cube (any unit)
    #[arg(long)]
    pub lambda_min: Option<f64>,

    /// Longest wavelength of the cube (same unit as --lambda-min)
    #[arg(long)]
    pub lambda_max: Option<f64>,

    /// Radius of the speckle ring at the longest wavelength, in pixels
    #[arg(long)]
    pub speckle_radius: Option<f64>,

    /// Rescaling method (geometric-transform or warp-affine)
    #[arg(short, long, value_enum)]
    pub method: Option<RescaleMethod>,

    /// Resample the aligned median frame by this factor
    #[arg(long)]
    pub resample: Option<f64>,

    /// Interpolation used with --resample (bicubic, bilinear or nearneig)
    #[arg(long, value_enum)]
    pub interpolation: Option<Interpolation>,

    /// Enable logging
    #[arg(long, default_value_t = false)]
    pub log: bool,
}
