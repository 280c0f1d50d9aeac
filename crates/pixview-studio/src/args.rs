use clap::{Parser, ValueEnum};

use pixview_engine::coords::ColorRgba;
use pixview_engine::logging::LoggingConfig;
use pixview_engine::orient::{CameraFacing, Rotation};

/// Desktop camera-preview window fed by a synthetic frame producer.
#[derive(Debug, Clone, Parser)]
#[command(name = "pixview-studio", version, about)]
pub struct Args {
    /// Width of the produced frames, before sensor rotation.
    #[arg(long, default_value_t = 1280)]
    pub width: u32,

    /// Height of the produced frames, before sensor rotation.
    #[arg(long, default_value_t = 720)]
    pub height: u32,

    /// Producer frame rate.
    #[arg(long, default_value_t = 30)]
    pub fps: u32,

    /// Mounting angle of the simulated sensor (0, 90, 180, 270).
    #[arg(long, default_value = "90", value_parser = parse_rotation)]
    pub sensor_orientation: Rotation,

    /// Initial device orientation (0, 90, 180, 270).
    #[arg(long, default_value = "0", value_parser = parse_rotation)]
    pub device_orientation: Rotation,

    #[arg(long, value_enum, default_value_t = Facing::Back)]
    pub facing: Facing,

    /// Rotate frames upright on the CPU and submit them with a 0 sensor angle.
    #[arg(long)]
    pub pre_rotate: bool,

    /// Letterbox color as `#rrggbb` or `#rrggbbaa`.
    #[arg(long, default_value = "#000000", value_parser = parse_color)]
    pub clear_color: ColorRgba,

    /// Log filter in `env_logger` syntax; falls back to `RUST_LOG`.
    #[arg(long)]
    pub log: Option<String>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum Facing {
    Back,
    Front,
}

impl From<Facing> for CameraFacing {
    fn from(f: Facing) -> Self {
        match f {
            Facing::Back => CameraFacing::Back,
            Facing::Front => CameraFacing::Front,
        }
    }
}

impl Args {
    pub fn logging(&self) -> LoggingConfig {
        LoggingConfig {
            env_filter: self.log.clone(),
            ..LoggingConfig::default()
        }
    }
}

fn parse_rotation(s: &str) -> Result<Rotation, String> {
    let degrees: i32 = s
        .trim()
        .parse()
        .map_err(|_| format!("`{s}` is not an angle in degrees"))?;
    Rotation::from_degrees(degrees).map_err(|e| e.to_string())
}

fn parse_color(s: &str) -> Result<ColorRgba, String> {
    ColorRgba::from_hex(s).ok_or_else(|| format!("`{s}` is not a hex color"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_describe_a_portrait_back_camera() {
        let args = Args::try_parse_from(["pixview-studio"]).unwrap();
        assert_eq!(args.sensor_orientation, Rotation::Deg90);
        assert_eq!(args.device_orientation, Rotation::Deg0);
        assert_eq!(CameraFacing::from(args.facing), CameraFacing::Back);
        assert!(!args.pre_rotate);
    }

    #[test]
    fn orientation_flags_accept_quarter_turns_only() {
        let args = Args::try_parse_from([
            "pixview-studio",
            "--sensor-orientation",
            "270",
            "--facing",
            "front",
        ])
        .unwrap();
        assert_eq!(args.sensor_orientation, Rotation::Deg270);
        assert_eq!(CameraFacing::from(args.facing), CameraFacing::Front);

        assert!(Args::try_parse_from(["pixview-studio", "--device-orientation", "45"]).is_err());
        assert!(Args::try_parse_from(["pixview-studio", "--sensor-orientation", "up"]).is_err());
    }

    #[test]
    fn log_flag_becomes_the_env_filter() {
        let args = Args::try_parse_from(["pixview-studio", "--log", "pixview_engine=debug"]).unwrap();
        assert_eq!(args.logging().env_filter.as_deref(), Some("pixview_engine=debug"));
    }
}
