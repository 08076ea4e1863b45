use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, bail};
use chrono::NaiveDate;
use clap::Parser;

use crate::entities::{Boundary, ItemId};
use crate::widgets::timeline::Granularity;

// Build version with target info
const VERSION_INFO: &str = const_format::concatcp!(
    env!("CARGO_PKG_VERSION"), "\n",
    "Dates:  chrono 0.4 (local calendar days)\n",
    "Target: ", std::env::consts::ARCH, "-", std::env::consts::OS
);

/// Timeline lane viewer
#[derive(Parser, Debug)]
#[command(author, version = VERSION_INFO, about, long_about = None)]
pub struct Args {
    /// JSON items file (array of {id, name, start, end}); bundled demo items if omitted
    #[arg(value_name = "FILE")]
    pub items_file: Option<PathBuf>,

    /// Window granularity
    #[arg(long = "view", value_enum)]
    pub view: Option<Granularity>,

    /// Focus date (YYYY-MM-DD); defaults to the last viewed date, or today
    #[arg(short = 'd', long = "date", value_name = "DATE")]
    pub date: Option<NaiveDate>,

    /// Move the window by N units (negative = back)
    #[arg(short = 's', long = "step", value_name = "N", allow_hyphen_values = true)]
    pub step: Option<i32>,

    /// Jump to the nearest item when the window is empty
    #[arg(short = 'j', long = "jump", value_name = "prev|next")]
    pub jump: Option<JumpArg>,

    /// Simulate a resize drag: ID:start|end:PIXELS (e.g. 3:end:45)
    #[arg(short = 'r', long = "resize", value_name = "ID:HANDLE:PX", allow_hyphen_values = true)]
    pub resize: Vec<ResizeSpec>,

    /// Rendered grid width in pixels (drag math)
    #[arg(short = 'w', long = "width", value_name = "PX", value_parser = parse_grid_width)]
    pub width: Option<f32>,

    /// Do not write the viewed window back to the settings file
    #[arg(long = "no-save")]
    pub no_save: bool,

    /// Enable debug logging to file (default: timelane.log)
    #[arg(short = 'l', long = "log", value_name = "LOG_FILE")]
    pub log_file: Option<Option<PathBuf>>,

    /// Increase logging verbosity (default: warn, -v: info, -vv: debug, -vvv+: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,

    /// Custom configuration directory (overrides default platform paths)
    #[arg(short = 'c', long = "config-dir", value_name = "DIR")]
    pub config_dir: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum JumpArg {
    Prev,
    Next,
}

/// Grid width must be a finite, positive pixel count.
fn parse_grid_width(s: &str) -> Result<f32, String> {
    let width: f32 = s.trim().parse().map_err(|e| format!("'{}' is not a number: {}", s, e))?;
    if !width.is_finite() || width <= 0.0 {
        return Err(format!("'{}' must be a finite width above 0", s));
    }
    Ok(width)
}

/// Scripted drag: grab `handle` of item `id` and move the pointer by `pixels`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResizeSpec {
    pub id: ItemId,
    pub handle: Boundary,
    pub pixels: f32,
}

impl FromStr for ResizeSpec {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let parts: Vec<&str> = s.split(':').collect();
        let [id, handle, pixels] = parts.as_slice() else {
            bail!("Expected ID:start|end:PIXELS, got '{}'", s);
        };
        Ok(Self {
            id: ItemId(id.trim().parse().with_context(|| format!("Bad item id '{}'", id))?),
            handle: handle.parse()?,
            pixels: pixels.trim().parse().with_context(|| format!("Bad pixel delta '{}'", pixels))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resize_arg_parse() {
        let resize: ResizeSpec = "3:end:45".parse().unwrap();
        assert_eq!(resize, ResizeSpec { id: ItemId(3), handle: Boundary::End, pixels: 45.0 });
        let resize: ResizeSpec = "7:start:-12.5".parse().unwrap();
        assert_eq!(resize.pixels, -12.5);
        assert!("3:end".parse::<ResizeSpec>().is_err());
        assert!("x:end:4".parse::<ResizeSpec>().is_err());
        assert!("3:mid:4".parse::<ResizeSpec>().is_err());
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from([
            "timelane", "items.json", "--view", "week", "--date", "2024-02-15", "--step", "-2", "-r", "1:start:-20",
        ])
        .unwrap();
        assert_eq!(args.view, Some(Granularity::Week));
        assert_eq!(args.date, NaiveDate::from_ymd_opt(2024, 2, 15));
        assert_eq!(args.step, Some(-2));
        assert_eq!(args.resize.len(), 1);
        assert_eq!(args.resize[0].pixels, -20.0);
    }

    #[test]
    fn test_width_must_be_positive_and_finite() {
        assert_eq!(parse_grid_width("700"), Ok(700.0));
        assert_eq!(parse_grid_width(" 12.5 "), Ok(12.5));
        for bad in ["NaN", "inf", "-inf", "0", "-40", "wide"] {
            assert!(parse_grid_width(bad).is_err(), "{} accepted", bad);
        }
        assert!(Args::try_parse_from(["timelane", "--width", "NaN"]).is_err());
        let args = Args::try_parse_from(["timelane", "-w", "560"]).unwrap();
        assert_eq!(args.width, Some(560.0));
    }
}
