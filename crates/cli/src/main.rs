#![deny(unsafe_code)]
//! CLI binary for the camo-engine texture synthesizer.
//!
//! Subcommands:
//! - `still <pattern>` — render one frame, write PNG
//! - `animate` — export a dazzle animation, write GIF
//! - `list` — print pattern kinds and palette presets

mod error;

use camo_core::{evaluate, Palette, PatternKind, PatternParams};
use camo_render::{ExportSettings, ExportSlot};
use clap::{Args, Parser, Subcommand};
use error::CliError;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "camo-engine", about = "Procedural camouflage texture generator")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

/// Parameters shared by the still and animate subcommands.
#[derive(Args)]
struct PatternArgs {
    /// Seed for deterministic output.
    #[arg(long, default_value_t = 42)]
    seed: u32,

    /// Pattern scale (recommended 1–20).
    #[arg(short = 's', long, default_value_t = 6.0)]
    scale: f32,

    /// Pattern complexity in [0, 1].
    #[arg(short = 'c', long, default_value_t = 0.5)]
    complexity: f32,

    /// Palette preset name (see `list`).
    #[arg(short, long, default_value = "m90")]
    palette: String,

    /// Four hex colors overriding the preset, e.g. "#808030,#505032,#9F9578,#3A3440".
    #[arg(long, value_delimiter = ',')]
    colors: Option<Vec<String>>,

    /// Collapse the palette to two distinct colors.
    #[arg(long)]
    two_color: bool,

    /// Digital-camo block size in pixels (0 = off).
    #[arg(long, default_value_t = 0)]
    pixelate: u32,

    /// Output width in pixels.
    #[arg(short = 'W', long, default_value_t = 1024)]
    width: u32,

    /// Output height in pixels.
    #[arg(short = 'H', long, default_value_t = 1024)]
    height: u32,
}

#[derive(Subcommand)]
enum Command {
    /// Render a still frame and write a PNG.
    Still {
        /// Pattern kind ("blotch" or "dazzle").
        pattern: String,

        #[command(flatten)]
        args: PatternArgs,

        /// Output file path (default: <pattern>-camo-<seed>.png).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Export an animated dazzle GIF.
    Animate {
        #[command(flatten)]
        args: PatternArgs,

        /// Animation length in frames.
        #[arg(short = 'n', long, default_value_t = 45)]
        frames: u32,

        /// Frames per second (also sets the per-frame delay).
        #[arg(long, default_value_t = 15.0)]
        fps: f32,

        /// Animation speed multiplier (recommended 0.1–3.0).
        #[arg(long, default_value_t = 1.0)]
        speed: f32,

        /// Output file path (default: camo-<seed>.gif).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List pattern kinds and palette presets.
    List,
}

impl PatternArgs {
    fn palette(&self) -> Result<Palette, CliError> {
        let base = match &self.colors {
            Some(hexes) => {
                let four: &[String; 4] = hexes.as_slice().try_into().map_err(|_| {
                    CliError::Input(format!("--colors needs exactly 4 entries, got {}", hexes.len()))
                })?;
                Palette::from_hex(&[
                    four[0].as_str(),
                    four[1].as_str(),
                    four[2].as_str(),
                    four[3].as_str(),
                ])?
            }
            None => Palette::from_name(&self.palette)?,
        };
        Ok(if self.two_color { base.two_color() } else { base })
    }

    fn params(&self, kind: PatternKind) -> Result<PatternParams, CliError> {
        let mut params = PatternParams::new(kind, self.seed, self.palette()?);
        params.scale = self.scale;
        params.complexity = self.complexity;
        params.digital_pixel_size = self.pixelate;
        params.validate()?;
        Ok(params)
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let patterns = PatternKind::list_names();
            let palettes = Palette::list_names();
            if cli.json {
                let info = serde_json::json!({
                    "patterns": patterns,
                    "palettes": palettes,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Patterns:");
                for name in patterns {
                    println!("  {name}");
                }
                println!("Palettes:");
                println!("  {}", palettes.join(", "));
            }
        }
        Command::Still {
            pattern,
            args,
            output,
        } => {
            let kind = PatternKind::from_name(&pattern)?;
            let params = args.params(kind)?;
            let output =
                output.unwrap_or_else(|| PathBuf::from(format!("{}-camo-{}.png", kind.name(), args.seed)));

            let surface = evaluate(&params, args.width, args.height)?;
            camo_render::write_png(&surface, &output)?;

            if cli.json {
                let info = serde_json::json!({
                    "pattern": kind.name(),
                    "seed": args.seed,
                    "width": args.width,
                    "height": args.height,
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {} ({}x{}, seed {}) -> {}",
                    kind.name(),
                    args.width,
                    args.height,
                    args.seed,
                    output.display()
                );
            }
        }
        Command::Animate {
            args,
            frames,
            fps,
            speed,
            output,
        } => {
            let params = args.params(PatternKind::Dazzle)?;
            let output = output.unwrap_or_else(|| PathBuf::from(format!("camo-{}.gif", args.seed)));
            let settings = ExportSettings {
                frame_count: frames,
                fps,
                speed,
            };

            let slot = ExportSlot::new();
            let export = slot.begin(params, args.width, args.height, settings)?;
            let bytes = export.run(|percent| eprint!("\rexporting... {percent:>5.1}%"))?;
            eprintln!();
            std::fs::write(&output, bytes).map_err(|e| CliError::Io(e.to_string()))?;

            if cli.json {
                let info = serde_json::json!({
                    "pattern": PatternKind::Dazzle.name(),
                    "seed": args.seed,
                    "width": args.width,
                    "height": args.height,
                    "frames": frames,
                    "fps": fps,
                    "speed": speed,
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "exported {} frames ({}x{}, seed {}) -> {}",
                    frames,
                    args.width,
                    args.height,
                    args.seed,
                    output.display()
                );
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
