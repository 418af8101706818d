use clap::Parser;
use pixseek::{
    load_image, replace_with_stats, save_image, MatchConfig, MatchStats, Matcher, Rect,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "PixSeek CLI (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print the JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output for scan statistics.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Default, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
enum Mode {
    #[default]
    First,
    All,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct MatchConfigJson {
    sample_stride: usize,
    color_tolerance: u32,
}

impl Default for MatchConfigJson {
    fn default() -> Self {
        let cfg = MatchConfig::default();
        Self {
            sample_stride: cfg.sample_stride,
            color_tolerance: cfg.color_tolerance,
        }
    }
}

impl From<&MatchConfigJson> for MatchConfig {
    fn from(value: &MatchConfigJson) -> Self {
        MatchConfig {
            sample_stride: value.sample_stride,
            color_tolerance: value.color_tolerance,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Config {
    haystack_path: String,
    needle_path: String,
    replacement_path: Option<String>,
    mode: Mode,
    output_path: Option<String>,
    report_path: Option<String>,
    #[serde(rename = "match")]
    match_cfg: MatchConfigJson,
}

#[derive(Debug, Serialize)]
struct RegionRecord {
    x: usize,
    y: usize,
    width: usize,
    height: usize,
}

impl From<Rect> for RegionRecord {
    fn from(value: Rect) -> Self {
        Self {
            x: value.min_x,
            y: value.min_y,
            width: value.width(),
            height: value.height(),
        }
    }
}

#[derive(Debug, Serialize)]
struct StatsRecord {
    anchors: usize,
    corner_rejects: usize,
    interior_rejects: usize,
}

impl From<MatchStats> for StatsRecord {
    fn from(value: MatchStats) -> Self {
        Self {
            anchors: value.anchors,
            corner_rejects: value.corner_rejects,
            interior_rejects: value.interior_rejects,
        }
    }
}

#[derive(Debug, Serialize)]
struct Output {
    haystack: String,
    needle: String,
    found: bool,
    matches: Vec<RegionRecord>,
    replaced: bool,
    stats: StatsRecord,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive("pixseek=info".parse()?))
            .with_target(false)
            .init();
    }

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return Ok(());
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;
    if config.haystack_path.is_empty() || config.needle_path.is_empty() {
        return Err("haystack_path and needle_path must be set in the config".into());
    }
    if config.replacement_path.is_some() && config.output_path.is_none() {
        return Err("output_path must be set when replacement_path is given".into());
    }

    let cfg = MatchConfig::from(&config.match_cfg);
    let mut haystack = load_image(&config.haystack_path)?.with_config(cfg);
    let needle = load_image(&config.needle_path)?;

    let all = config.mode == Mode::All;
    let (rects, stats, replaced) = match (&config.replacement_path, &config.output_path) {
        (Some(replacement_path), Some(output_path)) => {
            let replacement = load_image(replacement_path)?;
            let (rects, stats) =
                replace_with_stats(&mut haystack, &needle, &replacement, &cfg, all)?;
            save_image(&haystack, output_path)?;
            (rects, stats, true)
        }
        _ => {
            let (rects, stats) = Matcher::new(&needle)?
                .with_config(cfg)
                .locate_with_stats(haystack.image(), !all)?;
            (rects, stats, false)
        }
    };

    let output = Output {
        haystack: haystack.source().to_owned(),
        needle: needle.source().to_owned(),
        found: !rects.is_empty(),
        matches: rects.into_iter().map(RegionRecord::from).collect(),
        replaced,
        stats: stats.into(),
    };
    let json = serde_json::to_string_pretty(&output)?;

    match config.report_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}
