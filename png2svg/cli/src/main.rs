use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use log::debug;
use png2svg_core::{png_to_svg, GrowthStrategy, VectorizeOptions};

/// Command-line driver for the png2svg core engine.
#[derive(Parser, Debug)]
#[command(
    name = "png2svg",
    version,
    about = "Convert PNG images into SVG images made of rectangles",
    long_about = "Convert PNG images into SVG images where every opaque pixel is covered by exactly one rectangle of its own color."
)]
struct Cli {
    /// Path to the input PNG file.
    input: PathBuf,
    /// Path to write the SVG output to, `-` for stdout.
    #[arg(short, long, default_value = "-")]
    output: PathBuf,
    /// Use only single pixel rectangles.
    #[arg(short = 'p', long, action = ArgAction::SetTrue)]
    single_pixels: bool,
    /// Color expanded rectangles pink.
    #[arg(short = 'c', long, action = ArgAction::SetTrue)]
    highlight: bool,
    /// Limit colors to a maximum of 4096 (#abcdef -> #ace).
    #[arg(short = 'l', long, action = ArgAction::SetTrue)]
    limit: bool,
    /// Deprecated (same as -l).
    #[arg(short = 'q', long, hide = true, action = ArgAction::SetTrue)]
    quantize: bool,
    /// Deprecated (same as -l).
    #[arg(short = 'z', long, hide = true, action = ArgAction::SetTrue)]
    optimize: bool,
    /// How rectangles are grown.
    #[arg(
        long,
        value_parser = parse_strategy,
        value_name = "right-down|omni|random",
        help = "Growth strategy; right-down gives the smallest output."
    )]
    strategy: Option<GrowthStrategy>,
    /// Seed for the random growth strategy.
    #[arg(long)]
    seed: Option<u64>,
    /// Do not group elements by fill color.
    #[arg(long, action = ArgAction::SetTrue)]
    no_group: bool,
    /// Do not apply the text size optimizations.
    #[arg(long, action = ArgAction::SetTrue)]
    no_minify: bool,
    /// JSON file with options; flags given on the command line are applied on top.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Log progress to stderr.
    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,
}

fn parse_strategy(strategy: &str) -> Result<GrowthStrategy, String> {
    match strategy.to_lowercase().as_str() {
        "right-down" | "rightdown" => Ok(GrowthStrategy::RightDownOnly),
        "omni" | "omnidirectional" => Ok(GrowthStrategy::Omnidirectional),
        "random" | "randomized" => Ok(GrowthStrategy::RandomizedOmnidirectional),
        _ => Err("strategy must be one of: right-down, omni, random".into()),
    }
}

impl Cli {
    fn options(&self) -> Result<VectorizeOptions> {
        let mut options = match &self.config {
            Some(path) => {
                let json = fs::read_to_string(path)
                    .with_context(|| format!("failed to read config file: {}", path.display()))?;
                VectorizeOptions::from_json(&json)
                    .with_context(|| format!("failed to parse config file: {}", path.display()))?
            }
            None => VectorizeOptions::default(),
        };

        options.limit_colors |= self.limit || self.quantize || self.optimize;
        options.highlight_expanded |= self.highlight;
        options.single_pixels |= self.single_pixels;
        if let Some(strategy) = self.strategy {
            options.strategy = strategy;
        }
        if self.seed.is_some() {
            options.seed = self.seed;
        }
        if self.no_group {
            options.group_by_color = false;
        }
        if self.no_minify {
            options.minify = false;
        }
        Ok(options)
    }

    fn writes_to_stdout(&self) -> bool {
        self.output.as_os_str() == "-"
    }
}

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if cli.verbose { "info" } else { "warn" }),
    )
    .init();

    if let Err(err) = run(&cli) {
        eprintln!("[png2svg] error: {err}");
        for cause in err.chain().skip(1) {
            eprintln!("  caused by: {cause}");
        }
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let png_bytes = fs::read(&cli.input)
        .with_context(|| format!("failed to read input file: {}", cli.input.display()))?;

    let options = cli.options()?;
    debug!("options: {:?}", options);

    let svg = png_to_svg(&png_bytes, &options)
        .with_context(|| format!("failed to convert {}", cli.input.display()))?;

    if cli.writes_to_stdout() {
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(svg.as_bytes())
            .context("failed to write to stdout")?;
        stdout.flush().context("failed to write to stdout")?;
    } else {
        fs::write(&cli.output, svg)
            .with_context(|| format!("failed to write {}", cli.output.display()))?;
    }

    Ok(())
}
