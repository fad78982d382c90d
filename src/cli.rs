//! CLI argument parsing with clap.

use clap::Parser;

use merge_images::{MergeOptions, OutputFormat, Target};

/// Stack images top to bottom into a single image.
#[derive(Parser, Debug)]
#[command(name = "merge-images", version, about)]
pub struct Cli {
    /// Input images (paths or file:// URIs), top to bottom.
    pub images: Vec<String>,

    /// Maximum width of each placed image; wider images are scaled down.
    #[arg(short = 'w', long, allow_negative_numbers = true)]
    pub max_width: Option<i64>,

    /// Output format: jpeg, png, webp.
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// JPEG quality, 1-100.
    #[arg(short, long, allow_negative_numbers = true)]
    pub quality: Option<i64>,

    /// Output directory selector: temp, disk.
    #[arg(short, long)]
    pub target: Option<Target>,

    /// Output file path (auto-generated if not specified).
    #[arg(short, long)]
    pub output: Option<String>,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Print the result as JSON on stdout.
    #[arg(long)]
    pub json: bool,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Apply explicit flags on top of `defaults`.
    #[must_use]
    pub fn merge_options(&self, defaults: MergeOptions) -> MergeOptions {
        MergeOptions {
            max_width: self.max_width.or(defaults.max_width),
            format: self.format.unwrap_or(defaults.format),
            jpeg_quality: self.quality.or(defaults.jpeg_quality),
            target: self.target.unwrap_or(defaults.target),
            destination: self.output.as_ref().map(Into::into).or(defaults.destination),
        }
    }
}
