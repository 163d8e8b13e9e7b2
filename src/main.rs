use clap::{Parser, Subcommand};
use darkroom::imaging::Quality;
use darkroom::output;
use darkroom::pipeline::{Pipeline, ResizeRequest};
use darkroom::placeholder::BlurPreview;
use darkroom::store::Store;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "darkroom")]
#[command(about = "Incremental derivative-image pipeline for photo galleries")]
#[command(long_about = "\
Incremental derivative-image pipeline for photo galleries

Point darkroom at a directory of source photos and it generates, per output
category, resized JPEG derivatives at the configured widths, an optional
watermark composite on the largest size, and an SVG placeholder per photo.

Runs are incremental: each photo's content hash is recorded in the category
manifest, and unchanged photos are skipped on later runs. Artifacts land in
per-run directories so nothing is ever overwritten in place:

  .darkroom/
  ├── photos.toml              # category → published artifact paths
  ├── blog.toml                # per-category manifest (slug → sha/run id)
  └── photos/{run}/blog/
      ├── 2560/…-by-….jpg      # watermark-eligible (first size)
      ├── 1280/…-by-….jpg
      └── sqip/…-by-….svg")]
#[command(version)]
struct Cli {
    /// Store root for manifests and generated artifacts
    #[arg(long, default_value = ".darkroom", global = true)]
    store: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate resized derivatives and placeholders for one category
    Resize {
        /// Directory of source photos (.jpg, .jpeg, .png)
        #[arg(long)]
        input: PathBuf,

        /// Author name, slugged into every artifact filename
        #[arg(long)]
        author: String,

        /// Output category, e.g. "collection" or "cover"
        #[arg(long)]
        category: String,

        /// Target widths in order; the first is watermark-eligible
        #[arg(long, value_delimiter = ',', default_value = "2560,1280,640")]
        sizes: Vec<u32>,

        /// Composite the watermark onto the first size
        #[arg(long)]
        watermark: bool,

        /// Watermark image location
        #[arg(long, default_value = "watermark.png")]
        watermark_file: PathBuf,

        /// JPEG quality for derivatives (1-100)
        #[arg(long, default_value_t = 90)]
        quality: u32,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("darkroom=info")),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Resize {
            input,
            author,
            category,
            sizes,
            watermark,
            watermark_file,
            quality,
        } => {
            let store = Store::new(cli.store);
            let generator = BlurPreview::default();
            let pipeline =
                Pipeline::new(store, &generator).with_quality(Quality::new(quality));

            let request = ResizeRequest {
                input_dir: input,
                author,
                category,
                sizes,
                watermark: watermark.then_some(watermark_file),
            };

            let report = pipeline.run(&request)?;
            output::print_run_report(&report);
        }
    }

    Ok(())
}
