use clap::{CommandFactory, Parser};
use review_gallery::config::{self, Config};
use review_gallery::{logging, output, pipeline};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "review-gallery")]
#[command(about = "Build a local EXIF gallery from a car review page")]
#[command(long_about = "\
Build a local EXIF gallery from a car review page

Every gallery anchor on the page is downloaded, its EXIF metadata decoded,
and the photo and its embedded thumbnail saved as numbered files:

  1.jpg  1_thumb.jpg  2.jpg  2_thumb.jpg  ...  index.html

index.html lists each photo with make, model, lens, focal length, aperture,
exposure, ISO, capture time and software.")]
#[command(version)]
struct Cli {
    /// Review page URL
    #[arg(value_name = "REVIEW_URL")]
    urls: Vec<String>,

    /// Directory for the images and index.html
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Class that marks gallery anchors on the review page
    #[arg(long, default_value = config::DEFAULT_GALLERY_CLASS)]
    gallery_class: String,

    /// Scheme prepended to scheme-relative image links
    #[arg(long, default_value = config::DEFAULT_SCHEME)]
    scheme: String,

    /// Title of the generated page
    #[arg(long, default_value = config::DEFAULT_TITLE)]
    title: String,

    /// Log debug diagnostics to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Exactly one URL; anything else is a usage error reported on stdout.
    let [url] = cli.urls.as_slice() else {
        println!("ERROR: Usage {} URL", env!("CARGO_PKG_NAME"));
        println!("{}", Cli::command().render_usage());
        return Ok(());
    };

    logging::init(cli.verbose);

    let config = Config {
        output_dir: cli.output,
        gallery_class: cli.gallery_class,
        scheme: cli.scheme,
        title: cli.title,
    };

    pipeline::run(url, &config, output::print_event)?;
    Ok(())
}
