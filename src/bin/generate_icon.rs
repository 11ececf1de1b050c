use anyhow::Result;
use clap::Parser;
use reminder_assets::toolbar_icon::{self, IconOptions};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[clap(
    name = "generate-icon",
    about = "Draw the Routine Reminder toolbar icon at every extension size"
)]
struct Args {
    /// Output directory for icon-{size}.png files.
    #[clap(short, long, value_name = "DIR", default_value = toolbar_icon::DEFAULT_OUTPUT_DIR)]
    output: PathBuf,

    /// Also write the manifest.json `icons` fragment to this file.
    #[clap(long, value_name = "FILE")]
    manifest: Option<PathBuf>,

    /// Directory the manifest fragment uses in icon paths.
    #[clap(long, value_name = "PREFIX", default_value = toolbar_icon::DEFAULT_MANIFEST_PREFIX)]
    manifest_prefix: String,
}

fn main() -> Result<()> {
    reminder_assets::init_logging();
    let args = Args::parse();

    let options = IconOptions {
        output: args.output,
        manifest: args.manifest,
        manifest_prefix: args.manifest_prefix,
    };
    toolbar_icon::generate_toolbar_icons(&options)?;

    Ok(())
}
