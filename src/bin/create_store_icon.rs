use anyhow::Result;
use clap::Parser;
use reminder_assets::store_icon::{self, StoreIconOptions};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[clap(
    name = "create-store-icon",
    about = "Frame the 128px toolbar icon on a gradient tile for the store listing"
)]
struct Args {
    /// 128px toolbar icon.
    #[clap(long, value_name = "PNG", default_value = store_icon::DEFAULT_ICON)]
    icon: PathBuf,

    /// Output PNG path.
    #[clap(short, long, value_name = "PNG", default_value = store_icon::DEFAULT_OUTPUT)]
    output: PathBuf,
}

fn main() -> Result<()> {
    reminder_assets::init_logging();
    let args = Args::parse();

    store_icon::generate_store_icon(&StoreIconOptions {
        icon: args.icon,
        output: args.output,
    })?;

    Ok(())
}
