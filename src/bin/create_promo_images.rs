use anyhow::Result;
use clap::Parser;
use reminder_assets::promo::{self, PromoOptions};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[clap(
    name = "create-promo-images",
    about = "Composite the toolbar icon onto the store marquee and derive the promo tiles"
)]
struct Args {
    /// Icon to paste onto the background.
    #[clap(long, value_name = "PNG", default_value = promo::DEFAULT_ICON)]
    icon: PathBuf,

    /// Marquee background artwork (1400x560).
    #[clap(long, value_name = "PNG", default_value = promo::DEFAULT_BACKGROUND)]
    background: PathBuf,

    /// Directory the promo tiles are written to.
    #[clap(long, value_name = "DIR", default_value = promo::DEFAULT_OUT_DIR)]
    out_dir: PathBuf,
}

fn main() -> Result<()> {
    reminder_assets::init_logging();
    let args = Args::parse();

    let options = PromoOptions {
        icon: args.icon,
        background: args.background,
        out_dir: args.out_dir,
    };
    promo::generate_promo_images(&options)?;

    let large = options.out_dir.join(promo::PROMO_VARIANTS[0].file_name);
    println!("\nUpload {} as the large promo tile.", large.display());
    Ok(())
}
