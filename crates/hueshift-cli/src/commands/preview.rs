//! Preview command
//!
//! Writes the display-size rendition of an image: alpha flattened, small
//! images magnified in whole-pixel blocks, everything else smoothed to the
//! preview box.

use crate::PreviewArgs;
use anyhow::Result;
use hueshift_ops::{preview, ScalePlan};
use tracing::debug;

pub fn run(args: PreviewArgs) -> Result<()> {
    let image = super::load_image(&args.input)?;
    let options = super::preview_options(&args.preview_box)?;

    let (width, height) = image.dimensions();
    let plan = ScalePlan::choose(width, height, options.min_width, options.min_height)?;
    debug!(?plan, "Preview plan");

    let preview = preview::scale_with_options(&image, &options)?;
    super::save_image(&args.output, &preview)?;

    if !args.quiet {
        let how = match plan {
            ScalePlan::Magnify { factor } => format!("magnified x{}", factor),
            ScalePlan::Smooth { .. } => format!("smoothed ({:?})", options.filter),
        };
        println!(
            "{}x{} -> {}x{} {}: {}",
            width,
            height,
            preview.width(),
            preview.height(),
            how,
            args.output.display()
        );
    }

    Ok(())
}
