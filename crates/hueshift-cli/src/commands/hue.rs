//! Hue command
//!
//! Prints the hue a picked color carries, the value `apply --color` would use.

use crate::HueArgs;
use anyhow::Result;
use hueshift_core::{Hsv, HueTarget};

pub fn run(args: HueArgs) -> Result<()> {
    let rgb = super::parse_color(&args.color)?;
    let hsv = Hsv::from_rgb8(rgb);
    let target = HueTarget::from_rgb8(rgb);

    println!("{},{},{}", rgb[0], rgb[1], rgb[2]);
    println!("  Hue:        {:.4} ({:.1}°)", target.value(), target.degrees());
    println!("  Saturation: {:.4}", hsv.s);
    println!("  Value:      {:.4}", hsv.v);
    if hsv.is_achromatic() {
        println!("  Note:       gray pick, applies red (0°)");
    }

    Ok(())
}
