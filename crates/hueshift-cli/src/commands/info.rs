//! Image info command.
//!
//! Displays dimensions, channel layout, and how much of the image is gray
//! (and so unaffected by a hue change).

use crate::InfoArgs;
use anyhow::Result;
use hueshift_io::{Format, PixelBuffer};
use std::fs;

/// Runs the info command for every input.
pub fn run(args: InfoArgs) -> Result<()> {
    for path in &args.input {
        let file_size = fs::metadata(path)?.len();
        let format = Format::detect(path).unwrap_or(Format::Unknown);
        let image = super::load_image(path)?;

        println!("{}", path.display());
        println!("  Resolution: {}x{}", image.width(), image.height());
        println!("  Layout:     {}", image.layout());
        println!("  Pixels:     {}", image.pixel_count());
        println!("  File size:  {}", super::format_size(file_size));
        println!("  Format:     {:?}", format);
        println!("  Gray share: {:.1}%", gray_share(&image) * 100.0);

        if args.input.len() > 1 {
            println!();
        }
    }

    Ok(())
}

/// Fraction of pixels with R = G = B.
fn gray_share(image: &PixelBuffer) -> f64 {
    if image.is_empty() {
        return 0.0;
    }
    let gray = image
        .pixels()
        .filter(|px| px[0] == px[1] && px[1] == px[2])
        .count();
    gray as f64 / image.pixel_count() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use hueshift_core::ChannelLayout;

    #[test]
    fn test_gray_share() {
        let data = vec![10, 10, 10, 255, 0, 0, 7, 7, 7, 0, 0, 1];
        let image = PixelBuffer::from_raw(2, 2, 3, data).unwrap();
        assert!((gray_share(&image) - 0.5).abs() < 1e-9);

        let gray = PixelBuffer::filled(3, 3, ChannelLayout::Rgba, &[50, 50, 50, 0]).unwrap();
        assert_eq!(gray_share(&gray), 1.0);
    }
}
