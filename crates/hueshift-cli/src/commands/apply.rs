//! Apply command
//!
//! Replaces the hue of every pixel with the hue of a picked color (or an
//! explicit angle) and saves the result, optionally with its preview.

use crate::ApplyArgs;
use anyhow::{Context, Result};
use hueshift_core::HueTarget;
use hueshift_ops::EditSession;
use tracing::{debug, info};

pub fn run(args: ApplyArgs) -> Result<()> {
    let image = super::load_image(&args.input)?;
    let (width, height) = image.dimensions();
    debug!(width, height, layout = %image.layout(), "Loaded source");

    let mut session = EditSession::new(image)
        .with_context(|| format!("Cannot edit: {}", args.input.display()))?;

    let target = match (&args.color, args.hue) {
        (Some(color), _) => {
            let rgb = super::parse_color(color)?;
            debug!(?rgb, "Picked color");
            session.pick_color(rgb)?
        }
        (None, Some(degrees)) => {
            let target = HueTarget::from_degrees(degrees)?;
            session.apply_hue(target)?;
            target
        }
        (None, None) => anyhow::bail!("Either --color or --hue is required"),
    };

    let modified = session
        .modified()
        .context("Hue was not applied")?;
    super::save_image_with_quality(&args.output, modified, args.jpeg_quality)?;
    info!(output = %args.output.display(), degrees = target.degrees(), "Saved result");

    if let Some(preview_path) = &args.preview {
        let options = super::preview_options(&args.preview_box)?;
        let preview = session.preview(&options)?;
        super::save_image(preview_path, &preview)?;
        info!(
            output = %preview_path.display(),
            width = preview.width(),
            height = preview.height(),
            "Saved preview"
        );
    }

    if !args.quiet {
        println!(
            "Applied hue {:.1}° to {} -> {}",
            target.degrees(),
            args.input.display(),
            args.output.display()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PreviewBox;
    use hueshift_core::{ChannelLayout, PixelBuffer};
    use std::path::Path;
    use tempfile::tempdir;

    fn args(input: &Path, output: &Path) -> ApplyArgs {
        ApplyArgs {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            color: None,
            hue: None,
            jpeg_quality: 90,
            preview: None,
            quiet: true,
            preview_box: PreviewBox {
                min_width: 400,
                min_height: 400,
                background: "255,255,255".into(),
                filter: "lanczos".into(),
            },
        }
    }

    /// Deterministic high-entropy RGB image.
    fn noise(width: u32, height: u32) -> PixelBuffer {
        let mut state = 0x2545_f491_u32;
        let data = (0..width * height * 3)
            .map(|_| {
                state ^= state << 13;
                state ^= state >> 17;
                state ^= state << 5;
                (state >> 24) as u8
            })
            .collect();
        PixelBuffer::from_raw(width, height, 3, data).unwrap()
    }

    #[test]
    fn test_apply_color_saves_modified() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("red.png");
        let output = dir.path().join("blue.png");
        let red = PixelBuffer::filled(4, 3, ChannelLayout::Rgb, &[255, 0, 0]).unwrap();
        hueshift_io::write(&input, &red).unwrap();

        let mut a = args(&input, &output);
        a.color = Some("#0000ff".into());
        run(a).unwrap();

        let saved = hueshift_io::read(&output).unwrap();
        assert_eq!(saved.dimensions(), (4, 3));
        assert!(saved.pixels().all(|px| px == [0, 0, 255]));
        // Source file is left alone
        assert_eq!(hueshift_io::read(&input).unwrap(), red);
    }

    #[test]
    fn test_apply_hue_degrees() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("red.png");
        let output = dir.path().join("green.png");
        let red = PixelBuffer::filled(2, 2, ChannelLayout::Rgb, &[255, 0, 0]).unwrap();
        hueshift_io::write(&input, &red).unwrap();

        // 480 wraps to 120 degrees
        let mut a = args(&input, &output);
        a.hue = Some(480.0);
        run(a).unwrap();

        let saved = hueshift_io::read(&output).unwrap();
        assert!(saved.pixels().all(|px| px == [0, 255, 0]));
    }

    #[test]
    fn test_apply_rejects_non_finite_hue() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("red.png");
        let output = dir.path().join("out.png");
        let red = PixelBuffer::filled(2, 2, ChannelLayout::Rgb, &[255, 0, 0]).unwrap();
        hueshift_io::write(&input, &red).unwrap();

        let mut a = args(&input, &output);
        a.hue = Some(f32::NAN);
        assert!(run(a).is_err());
        assert!(!output.exists());
    }

    #[test]
    fn test_apply_jpeg_quality_reaches_encoder() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("noise.png");
        hueshift_io::write(&input, &noise(64, 64)).unwrap();

        let low = dir.path().join("low.jpg");
        let high = dir.path().join("high.jpg");
        for (path, quality) in [(&low, 10u8), (&high, 100u8)] {
            let mut a = args(&input, path);
            a.color = Some("0,200,0".into());
            a.jpeg_quality = quality;
            run(a).unwrap();
        }

        let low_size = std::fs::metadata(&low).unwrap().len();
        let high_size = std::fs::metadata(&high).unwrap().len();
        assert!(low_size < high_size, "{low_size} >= {high_size}");
        assert_eq!(hueshift_io::read(&low).unwrap().dimensions(), (64, 64));
    }

    #[test]
    fn test_apply_bad_jpeg_quality() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("red.png");
        let output = dir.path().join("out.jpg");
        let red = PixelBuffer::filled(2, 2, ChannelLayout::Rgb, &[255, 0, 0]).unwrap();
        hueshift_io::write(&input, &red).unwrap();

        let mut a = args(&input, &output);
        a.color = Some("0,0,255".into());
        a.jpeg_quality = 0;
        assert!(run(a).is_err());
    }

    #[test]
    fn test_apply_writes_preview_of_modified() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("sprite.png");
        let output = dir.path().join("sprite_blue.png");
        let preview = dir.path().join("sprite_preview.png");

        // Opaque red on the left, fully transparent red on the right
        let sprite =
            PixelBuffer::from_raw(2, 1, 4, vec![255, 0, 0, 255, 255, 0, 0, 0]).unwrap();
        hueshift_io::write(&input, &sprite).unwrap();

        let mut a = args(&input, &output);
        a.color = Some("0,0,255".into());
        a.preview = Some(preview.clone());
        run(a).unwrap();

        let saved = hueshift_io::read(&output).unwrap();
        assert_eq!(saved.layout(), ChannelLayout::Rgba);
        assert_eq!(saved.pixel(0, 0), &[0, 0, 255, 255]);
        assert_eq!(saved.pixel(1, 0)[3], 0);

        // min(400 / 2, 400 / 1) = 200
        let shown = hueshift_io::read(&preview).unwrap();
        assert_eq!(shown.layout(), ChannelLayout::Rgb);
        assert_eq!(shown.dimensions(), (400, 200));
        assert_eq!(shown.pixel(0, 0), &[0, 0, 255]);
        assert_eq!(shown.pixel(199, 199), &[0, 0, 255]);
        assert_eq!(shown.pixel(200, 0), &[255, 255, 255]);
        assert_eq!(shown.pixel(399, 199), &[255, 255, 255]);
    }
}
