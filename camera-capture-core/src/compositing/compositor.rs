use std::io::Cursor;

use image::{ImageFormat, Rgba, RgbaImage};

use crate::models::error::CaptureError;
use crate::models::frame::CapturedFrame;
use crate::models::overlay::OverlayConditions;
use crate::traits::render_surface::RenderSurface;

use super::font;

/// Resolution used when the surface cannot report native dimensions.
pub const DEFAULT_RESOLUTION: (u32, u32) = (640, 480);

/// The info band covers this share of the buffer height, from the top.
const BAND_HEIGHT_PERCENT: u32 = 15;

/// Left margin of the band text, pixels.
const TEXT_X: u32 = 2;
/// Top of the first text line; the second line starts one glyph row plus
/// one pixel of leading below it.
const LINE1_Y: u32 = 0;
const LINE2_Y: u32 = font::GLYPH_HEIGHT + 1;

const TEXT_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Snapshots the surface's current contents into an encoded still frame,
/// optionally compositing the weather band.
///
/// Everything here is deterministic: fixed font, fixed coordinates, fixed
/// band opacity, so identical surface contents and overlay data encode to
/// identical bytes. The session gates calls on binder readiness; this type
/// never checks or mutates camera state.
#[derive(Debug, Default)]
pub struct FrameCompositor;

impl FrameCompositor {
    pub fn new() -> Self {
        Self
    }

    /// Copy the surface at native resolution (fallback 640x480), draw the
    /// band if `overlay` is given, and encode the result as PNG.
    pub fn capture<S: RenderSurface>(
        &self,
        surface: &S,
        overlay: Option<&OverlayConditions>,
    ) -> Result<CapturedFrame, CaptureError> {
        let (width, height) = surface.native_resolution().unwrap_or(DEFAULT_RESOLUTION);
        let mut buffer = surface.copy_frame(width, height);

        if let Some(conditions) = overlay {
            self.draw_band(&mut buffer, conditions);
        }

        let encoded = encode_png(&buffer)?;
        log::debug!(
            "captured {}x{} frame ({} bytes, overlay: {})",
            width,
            height,
            encoded.len(),
            overlay.is_some()
        );
        Ok(CapturedFrame::new(width, height, encoded))
    }

    /// Darken the top band at 50% and render the two info lines:
    /// `"{location}, {temperature}°"` and `"{description}"`.
    fn draw_band(&self, buffer: &mut RgbaImage, conditions: &OverlayConditions) {
        let band_height = buffer.height() * BAND_HEIGHT_PERCENT / 100;
        for y in 0..band_height {
            for x in 0..buffer.width() {
                let pixel = buffer.get_pixel_mut(x, y);
                // 50% black over the base, integer-exact for reproducibility.
                pixel.0 = [pixel.0[0] / 2, pixel.0[1] / 2, pixel.0[2] / 2, 255];
            }
        }

        let line1 = format!(
            "{}, {}°",
            conditions.location_name, conditions.temperature
        );
        draw_text(buffer, &line1, TEXT_X, LINE1_Y);
        draw_text(buffer, &conditions.description, TEXT_X, LINE2_Y);
    }
}

fn draw_text(buffer: &mut RgbaImage, text: &str, origin_x: u32, origin_y: u32) {
    let mut pen_x = origin_x;
    for c in text.chars() {
        let rows = font::glyph(c);
        for (dy, row) in rows.iter().enumerate() {
            for dx in 0..font::GLYPH_WIDTH {
                if row & (1 << (font::GLYPH_WIDTH - 1 - dx)) == 0 {
                    continue;
                }
                let x = pen_x + dx;
                let y = origin_y + dy as u32;
                if x < buffer.width() && y < buffer.height() {
                    buffer.put_pixel(x, y, TEXT_COLOR);
                }
            }
        }
        pen_x += font::GLYPH_ADVANCE;
    }
}

fn encode_png(buffer: &RgbaImage) -> Result<Vec<u8>, CaptureError> {
    let mut cursor = Cursor::new(Vec::new());
    buffer
        .write_to(&mut cursor, ImageFormat::Png)
        .map_err(|e| CaptureError::EncodeFailed(e.to_string()))?;
    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::acquisition::CaptureResource;
    use crate::models::error::PlaybackError;

    /// Surface with a fixed solid-gray test frame.
    struct FlatSurface {
        resolution: Option<(u32, u32)>,
    }

    #[async_trait]
    impl RenderSurface for FlatSurface {
        fn attach(&self, _resource: &CaptureResource) {}
        fn detach(&self) {}
        fn set_muted(&self, _muted: bool) {}
        fn set_inline_playback(&self, _inline_playback: bool) {}

        async fn await_metadata(&self) -> Result<(u32, u32), PlaybackError> {
            Ok(self.resolution.unwrap_or(DEFAULT_RESOLUTION))
        }

        async fn start_playback(&self) -> Result<(), PlaybackError> {
            Ok(())
        }

        fn native_resolution(&self) -> Option<(u32, u32)> {
            self.resolution
        }

        fn copy_frame(&self, width: u32, height: u32) -> RgbaImage {
            RgbaImage::from_pixel(width, height, Rgba([100, 100, 100, 255]))
        }
    }

    fn paris() -> OverlayConditions {
        OverlayConditions {
            location_name: "Paris".into(),
            temperature: 18,
            description: "Clear".into(),
            humidity: 40,
            wind_speed: 3.5,
            feels_like: 17,
        }
    }

    fn decode(frame: &CapturedFrame) -> RgbaImage {
        image::load_from_memory(&frame.encoded).unwrap().to_rgba8()
    }

    #[test]
    fn plain_capture_matches_native_resolution() {
        let surface = FlatSurface {
            resolution: Some((320, 240)),
        };
        let frame = FrameCompositor::new().capture(&surface, None).unwrap();
        assert_eq!((frame.width, frame.height), (320, 240));

        // No band: every pixel keeps the surface color.
        let img = decode(&frame);
        assert!(img.pixels().all(|p| p.0 == [100, 100, 100, 255]));
    }

    #[test]
    fn missing_resolution_falls_back_to_default() {
        let surface = FlatSurface { resolution: None };
        let frame = FrameCompositor::new().capture(&surface, None).unwrap();
        assert_eq!((frame.width, frame.height), DEFAULT_RESOLUTION);
    }

    #[test]
    fn band_covers_top_fifteen_percent() {
        let surface = FlatSurface {
            resolution: Some((100, 100)),
        };
        let conditions = paris();
        let frame = FrameCompositor::new()
            .capture(&surface, Some(&conditions))
            .unwrap();
        let img = decode(&frame);

        // Rows 0-14 are darkened (50, 50, 50) except where text is white.
        for y in 0..15 {
            for x in 0..100 {
                let p = img.get_pixel(x, y).0;
                assert!(
                    p == [50, 50, 50, 255] || p == [255, 255, 255, 255],
                    "unexpected pixel {:?} at ({x}, {y})",
                    p
                );
            }
        }
        // Row 15 onward is untouched.
        for y in 15..100 {
            for x in 0..100 {
                assert_eq!(img.get_pixel(x, y).0, [100, 100, 100, 255]);
            }
        }
        // The band actually contains text pixels.
        assert!((0..15).any(|y| (0..100).any(|x| img.get_pixel(x, y).0 == [255, 255, 255, 255])));
    }

    #[test]
    fn identical_inputs_encode_identical_bytes() {
        let surface = FlatSurface {
            resolution: Some((100, 100)),
        };
        let conditions = paris();
        let compositor = FrameCompositor::new();

        let a = compositor.capture(&surface, Some(&conditions)).unwrap();
        let b = compositor.capture(&surface, Some(&conditions)).unwrap();
        assert_eq!(a.encoded, b.encoded);
        assert_eq!(a.checksum, b.checksum);
    }

    #[test]
    fn overlay_changes_output_bytes() {
        let surface = FlatSurface {
            resolution: Some((100, 100)),
        };
        let compositor = FrameCompositor::new();
        let plain = compositor.capture(&surface, None).unwrap();
        let banded = compositor.capture(&surface, Some(&paris())).unwrap();
        assert_ne!(plain.checksum, banded.checksum);
    }
}
