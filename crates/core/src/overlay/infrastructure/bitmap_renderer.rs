/// Pure-pixel overlay renderer using a 5x7 bitmap font.
///
/// No image/drawing crate in the hot path: boxes and glyphs are written
/// straight into the frame buffer, clipped at the edges.
use crate::detection::domain::frame_annotator::AnnotateOptions;
use crate::overlay::domain::overlay_renderer::OverlayRenderer;
use crate::shared::detection::Detection;
use crate::shared::frame::Frame;

const CHAR_WIDTH: i32 = 6; // 5px glyph + 1px spacing
const CHAR_HEIGHT: i32 = 7;
const BOX_THICKNESS: i32 = 2;
const LABEL_PAD: i32 = 2;

const TEXT_COLOR: [u8; 3] = [255, 255, 255];
const BANNER_BG: [u8; 3] = [32, 32, 32];

#[derive(Default)]
pub struct BitmapRenderer;

impl BitmapRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl OverlayRenderer for BitmapRenderer {
    fn render(&self, frame: &mut Frame, detections: &[Detection], options: &AnnotateOptions) {
        for det in detections {
            let color = det.class.color();
            draw_rect(
                frame,
                det.x,
                det.y,
                det.width,
                det.height,
                color,
                BOX_THICKNESS,
            );

            let label = if options.show_score {
                format!("{} {:.2}", det.class.label(), det.score)
            } else {
                det.class.label().to_string()
            };
            // Label sits above the box, or inside its top edge when clipped
            let label_h = CHAR_HEIGHT + 2 * LABEL_PAD;
            let label_y = if det.y >= label_h {
                det.y - label_h
            } else {
                det.y.max(0)
            };
            draw_text(frame, &label, det.x.max(0), label_y, TEXT_COLOR, Some(color));
        }

        if options.show_counter {
            let counts = Detection::count_by_class(detections);
            let banner = counts
                .iter()
                .map(|(class, n)| format!("{} {}", class.label(), n))
                .collect::<Vec<_>>()
                .join("  ");
            draw_text(frame, &banner, 4, 4, TEXT_COLOR, Some(BANNER_BG));
        }
    }
}

fn put_pixel(frame: &mut Frame, x: i32, y: i32, color: [u8; 3]) {
    if x < 0 || y < 0 || x >= frame.width() as i32 || y >= frame.height() as i32 {
        return;
    }
    let offset = (y as usize * frame.width() as usize + x as usize) * 3;
    frame.data_mut()[offset..offset + 3].copy_from_slice(&color);
}

/// Hollow rectangle with the border grown outward, clipped at the frame edge.
fn draw_rect(frame: &mut Frame, x: i32, y: i32, width: i32, height: i32, color: [u8; 3], thickness: i32) {
    for offset in 0..thickness {
        let left = x - offset;
        let top = y - offset;
        let right = x + width - 1 + offset;
        let bottom = y + height - 1 + offset;
        for px in left..=right {
            put_pixel(frame, px, top, color);
            put_pixel(frame, px, bottom, color);
        }
        for py in top..=bottom {
            put_pixel(frame, left, py, color);
            put_pixel(frame, right, py, color);
        }
    }
}

/// Draw uppercase text with the 5x7 bitmap font, with an optional filled
/// background behind it.
fn draw_text(frame: &mut Frame, text: &str, x: i32, y: i32, color: [u8; 3], bg: Option<[u8; 3]>) {
    if let Some(bg_color) = bg {
        let text_w = text.len() as i32 * CHAR_WIDTH + 2 * LABEL_PAD - 1;
        let text_h = CHAR_HEIGHT + 2 * LABEL_PAD;
        for dy in 0..text_h {
            for dx in 0..text_w {
                put_pixel(frame, x + dx, y + dy, bg_color);
            }
        }
    }

    for (i, ch) in text.to_uppercase().chars().enumerate() {
        let char_x = x + LABEL_PAD + i as i32 * CHAR_WIDTH;
        let char_y = y + LABEL_PAD;
        let pattern = glyph(ch);
        for (row, &bits) in pattern.iter().enumerate() {
            for col in 0..5 {
                if (bits >> (4 - col)) & 1 == 1 {
                    put_pixel(frame, char_x + col, char_y + row as i32, color);
                }
            }
        }
    }
}

/// 5x7 bitmap pattern, one byte per row, low 5 bits used.
fn glyph(ch: char) -> [u8; 7] {
    match ch {
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'I' => [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'K' => [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'N' => [0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001, 0b10001],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        '.' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b01100, 0b01100],
        ' ' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000],
        // Box for anything unmapped
        _ => [0b11111, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11111],
    }
}
