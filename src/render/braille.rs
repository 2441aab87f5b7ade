use super::canvas::{Canvas, ColorMode, color_to_fg, push_row_move};

/// Dot bit for each (dx, dy) position inside a 2x4 braille cell.
///
/// ```text
/// 1 4
/// 2 5
/// 3 6
/// 7 8
/// ```
const DOT_BITS: [(usize, usize, u32); 8] = [
    (0, 0, 0x01),
    (0, 1, 0x02),
    (0, 2, 0x04),
    (1, 0, 0x08),
    (1, 1, 0x10),
    (1, 2, 0x20),
    (0, 3, 0x40),
    (1, 3, 0x80),
];

const BRAILLE_BASE: u32 = 0x2800;

/// Dots dimmer than this stay unraised.
const THRESHOLD: f64 = 0.15;

pub fn render(canvas: &Canvas) -> String {
    let term_cols = canvas.width / 2;
    let term_rows = canvas.height / 4;
    let use_color = canvas.color_mode != ColorMode::Mono;
    let mut out = String::with_capacity(term_cols * term_rows * 20);
    let mut last_fg = String::new();

    for row in 0..term_rows {
        for col in 0..term_cols {
            let mut bits = 0u32;
            // Brightest raised dot sets the cell color
            let mut best: Option<(f64, usize)> = None;

            for &(dx, dy, bit) in &DOT_BITS {
                let idx = (row * 4 + dy) * canvas.width + col * 2 + dx;
                let v = canvas.pixels[idx];
                if v > THRESHOLD {
                    bits |= bit;
                    if best.is_none_or(|(bv, _)| v > bv) {
                        best = Some((v, idx));
                    }
                }
            }

            let ch = char::from_u32(BRAILLE_BASE + bits).unwrap_or(' ');
            if let (true, Some((_, idx))) = (use_color, best) {
                let (r, g, b) = canvas.shaded(idx);
                let fg = color_to_fg(canvas.map_color(r, g, b));
                if fg != last_fg {
                    out.push_str("\x1b[");
                    out.push_str(&fg);
                    out.push('m');
                    last_fg = fg;
                }
            }
            out.push(ch);
        }
        if use_color {
            out.push_str("\x1b[0m");
            last_fg.clear();
        }
        push_row_move(&mut out, row + 2);
    }
    out
}
