use crossterm::style::Color;

use super::surface::{Paint, Surface};

/// How to render sub-cell pixels to terminal characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum RenderMode {
    /// Unicode braille characters (2x4 per cell = highest resolution)
    Braille,
    /// Half-block characters ▀▄█ (1x2 per cell)
    HalfBlock,
    /// Plain ASCII characters with density mapping
    Ascii,
}

/// Color output mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ColorMode {
    /// No color — monochrome
    Mono,
    /// ANSI 16 colors
    Ansi16,
    /// 256-color palette
    Ansi256,
    /// 24-bit true color (RGB)
    TrueColor,
}

/// A pixel-level canvas that gets rendered to terminal characters.
/// Coordinates are in "sub-cell" pixel space.
pub struct Canvas {
    /// Width in pixels (sub-cell)
    pub width: usize,
    /// Height in pixels (sub-cell)
    pub height: usize,
    /// Pixel data: brightness 0.0..=1.0
    pub pixels: Vec<f64>,
    /// Per-pixel color (optional — used when color mode != Mono)
    pub colors: Vec<(u8, u8, u8)>,
    pub render_mode: RenderMode,
    pub color_mode: ColorMode,
    /// Surface pixels per canvas dot. Draw calls arrive in surface pixels.
    pub zoom: f64,
}

impl Canvas {
    pub fn new(
        term_cols: usize,
        term_rows: usize,
        render_mode: RenderMode,
        color_mode: ColorMode,
        zoom: f64,
    ) -> Self {
        let (px_w, px_h) = match render_mode {
            RenderMode::Braille => (term_cols * 2, term_rows * 4),
            RenderMode::HalfBlock => (term_cols, term_rows * 2),
            RenderMode::Ascii => (term_cols, term_rows),
        };
        let size = px_w * px_h;
        Canvas {
            width: px_w,
            height: px_h,
            pixels: vec![0.0; size],
            colors: vec![(0, 0, 0); size],
            render_mode,
            color_mode,
            zoom: zoom.max(f64::EPSILON),
        }
    }

    /// Composite a color onto the black background. The brightest paint
    /// drawn onto a dot during a frame wins.
    #[inline]
    pub fn blend(&mut self, x: usize, y: usize, alpha: f64, r: u8, g: u8, b: u8) {
        if x < self.width && y < self.height && alpha > 0.0 {
            let idx = y * self.width + x;
            let alpha = alpha.min(1.0);
            if alpha >= self.pixels[idx] {
                self.pixels[idx] = alpha;
                self.colors[idx] = (r, g, b);
            }
        }
    }

    /// Terminal dimensions needed for this canvas
    pub fn term_size(&self) -> (usize, usize) {
        match self.render_mode {
            RenderMode::Braille => (self.width / 2, self.height / 4),
            RenderMode::HalfBlock => (self.width, self.height / 2),
            RenderMode::Ascii => (self.width, self.height),
        }
    }

    /// Render the canvas to a string buffer for output
    pub fn render(&self) -> String {
        match self.render_mode {
            RenderMode::Braille => super::braille::render(self),
            RenderMode::HalfBlock => super::halfblock::render(self),
            RenderMode::Ascii => self.render_ascii(),
        }
    }

    /// Color of a dot dimmed by its brightness.
    #[inline]
    pub fn shaded(&self, idx: usize) -> (u8, u8, u8) {
        let v = self.pixels[idx].clamp(0.0, 1.0);
        let (r, g, b) = self.colors[idx];
        (
            (r as f64 * v) as u8,
            (g as f64 * v) as u8,
            (b as f64 * v) as u8,
        )
    }

    fn render_ascii(&self) -> String {
        const CHARS: &[u8] = b" .:-=+*#%@";
        let (cols, rows) = self.term_size();
        let mut out = String::with_capacity(cols * rows * 10);
        let use_color = self.color_mode != ColorMode::Mono;
        let mut last_fg = String::new();

        for row in 0..rows {
            for col in 0..cols {
                let idx = row * self.width + col;
                let v = self.pixels[idx].clamp(0.0, 1.0);
                let ch = CHARS[(v * (CHARS.len() - 1) as f64) as usize] as char;

                // Keep the background dark; only lit dots carry color
                if use_color && ch != ' ' {
                    let (r, g, b) = self.colors[idx];
                    let fg = color_to_fg(self.map_color(r, g, b));
                    if fg != last_fg {
                        out.push_str("\x1b[");
                        out.push_str(&fg);
                        out.push('m');
                        last_fg = fg;
                    }
                }
                out.push(ch);
            }
            out.push_str("\x1b[0m");
            push_row_move(&mut out, row + 2);
            last_fg.clear();
        }
        out
    }

    pub fn map_color(&self, r: u8, g: u8, b: u8) -> Color {
        match self.color_mode {
            ColorMode::Mono => Color::White,
            ColorMode::TrueColor => Color::Rgb { r, g, b },
            ColorMode::Ansi256 => {
                // Approximate RGB to 256-color
                let idx = 16 + (36 * (r as u16 / 51)) + (6 * (g as u16 / 51)) + (b as u16 / 51);
                Color::AnsiValue(idx as u8)
            }
            ColorMode::Ansi16 => {
                // Simple mapping to basic colors
                let brightness = (r as u16 + g as u16 + b as u16) / 3;
                if brightness < 64 {
                    Color::Black
                } else if r > g && r > b {
                    if brightness > 180 {
                        Color::Red
                    } else {
                        Color::DarkRed
                    }
                } else if g > r && g > b {
                    if brightness > 180 {
                        Color::Green
                    } else {
                        Color::DarkGreen
                    }
                } else if b > r && b > g {
                    if brightness > 180 {
                        Color::Blue
                    } else {
                        Color::DarkBlue
                    }
                } else if brightness > 180 {
                    Color::White
                } else {
                    Color::Grey
                }
            }
        }
    }
}

impl Surface for Canvas {
    fn width(&self) -> f64 {
        self.width as f64 * self.zoom
    }

    fn height(&self) -> f64 {
        self.height as f64 * self.zoom
    }

    fn clear(&mut self) {
        self.pixels.fill(0.0);
        self.colors.fill((0, 0, 0));
    }

    /// Lights every dot whose center falls inside the circle. A circle
    /// smaller than a dot still lights the dot under its center.
    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, paint: Paint) {
        let (r, g, b, a) = paint.to_rgba();
        if a <= 0.0 || self.width == 0 || self.height == 0 {
            return;
        }
        let cx = x / self.zoom;
        let cy = y / self.zoom;
        let rad = radius / self.zoom;
        if !(cx + rad >= 0.0
            && cy + rad >= 0.0
            && cx - rad < self.width as f64
            && cy - rad < self.height as f64)
        {
            return;
        }

        let x0 = (cx - rad).floor().max(0.0) as usize;
        let y0 = (cy - rad).floor().max(0.0) as usize;
        let x1 = ((cx + rad).floor() as usize).min(self.width - 1);
        let y1 = ((cy + rad).floor() as usize).min(self.height - 1);

        let mut lit = false;
        for py in y0..=y1 {
            for px in x0..=x1 {
                let dx = px as f64 + 0.5 - cx;
                let dy = py as f64 + 0.5 - cy;
                if dx * dx + dy * dy <= rad * rad {
                    self.blend(px, py, a, r, g, b);
                    lit = true;
                }
            }
        }
        if !lit && cx >= 0.0 && cy >= 0.0 {
            self.blend(cx as usize, cy as usize, a, r, g, b);
        }
    }
}

/// Move the cursor to the start of a 1-indexed terminal row.
pub fn push_row_move(out: &mut String, row: usize) {
    out.push_str("\x1b[");
    out.push_str(&row.to_string());
    out.push_str(";1H");
}

pub fn color_to_fg(color: Color) -> String {
    match color {
        Color::Rgb { r, g, b } => format!("38;2;{};{};{}", r, g, b),
        Color::AnsiValue(v) => format!("38;5;{}", v),
        Color::Black => "30".into(),
        Color::DarkRed => "31".into(),
        Color::DarkGreen => "32".into(),
        Color::DarkYellow => "33".into(),
        Color::DarkBlue => "34".into(),
        Color::DarkMagenta => "35".into(),
        Color::DarkCyan => "36".into(),
        Color::Grey => "37".into(),
        Color::DarkGrey => "90".into(),
        Color::Red => "91".into(),
        Color::Green => "92".into(),
        Color::Yellow => "93".into(),
        Color::Blue => "94".into(),
        Color::Magenta => "95".into(),
        Color::Cyan => "96".into(),
        Color::White => "97".into(),
        _ => "37".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(canvas: &Canvas) -> usize {
        canvas.pixels.iter().filter(|&&v| v > 0.0).count()
    }

    #[test]
    fn test_logical_size_scales_with_zoom() {
        let canvas = Canvas::new(10, 5, RenderMode::Braille, ColorMode::TrueColor, 4.0);
        assert_eq!((canvas.width, canvas.height), (20, 20));
        assert_eq!(Surface::width(&canvas), 80.0);
        assert_eq!(Surface::height(&canvas), 80.0);
    }

    #[test]
    fn test_small_circle_lights_center_dot() {
        let mut canvas = Canvas::new(10, 5, RenderMode::Braille, ColorMode::TrueColor, 4.0);
        canvas.fill_circle(41.0, 41.0, 0.5, Paint::WHITE);
        assert_eq!(lit(&canvas), 1);
        assert_eq!(canvas.pixels[10 * canvas.width + 10], 1.0);
    }

    #[test]
    fn test_circle_covers_radius() {
        let mut canvas = Canvas::new(20, 10, RenderMode::HalfBlock, ColorMode::TrueColor, 1.0);
        canvas.fill_circle(10.0, 10.0, 3.0, Paint::Rgba { r: 255, g: 0, b: 0, a: 0.5 });
        let n = lit(&canvas);
        assert!(n >= 24 && n <= 32, "lit {} dots", n);
        assert_eq!(canvas.colors[10 * canvas.width + 10], (255, 0, 0));
    }

    #[test]
    fn test_offscreen_circle_ignored() {
        let mut canvas = Canvas::new(10, 5, RenderMode::Ascii, ColorMode::Mono, 1.0);
        canvas.fill_circle(-50.0, -50.0, 3.0, Paint::WHITE);
        canvas.fill_circle(500.0, 2.0, 3.0, Paint::WHITE);
        assert_eq!(lit(&canvas), 0);
    }

    #[test]
    fn test_brightest_paint_wins() {
        let mut canvas = Canvas::new(10, 5, RenderMode::Ascii, ColorMode::TrueColor, 1.0);
        canvas.fill_circle(2.5, 2.5, 0.4, Paint::Rgba { r: 0, g: 255, b: 0, a: 0.9 });
        canvas.fill_circle(2.5, 2.5, 0.4, Paint::Rgba { r: 255, g: 0, b: 0, a: 0.3 });
        assert_eq!(canvas.colors[2 * canvas.width + 2], (0, 255, 0));
        assert_eq!(canvas.pixels[2 * canvas.width + 2], 0.9);
    }

    #[test]
    fn test_clear_resets_dots() {
        let mut canvas = Canvas::new(10, 5, RenderMode::Braille, ColorMode::TrueColor, 1.0);
        canvas.fill_circle(5.0, 5.0, 4.0, Paint::WHITE);
        assert!(lit(&canvas) > 0);
        Surface::clear(&mut canvas);
        assert_eq!(lit(&canvas), 0);
    }

    #[test]
    fn test_render_modes_emit_rows() {
        for mode in [RenderMode::Braille, RenderMode::HalfBlock, RenderMode::Ascii] {
            let mut canvas = Canvas::new(12, 4, mode, ColorMode::Ansi256, 1.0);
            canvas.fill_circle(3.0, 3.0, 2.0, Paint::WHITE);
            let frame = canvas.render();
            assert!(frame.contains("\x1b[5;1H"), "{:?} frame missing row moves", mode);
        }
    }
}
