use super::canvas::{Canvas, ColorMode, color_to_fg, push_row_move};
use crossterm::style::Color;

fn color_to_bg(color: Color) -> String {
    // Background SGR codes sit 10 above the foreground ones
    let fg = color_to_fg(color);
    match fg.strip_prefix("38;") {
        Some(rest) => format!("48;{}", rest),
        None => fg
            .parse::<u16>()
            .map(|code| (code + 10).to_string())
            .unwrap_or_else(|_| "40".into()),
    }
}

/// Below this a half cell counts as empty sky.
const DARK_THRESHOLD: f64 = 0.02;

/// Each terminal cell shows two stacked dots: the top one as the `▀`
/// foreground, the bottom one as the background.
pub fn render(canvas: &Canvas) -> String {
    let term_cols = canvas.width;
    let term_rows = canvas.height / 2;
    let mut out = String::with_capacity(term_cols * term_rows * 10);
    let mut last_sgr = String::new();

    for row in 0..term_rows {
        for col in 0..term_cols {
            let top = row * 2 * canvas.width + col;
            let bot = top + canvas.width;
            let top_lit = canvas.pixels[top] >= DARK_THRESHOLD;
            let bot_lit = canvas.pixels[bot] >= DARK_THRESHOLD;

            if canvas.color_mode == ColorMode::Mono {
                out.push(match (top_lit, bot_lit) {
                    (true, true) => '█',
                    (true, false) => '▀',
                    (false, true) => '▄',
                    (false, false) => ' ',
                });
                continue;
            }

            if !top_lit && !bot_lit {
                if !last_sgr.is_empty() {
                    out.push_str("\x1b[0m");
                    last_sgr.clear();
                }
                out.push(' ');
                continue;
            }

            let (tr, tg, tb) = canvas.shaded(top);
            let (br, bg, bb) = canvas.shaded(bot);
            let sgr = format!(
                "{};{}",
                color_to_fg(canvas.map_color(tr, tg, tb)),
                color_to_bg(canvas.map_color(br, bg, bb))
            );
            if sgr != last_sgr {
                out.push_str("\x1b[");
                out.push_str(&sgr);
                out.push('m');
                last_sgr = sgr;
            }
            out.push('▀');
        }
        if !last_sgr.is_empty() {
            out.push_str("\x1b[0m");
            last_sgr.clear();
        }
        push_row_move(&mut out, row + 2);
    }
    out
}
