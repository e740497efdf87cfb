//! A downstream renderer that draws packed frames onto a truecolor terminal.
//!
//! Each character cell shows two vertical pixels using the lower half-block
//! glyph: the background colour paints the top pixel and the foreground
//! colour the bottom one.

use std::io::Write;

use crate::error::{Error, Result};
use crate::packer::{FrameBuffers, TailStyle, Vertex};

pub type Rgb8 = (u8, u8, u8);

/// Parse `RRGGBB`, with or without a leading `#`.
pub fn parse_hex_color(hex: &str) -> Result<Rgb8> {
    let digits = hex.trim_start_matches('#');
    let invalid = || Error::InvalidColor(hex.to_string());
    if digits.len() != 6 || !digits.is_ascii() {
        return Err(invalid());
    }

    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
    Ok((channel(0)?, channel(2)?, channel(4)?))
}

pub struct TerminalRenderer {
    width: usize,
    height: usize,
    background: Rgb8,
    brightness: f32,
    glow: Vec<(f32, Rgb8)>,
    output_buf: Vec<u8>,
}

impl TerminalRenderer {
    /// `cols` x `rows` character cells; the pixel grid is twice as tall.
    pub fn new(cols: usize, rows: usize, background: Rgb8, brightness: f32) -> Self {
        let width = cols.max(1);
        let height = rows.max(1) * 2;
        Self {
            width,
            height,
            background,
            brightness: brightness.clamp(0.0, 1.0),
            glow: vec![(0.0, background); width * height],
            output_buf: Vec::with_capacity(width * height * 25),
        }
    }

    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Pixel under an NDC position, if it is on screen.
    fn pixel(&self, ndc_x: f32, ndc_y: f32) -> Option<usize> {
        let x = ((ndc_x + 1.0) * 0.5 * self.width as f32).floor();
        let y = ((1.0 - ndc_y) * 0.5 * self.height as f32).floor();
        if x < 0.0 || y < 0.0 || x >= self.width as f32 || y >= self.height as f32 {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    fn color_of(&self, v: &Vertex) -> Rgb8 {
        let to_u8 = |c: f32| (c.clamp(0.0, 1.0) * self.brightness * 255.0) as u8;
        (to_u8(v.color[0]), to_u8(v.color[1]), to_u8(v.color[2]))
    }

    /// Keep the brightest contribution per pixel.
    fn plot(&mut self, ndc_x: f32, ndc_y: f32, intensity: f32, color: Rgb8) {
        if let Some(idx) = self.pixel(ndc_x, ndc_y) {
            if intensity > self.glow[idx].0 {
                self.glow[idx] = (intensity, color);
            }
        }
    }

    /// Walk from `head` to `tail`, fading alpha along the way.
    fn streak(&mut self, head: &Vertex, tail: &Vertex) {
        let (hx, hy) = (head.position[0], head.position[1]);
        let (tx, ty) = (tail.position[0], tail.position[1]);
        let cells_x = (tx - hx).abs() * 0.5 * self.width as f32;
        let cells_y = (ty - hy).abs() * 0.5 * self.height as f32;
        let steps = cells_x.max(cells_y).ceil().max(1.0) as usize;
        let color = self.color_of(head);

        for i in 1..=steps {
            let t = i as f32 / steps as f32;
            let alpha = head.color[3] + (tail.color[3] - head.color[3]) * t;
            self.plot(hx + (tx - hx) * t, hy + (ty - hy) * t, alpha * 0.6, color);
        }
    }

    fn rasterize(&mut self, frame: &FrameBuffers) {
        self.glow.fill((0.0, self.background));

        match frame.tail_style() {
            TailStyle::None => {}
            TailStyle::Line => {
                for pair in frame.tails().chunks_exact(2) {
                    self.streak(&pair[0], &pair[1]);
                }
            }
            TailStyle::Ribbon => {
                for quad in frame.tails().chunks_exact(6) {
                    // Centre line of the ribbon: midpoint of the head edge to the tip
                    let mut head = quad[0];
                    head.position[0] = (quad[0].position[0] + quad[1].position[0]) * 0.5;
                    head.position[1] = (quad[0].position[1] + quad[1].position[1]) * 0.5;
                    self.streak(&head, &quad[2]);
                }
            }
        }

        for v in frame.points() {
            let color = self.color_of(v);
            self.plot(v.position[0], v.position[1], v.color[3], color);
        }
    }

    fn blend(&self, (intensity, color): (f32, Rgb8)) -> Rgb8 {
        let bg = self.background;
        if intensity <= 0.05 {
            return bg;
        }
        let a = intensity.min(1.0);
        let mix = |b: u8, c: u8| (b as f32 * (1.0 - a) + c as f32 * a) as u8;
        (mix(bg.0, color.0), mix(bg.1, color.1), mix(bg.2, color.2))
    }

    /// Draw one frame and flush it with a single write.
    pub fn draw<W: Write>(&mut self, frame: &FrameBuffers, out: &mut W) -> Result<()> {
        self.rasterize(frame);

        self.output_buf.clear();
        self.output_buf.extend_from_slice(b"\x1b[H");

        let mut prev_top: Option<Rgb8> = None;
        let mut prev_bot: Option<Rgb8> = None;

        for y in (0..self.height).step_by(2) {
            for x in 0..self.width {
                let top = self.blend(self.glow[y * self.width + x]);
                let bot = if y + 1 < self.height {
                    self.blend(self.glow[(y + 1) * self.width + x])
                } else {
                    top
                };

                if prev_top != Some(top) {
                    write!(self.output_buf, "\x1b[48;2;{};{};{}m", top.0, top.1, top.2)?;
                    prev_top = Some(top);
                }
                if prev_bot != Some(bot) {
                    write!(self.output_buf, "\x1b[38;2;{};{};{}m", bot.0, bot.1, bot.2)?;
                    prev_bot = Some(bot);
                }
                self.output_buf.extend_from_slice("▄".as_bytes());
            }
            self.output_buf.extend_from_slice(b"\x1b[0m");
            prev_top = None;
            prev_bot = None;
            if y + 2 < self.height {
                self.output_buf.extend_from_slice(b"\r\n");
            }
        }

        out.write_all(&self.output_buf)?;
        out.flush()?;
        Ok(())
    }
}
