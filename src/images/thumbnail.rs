use image::RgbImage;

/// Terminal-sized RGB grid for half-block rendering: `cols` cells wide,
/// `rows` cells tall, two vertically stacked pixels per cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    cols: u16,
    rows: u16,
    pixels: Vec<(u8, u8, u8)>,
}

impl Thumbnail {
    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// The (top, bottom) pixel pair of cell (x, y).
    pub fn cell(&self, x: u16, y: u16) -> ((u8, u8, u8), (u8, u8, u8)) {
        let width = self.cols as usize;
        let top = self.pixels[(y as usize * 2) * width + x as usize];
        let bottom = self.pixels[(y as usize * 2 + 1) * width + x as usize];
        (top, bottom)
    }
}

/// Decode raw image bytes and downsample to a `cols` x `rows` cell grid.
pub fn decode(bytes: &[u8], cols: u16, rows: u16) -> image::ImageResult<Thumbnail> {
    let decoded = image::load_from_memory(bytes)?;
    Ok(downsample(&decoded.to_rgb8(), cols, rows))
}

/// Box-sample `src` into a grid of `cols` x `rows * 2` pixels, averaging
/// each source block. Sources smaller than the target repeat pixels.
fn downsample(src: &RgbImage, cols: u16, rows: u16) -> Thumbnail {
    let out_w = cols.max(1) as u32;
    let out_h = rows.max(1) as u32 * 2;
    let (src_w, src_h) = src.dimensions();

    let mut pixels = Vec::with_capacity((out_w * out_h) as usize);
    for oy in 0..out_h {
        let y0 = oy * src_h / out_h;
        let y1 = ((oy + 1) * src_h / out_h).max(y0 + 1).min(src_h);
        for ox in 0..out_w {
            let x0 = ox * src_w / out_w;
            let x1 = ((ox + 1) * src_w / out_w).max(x0 + 1).min(src_w);

            let (mut r, mut g, mut b, mut count) = (0u64, 0u64, 0u64, 0u64);
            for y in y0..y1 {
                for x in x0..x1 {
                    let p = src.get_pixel(x, y);
                    r += u64::from(p[0]);
                    g += u64::from(p[1]);
                    b += u64::from(p[2]);
                    count += 1;
                }
            }
            if count == 0 {
                pixels.push((0, 0, 0));
            } else {
                pixels.push(((r / count) as u8, (g / count) as u8, (b / count) as u8));
            }
        }
    }

    Thumbnail {
        cols: out_w as u16,
        rows: (out_h / 2) as u16,
        pixels,
    }
}
