pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;
pub const DISPLAY_PIXELS: usize = DISPLAY_WIDTH * DISPLAY_HEIGHT;
/// size of the display packed 1 bit per pixel, msb first
pub const DISPLAY_PACKED_BYTES: usize = DISPLAY_PIXELS / 8;

/// The 64x32 monochrome screen, row-major. Only `clear` and `draw_sprite`
/// change it.
#[derive(Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    cells: [bool; DISPLAY_PIXELS],
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FrameBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.cells.chunks(DISPLAY_WIDTH) {
            let line: String = row.iter().map(|&on| if on { '#' } else { '.' }).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

impl FrameBuffer {
    pub fn new() -> Self {
        FrameBuffer {
            cells: [false; DISPLAY_PIXELS],
        }
    }

    pub fn clear(&mut self) {
        self.cells = [false; DISPLAY_PIXELS];
    }

    /// state of one pixel; coordinates outside the screen are off
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        x < DISPLAY_WIDTH && y < DISPLAY_HEIGHT && self.cells[y * DISPLAY_WIDTH + x]
    }

    pub fn cells(&self) -> &[bool; DISPLAY_PIXELS] {
        &self.cells
    }

    /// 256 bytes, 8 pixels per byte with the leftmost in the high bit
    pub fn to_packed(&self) -> [u8; DISPLAY_PACKED_BYTES] {
        let mut packed = [0u8; DISPLAY_PACKED_BYTES];
        for (i, &on) in self.cells.iter().enumerate() {
            if on {
                packed[i / 8] |= 0x80 >> (i % 8);
            }
        }
        packed
    }

    /// XOR an 8-pixel-wide sprite onto the screen with its top-left corner at
    /// (x mod 64, y mod 32). Each row wraps horizontally. Rows below the
    /// bottom edge are dropped when `clip_vertically`, otherwise they wrap to
    /// the top. Returns true when any lit pixel was turned off.
    pub fn draw_sprite(&mut self, x: u8, y: u8, rows: &[u8], clip_vertically: bool) -> bool {
        let x0 = x as usize % DISPLAY_WIDTH;
        let y0 = y as usize % DISPLAY_HEIGHT;
        let mut collision = false;
        for (row, &bits) in rows.iter().enumerate() {
            let mut py = y0 + row;
            if py >= DISPLAY_HEIGHT {
                if clip_vertically {
                    break;
                }
                py %= DISPLAY_HEIGHT;
            }
            for col in 0..8 {
                if bits & (0x80 >> col) == 0 {
                    continue;
                }
                let px = (x0 + col) % DISPLAY_WIDTH;
                let cell = &mut self.cells[py * DISPLAY_WIDTH + px];
                collision |= *cell;
                *cell = !*cell;
            }
        }
        collision
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(fb: &FrameBuffer) -> usize {
        fb.cells().iter().filter(|&&on| on).count()
    }

    #[test]
    fn test_new_is_blank() {
        let fb = FrameBuffer::new();
        assert_eq!(lit(&fb), 0);
        assert_eq!(fb.to_packed(), [0; DISPLAY_PACKED_BYTES]);
    }

    #[test]
    fn test_draw_one_line() {
        let mut fb = FrameBuffer::new();
        let collision = fb.draw_sprite(8, 2, &[0b10101011], true);
        assert!(!collision);
        let target = (8 + 2 * DISPLAY_WIDTH) / 8;
        let packed = fb.to_packed();
        assert_eq!(packed[target - 1], 0x0);
        assert_eq!(packed[target], 0b10101011);
        assert_eq!(packed[target + 1], 0x0);
    }

    #[test]
    fn test_draw_unaligned() {
        let mut fb = FrameBuffer::new();
        fb.draw_sprite(2, 0, &[0b10101011], true);
        let packed = fb.to_packed();
        assert_eq!(packed[0], 0b00101010);
        assert_eq!(packed[1], 0b11000000);
        assert_eq!(packed[2], 0x0);
    }

    #[test]
    fn test_draw_multi_line() {
        let mut fb = FrameBuffer::new();
        let sprite = [0b10101011, 0b11101011, 0b10111011];
        fb.draw_sprite(8, 2, &sprite, true);
        let target = (8 + 2 * DISPLAY_WIDTH) / 8;
        let row_offset = DISPLAY_WIDTH / 8;
        let packed = fb.to_packed();
        assert_eq!(packed[target - row_offset], 0x0);
        assert_eq!(packed[target], 0b10101011);
        assert_eq!(packed[target + row_offset], 0b11101011);
        assert_eq!(packed[target + 2 * row_offset], 0b10111011);
        assert_eq!(packed[target + 3 * row_offset], 0x0);
    }

    #[test]
    fn test_collision_only_when_pixel_cleared() {
        let mut fb = FrameBuffer::new();
        assert!(!fb.draw_sprite(0, 0, &[0b11110000], true));
        // overlapping by one pixel
        assert!(fb.draw_sprite(3, 0, &[0b10000000], true));
        assert!(!fb.pixel(3, 0));
        // disjoint
        assert!(!fb.draw_sprite(10, 0, &[0b10000000], true));
    }

    #[test]
    fn test_draw_twice_restores() {
        let mut fb = FrameBuffer::new();
        fb.draw_sprite(1, 20, &[0xff], true);
        let before = fb.clone();
        let sprite = [0x3c, 0x42, 0x81, 0x42, 0x3c];
        assert!(!fb.draw_sprite(5, 0, &sprite, true));
        assert!(fb.draw_sprite(5, 0, &sprite, true));
        assert_eq!(fb, before);
    }

    #[test]
    fn test_wraps_horizontally() {
        let mut fb = FrameBuffer::new();
        fb.draw_sprite(60, 0, &[0xff], true);
        for x in 60..64 {
            assert!(fb.pixel(x, 0));
        }
        for x in 0..4 {
            assert!(fb.pixel(x, 0));
        }
        assert!(!fb.pixel(4, 0));
        assert!(!fb.pixel(0, 1));
    }

    #[test]
    fn test_origin_is_modulo_screen() {
        let mut fb = FrameBuffer::new();
        fb.draw_sprite(64 + 3, 32 + 5, &[0x80], true);
        assert!(fb.pixel(3, 5));
        assert_eq!(lit(&fb), 1);
    }

    #[test]
    fn test_clips_vertically() {
        let mut fb = FrameBuffer::new();
        fb.draw_sprite(0, 30, &[0x80, 0x80, 0x80, 0x80], true);
        assert!(fb.pixel(0, 30));
        assert!(fb.pixel(0, 31));
        assert!(!fb.pixel(0, 0));
        assert_eq!(lit(&fb), 2);
    }

    #[test]
    fn test_wraps_vertically_when_not_clipping() {
        let mut fb = FrameBuffer::new();
        fb.draw_sprite(0, 30, &[0x80, 0x80, 0x80, 0x80], false);
        assert!(fb.pixel(0, 30));
        assert!(fb.pixel(0, 31));
        assert!(fb.pixel(0, 0));
        assert!(fb.pixel(0, 1));
        assert_eq!(lit(&fb), 4);
    }

    #[test]
    fn test_bottom_right_corner() {
        let mut fb = FrameBuffer::new();
        fb.draw_sprite(63, 31, &[0x80], true);
        assert_eq!(fb.to_packed()[DISPLAY_PACKED_BYTES - 1], 0b00000001);
    }

    #[test]
    fn test_clear() {
        let mut fb = FrameBuffer::new();
        fb.draw_sprite(10, 10, &[0xff, 0xff], true);
        fb.clear();
        assert_eq!(fb, FrameBuffer::new());
    }
}
