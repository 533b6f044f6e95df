// nt_hal/src/ioe/gpu.rs

//! VGA controller and framebuffer.

use super::{Port, FB_ADDR, VGACTL_ADDR};

const SYNC_ADDR: usize = VGACTL_ADDR + 4;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GpuConfig {
    pub width: u32,
    pub height: u32,
}

impl GpuConfig {
    /// Framebuffer size in bytes, at four bytes per pixel.
    pub fn vmem_size(&self) -> usize {
        self.width as usize * self.height as usize * 4
    }
}

/// A rectangle of pixels to copy into the framebuffer.
#[derive(Debug, Clone, Copy)]
pub struct FbDraw<'a> {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
    /// Row-major, `w` pixels per row. `None` draws nothing.
    pub pixels: Option<&'a [u32]>,
    /// Ask the device to present the framebuffer after the copy.
    pub sync: bool,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GpuStatus {
    pub ready: bool,
}

/// The NEMU VGA controller accepts a draw at any time.
pub fn status(_port: &impl Port) -> GpuStatus {
    GpuStatus { ready: true }
}

/// Screen geometry: width in the low half of the control word, height in
/// the high half.
pub fn config(port: &impl Port) -> GpuConfig {
    let vgactl = port.read32(VGACTL_ADDR);
    GpuConfig {
        width: vgactl & 0xffff,
        height: vgactl >> 16,
    }
}

/// Copies `draw.pixels` to `(x, y)` on a screen `screen.width` pixels wide,
/// then writes the sync flag if asked to.
///
/// The rectangle is not clipped against the screen; a slice shorter than
/// `w * h` stops the copy early. A zero-width rectangle copies nothing.
pub fn fbdraw(port: &impl Port, screen: &GpuConfig, draw: &FbDraw<'_>) {
    if let Some(pixels) = draw.pixels.filter(|_| draw.w > 0) {
        let width = screen.width as usize;
        let rows = pixels.chunks(draw.w as usize).take(draw.h as usize);
        for (i, row) in rows.enumerate() {
            let line = FB_ADDR + 4 * (width * (draw.y as usize + i) + draw.x as usize);
            for (j, pixel) in row.iter().enumerate() {
                port.write32(line + 4 * j, *pixel);
            }
        }
    }
    if draw.sync {
        port.write32(SYNC_ADDR, 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ioe::mock::{MockBus, Write};

    #[test]
    fn config_splits_control_word() {
        let bus = MockBus::new();
        bus.set(VGACTL_ADDR, (300 << 16) | 400);
        let cfg = config(&bus);
        assert_eq!(cfg, GpuConfig { width: 400, height: 300 });
        assert_eq!(cfg.vmem_size(), 400 * 300 * 4);
    }

    #[test]
    fn draw_copies_rows_then_syncs() {
        let bus = MockBus::new();
        let screen = GpuConfig { width: 10, height: 10 };
        let pixels = [1, 2, 3, 4];
        fbdraw(
            &bus,
            &screen,
            &FbDraw {
                x: 3,
                y: 2,
                w: 2,
                h: 2,
                pixels: Some(&pixels),
                sync: true,
            },
        );
        let row0 = FB_ADDR + 4 * (10 * 2 + 3);
        let row1 = FB_ADDR + 4 * (10 * 3 + 3);
        assert_eq!(
            bus.writes(),
            vec![
                Write::Word(row0, 1),
                Write::Word(row0 + 4, 2),
                Write::Word(row1, 3),
                Write::Word(row1 + 4, 4),
                Write::Word(SYNC_ADDR, 1),
            ]
        );
    }

    #[test]
    fn sync_only_draw_touches_just_the_flag() {
        let bus = MockBus::new();
        let screen = GpuConfig { width: 10, height: 10 };
        fbdraw(
            &bus,
            &screen,
            &FbDraw {
                x: 0,
                y: 0,
                w: 0,
                h: 0,
                pixels: None,
                sync: true,
            },
        );
        assert_eq!(bus.writes(), vec![Write::Word(SYNC_ADDR, 1)]);
    }

    #[test]
    fn zero_width_draw_writes_only_the_sync_flag() {
        let bus = MockBus::new();
        let screen = GpuConfig { width: 10, height: 10 };
        let pixels = [7, 8, 9];
        fbdraw(
            &bus,
            &screen,
            &FbDraw {
                x: 1,
                y: 1,
                w: 0,
                h: 3,
                pixels: Some(&pixels),
                sync: true,
            },
        );
        assert_eq!(bus.writes(), vec![Write::Word(SYNC_ADDR, 1)]);
    }

    #[test]
    fn status_is_always_ready() {
        let bus = MockBus::new();
        assert!(status(&bus).ready);
        assert!(bus.writes().is_empty());
    }
}
