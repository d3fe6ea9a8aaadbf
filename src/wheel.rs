//! Wheel geometry and rasterization.
//!
//! The wheel is split into equal slices, one per entry, each painted with a hue
//! spaced evenly around the colour wheel. Angles are screen angles: zero points
//! right (where the pointer sits) and positive angles turn clockwise. With no
//! rotation, slice 0 starts at the left edge.
//!
//! Rendering produces plain ratatui [`Line`]s using half-block characters so
//! each terminal cell carries two vertically stacked pixels.

use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};
use std::f64::consts::{PI, TAU};
use unicode_width::UnicodeWidthChar;

use crate::spin::{normalize, winning_index};

/// Label text colour on top of slices.
const LABEL_COLOR: Rgb = Rgb(0x1B, 0x1F, 0x22);
/// Hub and pointer gradient ends.
const METAL_LIGHT: Rgb = Rgb(0xF1, 0xF2, 0xEE);
const METAL_DARK: Rgb = Rgb(0x6C, 0x7B, 0x89);
/// Horizontal pixels reserved to the right of the wheel for the pointer.
const POINTER_MARGIN: f64 = 4.0;
/// Marker appended to labels that had to be shortened.
pub const ELLIPSIS: char = '…';

/// An opaque RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    fn mix(self, other: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let lerp = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
        Rgb(
            lerp(self.0, other.0),
            lerp(self.1, other.1),
            lerp(self.2, other.2),
        )
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::Rgb(rgb.0, rgb.1, rgb.2)
    }
}

/// Hue in degrees for slice `index` of `count`.
pub fn slice_hue(index: usize, count: usize) -> f64 {
    (index as f64 * 360.0) / count.max(1) as f64
}

/// Converts HSL (hue in degrees, saturation and lightness in `[0, 1]`) to RGB.
pub fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> Rgb {
    let h = hue.rem_euclid(360.0) / 60.0;
    let s = saturation.clamp(0.0, 1.0);
    let l = lightness.clamp(0.0, 1.0);

    let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = l - chroma / 2.0;
    let channel = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;

    Rgb(channel(r), channel(g), channel(b))
}

/// Shortens `label` to at most `max_width` terminal columns.
///
/// Widths are display widths, so CJK characters and most emoji count as two
/// columns. Characters are dropped from the end until the text plus an
/// ellipsis fits.
pub fn truncate_label(label: &str, max_width: usize) -> String {
    if label_width(label) <= max_width {
        return label.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    // The ellipsis itself takes one column
    let budget = max_width - 1;
    let mut used = 0;
    let mut truncated = String::new();
    for ch in label.chars() {
        let width = ch.width().unwrap_or(0);
        if used + width > budget {
            break;
        }
        used += width;
        truncated.push(ch);
    }
    truncated.push(ELLIPSIS);
    truncated
}

/// Columns `text` occupies when each character gets its own cell run.
///
/// Zero-width and control characters are not drawn and take no columns.
pub fn label_width(text: &str) -> usize {
    text.chars().map(|ch| ch.width().unwrap_or(0)).sum()
}

/// One wedge of the wheel.
#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub label: String,
    pub start_angle: f64,
    pub end_angle: f64,
    pub color: Rgb,
}

impl Slice {
    pub fn mid_angle(&self) -> f64 {
        (self.start_angle + self.end_angle) / 2.0
    }
}

/// Slice geometry for a given set of labels and rotation.
#[derive(Debug, Clone)]
pub struct WheelLayout {
    slices: Vec<Slice>,
    rotation: f64,
    angle_step: f64,
    placeholder: bool,
}

impl WheelLayout {
    /// Lays out one slice per non-blank label. With no labels a single unlabeled
    /// placeholder slice fills the wheel.
    pub fn new<'a>(labels: impl IntoIterator<Item = &'a str>, rotation: f64) -> Self {
        let mut labels: Vec<&str> = labels
            .into_iter()
            .filter(|label| !label.trim().is_empty())
            .collect();
        let placeholder = labels.is_empty();
        if placeholder {
            labels.push("");
        }

        let count = labels.len();
        let angle_step = TAU / count as f64;
        let offset = -PI + rotation;

        let slices = labels
            .into_iter()
            .enumerate()
            .map(|(i, label)| {
                let start_angle = i as f64 * angle_step + offset;
                Slice {
                    label: label.to_string(),
                    start_angle,
                    end_angle: start_angle + angle_step,
                    color: hsl_to_rgb(slice_hue(i, count), 1.0, 0.6),
                }
            })
            .collect();

        Self {
            slices,
            rotation,
            angle_step,
            placeholder,
        }
    }

    pub fn slices(&self) -> &[Slice] {
        &self.slices
    }

    pub fn slice_count(&self) -> usize {
        self.slices.len()
    }

    /// Whether the wheel is showing the empty-list placeholder.
    pub fn is_placeholder(&self) -> bool {
        self.placeholder
    }

    /// Index of the slice covering `screen_angle`.
    pub fn slice_at(&self, screen_angle: f64) -> usize {
        let relative = normalize(screen_angle + PI - self.rotation);
        ((relative / self.angle_step).floor() as usize) % self.slices.len()
    }

    /// Index of the slice under the pointer.
    pub fn pointer_slice(&self) -> usize {
        winning_index(self.rotation, self.slices.len())
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Cell {
    top: Option<Rgb>,
    bottom: Option<Rgb>,
    glyph: Option<char>,
    /// Second column of a wide glyph placed in the cell to its left.
    covered: bool,
}

/// Pixel-space placement of the wheel inside a `width` x `height` cell area.
#[derive(Debug, Clone, Copy)]
struct Geometry {
    cx: f64,
    cy: f64,
    radius: f64,
}

impl Geometry {
    fn fit(width: u16, height: u16) -> Option<Self> {
        let px_w = f64::from(width);
        let px_h = f64::from(height) * 2.0;
        let radius = ((px_w - POINTER_MARGIN).min(px_h) / 2.0 - 0.5).floor();
        if radius < 2.0 {
            return None;
        }
        Some(Self {
            cx: (px_w - POINTER_MARGIN) / 2.0,
            cy: px_h / 2.0,
            radius,
        })
    }

    fn hub_radius(&self) -> f64 {
        (self.radius / 7.0).max(1.0)
    }

    fn pixel(&self, layout: &WheelLayout, x: f64, y: f64) -> Option<Rgb> {
        let (dx, dy) = (x - self.cx, y - self.cy);
        let dist = dx.hypot(dy);

        if let Some(color) = self.pointer_pixel(x, y) {
            return Some(color);
        }
        let hub = self.hub_radius();
        if dist <= hub {
            return Some(METAL_LIGHT.mix(METAL_DARK, dist / hub));
        }
        if dist <= self.radius {
            let slice = layout.slice_at(dy.atan2(dx));
            return Some(layout.slices[slice].color);
        }
        None
    }

    /// Triangle with its tip just inside the rim at the right-hand side.
    fn pointer_pixel(&self, x: f64, y: f64) -> Option<Rgb> {
        let tip = self.cx + self.radius * 0.85;
        let base = self.cx + self.radius + POINTER_MARGIN - 1.0;
        let half_height = (self.radius * 0.12).max(1.5);
        if x < tip || x > base {
            return None;
        }
        let t = (x - tip) / (base - tip);
        if (y - self.cy).abs() <= half_height * t {
            Some(METAL_LIGHT.mix(METAL_DARK, t))
        } else {
            None
        }
    }
}

/// Rasterizes the wheel into `height` lines of `width` cells.
///
/// Areas too small to hold a recognisable wheel come back blank.
pub fn render_wheel(layout: &WheelLayout, width: u16, height: u16) -> Vec<Line<'static>> {
    let cols = usize::from(width);
    let rows = usize::from(height);
    let mut grid = vec![vec![Cell::default(); cols]; rows];

    if let Some(geometry) = Geometry::fit(width, height) {
        for (row, cells) in grid.iter_mut().enumerate() {
            for (col, cell) in cells.iter_mut().enumerate() {
                let x = col as f64 + 0.5;
                cell.top = geometry.pixel(layout, x, row as f64 * 2.0 + 0.5);
                cell.bottom = geometry.pixel(layout, x, row as f64 * 2.0 + 1.5);
            }
        }
        place_labels(&mut grid, layout, &geometry);
    }

    grid.into_iter().map(cells_to_line).collect()
}

/// Writes each slice's label centred at half radius along its mid-angle,
/// skipping labels that would collide with one already placed.
fn place_labels(grid: &mut [Vec<Cell>], layout: &WheelLayout, geometry: &Geometry) {
    if layout.is_placeholder() {
        return;
    }
    let max_width = (geometry.radius / 1.5).floor() as usize;
    let mut taken = vec![vec![false; grid.first().map_or(0, Vec::len)]; grid.len()];

    for slice in layout.slices() {
        let text = truncate_label(&slice.label, max_width);
        let len = label_width(&text);
        if len == 0 {
            continue;
        }

        let angle = slice.mid_angle();
        let px = geometry.cx + angle.cos() * geometry.radius / 2.0;
        let py = geometry.cy + angle.sin() * geometry.radius / 2.0;
        let row = (py / 2.0).floor();
        let start = (px - len as f64 / 2.0).round();
        if row < 0.0 || start < 0.0 {
            continue;
        }
        let (row, start) = (row as usize, start as usize);
        let Some(row_taken) = taken.get_mut(row) else {
            continue;
        };
        let end = start + len;
        // One cell of padding either side keeps neighbouring labels apart
        let lo = start.saturating_sub(1);
        let hi = (end + 1).min(row_taken.len());
        if end > row_taken.len() || row_taken[lo..hi].iter().any(|t| *t) {
            continue;
        }

        let mut col = start;
        for ch in text.chars() {
            let width = ch.width().unwrap_or(0);
            if width == 0 {
                continue;
            }
            for (offset, cell) in grid[row][col..col + width].iter_mut().enumerate() {
                cell.bottom = Some(slice.color);
                if offset == 0 {
                    cell.glyph = Some(ch);
                } else {
                    cell.covered = true;
                }
            }
            row_taken[col..col + width].fill(true);
            col += width;
        }
    }
}

fn cells_to_line(cells: Vec<Cell>) -> Line<'static> {
    let spans: Vec<Span<'static>> = cells
        .into_iter()
        .filter(|cell| !cell.covered)
        .map(|cell| match (cell.glyph, cell.top, cell.bottom) {
            (Some(ch), _, bg) => {
                let mut style = Style::default().fg(LABEL_COLOR.into());
                if let Some(bg) = bg {
                    style = style.bg(bg.into());
                }
                Span::styled(ch.to_string(), style)
            }
            (None, None, None) => Span::raw(" "),
            (None, Some(top), None) => Span::styled("▀", Style::default().fg(top.into())),
            (None, None, Some(bottom)) => Span::styled("▄", Style::default().fg(bottom.into())),
            (None, Some(top), Some(bottom)) => Span::styled(
                "▀",
                Style::default().fg(top.into()).bg(bottom.into()),
            ),
        })
        .collect();
    Line::from(spans)
}
