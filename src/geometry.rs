use crate::types::{Point, Region};

/// Returns the cell selected by a 1-indexed, row-major `key_index` of a
/// `rows x cols` grid laid over `region`.
///
/// No rounding happens here, so fractional cells compound across layers.
/// Callers must keep `key_index` within `1..=rows * cols`.
pub fn crop_region(region: Region, rows: u32, cols: u32, key_index: u32) -> Region {
    debug_assert!(rows > 0 && cols > 0);
    debug_assert!(key_index >= 1 && key_index <= rows * cols);

    let row = key_index.div_ceil(cols);
    let col = (key_index - 1) % cols + 1;
    let cell_width = region.width / f64::from(cols);
    let cell_height = region.height / f64::from(rows);

    Region {
        x: region.x + f64::from(col - 1) * cell_width,
        y: region.y + f64::from(row - 1) * cell_height,
        width: cell_width,
        height: cell_height,
    }
}

/// Center of `region`, rounded half-up to integer pixels.
pub fn region_center(region: Region) -> Point {
    Point {
        x: round_half_up(region.x + region.width / 2.0),
        y: round_half_up(region.y + region.height / 2.0),
    }
}

/// Moves `region` by `(dx, dy)` and keeps it inside `base`.
///
/// When `region` is larger than `base` on an axis, that axis pins to the
/// base origin.
pub fn nudge_region(region: Region, base: Region, dx: f64, dy: f64) -> Region {
    Region {
        x: clamp(region.x + dx, base.x, base.right() - region.width),
        y: clamp(region.y + dy, base.y, base.bottom() - region.height),
        ..region
    }
}

fn clamp(value: f64, min: f64, max: f64) -> f64 {
    let max = max.max(min);
    value.max(min).min(max)
}

// f64::round goes away from zero on ties; screen math wants ties toward +inf.
fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}
