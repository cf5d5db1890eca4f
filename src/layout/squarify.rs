/// An axis-aligned box given by its corners.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Bounds {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Move every edge inward by `pad` (outward when negative). An edge pair
    /// that would cross collapses to its midpoint.
    pub fn inset(self, pad: f64) -> Self {
        let (mut x0, mut y0, mut x1, mut y1) =
            (self.x0 + pad, self.y0 + pad, self.x1 - pad, self.y1 - pad);
        if x1 < x0 {
            x0 = (x0 + x1) / 2.0;
            x1 = x0;
        }
        if y1 < y0 {
            y0 = (y0 + y1) / 2.0;
            y1 = y0;
        }
        Self { x0, y0, x1, y1 }
    }
}

/// Squarified tiling: split `area` into one box per value, in order.
///
/// Rows are grown greedily while the worst aspect ratio in the row keeps
/// improving against the target `ratio`, then laid along the shorter side
/// of the remaining space. Values are expected in packing order (largest
/// first); zero values get zero-width boxes.
pub fn squarify(values: &[f64], ratio: f64, area: Bounds) -> Vec<Bounds> {
    let n = values.len();
    let mut out = vec![Bounds::default(); n];
    let Bounds {
        mut x0,
        mut y0,
        x1,
        y1,
    } = area;
    let mut value: f64 = values.iter().sum();

    let mut i0 = 0;
    let mut i1 = 0;
    while i0 < n {
        let dx = x1 - x0;
        let dy = y1 - y0;

        // Find the next non-empty value to seed the row
        let mut sum_value;
        loop {
            sum_value = values[i1];
            i1 += 1;
            if sum_value != 0.0 || i1 >= n {
                break;
            }
        }
        let mut min_value = sum_value;
        let mut max_value = sum_value;
        let alpha = (dy / dx).max(dx / dy) / (value * ratio);
        let mut beta = sum_value * sum_value * alpha;
        let mut min_ratio = (max_value / beta).max(beta / min_value);

        // Keep adding values while the worst aspect ratio holds or improves
        while i1 < n {
            let node_value = values[i1];
            sum_value += node_value;
            min_value = min_value.min(node_value);
            max_value = max_value.max(node_value);
            beta = sum_value * sum_value * alpha;
            let new_ratio = (max_value / beta).max(beta / min_value);
            if new_ratio > min_ratio {
                sum_value -= node_value;
                break;
            }
            min_ratio = new_ratio;
            i1 += 1;
        }

        let row = i0..i1;
        if dx < dy {
            let y_end = if value != 0.0 { y0 + dy * sum_value / value } else { y1 };
            dice(&values[row.clone()], sum_value, Bounds::new(x0, y0, x1, y_end), &mut out[row]);
            if value != 0.0 {
                y0 = y_end;
            }
        } else {
            let x_end = if value != 0.0 { x0 + dx * sum_value / value } else { x1 };
            slice(&values[row.clone()], sum_value, Bounds::new(x0, y0, x_end, y1), &mut out[row]);
            if value != 0.0 {
                x0 = x_end;
            }
        }

        value -= sum_value;
        i0 = i1;
    }

    out
}

/// Lay values left to right across the full height of `b`.
fn dice(values: &[f64], total: f64, b: Bounds, out: &mut [Bounds]) {
    let k = if total != 0.0 { b.width() / total } else { 0.0 };
    let mut x = b.x0;
    for (v, slot) in values.iter().zip(out.iter_mut()) {
        let next = x + v * k;
        *slot = Bounds::new(x, b.y0, next, b.y1);
        x = next;
    }
}

/// Lay values top to bottom across the full width of `b`.
fn slice(values: &[f64], total: f64, b: Bounds, out: &mut [Bounds]) {
    let k = if total != 0.0 { b.height() / total } else { 0.0 };
    let mut y = b.y0;
    for (v, slot) in values.iter().zip(out.iter_mut()) {
        let next = y + v * k;
        *slot = Bounds::new(b.x0, y, b.x1, next);
        y = next;
    }
}
