use std::collections::HashMap;

use compact_str::CompactString;

/// An sRGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AppColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl AppColor {
    pub const WHITE: AppColor = AppColor::new(255, 255, 255);
    pub const GREY: AppColor = AppColor::new(128, 128, 128);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn from_hex(hex: u32) -> Self {
        Self::new((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }

    /// Linear RGB interpolation toward `other`; `t = 0` keeps `self`.
    pub fn mix(self, other: AppColor, t: f64) -> Self {
        let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round().clamp(0.0, 255.0) as u8;
        Self {
            r: lerp(self.r, other.r),
            g: lerp(self.g, other.g),
            b: lerp(self.b, other.b),
        }
    }

    /// Create a lighter version by blending toward white.
    pub fn lighten(self, amount: f64) -> Self {
        self.mix(Self::WHITE, amount)
    }

    pub fn to_css(self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Twelve hues in light/dark pairs.
pub const PAIRED: [AppColor; 12] = [
    AppColor::from_hex(0xa6cee3),
    AppColor::from_hex(0x1f78b4),
    AppColor::from_hex(0xb2df8a),
    AppColor::from_hex(0x33a02c),
    AppColor::from_hex(0xfb9a99),
    AppColor::from_hex(0xe31a1c),
    AppColor::from_hex(0xfdbf6f),
    AppColor::from_hex(0xff7f00),
    AppColor::from_hex(0xcab2d6),
    AppColor::from_hex(0x6a3d9a),
    AppColor::from_hex(0xffff99),
    AppColor::from_hex(0xb15928),
];

/// How far each palette hue is pulled toward white.
pub const FADE: f64 = 0.2;

/// Ordinal category → color mapping.
///
/// Keys receive palette entries in the order they are first seen, wrapping
/// around once the palette is exhausted. One instance is shared by the
/// treemap and the legend so both agree on every category.
#[derive(Debug, Clone)]
pub struct ColorScale {
    range: Vec<AppColor>,
    domain: Vec<CompactString>,
    index: HashMap<CompactString, usize>,
}

impl ColorScale {
    pub fn new(range: Vec<AppColor>) -> Self {
        Self {
            range,
            domain: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// The paired palette, faded toward white.
    pub fn paired() -> Self {
        Self::new(PAIRED.iter().map(|c| c.lighten(FADE)).collect())
    }

    /// Color for `key`, assigning the next palette slot on first sight.
    pub fn color(&mut self, key: &str) -> AppColor {
        if let Some(color) = self.get(key) {
            return color;
        }
        let slot = self.domain.len();
        let key = CompactString::new(key);
        self.index.insert(key.clone(), slot);
        self.domain.push(key);
        self.slot_color(slot)
    }

    /// Color for an already assigned key.
    pub fn get(&self, key: &str) -> Option<AppColor> {
        self.index.get(key).map(|&slot| self.slot_color(slot))
    }

    /// Assign slots for `keys` in order without looking the colors up.
    pub fn seed<'a>(&mut self, keys: impl IntoIterator<Item = &'a str>) {
        for key in keys {
            self.color(key);
        }
    }

    /// Keys in assignment order.
    pub fn domain(&self) -> &[CompactString] {
        &self.domain
    }

    fn slot_color(&self, slot: usize) -> AppColor {
        if self.range.is_empty() {
            return AppColor::GREY;
        }
        self.range[slot % self.range.len()]
    }
}

impl Default for ColorScale {
    fn default() -> Self {
        Self::paired()
    }
}
