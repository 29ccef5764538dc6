//! Color Contrast
//!
//! CSS color parsing and WCAG contrast math.

use crate::view::{DomView, composed_parent_element};
use fos_dom::NodeId;

/// sRGB color with alpha
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const TRANSPARENT: Color = Color {
        r: 0,
        g: 0,
        b: 0,
        a: 0.0,
    };

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Parse a CSS color value
    ///
    /// Supports hex (`#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`), `rgb()`,
    /// `rgba()`, `transparent`, and the basic named colors.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim().to_ascii_lowercase();
        if let Some(hex) = value.strip_prefix('#') {
            return Self::parse_hex(hex);
        }
        if let Some(args) = value
            .strip_prefix("rgba(")
            .or_else(|| value.strip_prefix("rgb("))
        {
            return Self::parse_rgb_args(args.strip_suffix(')')?);
        }
        Self::named(&value)
    }

    fn parse_hex(hex: &str) -> Option<Self> {
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let digit = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|d| d * 17);
        let pair = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        match hex.len() {
            3 | 4 => {
                let a = match hex.len() {
                    4 => digit(3)? as f64 / 255.0,
                    _ => 1.0,
                };
                Some(Self {
                    r: digit(0)?,
                    g: digit(1)?,
                    b: digit(2)?,
                    a,
                })
            }
            6 | 8 => {
                let a = match hex.len() {
                    8 => pair(6)? as f64 / 255.0,
                    _ => 1.0,
                };
                Some(Self {
                    r: pair(0)?,
                    g: pair(2)?,
                    b: pair(4)?,
                    a,
                })
            }
            _ => None,
        }
    }

    fn parse_rgb_args(args: &str) -> Option<Self> {
        let parts: Vec<&str> = args
            .split(|c: char| c == ',' || c == '/' || c.is_whitespace())
            .filter(|p| !p.is_empty())
            .collect();
        if parts.len() != 3 && parts.len() != 4 {
            return None;
        }
        let channel = |s: &str| -> Option<u8> {
            let v = match s.strip_suffix('%') {
                Some(pct) => pct.parse::<f64>().ok()? * 2.55,
                None => s.parse::<f64>().ok()?,
            };
            Some(v.round().clamp(0.0, 255.0) as u8)
        };
        let a = match parts.get(3) {
            Some(s) => match s.strip_suffix('%') {
                Some(pct) => pct.parse::<f64>().ok()? / 100.0,
                None => s.parse::<f64>().ok()?,
            },
            None => 1.0,
        };
        Some(Self {
            r: channel(parts[0])?,
            g: channel(parts[1])?,
            b: channel(parts[2])?,
            a: a.clamp(0.0, 1.0),
        })
    }

    fn named(name: &str) -> Option<Self> {
        Some(match name {
            "transparent" => Self::TRANSPARENT,
            "black" => Self::BLACK,
            "white" => Self::WHITE,
            "red" => Self::rgb(255, 0, 0),
            "green" => Self::rgb(0, 128, 0),
            "lime" => Self::rgb(0, 255, 0),
            "blue" => Self::rgb(0, 0, 255),
            "yellow" => Self::rgb(255, 255, 0),
            "orange" => Self::rgb(255, 165, 0),
            "purple" => Self::rgb(128, 0, 128),
            "gray" | "grey" => Self::rgb(128, 128, 128),
            "silver" => Self::rgb(192, 192, 192),
            "lightgray" | "lightgrey" => Self::rgb(211, 211, 211),
            "darkgray" | "darkgrey" => Self::rgb(169, 169, 169),
            "navy" => Self::rgb(0, 0, 128),
            "teal" => Self::rgb(0, 128, 128),
            "maroon" => Self::rgb(128, 0, 0),
            "olive" => Self::rgb(128, 128, 0),
            "aqua" | "cyan" => Self::rgb(0, 255, 255),
            "fuchsia" | "magenta" => Self::rgb(255, 0, 255),
            _ => return None,
        })
    }

    /// Composite this color over an opaque backdrop
    pub fn over(self, backdrop: Color) -> Color {
        if self.a >= 1.0 {
            return self;
        }
        let mix = |fg: u8, bg: u8| (fg as f64 * self.a + bg as f64 * (1.0 - self.a)).round() as u8;
        Color::rgb(
            mix(self.r, backdrop.r),
            mix(self.g, backdrop.g),
            mix(self.b, backdrop.b),
        )
    }

    /// Relative luminance
    pub fn luminance(&self) -> f64 {
        ContrastChecker::luminance(self.r, self.g, self.b)
    }
}

/// Contrast checker
#[derive(Debug)]
pub struct ContrastChecker;

impl ContrastChecker {
    /// Calculate relative luminance
    pub fn luminance(r: u8, g: u8, b: u8) -> f64 {
        fn channel(c: u8) -> f64 {
            let c = c as f64 / 255.0;
            if c <= 0.03928 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        0.2126 * channel(r) + 0.7152 * channel(g) + 0.0722 * channel(b)
    }

    /// Calculate contrast ratio between two luminances
    pub fn contrast_ratio(l1: f64, l2: f64) -> f64 {
        let (lighter, darker) = if l1 > l2 { (l1, l2) } else { (l2, l1) };
        (lighter + 0.05) / (darker + 0.05)
    }

    /// Contrast ratio between two opaque colors
    pub fn ratio_between(fg: Color, bg: Color) -> f64 {
        Self::contrast_ratio(fg.luminance(), bg.luminance())
    }
}

/// Effective background of an element
///
/// Walks composed ancestors, stacking translucent backgrounds until an
/// opaque one is found. The canvas is white.
pub fn resolve_background(dom: &dyn DomView, element: NodeId) -> Color {
    let mut layers = Vec::new();
    let mut current = Some(element);
    while let Some(node) = current {
        let background = dom.computed_style(node, "background-color");
        if let Some(color) = background.and_then(|v| Color::parse(&v)) {
            if color.a >= 1.0 {
                return composite(color, layers);
            }
            if color.a > 0.0 {
                layers.push(color);
            }
        }
        current = composed_parent_element(dom, node);
    }
    composite(Color::WHITE, layers)
}

/// Paint `layers`, innermost first, over an opaque base
fn composite(base: Color, layers: Vec<Color>) -> Color {
    layers
        .into_iter()
        .rev()
        .fold(base, |bg, layer| layer.over(bg))
}

/// Check if the element's text counts as large for contrast purposes
///
/// Large is 24px and up, or 18.66px and up when bold.
pub fn is_large_text(dom: &dyn DomView, element: NodeId) -> bool {
    let size = dom
        .computed_style(element, "font-size")
        .and_then(|v| font_size_px(&v))
        .unwrap_or(16.0);
    let bold = dom.computed_style(element, "font-weight").is_some_and(|w| {
        matches!(w.as_str(), "bold" | "bolder") || w.parse::<u32>().is_ok_and(|n| n >= 700)
    });
    size >= 24.0 || (bold && size >= 18.66)
}

fn font_size_px(value: &str) -> Option<f64> {
    let value = value.trim();
    if let Some(px) = value.strip_suffix("px") {
        return px.trim().parse().ok();
    }
    if let Some(pt) = value.strip_suffix("pt") {
        return pt.trim().parse::<f64>().ok().map(|v| v * 4.0 / 3.0);
    }
    if let Some(em) = value
        .strip_suffix("rem")
        .or_else(|| value.strip_suffix("em"))
    {
        return em.trim().parse::<f64>().ok().map(|v| v * 16.0);
    }
    None
}
