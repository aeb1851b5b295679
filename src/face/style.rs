/*
 *  face/style.rs
 *
 *  clockface - analog clock face widget
 *  (c) 2020-26 Stuart Hunter
 *
 *  Style attributes and their resolution to a clock style
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use std::collections::HashMap;

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
use log::warn;
use serde::{Deserialize, Serialize};

/// Attribute names, snake_case with their camelCase aliases.
pub mod attr {
    pub const SHAPE: &str = "shape";
    pub const HAS_NUMBERS: &str = "has_numbers";
    pub const HAS_SECONDS: &str = "has_seconds";
    pub const DIAL_COLOR: &str = "dial_color";
    pub const MAIN_COLOR: &str = "main_color";
    pub const SECOND_HAND_COLOR: &str = "second_hand_color";

    pub(crate) static ALIASES: [(&str, &str); 6] = [
        (HAS_NUMBERS, "hasNumbers"),
        (HAS_SECONDS, "hasSeconds"),
        (DIAL_COLOR, "dialColor"),
        (DIAL_COLOR, "backgroundColor"),
        (MAIN_COLOR, "mainColor"),
        (SECOND_HAND_COLOR, "secondHandColor"),
    ];

    pub(crate) fn aliases_of(name: &str) -> impl Iterator<Item = &'static str> + '_ {
        ALIASES.iter().filter(move |(n, _)| *n == name).map(|(_, a)| *a)
    }
}

/// Background shape behind the dial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Shape {
    #[default]
    Round,
    Square,
}

impl Shape {
    /// Integer key as used by styled attributes: 0 = round, 1 = square.
    pub fn from_key(key: i64) -> Option<Self> {
        match key {
            0 => Some(Shape::Round),
            1 => Some(Shape::Square),
            _ => None,
        }
    }
}

/// A raw, untyped attribute value.
///
/// Deserialisation never fails on shape: anything that is not a scalar lands
/// in `Other` and later resolves to the attribute's default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Other(serde_yaml::Value),
}

impl From<bool> for AttrValue {
    fn from(v: bool) -> Self { AttrValue::Bool(v) }
}

impl From<i64> for AttrValue {
    fn from(v: i64) -> Self { AttrValue::Int(v) }
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> Self { AttrValue::Text(v.to_string()) }
}

impl From<String> for AttrValue {
    fn from(v: String) -> Self { AttrValue::Text(v) }
}

impl AttrValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttrValue::Bool(b) => Some(*b),
            AttrValue::Int(0) => Some(false),
            AttrValue::Int(1) => Some(true),
            AttrValue::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn as_shape(&self) -> Option<Shape> {
        match self {
            AttrValue::Int(k) => Shape::from_key(*k),
            AttrValue::Text(s) => {
                let s = s.trim().to_ascii_lowercase();
                match s.as_str() {
                    "round" => Some(Shape::Round),
                    "square" => Some(Shape::Square),
                    _ => s.parse::<i64>().ok().and_then(Shape::from_key),
                }
            }
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<Rgb888> {
        match self {
            AttrValue::Int(v) => argb_int(*v).map(rgb_from_u32),
            AttrValue::Text(s) => parse_color(s),
            _ => None,
        }
    }
}

/// Accepts unsigned `0xAARRGGBB` values as well as the signed 32-bit form
/// (e.g. -65536 for opaque red).
fn argb_int(v: i64) -> Option<u32> {
    if (0..=u32::MAX as i64).contains(&v) {
        Some(v as u32)
    } else if (i32::MIN as i64..0).contains(&v) {
        Some(v as i32 as u32)
    } else {
        None
    }
}

fn rgb_from_u32(v: u32) -> Rgb888 {
    Rgb888::new((v >> 16) as u8, (v >> 8) as u8, v as u8)
}

/// Parse `#RGB`, `#RRGGBB`, `#AARRGGBB`, `0x...` or a colour name.
/// Alpha is dropped.
pub fn parse_color(s: &str) -> Option<Rgb888> {
    let s = s.trim();
    let hex = s
        .strip_prefix('#')
        .or_else(|| s.strip_prefix("0x"))
        .or_else(|| s.strip_prefix("0X"));

    if let Some(hex) = hex {
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        return match hex.len() {
            3 => {
                let v = u32::from_str_radix(hex, 16).ok()?;
                let (r, g, b) = ((v >> 8) & 0xf, (v >> 4) & 0xf, v & 0xf);
                Some(Rgb888::new((r * 17) as u8, (g * 17) as u8, (b * 17) as u8))
            }
            6 | 8 => u32::from_str_radix(hex, 16).ok().map(rgb_from_u32),
            _ => None,
        };
    }

    let c = match s.to_ascii_lowercase().as_str() {
        "white" => Rgb888::WHITE,
        "black" | "transparent" => Rgb888::BLACK,
        "red" => Rgb888::RED,
        "green" => Rgb888::GREEN,
        "blue" => Rgb888::BLUE,
        "yellow" => Rgb888::YELLOW,
        "cyan" => Rgb888::CYAN,
        "magenta" => Rgb888::MAGENTA,
        "gray" | "grey" => Rgb888::new(0x88, 0x88, 0x88),
        "lightgray" | "lightgrey" => Rgb888::new(0xcc, 0xcc, 0xcc),
        "darkgray" | "darkgrey" => Rgb888::new(0x44, 0x44, 0x44),
        _ => return None,
    };
    Some(c)
}

/// Lookup of styled attributes by name.
pub trait AttributeSource {
    fn attribute(&self, name: &str) -> Option<&AttrValue>;
}

impl AttributeSource for HashMap<String, AttrValue> {
    fn attribute(&self, name: &str) -> Option<&AttrValue> {
        self.get(name)
            .or_else(|| attr::aliases_of(name).find_map(|a| self.get(a)))
    }
}

/// Styled attributes as they arrive from YAML or the command line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<AttrValue>,
    #[serde(default, alias = "hasNumbers", skip_serializing_if = "Option::is_none")]
    pub has_numbers: Option<AttrValue>,
    #[serde(default, alias = "hasSeconds", skip_serializing_if = "Option::is_none")]
    pub has_seconds: Option<AttrValue>,
    #[serde(default, alias = "dialColor", alias = "backgroundColor", skip_serializing_if = "Option::is_none")]
    pub dial_color: Option<AttrValue>,
    #[serde(default, alias = "mainColor", skip_serializing_if = "Option::is_none")]
    pub main_color: Option<AttrValue>,
    #[serde(default, alias = "secondHandColor", skip_serializing_if = "Option::is_none")]
    pub second_hand_color: Option<AttrValue>,
}

impl StyleAttributes {
    /// Overlay every attribute `src` sets.
    pub fn merge(&mut self, src: StyleAttributes) {
        if src.shape.is_some()             { self.shape = src.shape; }
        if src.has_numbers.is_some()       { self.has_numbers = src.has_numbers; }
        if src.has_seconds.is_some()       { self.has_seconds = src.has_seconds; }
        if src.dial_color.is_some()        { self.dial_color = src.dial_color; }
        if src.main_color.is_some()        { self.main_color = src.main_color; }
        if src.second_hand_color.is_some() { self.second_hand_color = src.second_hand_color; }
    }
}

impl AttributeSource for StyleAttributes {
    fn attribute(&self, name: &str) -> Option<&AttrValue> {
        match name {
            attr::SHAPE => self.shape.as_ref(),
            attr::HAS_NUMBERS => self.has_numbers.as_ref(),
            attr::HAS_SECONDS => self.has_seconds.as_ref(),
            attr::DIAL_COLOR => self.dial_color.as_ref(),
            attr::MAIN_COLOR => self.main_color.as_ref(),
            attr::SECOND_HAND_COLOR => self.second_hand_color.as_ref(),
            _ => None,
        }
    }
}

/// Resolved, immutable clock style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockStyle {
    pub shape: Shape,
    pub has_numbers: bool,
    pub has_seconds: bool,
    pub dial_color: Rgb888,
    pub main_color: Rgb888,
    pub second_hand_color: Rgb888,
}

impl Default for ClockStyle {
    fn default() -> Self {
        Self {
            shape: Shape::Round,
            has_numbers: false,
            has_seconds: false,
            dial_color: Rgb888::WHITE,
            main_color: Rgb888::BLACK,
            second_hand_color: Rgb888::RED,
        }
    }
}

impl ClockStyle {
    /// Resolve every attribute, falling back to the default for anything
    /// missing or unusable. Never fails.
    pub fn from_attributes<A: AttributeSource + ?Sized>(attrs: &A) -> Self {
        let d = Self::default();
        Self {
            shape: resolve(attrs, attr::SHAPE, AttrValue::as_shape, d.shape),
            has_numbers: resolve(attrs, attr::HAS_NUMBERS, AttrValue::as_bool, d.has_numbers),
            has_seconds: resolve(attrs, attr::HAS_SECONDS, AttrValue::as_bool, d.has_seconds),
            dial_color: resolve(attrs, attr::DIAL_COLOR, AttrValue::as_color, d.dial_color),
            main_color: resolve(attrs, attr::MAIN_COLOR, AttrValue::as_color, d.main_color),
            second_hand_color: resolve(
                attrs,
                attr::SECOND_HAND_COLOR,
                AttrValue::as_color,
                d.second_hand_color,
            ),
        }
    }
}

fn resolve<A, T, F>(attrs: &A, name: &str, convert: F, default: T) -> T
where
    A: AttributeSource + ?Sized,
    T: std::fmt::Debug,
    F: Fn(&AttrValue) -> Option<T>,
{
    match attrs.attribute(name) {
        None => default,
        Some(v) => convert(v).unwrap_or_else(|| {
            warn!("{}: unusable value {:?}, using {:?}", name, v, default);
            default
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_nothing_set() {
        let style = ClockStyle::from_attributes(&StyleAttributes::default());
        assert_eq!(style.shape, Shape::Round);
        assert!(!style.has_numbers);
        assert!(!style.has_seconds);
        assert_eq!(style.dial_color, Rgb888::WHITE);
        assert_eq!(style.main_color, Rgb888::BLACK);
        assert_eq!(style.second_hand_color, Rgb888::RED);
        assert_eq!(style, ClockStyle::default());
    }

    #[test]
    fn test_shape_keys() {
        assert_eq!(AttrValue::Int(0).as_shape(), Some(Shape::Round));
        assert_eq!(AttrValue::Int(1).as_shape(), Some(Shape::Square));
        assert_eq!(AttrValue::Int(7).as_shape(), None);
        assert_eq!(AttrValue::from("Square").as_shape(), Some(Shape::Square));
        assert_eq!(AttrValue::from("1").as_shape(), Some(Shape::Square));

        let attrs = StyleAttributes { shape: Some(AttrValue::Int(42)), ..Default::default() };
        assert_eq!(ClockStyle::from_attributes(&attrs).shape, Shape::Round);
    }

    #[test]
    fn test_color_forms() {
        assert_eq!(parse_color("#fff"), Some(Rgb888::WHITE));
        assert_eq!(parse_color("#102030"), Some(Rgb888::new(0x10, 0x20, 0x30)));
        assert_eq!(parse_color("#80ff0000"), Some(Rgb888::RED));
        assert_eq!(parse_color("0x00ff00"), Some(Rgb888::GREEN));
        assert_eq!(parse_color("Blue"), Some(Rgb888::BLUE));
        assert_eq!(parse_color("#12345"), None);
        assert_eq!(parse_color("#gggggg"), None);
        assert_eq!(parse_color("chartreuse-ish"), None);

        assert_eq!(AttrValue::Int(0xffff0000).as_color(), Some(Rgb888::RED));
        assert_eq!(AttrValue::Int(-65536).as_color(), Some(Rgb888::RED));
        assert_eq!(AttrValue::Int(1 << 40).as_color(), None);
        assert_eq!(AttrValue::Bool(true).as_color(), None);
    }

    #[test]
    fn test_bool_forms() {
        assert_eq!(AttrValue::Bool(true).as_bool(), Some(true));
        assert_eq!(AttrValue::Int(0).as_bool(), Some(false));
        assert_eq!(AttrValue::from("TRUE").as_bool(), Some(true));
        assert_eq!(AttrValue::Int(2).as_bool(), None);
        assert_eq!(AttrValue::Float(1.0).as_bool(), None);
    }

    #[test]
    fn test_invalid_values_fall_back_per_attribute() {
        let attrs = StyleAttributes {
            shape: Some(AttrValue::Int(1)),
            has_numbers: Some(AttrValue::from("perhaps")),
            has_seconds: Some(AttrValue::Bool(true)),
            dial_color: Some(AttrValue::from("not a colour")),
            main_color: Some(AttrValue::from("#00f")),
            second_hand_color: Some(AttrValue::Float(3.5)),
        };
        let style = ClockStyle::from_attributes(&attrs);
        assert_eq!(style.shape, Shape::Square);
        assert!(!style.has_numbers);
        assert!(style.has_seconds);
        assert_eq!(style.dial_color, Rgb888::WHITE);
        assert_eq!(style.main_color, Rgb888::BLUE);
        assert_eq!(style.second_hand_color, Rgb888::RED);
    }

    #[test]
    fn test_yaml_is_lenient() {
        let yaml = r##"
shape: 1
hasNumbers: true
has_seconds: [1, 2]
dialColor: "#000000"
main_color: 0xffffffff
"##;
        let attrs: StyleAttributes = serde_yaml::from_str(yaml).unwrap();
        let style = ClockStyle::from_attributes(&attrs);
        assert_eq!(style.shape, Shape::Square);
        assert!(style.has_numbers);
        assert!(!style.has_seconds);
        assert_eq!(style.dial_color, Rgb888::BLACK);
        assert_eq!(style.main_color, Rgb888::WHITE);
    }

    #[test]
    fn test_map_source_with_aliases() {
        let mut map: HashMap<String, AttrValue> = HashMap::new();
        map.insert("hasSeconds".into(), AttrValue::Bool(true));
        map.insert("main_color".into(), AttrValue::from("red"));
        let style = ClockStyle::from_attributes(&map);
        assert!(style.has_seconds);
        assert_eq!(style.main_color, Rgb888::RED);
    }

    #[test]
    fn test_background_color_names_the_dial() {
        let mut map: HashMap<String, AttrValue> = HashMap::new();
        map.insert("backgroundColor".into(), AttrValue::from("#0000ff"));
        assert_eq!(ClockStyle::from_attributes(&map).dial_color, Rgb888::BLUE);

        // the canonical key wins over the alias
        map.insert("dial_color".into(), AttrValue::from("green"));
        assert_eq!(ClockStyle::from_attributes(&map).dial_color, Rgb888::GREEN);

        let attrs: StyleAttributes = serde_yaml::from_str("backgroundColor: yellow\n").unwrap();
        assert_eq!(attrs.dial_color, Some(AttrValue::from("yellow")));
        assert_eq!(ClockStyle::from_attributes(&attrs).dial_color, Rgb888::YELLOW);
    }

    #[test]
    fn test_merge_overlays_only_set_values() {
        let mut base = StyleAttributes {
            shape: Some(AttrValue::Int(1)),
            has_numbers: Some(AttrValue::Bool(true)),
            ..Default::default()
        };
        base.merge(StyleAttributes {
            has_numbers: Some(AttrValue::Bool(false)),
            ..Default::default()
        });
        assert_eq!(base.shape, Some(AttrValue::Int(1)));
        assert_eq!(base.has_numbers, Some(AttrValue::Bool(false)));
    }
}
