//! Colors for chart series.
//!
//! A [`CategoryPalette`] hands out a color the first time it sees a category and returns the same
//! color for that category every time after. It is owned by whoever draws charts and passed into
//! [`chart_series`](crate::engine::chart_series), so the aggregation itself stays free of hidden
//! state.

use crate::model::Category;
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::fmt::{Display, Formatter};

/// An RGB color.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Mixes the color toward black. `percent` is clamped to 100.
    fn darken(self, percent: u32) -> Self {
        let keep = 100 - percent.min(100);
        let scale = |c: u8| (u32::from(c) * keep / 100) as u8;
        Self::new(scale(self.r), scale(self.g), scale(self.b))
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// The base colors, handed out in order.
const BASE_COLORS: [Color; 10] = [
    Color::new(75, 192, 192),
    Color::new(255, 99, 132),
    Color::new(54, 162, 235),
    Color::new(255, 206, 86),
    Color::new(153, 102, 255),
    Color::new(255, 159, 64),
    Color::new(46, 204, 113),
    Color::new(231, 76, 60),
    Color::new(149, 165, 166),
    Color::new(52, 73, 94),
];

/// How much darker each pass through `BASE_COLORS` gets.
const DARKEN_STEP: u32 = 20;

/// Number of shades per base color before the shades repeat.
const SHADES: u32 = 4;

/// The color used for a series that is not tied to a category.
pub const TOTAL_COLOR: Color = BASE_COLORS[0];

/// Append-only mapping of category to color.
#[derive(Debug, Clone, Default)]
pub struct CategoryPalette {
    assigned: HashMap<Category, Color>,
}

impl CategoryPalette {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the color for `category`, assigning the next free one on first encounter.
    pub fn color_for(&mut self, category: &Category) -> Color {
        if let Some(color) = self.assigned.get(category) {
            return *color;
        }
        let color = nth_color(self.assigned.len());
        self.assigned.insert(category.clone(), color);
        color
    }

    /// Returns the color for `category` if it already has one.
    pub fn get(&self, category: &Category) -> Option<Color> {
        self.assigned.get(category).copied()
    }

    pub fn len(&self) -> usize {
        self.assigned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty()
    }
}

fn nth_color(n: usize) -> Color {
    let base = BASE_COLORS[n % BASE_COLORS.len()];
    let shade = (n / BASE_COLORS.len()) as u32 % SHADES;
    base.darken(shade * DARKEN_STEP)
}
