use std::fmt;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::color::HexColor;

pub const LAYER_COUNT_MIN: usize = 3;
pub const LAYER_COUNT_MAX: usize = 6;
pub const CENTER_PERCENT_MAX: u8 = 100;
pub const RADIUS_PERCENT_BASE: u8 = 50;
pub const RADIUS_PERCENT_SPAN: u8 = 100;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizingMode {
    #[default]
    Cover,
}

impl SizingMode {
    pub fn as_css(self) -> &'static str {
        match self {
            SizingMode::Cover => "cover",
        }
    }
}

/// One radial color stop fading from `color` at its center to transparent
/// at `radius_percent` of the gradient ray.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadialLayer {
    color: HexColor,
    center_x_percent: u8,
    center_y_percent: u8,
    radius_percent: u8,
}

impl RadialLayer {
    pub fn new(color: HexColor, center_x_percent: u8, center_y_percent: u8, radius_percent: u8) -> Self {
        Self {
            color,
            center_x_percent: center_x_percent.min(CENTER_PERCENT_MAX),
            center_y_percent: center_y_percent.min(CENTER_PERCENT_MAX),
            radius_percent,
        }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let color = HexColor::random(rng);
        let center_x_percent = rng.random_range(0..=CENTER_PERCENT_MAX);
        let center_y_percent = rng.random_range(0..=CENTER_PERCENT_MAX);
        let radius_percent = RADIUS_PERCENT_BASE + rng.random_range(0..RADIUS_PERCENT_SPAN);
        Self {
            color,
            center_x_percent,
            center_y_percent,
            radius_percent,
        }
    }

    pub fn color(&self) -> HexColor {
        self.color
    }

    pub fn center_x_percent(&self) -> u8 {
        self.center_x_percent
    }

    pub fn center_y_percent(&self) -> u8 {
        self.center_y_percent
    }

    pub fn radius_percent(&self) -> u8 {
        self.radius_percent
    }
}

impl fmt::Display for RadialLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "radial-gradient(circle at {}% {}%, {} 0%, transparent {}%)",
            self.center_x_percent, self.center_y_percent, self.color, self.radius_percent
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradientDescription {
    layers: Vec<RadialLayer>,
    #[serde(default)]
    sizing: SizingMode,
}

impl GradientDescription {
    pub fn new(layers: Vec<RadialLayer>) -> Self {
        Self {
            layers,
            sizing: SizingMode::Cover,
        }
    }

    /// Layers in CSS background order; the first one paints on top.
    pub fn layers(&self) -> &[RadialLayer] {
        &self.layers
    }

    pub fn sizing(&self) -> SizingMode {
        self.sizing
    }

    pub fn css_background(&self) -> String {
        let mut out = String::new();
        for (idx, layer) in self.layers.iter().enumerate() {
            if idx > 0 {
                out.push_str(", ");
            }
            out.push_str(&layer.to_string());
        }
        out
    }

    pub fn background_size(&self) -> &'static str {
        self.sizing.as_css()
    }

    pub fn css_declaration(&self) -> String {
        format!("background: {};", self.css_background())
    }

    /// Inline style for an element showing this gradient.
    pub fn inline_style(&self) -> String {
        format!(
            "background: {}; background-size: {};",
            self.css_background(),
            self.background_size()
        )
    }
}

pub fn generate_gradient<R: Rng + ?Sized>(rng: &mut R) -> GradientDescription {
    let count = rng.random_range(LAYER_COUNT_MIN..=LAYER_COUNT_MAX);
    let layers = (0..count).map(|_| RadialLayer::random(rng)).collect();
    GradientDescription::new(layers)
}

/// Session-owned random source for gradient generation.
#[derive(Clone, Debug)]
pub struct MeshGenerator {
    rng: SmallRng,
}

impl MeshGenerator {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn next_gradient(&mut self) -> GradientDescription {
        generate_gradient(&mut self.rng)
    }
}
