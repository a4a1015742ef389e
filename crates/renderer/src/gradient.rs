//! Color ramp over the normalized value range.

use pressure_common::{Color, MapConfig, MapError, MapResult};

/// Lower end of the normalized domain.
pub const DOMAIN_MIN: f64 = 0.0;

/// Upper end of the normalized domain.
pub const DOMAIN_MAX: f64 = 100.0;

/// Two or three colors spread evenly over [0, 100].
///
/// With three stops the middle color sits at 50.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorGradient {
    stops: Vec<Color>,
}

impl ColorGradient {
    pub fn new(stops: Vec<Color>) -> MapResult<Self> {
        if !(2..=3).contains(&stops.len()) {
            return Err(MapError::InvalidConfig(format!(
                "gradient needs 2 or 3 stops, got {}",
                stops.len()
            )));
        }
        Ok(Self { stops })
    }

    /// Parse stops from hex strings such as `"#00FF00"`.
    pub fn from_hex(stops: &[&str]) -> MapResult<Self> {
        let colors = stops
            .iter()
            .map(|s| Color::from_hex(s))
            .collect::<MapResult<Vec<_>>>()?;
        Self::new(colors)
    }

    pub fn from_config(config: &MapConfig) -> MapResult<Self> {
        Self::new(config.gradient_stops.clone())
    }

    pub fn stops(&self) -> &[Color] {
        &self.stops
    }

    /// Color for `value`, clamped to [0, 100].
    ///
    /// Each RGB channel is interpolated independently within the segment the
    /// value falls in. Values on a stop return that stop exactly.
    pub fn color_at(&self, value: f64) -> Color {
        let value = if value.is_nan() {
            DOMAIN_MIN
        } else {
            value.clamp(DOMAIN_MIN, DOMAIN_MAX)
        };

        let segments = self.stops.len() - 1;
        let width = (DOMAIN_MAX - DOMAIN_MIN) / segments as f64;

        let index = (((value - DOMAIN_MIN) / width).floor() as usize).min(segments - 1);
        let start = DOMAIN_MIN + index as f64 * width;
        let t = (value - start) / width;

        self.stops[index].lerp(&self.stops[index + 1], t)
    }

    /// Hex string for `value`, as handed to the map host.
    pub fn hex_at(&self, value: f64) -> String {
        self.color_at(value).to_hex()
    }
}

impl Default for ColorGradient {
    /// Green for low pressure through red for high.
    fn default() -> Self {
        Self {
            stops: vec![Color::new(0, 255, 0), Color::new(255, 0, 0)],
        }
    }
}
