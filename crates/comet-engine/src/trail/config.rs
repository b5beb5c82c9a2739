use crate::paint::Color;

use super::error::ConfigError;
use super::mesh::RibbonStyle;

/// Static trail configuration, set once per trail instance.
#[derive(Debug, Clone, PartialEq)]
pub struct TrailConfig {
    /// Seconds an interpolated point stays alive.
    pub life_time: f32,

    /// Ribbon width in world units.
    pub width: f32,

    /// Uniform vertex color (premultiplied).
    pub color: Color,

    /// Minimum distance the tracked object must travel before a new control
    /// point is sampled.
    pub min_control_distance: f32,

    /// Fade vertex opacity towards the oldest end of the ribbon.
    pub fade_tail: bool,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            life_time: 0.13,
            width: 0.5,
            color: Color::white(),
            min_control_distance: 0.1,
            fade_tail: false,
        }
    }
}

impl TrailConfig {
    #[inline]
    pub fn with_life_time(mut self, life_time: f32) -> Self {
        self.life_time = life_time;
        self
    }

    #[inline]
    pub fn with_width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    #[inline]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    #[inline]
    pub fn with_min_control_distance(mut self, distance: f32) -> Self {
        self.min_control_distance = distance;
        self
    }

    #[inline]
    pub fn with_fade_tail(mut self, fade: bool) -> Self {
        self.fade_tail = fade;
        self
    }

    /// Checks every field; the first offending one is reported.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.life_time.is_finite() && self.life_time > 0.0) {
            return Err(ConfigError::InvalidLifeTime(self.life_time));
        }
        if !(self.width.is_finite() && self.width >= 0.0) {
            return Err(ConfigError::InvalidWidth(self.width));
        }
        if !(self.min_control_distance.is_finite() && self.min_control_distance > 0.0) {
            return Err(ConfigError::InvalidMinControlDistance(self.min_control_distance));
        }
        if !self.color.is_finite() {
            return Err(ConfigError::NonFiniteColor);
        }
        Ok(())
    }

    /// Mesher-facing subset of the configuration.
    #[inline]
    pub fn style(&self) -> RibbonStyle {
        RibbonStyle {
            width: self.width,
            color: self.color,
            fade_tail: self.fade_tail,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = TrailConfig::default();
        assert_eq!(cfg.validate(), Ok(()));
        assert_eq!(cfg.life_time, 0.13);
        assert_eq!(cfg.min_control_distance, 0.1);
        assert_eq!(cfg.width, 0.5);
    }

    #[test]
    fn rejects_non_positive_life_time() {
        let cfg = TrailConfig::default().with_life_time(0.0);
        assert_eq!(cfg.validate(), Err(ConfigError::InvalidLifeTime(0.0)));

        let cfg = TrailConfig::default().with_life_time(f32::INFINITY);
        assert!(matches!(cfg.validate(), Err(ConfigError::InvalidLifeTime(_))));
    }

    #[test]
    fn zero_width_is_allowed_negative_is_not() {
        assert_eq!(TrailConfig::default().with_width(0.0).validate(), Ok(()));
        assert_eq!(
            TrailConfig::default().with_width(-1.0).validate(),
            Err(ConfigError::InvalidWidth(-1.0))
        );
    }

    #[test]
    fn rejects_nan_distance_and_color() {
        let cfg = TrailConfig::default().with_min_control_distance(f32::NAN);
        assert!(matches!(cfg.validate(), Err(ConfigError::InvalidMinControlDistance(_))));

        let cfg = TrailConfig::default().with_color(Color::from_premul(f32::NAN, 0.0, 0.0, 1.0));
        assert_eq!(cfg.validate(), Err(ConfigError::NonFiniteColor));
    }

    #[test]
    fn style_mirrors_config() {
        let cfg = TrailConfig::default().with_width(2.0).with_fade_tail(true);
        let style = cfg.style();
        assert_eq!(style.width, 2.0);
        assert_eq!(style.color, Color::white());
        assert!(style.fade_tail);
    }

    #[test]
    fn error_messages_name_the_field() {
        let msg = ConfigError::InvalidLifeTime(-1.0).to_string();
        assert!(msg.contains("life_time"));
    }
}
