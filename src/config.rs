use std::path::Path;
use std::time::{Duration, Instant};

use serde::Deserialize;

use crate::clock::TimeWindow;
use crate::color::{ColorStop, Rgb};
use crate::error::Result;
use crate::order::FillMode;

pub const DEFAULT_DURATION_SECS: u64 = 60;
pub const DEFAULT_INTERVAL_MS: u64 = 100;
pub const DEFAULT_START_COLOR: &str = "#2c3e50";
pub const DEFAULT_END_COLOR: &str = "#e57373";

/// A timer descriptor, as re-hydrated from the timer-record service.
///
/// `elapsed_secs = 0` means the window opens now (elapsed-timer
/// semantics); a positive value back-dates the start so a stored timer
/// resumes mid-fill.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TimerConfig {
    /// Display title shown on snapshots.
    pub title: Option<String>,
    /// Total window length in seconds.
    pub duration_secs: u64,
    /// Seconds already elapsed when the session is built.
    pub elapsed_secs: u64,
    /// Fill pattern: random, linear, solid, spiral, wave, checkerboard.
    pub fill_mode: String,
    /// Surface colors, `#RRGGBB`.
    pub start_color: String,
    pub end_color: String,
    /// Frame interval for the preview loop in milliseconds.
    pub interval_ms: u64,
}

impl Default for TimerConfig {
    fn default() -> Self {
        TimerConfig {
            title: None,
            duration_secs: DEFAULT_DURATION_SECS,
            elapsed_secs: 0,
            fill_mode: FillMode::default().as_ref().to_string(),
            start_color: DEFAULT_START_COLOR.to_string(),
            end_color: DEFAULT_END_COLOR.to_string(),
            interval_ms: DEFAULT_INTERVAL_MS,
        }
    }
}

impl TimerConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    /// The wall-clock window this descriptor describes, anchored at `now`.
    pub fn window(&self, now: Instant) -> Result<TimeWindow> {
        TimeWindow::starting_at(
            now,
            Duration::from_secs(self.elapsed_secs),
            Duration::from_secs(self.duration_secs),
        )
    }

    pub fn colors(&self) -> Result<ColorStop> {
        Ok(ColorStop {
            start: Rgb::parse_hex(&self.start_color)?,
            end: Rgb::parse_hex(&self.end_color)?,
        })
    }

    /// Unknown mode strings fall back to the default pattern.
    pub fn mode(&self) -> FillMode {
        self.fill_mode.parse().unwrap_or_default()
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_config_defaults() -> crate::error::Result<()> {
        let cfg = TimerConfig::default();
        assert_eq!(cfg.title, None);
        assert_eq!(cfg.duration_secs, 60);
        assert_eq!(cfg.elapsed_secs, 0);
        assert_eq!(cfg.mode(), FillMode::Random);
        assert_eq!(cfg.start_color, "#2c3e50");
        assert_eq!(cfg.end_color, "#e57373");
        assert_eq!(cfg.interval(), Duration::from_millis(100));
        Ok(())
    }

    #[test]
    fn test_config_parse_toml() -> crate::error::Result<()> {
        let toml_str = r##"
title = "Launch countdown"
duration_secs = 600
fill_mode = "spiral"
start_color = "#000000"
end_color = "#ff8800"
"##;
        let cfg: TimerConfig = toml::from_str(toml_str)?;
        assert_eq!(cfg.title.as_deref(), Some("Launch countdown"));
        assert_eq!(cfg.duration_secs, 600);
        assert_eq!(cfg.mode(), FillMode::Spiral);
        assert_eq!(
            cfg.colors()?,
            ColorStop {
                start: Rgb { r: 0, g: 0, b: 0 },
                end: Rgb {
                    r: 255,
                    g: 136,
                    b: 0
                }
            }
        );
        // defaults fill whatever the descriptor omits
        assert_eq!(cfg.elapsed_secs, 0);
        assert_eq!(cfg.interval_ms, DEFAULT_INTERVAL_MS);
        Ok(())
    }

    #[test]
    fn test_unknown_fill_mode_falls_back() -> crate::error::Result<()> {
        let cfg: TimerConfig = toml::from_str(r#"fill_mode = "diagonal""#)?;
        assert_eq!(cfg.mode(), FillMode::Random);
        Ok(())
    }

    #[test]
    fn test_bad_color_surfaces_at_parse() -> crate::error::Result<()> {
        let cfg: TimerConfig = toml::from_str(r#"start_color = "red""#)?;
        assert!(matches!(cfg.colors(), Err(Error::InvalidColorFormat(_))));
        Ok(())
    }

    #[test]
    fn test_zero_duration_is_invalid_window() -> crate::error::Result<()> {
        let cfg: TimerConfig = toml::from_str("duration_secs = 0")?;
        assert!(matches!(
            cfg.window(Instant::now()),
            Err(Error::InvalidWindow)
        ));
        Ok(())
    }

    #[test]
    fn test_elapsed_backdates_window() -> crate::error::Result<()> {
        let cfg: TimerConfig = toml::from_str("duration_secs = 10\nelapsed_secs = 5")?;
        let now = Instant::now();
        let window = cfg.window(now)?;
        assert_eq!(window.evaluate(now).progress, 0.5);
        Ok(())
    }
}
