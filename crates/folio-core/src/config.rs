//! Site configuration, read from JSON. Every field has a default, so a partial file
//! (or none at all) is valid.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

use crate::errors::Result;
use crate::scroll::SpringFilterConfig;
use crate::visibility::Viewport;

pub const DEFAULT_TITLE: &str = "Kuldeep Prajapati | Web Developer & Problem Solver";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteConfig {
    pub title: String,
    pub viewport: ViewportConfig,
    pub progress_spring: SpringFilterConfig,
    pub typewriter: TypewriterConfig,
    pub contact: ContactConfig,
    pub navbar: NavbarConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            viewport: ViewportConfig::default(),
            progress_spring: SpringFilterConfig::default(),
            typewriter: TypewriterConfig::default(),
            contact: ContactConfig::default(),
            navbar: NavbarConfig::default(),
        }
    }
}

impl SiteConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let config: SiteConfig = serde_json::from_str(&raw)?;
        info!("Loaded site config from {}", path.display());
        Ok(config.sanitized())
    }

    /// Replaces values the runtime cannot work with by their defaults.
    fn sanitized(mut self) -> Self {
        let usable = |v: f32| v.is_finite() && v > 0.0;
        let viewport = self.viewport;
        if !usable(viewport.width) || !usable(viewport.height) {
            warn!(
                "Invalid viewport {}x{}, using the default",
                viewport.width, viewport.height
            );
            self.viewport = ViewportConfig::default();
        }
        if !usable(self.progress_spring.mass) {
            warn!("Progress spring mass must be positive, using the default spring");
            self.progress_spring = SpringFilterConfig::default();
        }
        self
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewportConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
        }
    }
}

impl From<ViewportConfig> for Viewport {
    fn from(config: ViewportConfig) -> Self {
        Viewport::new(config.width, config.height)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TypewriterConfig {
    pub strings: Vec<String>,
    pub type_delay_ms: u64,
    pub delete_delay_ms: u64,
    pub pause_ms: u64,
    #[serde(rename = "loop")]
    pub looping: bool,
}

impl Default for TypewriterConfig {
    fn default() -> Self {
        Self {
            strings: vec![
                "Building Scalable Web Apps".to_string(),
                "Crafting Digital Experiences".to_string(),
                "Turning Ideas Into Reality".to_string(),
            ],
            type_delay_ms: 75,
            delete_delay_ms: 50,
            pause_ms: 1500,
            looping: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactConfig {
    pub submit_delay_ms: u64,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            submit_delay_ms: 1500,
        }
    }
}

impl ContactConfig {
    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NavbarConfig {
    pub scrolled_threshold: f32,
}

impl Default for NavbarConfig {
    fn default() -> Self {
        Self {
            scrolled_threshold: 50.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_json_keeps_defaults() {
        let config: SiteConfig =
            serde_json::from_str(r#"{ "title": "Test", "contact": { "submitDelayMs": 10 } }"#)
                .unwrap();
        assert_eq!(config.title, "Test");
        assert_eq!(config.contact.submit_delay(), Duration::from_millis(10));
        assert_eq!(config.navbar.scrolled_threshold, 50.0);
        assert_eq!(config.typewriter.strings.len(), 3);
        assert!(config.typewriter.looping);
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "viewport": {{ "width": 375, "height": 667 }} }}"#).unwrap();
        let config = SiteConfig::load(file.path()).unwrap();
        assert_eq!(config.viewport.width, 375.0);
        assert_eq!(config.title, DEFAULT_TITLE);
    }

    #[test]
    fn unusable_values_fall_back_to_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "viewport": {{ "width": 0 }}, "progressSpring": {{ "mass": 0 }} }}"#
        )
        .unwrap();
        let config = SiteConfig::load(file.path()).unwrap();
        assert_eq!(config.viewport, ViewportConfig::default());
        assert_eq!(config.progress_spring, SpringFilterConfig::default());
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let err = SiteConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, crate::errors::FolioError::Config(_)));
    }
}
