//! Page configuration.
//!
//! Read once at start from `<script type="application/json" id="site-config">`.
//! Every field has a default, so a page can override a single value and leave
//! the rest alone.

use serde::Deserialize;
use thiserror::Error;

/// Id of the inline JSON block holding the configuration.
pub const CONFIG_ELEMENT_ID: &str = "site-config";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid site config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct SiteConfig {
    pub nav: NavConfig,
    pub reveal: RevealConfig,
    pub animator: AnimatorConfig,
    pub form: FormConfig,
    pub counter: CounterConfig,
    pub typing: TypingConfig,
    pub faq: FaqConfig,
}

impl SiteConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct NavConfig {
    /// Viewports narrower than this use the collapsible menu.
    pub breakpoint: f64,
    /// Fixed header height added to the scroll position for active-link tracking.
    pub header_offset: f64,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            breakpoint: 1024.0,
            header_offset: 100.0,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RevealMode {
    #[default]
    Intersect,
    Scroll,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct RevealConfig {
    pub mode: RevealMode,
    /// Scroll mode: a target is revealed once its top is above `viewport_height - offset`.
    pub offset: f64,
    pub threshold: f64,
    pub root_margin: String,
    pub default_animation: String,
    pub duration: String,
    pub easing: String,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            mode: RevealMode::Intersect,
            offset: 150.0,
            threshold: 0.1,
            root_margin: "0px 0px -50px 0px".into(),
            default_animation: "fadeInUp".into(),
            duration: "0.6s".into(),
            easing: "ease".into(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Glyph {
    #[default]
    Dot,
    Leaf,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct MountConfig {
    pub selector: String,
    pub glyph: Glyph,
    /// `r, g, b` triple spliced into `rgba(...)`.
    pub color: String,
    pub count: usize,
}

impl Default for MountConfig {
    fn default() -> Self {
        Self {
            selector: ".cta-section".into(),
            glyph: Glyph::Dot,
            color: "255, 255, 255".into(),
            count: 50,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnimatorConfig {
    pub mounts: Vec<MountConfig>,
    pub link_distance: f64,
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self {
            mounts: vec![
                MountConfig {
                    selector: "#hero".into(),
                    glyph: Glyph::Leaf,
                    color: "76, 175, 80".into(),
                    count: 30,
                },
                MountConfig::default(),
            ],
            link_distance: crate::particles::LINK_DISTANCE,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct FormConfig {
    /// Relay URL. Without one the form is left to the browser.
    pub endpoint: Option<String>,
    pub subject: String,
    pub template: String,
    pub busy_label: String,
    pub error_message: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            subject: "New Sustainability Assessment Request".into(),
            template: "table".into(),
            busy_label: "Submitting...".into(),
            error_message: "Sorry, there was an error submitting your form. Please try again.".into(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct CounterConfig {
    pub duration_ms: u32,
    pub frame_ms: u32,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            duration_ms: 2000,
            frame_ms: 16,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct TypingConfig {
    pub texts: Vec<String>,
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            texts: vec![
                "Every D2C brand needs a GreenXguard verification badge.".into(),
                "Build trust with CCPA-compliant sustainability claims.".into(),
                "Showcase your authentic green credentials.".into(),
                "Join the verified green revolution in India.".into(),
            ],
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct FaqConfig {
    /// Opening one item closes the others.
    pub exclusive: bool,
}

impl Default for FaqConfig {
    fn default() -> Self {
        Self { exclusive: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        let cfg = SiteConfig::from_json("{}").unwrap();
        assert_eq!(cfg, SiteConfig::default());
        assert_eq!(cfg.nav.breakpoint, 1024.0);
        assert_eq!(cfg.reveal.mode, RevealMode::Intersect);
        assert!(cfg.form.endpoint.is_none());
    }

    #[test]
    fn partial_override_keeps_other_fields() {
        let cfg = SiteConfig::from_json(
            r#"{
                "nav": { "breakpoint": 1023 },
                "reveal": { "mode": "scroll" },
                "form": { "endpoint": "https://relay.test/ajax/site" },
                "animator": { "mounts": [{ "selector": ".cta", "glyph": "leaf" }] }
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.nav.breakpoint, 1023.0);
        assert_eq!(cfg.nav.header_offset, 100.0);
        assert_eq!(cfg.reveal.mode, RevealMode::Scroll);
        assert_eq!(cfg.reveal.offset, 150.0);
        assert_eq!(cfg.form.endpoint.as_deref(), Some("https://relay.test/ajax/site"));
        assert_eq!(cfg.form.busy_label, "Submitting...");
        assert_eq!(cfg.animator.mounts.len(), 1);
        assert_eq!(cfg.animator.mounts[0].glyph, Glyph::Leaf);
        assert_eq!(cfg.animator.mounts[0].count, 50);
    }

    #[test]
    fn malformed_json_is_an_error() {
        let err = SiteConfig::from_json("{ nav: ").unwrap_err();
        assert!(err.to_string().starts_with("invalid site config"));
    }
}
