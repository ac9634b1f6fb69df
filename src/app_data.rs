//! Site content embedded from TOML at compile time.
//!
//! Everything the window shows that is not user input or a service response
//! (brand text, nav items, about and contact copy, social links) lives in
//! `embedded/site.toml`. It is parsed lazily on first access and immutable at
//! runtime. User preferences live in `config.rs`.

use serde::Deserialize;
use std::sync::OnceLock;

const SITE_TOML: &str = include_str!("../embedded/site.toml");

/// All static site content
#[derive(Debug, Deserialize)]
pub struct SiteContent {
    pub window: WindowContent,
    pub brand: BrandContent,
    pub hero: HeroContent,
    pub nav: NavContent,
    pub about: AboutContent,
    pub contact: ContactContent,
    pub footer: FooterContent,
}

#[derive(Debug, Deserialize)]
pub struct WindowContent {
    pub initial_size: [f32; 2],
    pub min_size: [f32; 2],
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct BrandContent {
    pub name: String,
    pub tagline: String,
    pub subtitle: String,
}

#[derive(Debug, Deserialize)]
pub struct HeroContent {
    pub total_videos: u32,
    /// Clip path with an `{index}` placeholder
    pub video_pattern: String,
}

#[derive(Debug, Deserialize)]
pub struct NavContent {
    pub items: Vec<NavItem>,
}

/// A navigation entry and the section it scrolls to
#[derive(Debug, Clone, Deserialize)]
pub struct NavItem {
    pub label: String,
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct AboutContent {
    pub title: String,
    /// Markdown
    pub body: String,
}

#[derive(Debug, Deserialize)]
pub struct ContactContent {
    /// Markdown
    pub body: String,
    pub links: Vec<SocialLink>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SocialLink {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct FooterContent {
    pub text: String,
}

/// Get site content (lazy-loaded)
pub fn site() -> &'static SiteContent {
    static SITE: OnceLock<SiteContent> = OnceLock::new();
    SITE.get_or_init(|| {
        toml::from_str(SITE_TOML).unwrap_or_else(|e| {
            panic!("Failed to parse site.toml: {}", e);
        })
    })
}
