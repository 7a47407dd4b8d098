// Common types used across multiple domains and layers
//
// Tone and Platform are shared by the generation flows and the post model.

use anyhow::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Stylistic directive passed to every generation call.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, sqlx::Type, Default,
)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "post_tone", rename_all = "snake_case")]
pub enum Tone {
    #[default]
    #[serde(alias = "Persuasivo")]
    Persuasive,
    #[serde(alias = "Estrategico")]
    Strategic,
    Influencer,
    #[serde(alias = "Inspirador")]
    Inspirational,
    #[serde(alias = "Periodista")]
    Journalistic,
    #[serde(alias = "Corporativo")]
    Corporate,
    #[serde(alias = "Humoristico")]
    Humorous,
}

impl Tone {
    pub const ALL: [Tone; 7] = [
        Tone::Persuasive,
        Tone::Strategic,
        Tone::Influencer,
        Tone::Inspirational,
        Tone::Journalistic,
        Tone::Corporate,
        Tone::Humorous,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Persuasive => "persuasive",
            Tone::Strategic => "strategic",
            Tone::Influencer => "influencer",
            Tone::Inspirational => "inspirational",
            Tone::Journalistic => "journalistic",
            Tone::Corporate => "corporate",
            Tone::Humorous => "humorous",
        }
    }
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Tone {
    type Err = anyhow::Error;

    /// Case-insensitive; also accepts the Spanish labels older dashboards send.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "persuasive" | "persuasivo" => Ok(Tone::Persuasive),
            "strategic" | "estrategico" | "estratégico" => Ok(Tone::Strategic),
            "influencer" => Ok(Tone::Influencer),
            "inspirational" | "inspirador" => Ok(Tone::Inspirational),
            "journalistic" | "periodista" => Ok(Tone::Journalistic),
            "corporate" | "corporativo" => Ok(Tone::Corporate),
            "humorous" | "humoristico" | "humorístico" => Ok(Tone::Humorous),
            _ => Err(anyhow::anyhow!("Invalid tone: {}", s)),
        }
    }
}

/// Target platform for a preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Facebook,
    Instagram,
    Wordpress,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Facebook, Platform::Instagram, Platform::Wordpress];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Facebook => "facebook",
            Platform::Instagram => "instagram",
            Platform::Wordpress => "wordpress",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Platform {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "facebook" => Ok(Platform::Facebook),
            "instagram" => Ok(Platform::Instagram),
            "wordpress" => Ok(Platform::Wordpress),
            _ => Err(anyhow::anyhow!("Invalid platform: {}", s)),
        }
    }
}
