use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::models::Property;

/// Errors that can occur when loading a catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML catalog: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid JSON catalog: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Catalog contains no properties")]
    Empty,

    #[error("Duplicate property code: {0}")]
    DuplicateCode(String),
}

/// Read-only source of properties for the recommender
pub trait PropertyCatalog: Send + Sync {
    fn properties(&self) -> &[Property];

    fn len(&self) -> usize {
        self.properties().len()
    }

    fn is_empty(&self) -> bool {
        self.properties().is_empty()
    }

    fn get(&self, code: &str) -> Option<&Property> {
        self.properties().iter().find(|p| p.code == code)
    }
}

/// In-memory catalog, fixed once constructed
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    properties: Vec<Property>,
}

#[derive(Deserialize)]
struct CatalogFile {
    properties: Vec<Property>,
}

impl StaticCatalog {
    /// Build a catalog, rejecting empty lists and duplicate codes
    pub fn new(properties: Vec<Property>) -> Result<Self, CatalogError> {
        if properties.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut codes = HashSet::new();
        for property in &properties {
            if !codes.insert(property.code.as_str()) {
                return Err(CatalogError::DuplicateCode(property.code.clone()));
            }
        }

        let properties = properties
            .into_iter()
            .map(|mut p| {
                p.vibe_tags = p.vibe_tags.iter().map(|t| t.to_lowercase()).collect();
                p
            })
            .collect();

        Ok(Self { properties })
    }

    /// Load from a `.json` array or a TOML file with `[[properties]]` tables
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;

        let properties = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => serde_json::from_str::<Vec<Property>>(&raw)?,
            _ => toml::from_str::<CatalogFile>(&raw)?.properties,
        };

        tracing::info!("Loaded {} properties from {}", properties.len(), path.display());
        Self::new(properties)
    }

    /// The four listings shown on the dashboard
    pub fn builtin() -> Self {
        Self {
            properties: builtin_properties(),
        }
    }
}

impl Default for StaticCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PropertyCatalog for StaticCatalog {
    fn properties(&self) -> &[Property] {
        &self.properties
    }
}

#[allow(clippy::too_many_arguments)]
fn listing(
    code: &str,
    title: &str,
    area: &str,
    weekly_rent: u32,
    distance_to_campus: &str,
    room_type: &str,
    vibe_tags: &[&str],
    image: &str,
    notes: &str,
) -> Property {
    let number = code.trim_start_matches("HSR-");
    Property {
        code: code.to_string(),
        title: title.to_string(),
        area: area.to_string(),
        weekly_rent,
        distance_to_campus: distance_to_campus.to_string(),
        room_type: room_type.to_string(),
        vibe_tags: vibe_tags.iter().map(|t| t.to_string()).collect(),
        url: format!("https://housr.co/p/{}", number),
        image: Some(image.to_string()),
        notes: Some(notes.to_string()),
    }
}

fn builtin_properties() -> Vec<Property> {
    vec![
        listing(
            "HSR-101",
            "Bright Ensuite in Social Flatshare",
            "Fallowfield",
            185,
            "15–20 minutes by bus to main campus",
            "Ensuite room in 5-bed flat",
            &["social", "lively", "student", "budget-friendly"],
            "https://images.unsplash.com/photo-1555854877-bab0e564b8d5?q=80&w=400&auto=format&fit=crop",
            "Big shared kitchen, popular with first-years.",
        ),
        listing(
            "HSR-204",
            "Calm Studio Close to Campus",
            "City Centre",
            230,
            "8–10 minute walk to campus",
            "Private studio",
            &["quiet", "modern", "close-to-campus"],
            "https://images.unsplash.com/photo-1522708323590-d24dbb6b0267?q=80&w=400&auto=format&fit=crop",
            "Good for focused study, smaller building.",
        ),
        listing(
            "HSR-309",
            "Modern Ensuite in Premium Building",
            "Ancoats",
            255,
            "20 minutes walk or 8 minutes by tram",
            "Ensuite room in 6-bed flat",
            &["social", "modern", "premium"],
            "https://images.unsplash.com/photo-1502672260266-1c1ef2d93688?q=80&w=400&auto=format&fit=crop",
            "Lots of shared spaces, rooftop terrace.",
        ),
        listing(
            "HSR-410",
            "Value Room in Friendly House",
            "Rusholme",
            165,
            "18 minutes by bus",
            "Standard room with shared bathroom",
            &["budget-friendly", "chilled", "homely"],
            "https://images.unsplash.com/photo-1595526114035-0d45ed16cfbf?q=80&w=400&auto=format&fit=crop",
            "Great for stretching budget, cosy vibe.",
        ),
    ]
}
