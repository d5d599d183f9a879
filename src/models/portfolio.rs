use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Service tier a portfolio entry is showcased under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageTier {
    Umkm,
    Profesional,
    Premium,
}

impl PackageTier {
    pub const ALL: [PackageTier; 3] = [Self::Umkm, Self::Profesional, Self::Premium];

    /// Wire value sent as `paket`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Umkm => "umkm",
            Self::Profesional => "profesional",
            Self::Premium => "premium",
        }
    }
}

impl fmt::Display for PackageTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackageTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "umkm" => Ok(Self::Umkm),
            "profesional" | "professional" => Ok(Self::Profesional),
            "premium" => Ok(Self::Premium),
            other => Err(format!("Unknown package tier: {other}")),
        }
    }
}

/// One persisted image of a portfolio entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioImage {
    pub id: u64,
    /// Storage path relative to `/storage`, or a full URL.
    #[serde(rename = "image")]
    pub storage_path: String,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub order: u32,
}

fn null_as_zero<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
    Ok(Option::<u32>::deserialize(d)?.unwrap_or(0))
}

/// A showcased project, normalized from the backend's wire shape.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawPortfolioEntry")]
pub struct PortfolioEntry {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub package_tier: Option<PackageTier>,
    /// Ordered, duplicate-free feature list.
    pub features: Vec<String>,
    pub project_date: Option<NaiveDate>,
    pub price: Option<u64>,
    /// Sorted by `order` ascending.
    pub images: Vec<PortfolioImage>,
}

impl PortfolioEntry {
    /// The image shown as thumbnail in list views (lowest order).
    pub fn cover(&self) -> Option<&PortfolioImage> {
        self.images.first()
    }
}

// ── Wire shape ──

/// Portfolio as the backend sends it. Several fields arrive in more than
/// one encoding and are normalized in `TryFrom`.
#[derive(Debug, Deserialize)]
pub struct RawPortfolioEntry {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub deskripsi: Option<String>,
    #[serde(default)]
    pub paket: Option<String>,
    /// Array of strings or a JSON-encoded array string.
    #[serde(default)]
    pub fitur_website: Option<serde_json::Value>,
    /// `YYYY-MM-DD`, optionally followed by a time part.
    #[serde(default)]
    pub tanggal_projek: Option<String>,
    /// Number, numeric string, or null.
    #[serde(default)]
    pub harga_project: Option<serde_json::Value>,
    #[serde(default)]
    pub images: Option<Vec<PortfolioImage>>,
}

impl TryFrom<RawPortfolioEntry> for PortfolioEntry {
    type Error = String;

    fn try_from(raw: RawPortfolioEntry) -> Result<Self, Self::Error> {
        let package_tier = match raw.paket.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(value) => match value.parse() {
                Ok(tier) => Some(tier),
                Err(e) => {
                    warn!("Portfolio {}: {e}", raw.id);
                    None
                }
            },
        };

        let mut images = raw.images.unwrap_or_default();
        images.sort_by_key(|img| img.order);

        Ok(Self {
            id: raw.id,
            title: raw.title.unwrap_or_default(),
            description: raw.deskripsi.unwrap_or_default(),
            package_tier,
            features: parse_features(raw.id, raw.fitur_website),
            project_date: raw.tanggal_projek.as_deref().and_then(parse_project_date),
            price: raw.harga_project.and_then(parse_price),
            images,
        })
    }
}

fn parse_features(id: u64, value: Option<serde_json::Value>) -> Vec<String> {
    let items: Vec<String> = match value {
        Some(serde_json::Value::Array(items)) => items
            .into_iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        Some(serde_json::Value::String(encoded)) if encoded.trim().is_empty() => Vec::new(),
        Some(serde_json::Value::String(encoded)) => {
            serde_json::from_str(&encoded).unwrap_or_else(|e| {
                warn!("Portfolio {id}: unreadable fitur_website {encoded:?}: {e}");
                Vec::new()
            })
        }
        _ => Vec::new(),
    };

    let mut unique: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        let item = item.trim().to_string();
        if !item.is_empty() && !unique.contains(&item) {
            unique.push(item);
        }
    }
    unique
}

/// Accepts `2024-03-01`, `2024-03-01 10:00:00` and `2024-03-01T10:00:00Z`.
pub fn parse_project_date(value: &str) -> Option<NaiveDate> {
    let date_part = value.trim().split([' ', 'T']).next()?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

fn parse_price(value: serde_json::Value) -> Option<u64> {
    match value {
        serde_json::Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f.round() as u64)),
        serde_json::Value::String(s) => {
            let s = s.trim();
            s.parse::<u64>().ok().or_else(|| {
                s.parse::<f64>()
                    .ok()
                    .filter(|f| *f >= 0.0)
                    .map(|f| f.round() as u64)
            })
        }
        _ => None,
    }
}

// ── Request DTOs ──

/// Position of one image after a reorder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageOrder {
    pub id: u64,
    pub order: u32,
}

/// Body of `POST /admin/portofolio/image/reorder`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderRequest {
    pub portofolio_id: u64,
    pub orders: Vec<ImageOrder>,
}
