use chrono::NaiveDate;

use crate::api::FormPayload;
use crate::error::{ClientError, Result};
use crate::models::portfolio::{PackageTier, PortfolioEntry};
use crate::portfolio::features::{FeatureEditor, FeatureList};
use crate::portfolio::uploader::LocalFile;

/// Whether the form creates a new entry or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    /// Images are submitted together with the text fields.
    Create,
    /// Images are managed separately from the text-field save.
    Edit,
}

/// Field state of the create/edit portfolio form.
#[derive(Debug, Clone, Default)]
pub struct PortfolioForm {
    pub title: String,
    pub description: String,
    pub package_tier: Option<PackageTier>,
    pub features: FeatureEditor,
    pub project_date: Option<NaiveDate>,
    /// Raw price input; blank means "no price".
    pub price: String,
}

/// Fields that passed validation, ready to be encoded.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidPortfolio {
    pub title: String,
    pub description: String,
    pub package_tier: PackageTier,
    pub features: FeatureList,
    pub project_date: NaiveDate,
    pub price: Option<u64>,
}

impl PortfolioForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefill from an existing entry for editing.
    pub fn from_entry(entry: &PortfolioEntry) -> Self {
        Self {
            title: entry.title.clone(),
            description: entry.description.clone(),
            package_tier: entry.package_tier,
            features: FeatureEditor::new(entry.features.iter().collect()),
            project_date: entry.project_date,
            price: entry.price.map(|p| p.to_string()).unwrap_or_default(),
        }
    }

    /// Check the fields in display order; the first failing rule wins.
    /// `image_count` only matters in [`FormMode::Create`].
    pub fn validate(&self, mode: FormMode, image_count: usize) -> Result<ValidPortfolio> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ClientError::validation("Judul portofolio tidak boleh kosong"));
        }
        let description = self.description.trim();
        if description.is_empty() {
            return Err(ClientError::validation("Deskripsi tidak boleh kosong"));
        }
        let Some(package_tier) = self.package_tier else {
            return Err(ClientError::validation("Paket harus dipilih"));
        };
        if self.features.list().is_empty() {
            return Err(ClientError::validation("Minimal 1 fitur harus ditambahkan"));
        }
        let Some(project_date) = self.project_date else {
            return Err(ClientError::validation("Tanggal projek harus dipilih"));
        };
        if mode == FormMode::Create && image_count == 0 {
            return Err(ClientError::validation("Minimal 1 gambar harus diupload"));
        }
        let price = parse_price_input(&self.price)?;

        Ok(ValidPortfolio {
            title: title.to_string(),
            description: description.to_string(),
            package_tier,
            features: self.features.list().clone(),
            project_date,
            price,
        })
    }
}

/// Blank input means no price; anything else must be a whole number of
/// rupiah. Spaces and `.` thousands grouping (`2.500.000`) are tolerated;
/// a decimal part (`1.500,50`, `1.5`) is rejected.
pub fn parse_price_input(input: &str) -> Result<Option<u64>> {
    let cleaned: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.is_empty() {
        return Ok(None);
    }

    let groups: Vec<&str> = cleaned.split('.').collect();
    let grouped = groups.len() > 1;
    let well_formed = groups.iter().enumerate().all(|(i, group)| {
        let digits = !group.is_empty() && group.chars().all(|c| c.is_ascii_digit());
        let width = match (grouped, i) {
            (false, _) => true,
            (true, 0) => group.len() <= 3,
            (true, _) => group.len() == 3,
        };
        digits && width
    });
    if !well_formed {
        return Err(ClientError::validation("Harga project harus berupa angka"));
    }

    groups
        .concat()
        .parse::<u64>()
        .map(Some)
        .map_err(|_| ClientError::validation("Harga project harus berupa angka"))
}

impl ValidPortfolio {
    /// Text fields of the multipart body. `harga_project` is left out
    /// entirely when no price was given.
    pub fn to_payload(&self) -> FormPayload {
        let payload = FormPayload::new()
            .text("title", &self.title)
            .text("deskripsi", &self.description)
            .text("paket", self.package_tier.as_str())
            .text("fitur_website", self.features.to_json())
            .text(
                "tanggal_projek",
                self.project_date.format("%Y-%m-%d").to_string(),
            );

        match self.price {
            Some(price) => payload.text("harga_project", price.to_string()),
            None => payload,
        }
    }

    /// Body for the create request: text fields plus `images[]`.
    pub fn to_create_payload(&self, images: Vec<LocalFile>) -> FormPayload {
        self.to_payload().files("images[]", images)
    }
}
