#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

use chrono::NaiveDate;
use mofy_admin::api::{FormPayload, PortfolioBackend};
use mofy_admin::error::{BackendError, ClientError, Result};
use mofy_admin::models::portfolio::{
    PackageTier, PortfolioEntry, PortfolioImage, ReorderRequest,
};
use mofy_admin::portfolio::LocalFile;

/// Backend operations that can be told to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    List,
    Create,
    Update,
    Upload,
    DeleteImage,
    Reorder,
    DeletePortfolio,
}

#[derive(Default)]
struct State {
    entries: Vec<PortfolioEntry>,
    failing: HashSet<Op>,
    calls: Vec<Op>,
    payloads: Vec<FormPayload>,
    uploads: Vec<(u64, Vec<String>)>,
    reorders: Vec<ReorderRequest>,
    next_image_id: u64,
}

/// In-memory stand-in for the admin API.
#[derive(Default)]
pub struct FakeBackend {
    state: Mutex<State>,
}

impl FakeBackend {
    pub fn with_entries(entries: Vec<PortfolioEntry>) -> Self {
        let backend = Self::default();
        {
            let mut state = backend.lock();
            state.entries = entries;
            state.next_image_id = 1000;
        }
        backend
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    pub fn fail(&self, op: Op) {
        self.lock().failing.insert(op);
    }

    pub fn recover(&self, op: Op) {
        self.lock().failing.remove(&op);
    }

    pub fn calls(&self) -> Vec<Op> {
        self.lock().calls.clone()
    }

    pub fn count(&self, op: Op) -> usize {
        self.lock().calls.iter().filter(|c| **c == op).count()
    }

    pub fn payloads(&self) -> Vec<FormPayload> {
        self.lock().payloads.clone()
    }

    pub fn uploads(&self) -> Vec<(u64, Vec<String>)> {
        self.lock().uploads.clone()
    }

    pub fn reorders(&self) -> Vec<ReorderRequest> {
        self.lock().reorders.clone()
    }

    pub fn entry(&self, id: u64) -> Option<PortfolioEntry> {
        self.lock().entries.iter().find(|p| p.id == id).cloned()
    }

    fn begin(&self, op: Op) -> Result<MutexGuard<'_, State>> {
        let mut state = self.lock();
        state.calls.push(op);
        if state.failing.contains(&op) {
            return Err(ClientError::Backend(BackendError::from_body(
                500,
                r#"{"message":"Server error"}"#,
            )));
        }
        Ok(state)
    }
}

impl PortfolioBackend for FakeBackend {
    async fn list_portfolios(&self) -> Result<Vec<PortfolioEntry>> {
        Ok(self.begin(Op::List)?.entries.clone())
    }

    async fn create_portfolio(&self, payload: FormPayload) -> Result<()> {
        let mut state = self.begin(Op::Create)?;
        let id = state.entries.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        state.entries.push(PortfolioEntry {
            id,
            title: payload.get("title").unwrap_or_default().to_string(),
            description: payload.get("deskripsi").unwrap_or_default().to_string(),
            package_tier: payload.get("paket").and_then(|p| p.parse().ok()),
            features: Vec::new(),
            project_date: None,
            price: payload.get("harga_project").and_then(|p| p.parse().ok()),
            images: Vec::new(),
        });
        state.payloads.push(payload);
        Ok(())
    }

    async fn update_portfolio(&self, id: u64, payload: FormPayload) -> Result<()> {
        let mut state = self.begin(Op::Update)?;
        if let Some(entry) = state.entries.iter_mut().find(|p| p.id == id) {
            if let Some(title) = payload.get("title") {
                entry.title = title.to_string();
            }
            if let Some(desc) = payload.get("deskripsi") {
                entry.description = desc.to_string();
            }
            entry.price = payload.get("harga_project").and_then(|p| p.parse().ok());
        }
        state.payloads.push(payload);
        Ok(())
    }

    async fn upload_images(&self, id: u64, files: Vec<LocalFile>) -> Result<()> {
        let mut state = self.begin(Op::Upload)?;
        let names: Vec<String> = files.iter().map(|f| f.file_name.clone()).collect();
        let mut next = state.next_image_id;
        if let Some(entry) = state.entries.iter_mut().find(|p| p.id == id) {
            for name in &names {
                let order = entry.images.len() as u32;
                entry.images.push(PortfolioImage {
                    id: next,
                    storage_path: format!("portofolio/{name}"),
                    order,
                });
                next += 1;
            }
        }
        state.next_image_id = next;
        state.uploads.push((id, names));
        Ok(())
    }

    async fn delete_image(&self, image_id: u64) -> Result<()> {
        let mut state = self.begin(Op::DeleteImage)?;
        for entry in &mut state.entries {
            entry.images.retain(|img| img.id != image_id);
        }
        Ok(())
    }

    async fn reorder_images(&self, request: &ReorderRequest) -> Result<()> {
        let mut state = self.begin(Op::Reorder)?;
        if let Some(entry) = state
            .entries
            .iter_mut()
            .find(|p| p.id == request.portofolio_id)
        {
            for img in &mut entry.images {
                if let Some(o) = request.orders.iter().find(|o| o.id == img.id) {
                    img.order = o.order;
                }
            }
            entry.images.sort_by_key(|img| img.order);
        }
        state.reorders.push(request.clone());
        Ok(())
    }

    async fn delete_portfolio(&self, id: u64) -> Result<()> {
        let mut state = self.begin(Op::DeletePortfolio)?;
        state.entries.retain(|p| p.id != id);
        Ok(())
    }
}

pub fn image(id: u64, order: u32) -> PortfolioImage {
    PortfolioImage {
        id,
        storage_path: format!("portofolio/{id}.jpg"),
        order,
    }
}

pub fn entry(id: u64, images: Vec<PortfolioImage>) -> PortfolioEntry {
    PortfolioEntry {
        id,
        title: format!("Project {id}"),
        description: "Website company profile".to_string(),
        package_tier: Some(PackageTier::Profesional),
        features: vec!["SEO".to_string(), "CMS".to_string()],
        project_date: NaiveDate::from_ymd_opt(2024, 3, 15),
        price: Some(5_000_000),
        images,
    }
}

pub fn png(name: &str) -> LocalFile {
    LocalFile::new(name, "image/png", vec![0x89, b'P', b'N', b'G'])
}

pub fn accept_all(_: &str) -> bool {
    true
}

pub fn decline_all(_: &str) -> bool {
    false
}
