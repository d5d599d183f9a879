//! Local store persistence plus the small pure helpers (catalog, media,
//! error rendering, wire models).
use chrono::NaiveDate;

use mofy_admin::AppConfig;
use mofy_admin::catalog::{format_month_year, format_price, package_info};
use mofy_admin::error::BackendError;
use mofy_admin::media::resolve_image_url;
use mofy_admin::models::Payload;
use mofy_admin::models::portfolio::{PackageTier, PortfolioEntry, parse_project_date};
use mofy_admin::models::profile::CompanyProfile;
use mofy_admin::models::service::ServiceInput;
use mofy_admin::store::{LocalStore, STORE_FILE};

// ── Store ──

#[test]
fn test_store_round_trips_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalStore::open(dir.path()).unwrap();
    store.set_raw("token", "1|abc").unwrap();
    store.set("list", &vec![1, 2, 3]).unwrap();

    assert!(dir.path().join(STORE_FILE).exists());

    let reopened = LocalStore::open(dir.path()).unwrap();
    assert_eq!(reopened.get_raw("token").as_deref(), Some("1|abc"));
    assert_eq!(reopened.get::<Vec<u32>>("list").unwrap(), Some(vec![1, 2, 3]));
    assert_eq!(reopened.get::<Vec<u32>>("missing").unwrap(), None);
}

#[test]
fn test_store_remove_persists() {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalStore::open(dir.path()).unwrap();
    store.set_raw("a", "1").unwrap();
    store.remove("a").unwrap();
    store.remove("never-there").unwrap();

    let reopened = LocalStore::open(dir.path()).unwrap();
    assert!(!reopened.exists("a"));
}

#[test]
fn test_corrupt_store_file_opens_empty() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(STORE_FILE), "not json at all").unwrap();

    let store = LocalStore::open(dir.path()).unwrap();

    assert!(!store.exists("token"));
    store.set_raw("token", "x").unwrap();
    assert_eq!(store.get_raw("token").as_deref(), Some("x"));
}

#[test]
fn test_store_clones_share_entries() {
    let store = LocalStore::in_memory();
    let other = store.clone();
    store.set_raw("k", "v").unwrap();

    assert_eq!(other.get_raw("k").as_deref(), Some("v"));
    assert!(store.path().is_none());
}

#[test]
fn test_typed_get_reports_bad_json() {
    let store = LocalStore::in_memory();
    store.set_raw("n", "[oops").unwrap();
    assert!(store.get::<Vec<u32>>("n").is_err());
}

// ── Media & catalog ──

#[test]
fn test_resolve_image_url() {
    let base = "http://localhost:8000/";
    assert_eq!(resolve_image_url(base, ""), "");
    assert_eq!(
        resolve_image_url(base, "https://cdn.mofy.id/a.png"),
        "https://cdn.mofy.id/a.png"
    );
    assert_eq!(
        resolve_image_url(base, "portofolio/a.png"),
        "http://localhost:8000/storage/portofolio/a.png"
    );
    assert_eq!(
        resolve_image_url(base, "/portofolio/a.png"),
        "http://localhost:8000/storage/portofolio/a.png"
    );
}

#[test]
fn test_price_and_date_formatting() {
    assert_eq!(format_price(0), "0");
    assert_eq!(format_price(950), "950");
    assert_eq!(format_price(2_500_000), "2.500.000");
    assert_eq!(format_price(12_345_678), "12.345.678");

    let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
    assert_eq!(format_month_year(date), "Maret 2024");
    let date = NaiveDate::from_ymd_opt(2023, 12, 1).unwrap();
    assert_eq!(format_month_year(date), "Desember 2023");
}

#[test]
fn test_every_tier_has_catalog_copy() {
    assert_eq!(package_info(PackageTier::Umkm).price, 2_500_000);
    assert_eq!(package_info(PackageTier::Premium).name, "Premium + AI");
    for tier in PackageTier::ALL {
        assert!(!package_info(tier).audience.is_empty());
        assert_eq!(tier.as_str().parse::<PackageTier>(), Ok(tier));
    }
    assert!("gold".parse::<PackageTier>().is_err());
}

// ── Errors ──

#[test]
fn test_backend_error_messages() {
    let plain = BackendError::from_body(500, r#"{"message":"Server error"}"#);
    assert_eq!(plain.display_message(), "Server error");

    let legacy = BackendError::from_body(400, r#"{"error":"Bad input"}"#);
    assert_eq!(legacy.display_message(), "Bad input");

    let html = BackendError::from_body(502, "<html>Bad Gateway</html>");
    assert_eq!(html.display_message(), "Error: 502");

    let fields = BackendError::from_body(
        422,
        r#"{"message":"invalid","errors":{"paket":["Paket wajib"],"deskripsi":"Terlalu pendek"}}"#,
    );
    assert_eq!(
        fields.display_message(),
        "Validasi gagal:\ndeskripsi: Terlalu pendek\npaket: Paket wajib"
    );
}

// ── Models ──

#[test]
fn test_payload_accepts_wrapped_and_bare() {
    let wrapped: Payload<Vec<u32>> = serde_json::from_str(r#"{"data":[1,2]}"#).unwrap();
    let bare: Payload<Vec<u32>> = serde_json::from_str("[3]").unwrap();
    assert_eq!(wrapped.into_inner(), [1, 2]);
    assert_eq!(bare.into_inner(), [3]);
}

#[test]
fn test_entry_tolerates_missing_optional_fields() {
    let entry: PortfolioEntry = serde_json::from_str(
        r#"{"id":5,"title":"Minimal","paket":"unknown","tanggal_projek":"bad","harga_project":12000,
            "images":[{"id":1,"image":"a.jpg","order":null}]}"#,
    )
    .unwrap();

    assert_eq!(entry.description, "");
    assert_eq!(entry.package_tier, None);
    assert_eq!(entry.project_date, None);
    assert_eq!(entry.price, Some(12_000));
    assert!(entry.features.is_empty());
    assert_eq!(entry.images[0].order, 0);
    assert_eq!(entry.cover().map(|c| c.storage_path.as_str()), Some("a.jpg"));
}

#[test]
fn test_entry_reads_only_backend_field_names() {
    let entry: PortfolioEntry = serde_json::from_str(
        r#"{"id":6,"title":"Kopi","description":"ignored","package_tier":"umkm",
            "deskripsi":"Toko online","paket":"umkm","harga_project":"1500000.00"}"#,
    )
    .unwrap();

    assert_eq!(entry.description, "Toko online");
    assert_eq!(entry.package_tier, Some(PackageTier::Umkm));
    assert_eq!(entry.price, Some(1_500_000));

    let local_names: PortfolioEntry =
        serde_json::from_str(r#"{"id":6,"description":"Toko online","price":5}"#).unwrap();
    assert_eq!(local_names.description, "");
    assert_eq!(local_names.price, None);
}

#[test]
fn test_project_date_formats() {
    let expected = NaiveDate::from_ymd_opt(2024, 3, 1);
    assert_eq!(parse_project_date("2024-03-01"), expected);
    assert_eq!(parse_project_date("2024-03-01 10:00:00"), expected);
    assert_eq!(parse_project_date("2024-03-01T10:00:00.000000Z"), expected);
    assert_eq!(parse_project_date("01/03/2024"), None);
}

#[test]
fn test_service_validation() {
    let mut input = ServiceInput::default();
    assert_eq!(
        input.validate().unwrap_err().to_string(),
        "Judul layanan tidak boleh kosong"
    );
    input.title = "SEO".to_string();
    assert_eq!(
        input.validate().unwrap_err().to_string(),
        "Deskripsi tidak boleh kosong"
    );
    input.description = "Optimasi".to_string();
    assert!(input.validate().is_ok());
}

#[test]
fn test_profile_fields_by_name() {
    let mut profile = CompanyProfile::default();
    assert!(profile.set_field("address", "Jakarta"));
    assert!(!profile.set_field("phone", "123"));
    assert_eq!(profile.field("address"), Some("Jakarta"));
    assert_eq!(profile.field("facebook"), None);
    for name in CompanyProfile::FIELDS {
        assert!(profile.set_field(name, "x"));
    }
}

// ── Config ──

#[test]
fn test_config_defaults_and_api_override() {
    let config = AppConfig::default().with_api_base("https://api.mofy.id/api/");

    assert_eq!(config.api_base_url, "https://api.mofy.id/api");
    assert_eq!(config.storage_base_url, "http://127.0.0.1:8000");
    assert!(config.request_timeout.is_none());
}
