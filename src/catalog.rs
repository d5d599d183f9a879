use chrono::{Datelike, NaiveDate};

use crate::models::portfolio::PackageTier;

/// Marketing copy for a package tier on the public showcase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackageInfo {
    pub name: &'static str,
    /// Indicative starting price in rupiah.
    pub price: u64,
    pub audience: &'static str,
}

pub fn package_info(tier: PackageTier) -> PackageInfo {
    match tier {
        PackageTier::Umkm => PackageInfo {
            name: "Starter UMKM",
            price: 2_500_000,
            audience: "Cocok untuk usaha baru, toko online pemula, jasa lokal",
        },
        PackageTier::Profesional => PackageInfo {
            name: "Professional",
            price: 5_000_000,
            audience: "Cocok untuk perusahaan established, agency, klinik",
        },
        PackageTier::Premium => PackageInfo {
            name: "Premium + AI",
            price: 8_500_000,
            audience: "Cocok untuk E-commerce, startup, traffic tinggi",
        },
    }
}

/// `8500000` → `8.500.000` (Indonesian digit grouping).
pub fn format_price(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

const MONTHS: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// `2024-03-15` → `Maret 2024`.
pub fn format_month_year(date: NaiveDate) -> String {
    format!("{} {}", MONTHS[date.month0() as usize], date.year())
}
