use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use dotenv::dotenv;
use mofy_admin::api::portfolio::{find_portfolio, get_public_portfolios};
use mofy_admin::auth::AuthSession;
use mofy_admin::catalog::{format_month_year, format_price, package_info};
use mofy_admin::chat::{ChatSession, ChatWidget, Role, SendOutcome, WebhookClient};
use mofy_admin::handlers::images::ImagesPage;
use mofy_admin::handlers::portfolio::{CreatePortfolioPage, EditPortfolioPage, PortfolioListPage};
use mofy_admin::handlers::services::ServicesPage;
use mofy_admin::handlers::settings::SettingsPage;
use mofy_admin::handlers::{Notice, Outcome, auth};
use mofy_admin::media::resolve_image_url;
use mofy_admin::models::portfolio::{PackageTier, PortfolioEntry};
use mofy_admin::models::profile::CompanyProfile;
use mofy_admin::models::service::ServiceInput;
use mofy_admin::portfolio::reorder::ImageReorder;
use mofy_admin::portfolio::{FeatureEditor, ImageUploader, LocalFile, PortfolioForm};
use mofy_admin::store::LocalStore;
use mofy_admin::{ApiClient, AppConfig};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mofy-admin", about = "Admin console for the Mofy website")]
struct Cli {
    /// Override MOFY_API_URL.
    #[arg(long, global = true)]
    api_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    Logout,
    #[command(subcommand)]
    Portfolio(PortfolioCmd),
    #[command(subcommand)]
    Images(ImagesCmd),
    #[command(subcommand)]
    Services(ServicesCmd),
    #[command(subcommand)]
    Settings(SettingsCmd),
    /// Public portfolio showcase.
    Showcase { id: Option<u64> },
    /// Talk to the chat assistant.
    Chat {
        message: Option<String>,
        #[arg(long)]
        clear: bool,
    },
}

#[derive(Subcommand)]
enum PortfolioCmd {
    List,
    Show {
        id: u64,
    },
    Create {
        #[command(flatten)]
        fields: PortfolioArgs,
        #[arg(long = "image")]
        images: Vec<PathBuf>,
    },
    /// Save text fields only.
    Update {
        id: u64,
        #[command(flatten)]
        fields: PortfolioArgs,
    },
    /// Save text fields, upload images and save order in one run.
    Save {
        id: u64,
        #[command(flatten)]
        fields: PortfolioArgs,
        #[arg(long = "image")]
        images: Vec<PathBuf>,
        /// `IMAGE_ID:up|down|top|bottom`, applied in order.
        #[arg(long = "move")]
        moves: Vec<String>,
    },
    Delete {
        id: u64,
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum ImagesCmd {
    Upload {
        id: u64,
        paths: Vec<PathBuf>,
    },
    Delete {
        portfolio_id: u64,
        image_id: u64,
        #[arg(long)]
        yes: bool,
    },
    Reorder {
        id: u64,
        /// `IMAGE_ID:up|down|top|bottom`, applied in order.
        #[arg(long = "move", required = true)]
        moves: Vec<String>,
    },
}

#[derive(Subcommand)]
enum ServicesCmd {
    List,
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        icon: Option<String>,
    },
    Update {
        id: u64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        icon: Option<String>,
    },
    Delete {
        id: u64,
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum SettingsCmd {
    Show,
    /// `field=value` pairs, e.g. `site_title="Mofy"`.
    Set { pairs: Vec<String> },
}

#[derive(Args)]
struct PortfolioArgs {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    package: Option<PackageTier>,
    /// Repeat for each feature; replaces the existing list.
    #[arg(long = "feature")]
    features: Vec<String>,
    /// `YYYY-MM-DD`
    #[arg(long)]
    date: Option<NaiveDate>,
    /// Leave empty to remove the price.
    #[arg(long)]
    price: Option<String>,
}

impl PortfolioArgs {
    fn apply(&self, form: &mut PortfolioForm) {
        if let Some(title) = &self.title {
            form.title = title.clone();
        }
        if let Some(description) = &self.description {
            form.description = description.clone();
        }
        if self.package.is_some() {
            form.package_tier = self.package;
        }
        if !self.features.is_empty() {
            let mut editor = FeatureEditor::default();
            for feature in &self.features {
                if !editor.add(feature) {
                    eprintln!("Fitur dilewati (kosong atau duplikat): {feature}");
                }
            }
            form.features = editor;
        }
        if self.date.is_some() {
            form.project_date = self.date;
        }
        if let Some(price) = &self.price {
            form.price = price.clone();
        }
    }
}

fn report(notice: &Notice) -> ExitCode {
    if notice.is_error() {
        eprintln!("✗ {}: {}", notice.title, notice.description);
        ExitCode::FAILURE
    } else {
        println!("✓ {}: {}", notice.title, notice.description);
        ExitCode::SUCCESS
    }
}

fn report_outcome(outcome: &Outcome) -> ExitCode {
    let code = report(&outcome.notice);
    if let Some(to) = outcome.navigate {
        tracing::debug!("Navigate to {to:?}");
    }
    code
}

/// Confirmation prompt on stdin, skipped by `--yes`.
fn confirmer(yes: bool) -> impl Fn(&str) -> bool {
    move |prompt: &str| {
        if yes {
            return true;
        }
        print!("{prompt} [y/N] ");
        let _ = std::io::stdout().flush();
        let mut answer = String::new();
        if std::io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "ya" | "yes")
    }
}

async fn read_files(uploader: &mut ImageUploader, paths: &[PathBuf]) -> Result<(), ExitCode> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        match LocalFile::from_path(path).await {
            Ok(file) => files.push(file),
            Err(e) => {
                eprintln!("✗ {}: {e}", path.display());
                return Err(ExitCode::FAILURE);
            }
        }
    }
    let report = uploader.add_files(files);
    for rejection in &report.rejected {
        eprintln!("Dilewati: {rejection}");
    }
    Ok(())
}

fn apply_moves(reorder: &mut ImageReorder, moves: &[String]) -> Result<(), ExitCode> {
    for raw in moves {
        let parsed = raw
            .split_once(':')
            .and_then(|(id, dir)| id.trim().parse::<u64>().ok().map(|id| (id, dir.trim())));
        let Some((image_id, direction)) = parsed else {
            eprintln!("✗ Format move tidak valid: {raw} (contoh: 12:up)");
            return Err(ExitCode::FAILURE);
        };
        let Some(index) = reorder.position_of(image_id) else {
            eprintln!("✗ Gambar {image_id} tidak ada di portofolio ini");
            return Err(ExitCode::FAILURE);
        };
        let moved = match direction {
            "up" => reorder.move_up(index),
            "down" => reorder.move_down(index),
            "top" => reorder.move_to_top(index),
            "bottom" => reorder.move_to_bottom(index),
            other => {
                eprintln!("✗ Arah tidak dikenal: {other}");
                return Err(ExitCode::FAILURE);
            }
        };
        if !moved {
            println!("Gambar {image_id} sudah di ujung, '{direction}' diabaikan");
        }
    }
    Ok(())
}

fn print_entry(entry: &PortfolioEntry, storage_base: &str) {
    println!("#{} {}", entry.id, entry.title);
    if let Some(tier) = entry.package_tier {
        println!("  Paket   : {} ({tier})", package_info(tier).name);
    }
    if let Some(date) = entry.project_date {
        println!("  Tanggal : {} ({date})", format_month_year(date));
    }
    if let Some(price) = entry.price {
        println!("  Harga   : Rp {}", format_price(price));
    }
    println!("  Fitur   : {}", entry.features.join(", "));
    println!("  {}", entry.description);
    for img in &entry.images {
        println!(
            "  [{}] #{} {}",
            img.order,
            img.id,
            resolve_image_url(storage_base, &img.storage_path)
        );
    }
}

async fn run_portfolio(cmd: PortfolioCmd, api: &ApiClient, config: &AppConfig) -> ExitCode {
    match cmd {
        PortfolioCmd::List => {
            let mut page = PortfolioListPage::new();
            if let Some(notice) = page.load(api).await {
                return report(&notice);
            }
            for s in page.summaries(&config.storage_base_url) {
                println!(
                    "#{:<4} {:<40} {:<12} {} gambar  {}",
                    s.id,
                    s.title,
                    s.package_tier.map(|t| t.to_string()).unwrap_or_default(),
                    s.image_count,
                    s.cover_url.unwrap_or_default()
                );
            }
            ExitCode::SUCCESS
        }
        PortfolioCmd::Show { id } => match find_portfolio(api, id).await {
            Ok(entry) => {
                print_entry(&entry, &config.storage_base_url);
                ExitCode::SUCCESS
            }
            Err(e) => report(&Notice::from_error(&e)),
        },
        PortfolioCmd::Create { fields, images } => {
            let mut page = CreatePortfolioPage::new();
            fields.apply(&mut page.form);
            if let Err(code) = read_files(&mut page.uploader, &images).await {
                return code;
            }
            report_outcome(&page.submit(api).await)
        }
        PortfolioCmd::Update { id, fields } => {
            let mut page = match EditPortfolioPage::load(api, id).await {
                Ok(page) => page,
                Err(outcome) => return report_outcome(&outcome),
            };
            fields.apply(&mut page.form);
            report(&page.save_info(api).await)
        }
        PortfolioCmd::Save {
            id,
            fields,
            images,
            moves,
        } => {
            let mut page = match EditPortfolioPage::load(api, id).await {
                Ok(page) => page,
                Err(outcome) => return report_outcome(&outcome),
            };
            fields.apply(&mut page.form);
            if let Err(code) = read_files(&mut page.images.uploader, &images).await {
                return code;
            }
            if let Err(code) = apply_moves(&mut page.images.reorder, &moves) {
                return code;
            }
            report(&page.save_all(api).await)
        }
        PortfolioCmd::Delete { id, yes } => {
            let mut page = PortfolioListPage::new();
            match page.delete(api, id, &confirmer(yes)).await {
                Some(notice) => report(&notice),
                None => {
                    println!("Dibatalkan");
                    ExitCode::SUCCESS
                }
            }
        }
    }
}

async fn run_images(cmd: ImagesCmd, api: &ApiClient) -> ExitCode {
    let id = match &cmd {
        ImagesCmd::Upload { id, .. } | ImagesCmd::Reorder { id, .. } => *id,
        ImagesCmd::Delete { portfolio_id, .. } => *portfolio_id,
    };
    let mut page = match ImagesPage::load(api, id).await {
        Ok(page) => page,
        Err(outcome) => return report_outcome(&outcome),
    };

    match cmd {
        ImagesCmd::Upload { paths, .. } => {
            if let Err(code) = read_files(&mut page.uploader, &paths).await {
                return code;
            }
            report(&page.upload(api).await)
        }
        ImagesCmd::Delete { image_id, yes, .. } => {
            match page.delete_image(api, image_id, &confirmer(yes)).await {
                Some(notice) => report(&notice),
                None => {
                    println!("Dibatalkan");
                    ExitCode::SUCCESS
                }
            }
        }
        ImagesCmd::Reorder { moves, .. } => {
            if let Err(code) = apply_moves(&mut page.reorder, &moves) {
                return code;
            }
            if !page.reorder.is_dirty() {
                println!("Urutan tidak berubah");
                return ExitCode::SUCCESS;
            }
            report(&page.save_order(api).await)
        }
    }
}

async fn run_services(cmd: ServicesCmd, api: &ApiClient) -> ExitCode {
    let mut page = ServicesPage::new();
    if let Some(notice) = page.load(api).await {
        return report(&notice);
    }

    match cmd {
        ServicesCmd::List => {
            for s in page.list() {
                println!("#{:<4} {:<30} {}", s.id, s.title, s.description);
            }
            ExitCode::SUCCESS
        }
        ServicesCmd::Create {
            title,
            description,
            icon,
        } => {
            page.form = ServiceInput {
                title,
                description,
                icon,
            };
            report(&page.submit(api).await)
        }
        ServicesCmd::Update {
            id,
            title,
            description,
            icon,
        } => {
            let Some(existing) = page.list().iter().find(|s| s.id == id).cloned() else {
                return report(&Notice::error(format!("Layanan {id} tidak ditemukan")));
            };
            page.edit(&existing);
            if let Some(title) = title {
                page.form.title = title;
            }
            if let Some(description) = description {
                page.form.description = description;
            }
            if icon.is_some() {
                page.form.icon = icon;
            }
            report(&page.submit(api).await)
        }
        ServicesCmd::Delete { id, yes } => match page.delete(api, id, &confirmer(yes)).await {
            Some(notice) => report(&notice),
            None => {
                println!("Dibatalkan");
                ExitCode::SUCCESS
            }
        },
    }
}

async fn run_settings(cmd: SettingsCmd, api: &ApiClient) -> ExitCode {
    let mut page = SettingsPage::new();
    if let Some(notice) = page.load(api).await {
        return report(&notice);
    }
    let Some(profile) = page.profile.as_mut() else {
        return ExitCode::FAILURE;
    };

    match cmd {
        SettingsCmd::Show => {
            for field in CompanyProfile::FIELDS {
                println!("{field:<14} {}", profile.field(field).unwrap_or("-"));
            }
            ExitCode::SUCCESS
        }
        SettingsCmd::Set { pairs } => {
            for pair in &pairs {
                let Some((field, value)) = pair.split_once('=') else {
                    eprintln!("✗ Format tidak valid: {pair} (contoh: address=Jakarta)");
                    return ExitCode::FAILURE;
                };
                if !profile.set_field(field.trim(), value) {
                    eprintln!("✗ Field tidak dikenal: {field}");
                    return ExitCode::FAILURE;
                }
            }
            report(&page.save(api).await)
        }
    }
}

async fn run_showcase(id: Option<u64>, api: &ApiClient, config: &AppConfig) -> ExitCode {
    let entries = match get_public_portfolios(api).await {
        Ok(entries) => entries,
        Err(e) => return report(&Notice::from_error(&e)),
    };

    match id {
        Some(id) => match entries.iter().find(|p| p.id == id) {
            Some(entry) => {
                print_entry(entry, &config.storage_base_url);
                if let Some(tier) = entry.package_tier {
                    let info = package_info(tier);
                    println!(
                        "  {} mulai Rp {}: {}",
                        info.name,
                        format_price(info.price),
                        info.audience
                    );
                }
                ExitCode::SUCCESS
            }
            None => report(&Notice::error("Portofolio tidak ditemukan")),
        },
        None => {
            for tier in PackageTier::ALL {
                let info = package_info(tier);
                let count = entries
                    .iter()
                    .filter(|p| p.package_tier == Some(tier))
                    .count();
                println!("{} (Rp {}): {count} project", info.name, format_price(info.price));
            }
            for entry in &entries {
                print_entry(entry, &config.storage_base_url);
            }
            ExitCode::SUCCESS
        }
    }
}

async fn run_chat(
    message: Option<String>,
    clear: bool,
    config: &AppConfig,
    store: LocalStore,
) -> ExitCode {
    let session = match ChatSession::load(store) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("✗ {e}");
            return ExitCode::FAILURE;
        }
    };
    let transport = WebhookClient::new(config.http_client(), config.chat_webhook_url.clone());
    let widget = ChatWidget::new(transport, session);

    if clear {
        widget.clear();
        println!("Percakapan dihapus");
        return ExitCode::SUCCESS;
    }

    let Some(message) = message else {
        for m in widget.messages() {
            let who = match m.role {
                Role::User => "Anda",
                Role::Bot => "Mofy",
            };
            println!("{who}: {}", m.content);
        }
        return ExitCode::SUCCESS;
    };

    match widget.send(&message).await {
        SendOutcome::Replied(reply) => {
            println!("Mofy: {}", reply.content);
            ExitCode::SUCCESS
        }
        SendOutcome::Fallback(reply) => {
            eprintln!("Mofy: {}", reply.content);
            ExitCode::FAILURE
        }
        SendOutcome::Empty | SendOutcome::Busy => ExitCode::SUCCESS,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = AppConfig::from_env();
    if let Some(url) = cli.api_url {
        config = config.with_api_base(url);
    }

    let store = match LocalStore::open(&config.state_dir) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("✗ Cannot open local store in {}: {e}", config.state_dir.display());
            return ExitCode::FAILURE;
        }
    };
    let session = AuthSession::new(store.clone());
    let api = ApiClient::new(&config, session);

    match cli.command {
        Command::Login { email, password } => {
            report(&auth::submit_login(&api, &email, &password).await)
        }
        Command::Logout => report(&auth::logout(&api)),
        Command::Portfolio(cmd) => run_portfolio(cmd, &api, &config).await,
        Command::Images(cmd) => run_images(cmd, &api).await,
        Command::Services(cmd) => run_services(cmd, &api).await,
        Command::Settings(cmd) => run_settings(cmd, &api).await,
        Command::Showcase { id } => run_showcase(id, &api, &config).await,
        Command::Chat { message, clear } => run_chat(message, clear, &config, store).await,
    }
}
