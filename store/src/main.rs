// pocket-ledger entry point: builds the one record store for this process and
// hands it to the requested command.
use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use shared::models::{BillDraft, Category, CategoryKind, NewCategory};
use shared::utils::{format_amount, format_date, timestamp_to_date_time};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use store::config::StoreSettings;
use store::export::{export_bills_csv, resolve_category_name};
use store::{Clock, FileStorage, KeyValueStorage, RecordStore};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "pocket-ledger")]
#[command(about = "Keep bills and spending categories in a local data directory", long_about = None)]
struct Args {
    /// JSON settings file
    #[arg(long, env = "LEDGER_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Data directory (overrides `data_dir` from the settings file)
    #[arg(long, env = "LEDGER_DATA_DIR", global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the data directory and seed default categories
    Init,
    /// List bills, newest first
    Bills {
        /// Show creation times as MM-DD HH:MM
        #[arg(long)]
        short: bool,
    },
    /// Record a bill; it is listed first from now on
    AddBill {
        #[arg(long, allow_negative_numbers = true)]
        amount: f64,
        #[arg(long = "type", default_value = "expense")]
        kind: CategoryKind,
        #[arg(long)]
        category_id: Option<i64>,
        #[arg(long)]
        note: Option<String>,
        /// Bill date as YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Remove the bill with this id
    DeleteBill {
        id: i64,
    },
    /// List categories, optionally only one type
    Categories {
        #[arg(long = "type")]
        kind: Option<CategoryKind>,
    },
    /// Append a new category
    AddCategory {
        #[arg(long)]
        name: String,
        #[arg(long)]
        icon: String,
        #[arg(long)]
        color: String,
        #[arg(long = "type")]
        kind: CategoryKind,
    },
    /// Change fields of an existing category; omitted fields are kept
    UpdateCategory {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        icon: Option<String>,
        #[arg(long)]
        color: Option<String>,
        #[arg(long = "type")]
        kind: Option<CategoryKind>,
    },
    /// Remove every category with this id
    DeleteCategory {
        id: i64,
    },
    /// Write all bills as CSV to a file or stdout
    Export {
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = match &args.config {
        Some(path) => StoreSettings::load(path)?,
        None => StoreSettings::default(),
    };
    if let Some(dir) = args.data_dir.clone() {
        settings.data_dir = dir;
    }

    init_tracing(&settings.log_filter);
    info!(data_dir = %settings.data_dir.display(), "Opening ledger");

    let storage = FileStorage::open(&settings.data_dir)
        .with_context(|| format!("cannot open data directory '{}'", settings.data_dir.display()))?
        .with_pretty_json(settings.pretty_json);
    let mut store = RecordStore::open(storage).context("cannot initialize record store")?;

    run(args.command, &mut store)
}

fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run<S: KeyValueStorage, C: Clock>(command: Command, store: &mut RecordStore<S, C>) -> Result<()> {
    match command {
        Command::Init => {
            let categories = store.get_categories()?;
            println!("Ledger ready: {} categories, {} bills", categories.len(), store.get_bills()?.len());
        }
        Command::Bills { short } => {
            let categories = store.get_categories()?;
            for bill in store.get_bills()? {
                let details = &bill.details;
                let category = details
                    .category_id
                    .and_then(|id| resolve_category_name(&categories, id, &bill))
                    .unwrap_or("-");
                println!(
                    "{:<14} {:<19} {:<10} {:<7} {:<14} {:>12}  {}",
                    bill.id,
                    timestamp_to_date_time(bill.create_time, short),
                    details.date.as_deref().unwrap_or("-"),
                    details.kind.map(|k| k.as_str()).unwrap_or("-"),
                    category,
                    details.amount.map(format_amount).unwrap_or_default(),
                    details.note.as_deref().unwrap_or(""),
                );
            }
        }
        Command::AddBill { amount, kind, category_id, note, date } => {
            let draft = BillDraft {
                amount: Some(amount),
                kind: Some(kind),
                category_id,
                note,
                date: Some(date.unwrap_or_else(|| format_date(Some(Local::now().date_naive())))),
                ..Default::default()
            };
            let bill = store.add_bill(draft)?;
            println!("Added bill {}", bill.id);
        }
        Command::DeleteBill { id } => {
            let removed = store.delete_bill(id)?;
            println!("Removed {} bill(s)", removed);
        }
        Command::Categories { kind } => {
            let categories = match kind {
                Some(kind) => store.get_categories_of(kind)?,
                None => store.get_categories()?,
            };
            for c in categories {
                println!("{:<14} {:<7} {:<16} {:<14} {}", c.id, c.kind, c.name, c.icon, c.color);
            }
        }
        Command::AddCategory { name, icon, color, kind } => {
            let category = store.add_category(NewCategory { name, icon, color, kind })?;
            println!("Added category {} ({})", category.id, category.name);
        }
        Command::UpdateCategory { id, name, icon, color, kind } => {
            let Some(current) = store.get_categories()?.into_iter().find(|c| c.id == id) else {
                println!("No category with id {}", id);
                return Ok(());
            };
            let updated = Category {
                id,
                name: name.unwrap_or(current.name),
                icon: icon.unwrap_or(current.icon),
                color: color.unwrap_or(current.color),
                kind: kind.unwrap_or(current.kind),
            };
            store.update_category(updated)?;
            println!("Updated category {}", id);
        }
        Command::DeleteCategory { id } => {
            let removed = store.delete_category(id)?;
            println!("Removed {} categor{}", removed, if removed == 1 { "y" } else { "ies" });
        }
        Command::Export { out } => {
            let bills = store.get_bills()?;
            let categories = store.get_categories()?;
            let rows = match &out {
                Some(path) => {
                    let file = File::create(path).with_context(|| format!("cannot create '{}'", path.display()))?;
                    export_bills_csv(&bills, &categories, file)?
                }
                None => export_bills_csv(&bills, &categories, io::stdout().lock())?,
            };
            info!(rows, "Exported bills");
        }
    }
    Ok(())
}
