//! journal: command-line client for the trading journal backend
//!
//! Usage:
//!   journal trades --pair EURUSD        list trades matching a filter
//!   journal add --pair EURUSD ...       record a new trade
//!   journal close 12 1.1050             close a trade at an exit price
//!   journal stats                       dashboard figures

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context};
use chrono::Local;
use clap::{Parser, Subcommand};

use trading_journal_client::commands::{self, TagPicker};
use trading_journal_client::journal::notice;
use trading_journal_client::journal::{MonthSelector, NoticeLevel, RiskPanel};
use trading_journal_client::models::{RegisterInput, ScreenshotKind, TradeForm};
use trading_journal_client::{AppState, ClientConfig, HttpJournalClient, JournalApi, Notice, TradeFilter};

#[derive(Parser)]
#[command(name = "journal")]
#[command(about = "Command-line client for the trading journal", long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the backend is reachable
    Health,
    /// Show the logged-in user
    Whoami,
    /// Create an account and log in
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        full_name: Option<String>,
    },
    /// End the session
    Logout,
    /// List trades, optionally filtered
    Trades {
        /// Text to look for in pair, notes or setup
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value = "")]
        pair: String,
        #[arg(long, default_value = "")]
        session: String,
        #[arg(long, default_value = "")]
        setup: String,
        /// Also print the pairs and setups available as filter values
        #[arg(long)]
        options: bool,
    },
    /// Record a new trade
    Add(AddArgs),
    /// Close an open trade
    Close {
        trade_id: i64,
        /// Exit price
        exit_price: String,
    },
    /// Delete a trade
    Delete {
        trade_id: i64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// List the mistake tags
    Tags,
    /// Manage tags on trades
    Tag {
        #[command(subcommand)]
        action: TagAction,
    },
    /// Dashboard statistics
    Stats,
    /// Monthly performance report
    Report {
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        month: Option<u32>,
    },
    /// Download all trades as CSV
    Export {
        /// Target directory (defaults to JOURNAL_EXPORT_DIR)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    /// Attach or fetch chart screenshots
    Screenshot {
        #[command(subcommand)]
        action: ScreenshotAction,
    },
    /// Risk/reward calculator for the entry form
    Calc {
        #[arg(long, allow_hyphen_values = true)]
        entry: String,
        #[arg(long, allow_hyphen_values = true)]
        sl: String,
        #[arg(long, allow_hyphen_values = true)]
        tp: String,
    },
}

#[derive(clap::Args)]
struct AddArgs {
    #[arg(long)]
    pair: String,
    #[arg(long)]
    session: String,
    #[arg(long, default_value = "H1")]
    timeframe: String,
    #[arg(long)]
    setup: String,
    /// buy or sell
    #[arg(long = "type")]
    trade_type: String,
    #[arg(long, allow_hyphen_values = true)]
    entry: String,
    #[arg(long, allow_hyphen_values = true)]
    sl: String,
    #[arg(long, allow_hyphen_values = true)]
    tp: String,
    #[arg(long)]
    size: String,
    /// 1-5
    #[arg(long, default_value = "")]
    confidence: String,
    #[arg(long, default_value = "")]
    emotion: String,
    /// The trade followed the plan's rules
    #[arg(long)]
    rule_followed: bool,
    #[arg(long, default_value = "")]
    notes: String,
    /// Chart image to upload as the "before" screenshot
    #[arg(long)]
    screenshot: Option<PathBuf>,
}

#[derive(Subcommand)]
enum TagAction {
    /// Attach a tag (id or name) to a trade
    Add { trade_id: i64, tag: String },
    /// Detach a tag (id or name) from a trade
    Remove { trade_id: i64, tag: String },
    /// Add a tag to the catalogue
    Create {
        name: String,
        #[arg(long)]
        color: Option<String>,
    },
}

#[derive(Subcommand)]
enum ScreenshotAction {
    /// Upload an image file
    Upload {
        trade_id: i64,
        /// before or after
        kind: ScreenshotKind,
        path: PathBuf,
    },
    /// Have the backend capture a chart URL
    Capture {
        trade_id: i64,
        kind: ScreenshotKind,
        url: String,
    },
    /// Download a stored screenshot
    Get {
        filename: String,
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_target(false)
        .init();
}

fn show(notice: Option<Notice>) {
    match notice {
        Some(n) if n.level == NoticeLevel::Error => eprintln!("{}", n),
        Some(n) => println!("{}", n),
        None => {}
    }
}

fn confirm(question: &str) -> io::Result<bool> {
    print!("{} [y/N] ", question);
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

fn print_risk(entry: &str, sl: &str, tp: &str) {
    let mut panel = RiskPanel::default();
    panel.recalculate(entry, sl, tp);
    println!("R:R   1:{}", panel.rr.trim_start_matches("1:"));
    println!("Risk  {}", panel.risk_pct.as_deref().unwrap_or("-"));
}

/// Commands that work without a session
fn is_public(command: &Commands) -> bool {
    matches!(command, Commands::Health | Commands::Calc { .. } | Commands::Register { .. })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Commands::Calc { entry, sl, tp } = &cli.command {
        print_risk(entry, sl, tp);
        return Ok(());
    }

    let config = ClientConfig::from_env().context("Invalid configuration")?;
    let client = HttpJournalClient::new(&config).context("Failed to build HTTP client")?;
    let api: &dyn JournalApi = &client;
    let mut state = AppState::new();

    if !is_public(&cli.command) {
        match config.credentials() {
            Some(credentials) => commands::login(api, &credentials)
                .await
                .context("Login failed")?,
            None => log::warn!("JOURNAL_EMAIL/JOURNAL_PASSWORD not set, requests will be anonymous"),
        }
    }

    run(cli.command, api, &mut state, &config).await
}

async fn run(command: Commands, api: &dyn JournalApi, state: &mut AppState, config: &ClientConfig) -> anyhow::Result<()> {
    match command {
        Commands::Health => {
            show(commands::check_connection(api, state).await);
            if state.is_online() {
                println!("🟢 Backend reachable at {}", api.base_url());
            } else {
                bail!("Backend unreachable at {}", api.base_url());
            }
        }
        Commands::Whoami => {
            let user = commands::current_user(api).await.context("Not logged in")?;
            match user.full_name {
                Some(name) => println!("{} <{}>", name, user.email),
                None => println!("{}", user.email),
            }
            if let Some(plan) = user.plan {
                println!("Plan: {}", plan);
            }
        }
        Commands::Register {
            email,
            password,
            full_name,
        } => {
            let input = RegisterInput {
                email,
                password,
                full_name,
            };
            commands::register(api, &input).await.context("Registration failed")?;
            println!("✅ Account created for {}", input.email);
        }
        Commands::Logout => {
            commands::logout(api).await.context("Logout failed")?;
            println!("Logged out");
        }
        Commands::Trades {
            search,
            pair,
            session,
            setup,
            options,
        } => {
            state.set_filter(TradeFilter {
                search,
                pair,
                session,
                setup,
            });
            let view = commands::load_trades(api, state).await.context("Failed to load trades")?;
            print!("{}", view);
            if !state.filter.is_empty() {
                println!("\nShowing {} of {} trades", view.len(), state.trades().len());
            }
            if options {
                let available = state.filter_options();
                println!("Pairs:  {}", available.pairs.join(", "));
                println!("Setups: {}", available.setups.join(", "));
            }
        }
        Commands::Add(args) => {
            print_risk(&args.entry, &args.sl, &args.tp);
            let form = TradeForm {
                pair: args.pair,
                session: args.session,
                timeframe: args.timeframe,
                setup_type: args.setup,
                trade_type: args.trade_type,
                entry_price: args.entry,
                stop_loss: args.sl,
                take_profit: args.tp,
                position_size: args.size,
                confidence: args.confidence,
                emotion_before: args.emotion,
                rule_followed: args.rule_followed,
                notes: args.notes,
            };
            let result = commands::create_trade(api, state, &form, args.screenshot.as_deref()).await;
            show(notice::trade_created(&result));
            if let Ok(trade_id) = result {
                println!("Trade id {}", trade_id);
            }
        }
        Commands::Close { trade_id, exit_price } => {
            let result = commands::close_trade(api, state, trade_id, &exit_price).await;
            show(notice::trade_closed(&result));
        }
        Commands::Delete { trade_id, yes } => {
            if !yes && !confirm("Are you sure you want to delete this trade?")? {
                return Ok(());
            }
            let result = commands::delete_trade(api, state, trade_id).await;
            show(notice::trade_deleted(&result));
        }
        Commands::Tags => {
            commands::load_tags(api, state).await.context("Failed to load tags")?;
            for tag in state.tags() {
                println!("{:>4}  {:<24} {}", tag.id, tag.name, tag.color);
            }
        }
        Commands::Tag { action } => match action {
            TagAction::Add { trade_id, tag } => set_tag(api, state, trade_id, &tag, true).await?,
            TagAction::Remove { trade_id, tag } => set_tag(api, state, trade_id, &tag, false).await?,
            TagAction::Create { name, color } => {
                let tag_id = commands::create_tag(api, state, &name, color.as_deref())
                    .await
                    .context("Failed to create tag")?;
                println!("Created tag {} ({})", name.trim(), tag_id);
            }
        },
        Commands::Stats => {
            let view = commands::load_dashboard(api).await.context("Failed to load statistics")?;
            print!("{}", view);
        }
        Commands::Report { year, month } => {
            let selector = MonthSelector::for_date(Local::now().date_naive());
            let year = year.unwrap_or(selector.selected_year);
            let month = month.unwrap_or(selector.selected_month);
            let view = commands::load_monthly_report(api, year, month)
                .await
                .context("Failed to load report")?;
            print!("{}", view);
        }
        Commands::Export { dir } => {
            let dir = dir.unwrap_or_else(|| config.export_dir.clone());
            let result = commands::export_csv(api, &dir, Local::now().date_naive()).await;
            show(Some(notice::exported(&result)));
            if let Ok(summary) = result {
                println!("{} trades written to {}", summary.rows, summary.path.display());
            }
        }
        Commands::Screenshot { action } => match action {
            ScreenshotAction::Upload { trade_id, kind, path } => {
                let response = commands::upload_screenshot(api, trade_id, kind, &path)
                    .await
                    .context("Upload failed")?;
                if let Some(filename) = response.filename {
                    println!("{}", commands::screenshot_url(api, &filename));
                }
            }
            ScreenshotAction::Capture { trade_id, kind, url } => {
                let response = commands::capture_screenshot(api, trade_id, kind, &url)
                    .await
                    .context("Capture failed")?;
                if let Some(filename) = response.filename {
                    println!("{}", commands::screenshot_url(api, &filename));
                }
            }
            ScreenshotAction::Get { filename, dir } => {
                let path = commands::download_screenshot(api, &filename, &dir)
                    .await
                    .context("Download failed")?;
                println!("Saved {}", path.display());
            }
        },
        Commands::Calc { entry, sl, tp } => print_risk(&entry, &sl, &tp),
    }

    Ok(())
}

/// Bring one tag on a trade to the wanted state through the picker
async fn set_tag(api: &dyn JournalApi, state: &mut AppState, trade_id: i64, key: &str, attach: bool) -> anyhow::Result<()> {
    let mut picker: TagPicker = commands::open_tag_picker(api, state, trade_id)
        .await
        .context("Failed to load tags")?;
    let Some(tag) = picker.find(key).cloned() else {
        bail!("No tag named '{}'", key);
    };

    if picker.is_selected(tag.id) == attach {
        println!("Trade {} already {} '{}'", trade_id, if attach { "has" } else { "lacks" }, tag.name);
        return Ok(());
    }
    commands::toggle_tag(api, &mut picker, tag.id)
        .await
        .with_context(|| format!("Failed to update tag '{}'", tag.name))?;

    let view = commands::close_tag_picker(api, state).await.context("Failed to reload trades")?;
    log::debug!("{} trades after tag update", view.len());
    match state.trade(trade_id) {
        Some(trade) => {
            let names: Vec<&str> = trade.tags.iter().map(|t| t.name.as_str()).collect();
            println!("Trade {} tags: {}", trade_id, if names.is_empty() { "-".to_string() } else { names.join(", ") });
        }
        None => println!("Trade {} not in the list", trade_id),
    }
    Ok(())
}
