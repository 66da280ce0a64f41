// folio binary.
// Parses arguments, wires the GitHub client and cache store, and runs the TUI.

use std::io;
use std::panic;
use std::path::PathBuf;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use folio::app::App;
use folio::cache::{FileStore, MemoryStore};
use folio::config::{self, Config};
use folio::error::Result;
use folio::github::GitHubClient;
use folio::logging;
use folio::state::{CacheOptions, RepoCache, RepoCacheHandle};
use folio::ui::Theme;

#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(about = "Portfolio with a cached live list of a GitHub account's repositories")]
#[command(version)]
struct Args {
    /// GitHub account to list (default: $FOLIO_GITHUB_USERNAME, then JFMGDB)
    #[arg(short, long)]
    account: Option<String>,

    /// Directory for the repository cache file
    #[arg(long)]
    cache_dir: Option<PathBuf>,

    /// GitHub API base URL
    #[arg(long)]
    api_base: Option<String>,

    /// Keep the repository cache in memory only
    #[arg(long)]
    no_cache: bool,

    /// Disable the log file
    #[arg(long)]
    no_log: bool,

    /// Start with the light theme
    #[arg(long)]
    light: bool,
}

impl Args {
    fn into_config(self, base: Config) -> Config {
        Config {
            account: match self.account {
                Some(account) => config::account_or_default(Some(account)),
                None => base.account,
            },
            api_base: self.api_base.unwrap_or(base.api_base),
            cache_dir: if self.no_cache {
                None
            } else {
                self.cache_dir.or(base.cache_dir)
            },
            log_dir: if self.no_log { None } else { base.log_dir },
            ..base
        }
    }
}

/// Sets up a panic hook that restores the terminal before printing the panic message.
fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));
}

fn spawn_cache(config: &Config, client: GitHubClient) -> RepoCacheHandle {
    let options = CacheOptions {
        account: config.account.clone(),
        expiration_window: config.expiration_window,
    };

    match &config.cache_dir {
        Some(dir) => RepoCache::spawn(client, FileStore::new(dir), options),
        None => RepoCache::spawn(client, MemoryStore::new(), options),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let theme = if args.light {
        Theme::Light
    } else {
        Theme::Dark
    };
    let config = args.into_config(Config::from_env());

    let _log_guard = match &config.log_dir {
        Some(dir) => Some(logging::init(dir)?),
        None => None,
    };
    tracing::info!(account = %config.account, cache_dir = ?config.cache_dir, "starting folio");

    let client = GitHubClient::with_options(
        &config.api_base,
        config.token.as_deref(),
        config.request_timeout,
    )?;
    let cache = spawn_cache(&config, client);
    let mut app = App::new(cache, config.account.clone(), theme);

    setup_panic_hook();
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = app.run(&mut terminal);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    result?;
    Ok(())
}
