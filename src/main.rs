mod app;
mod config;
mod download;
mod engine;
mod error;
mod format;
mod links;
mod logging;
mod query;
mod recommend;
mod selection;
mod stats;
mod taxonomy;
mod ui;

use app::{App, Focus};
use clap::{Args, Parser, Subcommand};
use config::Configuration;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use error::ExplorerError;
use query::QueryParams;
use recommend::RecommendationIndex;
use stats::InstanceStats;
use std::io::Write;
use std::path::PathBuf;
use ui::menu::{MenuResult, Selector};

/// Browse federated Lemmy instances by topic, language and activity
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Instance stats JSON produced by the crawler
    #[arg(long, global = true)]
    stats: Option<PathBuf>,

    /// Download stats from this URL when the stats file is missing
    #[arg(long, global = true)]
    stats_url: Option<String>,

    /// JSON file replacing the built-in recommendation table
    #[arg(long, global = true)]
    recommendations: Option<PathBuf>,

    /// Seed for the random sort order
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Debug-level logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(flatten)]
    selection: SelectionArgs,
}

/// Initial filter and sort. Individual flags override `--query`.
#[derive(Args, Clone, Default)]
struct SelectionArgs {
    /// Page URL or query string, e.g. "sort=most_active&topic=tech"
    #[arg(long)]
    query: Option<String>,

    /// random, most_active or least_active
    #[arg(long)]
    sort: Option<String>,

    /// Topic name, e.g. tech
    #[arg(long)]
    topic: Option<String>,

    /// Language code, e.g. de
    #[arg(long)]
    language: Option<String>,

    /// Start with the filter bar focused
    #[arg(long)]
    scroll: bool,
}

impl SelectionArgs {
    fn to_params(&self) -> QueryParams {
        let mut params = self
            .query
            .as_deref()
            .map(QueryParams::parse)
            .unwrap_or_default();
        if let Some(ref s) = self.sort {
            params.set("sort", s.as_str());
        }
        if let Some(ref t) = self.topic {
            params.set("topic", t.as_str());
        }
        if let Some(ref l) = self.language {
            params.set("language", l.as_str());
        }
        if self.scroll {
            params.set("scroll", "true");
        }
        params
    }
}

impl SelectionArgs {
    /// Fill the fields left unset here from `outer`.
    fn or(self, outer: SelectionArgs) -> Self {
        Self {
            query: self.query.or(outer.query),
            sort: self.sort.or(outer.sort),
            topic: self.topic.or(outer.topic),
            language: self.language.or(outer.language),
            scroll: self.scroll || outer.scroll,
        }
    }
}

impl Cli {
    /// The command to run. Selection flags given before the subcommand
    /// apply unless the subcommand sets the same flag.
    fn take_command(&mut self) -> Commands {
        let outer = std::mem::take(&mut self.selection);
        match self.command.take() {
            None => Commands::Run { selection: outer },
            Some(Commands::Run { selection }) => Commands::Run {
                selection: selection.or(outer),
            },
            Some(Commands::List { selection, json }) => Commands::List {
                selection: selection.or(outer),
                json,
            },
            Some(Commands::Topics) => Commands::Topics,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run the TUI explorer (default)
    Run {
        #[command(flatten)]
        selection: SelectionArgs,
    },
    /// Print the filtered, sorted list and exit
    List {
        #[command(flatten)]
        selection: SelectionArgs,
        /// One JSON object per line instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Print the known topics, sorts and languages
    Topics,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut cli = Cli::parse();
    let command = cli.take_command();

    let cache_dir = config::project_dirs()
        .ok()
        .map(|d| d.cache_dir().to_path_buf());
    let target = match command {
        Commands::Run { .. } => logging::LogTarget::File,
        _ => logging::LogTarget::Stderr,
    };
    logging::init(target, cli.verbose, cache_dir.as_deref());

    if let Commands::Topics = command {
        print_taxonomy();
        return Ok(());
    }

    let result = load_inputs(cli.stats, cli.stats_url, cli.recommendations).await;

    let (stats, recommendations) = match result {
        Ok(loaded) => loaded,
        Err(e) => {
            tracing::error!(error = %e, "startup failed");
            eprintln!("Error: {}", e.user_message());
            std::process::exit(1);
        }
    };

    let mut app = match cli.seed {
        Some(seed) => App::seeded(stats, recommendations, seed),
        None => App::new(stats, recommendations),
    };

    match command {
        Commands::List { selection, json } => {
            app.mount(&selection.to_params());
            print_list(&app, json)?;
        }
        Commands::Run { selection } => {
            // Init terminal
            let mut terminal = ratatui::init();

            let size = terminal.size()?;
            app.resize(size.width, size.height);
            app.mount(&selection.to_params());

            let result = run_app(&mut terminal, &mut app);

            // Restore terminal
            ratatui::restore();

            if let Err(e) = result {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        Commands::Topics => {}
    }

    Ok(())
}

/// Resolve paths from flags and config, then load stats and recommendations.
async fn load_inputs(
    stats: Option<PathBuf>,
    stats_url: Option<String>,
    recommendations: Option<PathBuf>,
) -> Result<(InstanceStats, RecommendationIndex), ExplorerError> {
    let configuration = Configuration::load()?;
    let stats_path = match stats {
        Some(p) => p,
        None => configuration.resolved_stats_path()?,
    };
    let stats_url = stats_url.or(configuration.stats_url);
    let stats = download::load_stats(&stats_path, stats_url.as_deref()).await?;
    let recommendations = match recommendations.or(configuration.recommendations_path) {
        Some(p) => RecommendationIndex::load(&p)?,
        None => RecommendationIndex::builtin(),
    };
    tracing::debug!(entries = recommendations.entries().len(), "recommendation index ready");
    Ok((stats, recommendations))
}

fn print_taxonomy() {
    println!("Topics:");
    for topic in taxonomy::Topic::ALL {
        println!("  {:<18} {}", topic.name(), topic.label());
    }
    println!("Sorts:");
    for sort in taxonomy::SortMode::ALL {
        println!("  {:<18} {}", sort.name(), sort.label());
    }
    println!("Languages:");
    for language in taxonomy::LANGUAGES {
        println!("  {:<18} {}", language.code, language.name);
    }
}

fn print_list(app: &App, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if app.displayed.is_empty() {
        eprintln!("No servers found. Try without --topic/--language.");
        return Ok(());
    }
    for instance in app.displayed_instances() {
        if json {
            let line = serde_json::json!({
                "domain": instance.domain,
                "url": instance.join_url(),
                "users": instance.counts.users,
                "comments": instance.counts.comments,
                "users_active_month": instance.counts.users_active_month,
            });
            writeln!(out, "{}", line)?;
        } else {
            writeln!(
                out,
                "{:<28} {:>10} {:>12} {:>10}/mo  {}",
                instance.domain,
                format::with_separators(instance.counts.users),
                format::with_separators(instance.counts.comments),
                format::with_separators(instance.counts.users_active_month),
                instance.join_url(),
            )?;
        }
    }
    Ok(())
}

fn run_app(
    terminal: &mut ratatui::DefaultTerminal,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| ui::render(app, frame))?;

        if app.should_quit {
            return Ok(());
        }

        // Poll for events with a 250ms timeout
        if event::poll(std::time::Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    handle_key(app, key);
                }
                Event::Resize(width, height) => {
                    app.resize(width, height);
                }
                _ => {}
            }
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Ctrl+C always quits
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    // If help is showing, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    if let Some(ref mut menu) = app.menu {
        match menu.handle_key(key) {
            Some(MenuResult::Chosen { selector, value }) => {
                app.menu = None;
                app.apply_choice(selector, &value);
            }
            Some(MenuResult::Cancel) => {
                app.menu = None;
            }
            None => {}
        }
        return;
    }

    if key.code == KeyCode::Char('?') {
        app.show_help = true;
        return;
    }

    if app.details.is_some() {
        handle_details_key(app, key);
        return;
    }

    // Shortcuts available from both list and filter bar
    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('t') => {
            app.open_menu(Selector::Topic);
            return;
        }
        KeyCode::Char('l') => {
            app.open_menu(Selector::Language);
            return;
        }
        KeyCode::Char('s') => {
            app.open_menu(Selector::Sort);
            return;
        }
        KeyCode::Char('a') if app.displayed.is_empty() => {
            app.reset_all();
            return;
        }
        KeyCode::Tab | KeyCode::BackTab => {
            app.toggle_focus();
            return;
        }
        _ => {}
    }

    match app.focus {
        Focus::List => handle_list_key(app, key),
        Focus::Filters => handle_filter_bar_key(app, key),
    }
}

fn handle_list_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => app.list_next(),
        KeyCode::Up | KeyCode::Char('k') => app.list_prev(),
        KeyCode::PageDown => app.list_page_down(),
        KeyCode::PageUp => app.list_page_up(),
        KeyCode::Char('g') => app.list_first(),
        KeyCode::Char('G') => app.list_last(),
        KeyCode::Enter => app.open_details(),
        KeyCode::Char('o') => app.open_join_link(),
        KeyCode::Char('y') => app.yank_join_link(),
        _ => {}
    }
}

fn handle_filter_bar_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Left => {
            app.active_selector = app.active_selector.prev();
        }
        KeyCode::Right => {
            app.active_selector = app.active_selector.next();
        }
        KeyCode::Enter | KeyCode::Down | KeyCode::Char(' ') => {
            app.open_menu(app.active_selector);
        }
        KeyCode::Esc => {
            app.focus = Focus::List;
        }
        _ => {}
    }
}

fn handle_details_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Enter => app.close_details(),
        KeyCode::Down | KeyCode::Char('j') => app.scroll_down(),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_up(),
        KeyCode::PageDown => app.scroll_page_down(),
        KeyCode::PageUp => app.scroll_page_up(),
        KeyCode::Char('o') => app.open_join_link(),
        KeyCode::Char('y') => app.yank_join_link(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::{sample_recommendations, sample_stats};
    use crate::taxonomy::{SortMode, Topic};

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn mounted(query: &str) -> App {
        let mut app = App::seeded(sample_stats(5), sample_recommendations(), 2);
        app.update_page_size(40);
        app.mount(&QueryParams::parse(query));
        app
    }

    #[test]
    fn test_selection_flags_override_query() {
        let args = SelectionArgs {
            query: Some("sort=least_active&topic=gaming".into()),
            sort: Some("most_active".into()),
            topic: None,
            language: Some("de".into()),
            scroll: true,
        };
        let s = query::resolve(&args.to_params());
        assert_eq!(s.sort, SortMode::MostActive);
        assert_eq!(s.topic, Topic::Gaming);
        assert_eq!(s.language, "de");
        assert!(s.scroll);
    }

    fn parsed_selection(args: &[&str]) -> crate::selection::Selection {
        let mut cli = Cli::try_parse_from(args).unwrap();
        match cli.take_command() {
            Commands::Run { selection } | Commands::List { selection, .. } => {
                query::resolve(&selection.to_params())
            }
            Commands::Topics => panic!("expected a selection"),
        }
    }

    #[test]
    fn test_flags_before_subcommand_apply() {
        let s = parsed_selection(&["instance-explorer", "--sort", "most_active", "list"]);
        assert_eq!(s.sort, SortMode::MostActive);

        let s = parsed_selection(&["instance-explorer", "--topic", "tech", "--scroll", "run"]);
        assert_eq!(s.topic, Topic::Tech);
        assert!(s.scroll);
    }

    #[test]
    fn test_subcommand_flags_take_precedence() {
        let s = parsed_selection(&[
            "instance-explorer",
            "--sort",
            "most_active",
            "--language",
            "de",
            "list",
            "--sort",
            "least_active",
            "--json",
        ]);
        assert_eq!(s.sort, SortMode::LeastActive);
        assert_eq!(s.language, "de");
    }

    #[test]
    fn test_no_subcommand_runs_with_top_level_flags() {
        let mut cli = Cli::try_parse_from(["instance-explorer", "--query", "topic=gaming"]).unwrap();
        match cli.take_command() {
            Commands::Run { selection } => {
                assert_eq!(query::resolve(&selection.to_params()).topic, Topic::Gaming);
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_sort_menu_via_keys() {
        let mut app = mounted("");
        press(&mut app, KeyCode::Char('s'));
        assert!(app.menu.is_some());
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert!(app.menu.is_none());
        assert_eq!(app.selection.sort, SortMode::MostActive);
        assert_eq!(app.selected_instance().unwrap().domain, "server4.example");
    }

    #[test]
    fn test_filter_bar_navigation() {
        let mut app = mounted("scroll=1");
        assert_eq!(app.focus, Focus::Filters);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.active_selector, Selector::Language);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.menu.as_ref().unwrap().selector(), Selector::Language);
        press(&mut app, KeyCode::Esc);
        assert!(app.menu.is_none());
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.focus, Focus::List);
    }

    #[test]
    fn test_see_all_from_empty_state() {
        let mut app = mounted("topic=furry&sort=least_active");
        assert!(app.displayed.is_empty());
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.displayed.len(), 5);
        assert_eq!(app.selection.sort, SortMode::Random);
    }

    #[test]
    fn test_see_all_only_when_empty() {
        let mut app = mounted("sort=most_active&topic=tech");
        assert_eq!(app.displayed.len(), 1);
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.selection.topic, Topic::Tech);
        assert_eq!(app.selection.sort, SortMode::MostActive);
    }

    #[test]
    fn test_details_toggle() {
        let mut app = mounted("sort=most_active");
        press(&mut app, KeyCode::Enter);
        assert!(app.details.is_some());
        // List keys are captured by the modal
        press(&mut app, KeyCode::Char('s'));
        assert!(app.menu.is_none());
        press(&mut app, KeyCode::Esc);
        assert!(app.details.is_none());
    }

    #[test]
    fn test_help_closes_on_any_key() {
        let mut app = mounted("");
        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.show_help);
        assert!(!app.should_quit);
    }
}
