use std::fs;
use std::process::ExitCode;

use crossterm::event::EnableMouseCapture;
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, enable_raw_mode};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use sshman::{App, ConnectionStore, Result, init_panic_hook, init_tracing, restore_tui};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let _ = restore_tui();
            eprintln!("sshman: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let config_path = ConnectionStore::default_config_path()?;
    if let Some(dir) = config_path.parent() {
        fs::create_dir_all(dir)?;
        init_tracing(dir, "info")?;
    }
    init_panic_hook();

    // An unreadable document is reported in the UI but does not prevent
    // startup; the store stays empty until the file is fixed.
    let (store, load_error) = match ConnectionStore::with_path(&config_path) {
        Ok(store) => (store, None),
        Err(e) => (ConnectionStore::empty_at(&config_path), Some(e)),
    };

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(store);
    if let Some(e) = load_error {
        app.set_error(e);
    }

    let result = app.run(&mut terminal);

    restore_tui()?;
    result
}
