use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    fs::File,
    io,
    path::{Path, PathBuf},
    sync::Mutex,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use put::{App, Args, Editor, ui};

type Term = Terminal<CrosstermBackend<io::Stdout>>;

/// Runs the event loop. Returns the paths still selected at exit.
fn run_app(terminal: &mut Term, mut app: App) -> io::Result<Vec<PathBuf>> {
    loop {
        terminal.draw(|f| ui::ui(f, &mut app))?;

        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press {
                // Clear status message on any key press
                app.status_message = None;

                match (key.code, key.modifiers) {
                    // Raw mode delivers interrupt and suspend as keys; both exit cleanly
                    (KeyCode::Char('c'), KeyModifiers::CONTROL)
                    | (KeyCode::Char('z'), KeyModifiers::CONTROL) => break,
                    (KeyCode::Char('q'), _) | (KeyCode::Char('Q'), _) | (KeyCode::Esc, _) if !app.show_help => break,
                    (KeyCode::Esc, _) => app.show_help = false,
                    (KeyCode::Char('?'), _) => app.show_help = !app.show_help,
                    _ if app.show_help => app.show_help = false, // Any key closes help
                    // Navigation
                    (KeyCode::Down, _) | (KeyCode::Char('j'), _) => app.next(),
                    (KeyCode::Up, _) | (KeyCode::Char('k'), _) => app.previous(),
                    (KeyCode::Char('d'), KeyModifiers::CONTROL) | (KeyCode::PageDown, _) => app.page_down(),
                    (KeyCode::Char('u'), KeyModifiers::CONTROL) | (KeyCode::PageUp, _) => app.page_up(),
                    (KeyCode::Char('g'), _) | (KeyCode::Home, _) => app.go_to_first(),
                    (KeyCode::Char('G'), _) | (KeyCode::End, _) => app.go_to_last(),
                    (KeyCode::Right, _) | (KeyCode::Char('l'), _) => app.enter_dir(),
                    (KeyCode::Backspace, _) | (KeyCode::Left, _) | (KeyCode::Char('h'), _) => app.go_up(),
                    // Actions
                    (KeyCode::Enter, _) => app.select_focused(),
                    (KeyCode::F(1), _) => app.unselect_focused(),
                    (KeyCode::Char('d'), _) | (KeyCode::Char('D'), _) => app.delete_selected(),
                    (KeyCode::Char('e'), _) | (KeyCode::Char('E'), _) => invoke_editor(terminal, &mut app)?,
                    (KeyCode::Char('r'), _) | (KeyCode::Char('R'), _) => app.refresh(),
                    _ => {}
                }
            }
    }
    Ok(app.model.selected_paths())
}

/// Hands the terminal to the editor and takes it back once the editor exits.
fn invoke_editor(terminal: &mut Term, app: &mut App) -> io::Result<()> {
    let Some(path) = app.focused_path() else {
        return Ok(());
    };
    suspend_terminal(terminal)?;
    let result = app.editor.edit(&path);
    resume_terminal(terminal)?;
    if let Err(e) = result {
        warn!("{}", e);
        app.status_message = Some(e.to_string());
    }
    Ok(())
}

fn suspend_terminal(terminal: &mut Term) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}

fn resume_terminal(terminal: &mut Term) -> io::Result<()> {
    enable_raw_mode()?;
    execute!(terminal.backend_mut(), EnterAlternateScreen)?;
    terminal.clear()
}

fn setup_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Attempt to restore terminal state
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));
}

/// Logs go to a file only; the terminal belongs to the UI.
fn init_logging(log_file: Option<&Path>) -> io::Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("PUT_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;

    let editor = Editor::from_env();
    info!("Starting in {} with editor {}", args.dir.display(), editor.command());
    let app = App::new(&args.dir, editor)?;

    // Setup panic hook before entering raw mode
    setup_panic_hook();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    match res {
        Ok(selected) => {
            for path in selected {
                println!("{}", path.display());
            }
        }
        Err(err) => println!("{:?}", err),
    }

    Ok(())
}
