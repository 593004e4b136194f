pub mod app;
pub mod event;
pub mod theme;
pub mod ui;

pub use app::App;
pub use theme::{resolve_theme, ThemeColors};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use event::{Event, EventHandler};

pub async fn run_tui(mut app: App) -> anyhow::Result<()> {
    // Buffer stderr while TUI is active to prevent output corrupting the display
    crate::stderr_buffer::activate();

    // Init terminal (sets up panic hooks automatically)
    let mut terminal = ratatui::init();

    let mut events = EventHandler::new(250);

    let result = async {
        loop {
            terminal.draw(|frame| ui::draw(frame, &app))?;

            match events.next().await {
                Event::Key(key) => handle_key_event(&mut app, key),
                Event::Resize => {}
                Event::Tick => app.update_flash(),
            }

            if app.should_quit {
                break;
            }
        }
        anyhow::Ok(())
    }
    .await;

    // Restore terminal
    ratatui::restore();

    // Flush buffered stderr messages now that the terminal is restored
    for msg in crate::stderr_buffer::drain() {
        eprintln!("{}", msg);
    }

    result
}

fn handle_key_event(app: &mut App, key: KeyEvent) {
    match app.input_mode {
        app::InputMode::Normal => {
            match key.code {
                // Quit
                KeyCode::Char('q') => app.should_quit = true,
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    app.should_quit = true
                }

                // Field navigation
                KeyCode::Char('j') | KeyCode::Down | KeyCode::Tab => app.next_field(),
                KeyCode::Char('k') | KeyCode::Up | KeyCode::BackTab => app.previous_field(),

                // Value adjustment
                KeyCode::Char('l') | KeyCode::Right => app.increase(),
                KeyCode::Char('h') | KeyCode::Left => app.decrease(),
                KeyCode::Char(' ') | KeyCode::Enter => app.activate_field(),

                KeyCode::Char('r') => app.reset(),

                // Overlays
                KeyCode::Char('e') => app.show_logic(),
                KeyCode::Char('?') => app.show_help(),

                _ => {}
            }
        }
        app::InputMode::Help | app::InputMode::Logic => {
            // Any key closes the overlay
            app.dismiss_overlay();
        }
    }
}
