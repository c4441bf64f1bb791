use std::io;
use std::process::{Child, Command};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use artduel_client::RelayClient;
use artduel_tui::App;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

const DEFAULT_PORT: u16 = 3701;
const DEFAULT_URL: &str = "http://127.0.0.1:3701";

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    // Parse CLI: artduel [--relay URL]
    // No args → spawn artduel-relay locally then run the TUI
    // --relay URL → connect to an existing relay
    let (relay_url, mut child) = if let Some(pos) = args.iter().position(|a| a == "--relay") {
        let url = args
            .get(pos + 1)
            .context("--relay requires a URL argument")?;
        (url.clone(), None)
    } else {
        let child = spawn_relay()?;
        (DEFAULT_URL.to_string(), Some(child))
    };

    let result = wait_for_relay(&relay_url).and_then(|()| run_tui(&relay_url));

    // Cleanup: kill the relay if we spawned it
    if let Some(ref mut child) = child {
        let _ = child.kill();
        let _ = child.wait();
    }

    result
}

fn spawn_relay() -> Result<Child> {
    // Look for the artduel-relay binary next to our own binary first,
    // then fall back to PATH
    let self_exe = std::env::current_exe().unwrap_or_default();
    let sibling = self_exe.parent().map(|d| d.join("artduel-relay"));

    let relay_bin = if sibling.as_ref().is_some_and(|p| p.exists()) {
        sibling.unwrap()
    } else {
        "artduel-relay".into()
    };

    let child = Command::new(&relay_bin)
        .env("ARTDUEL_BIND", "127.0.0.1")
        .env("ARTDUEL_PORT", DEFAULT_PORT.to_string())
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::piped())
        .spawn()
        .with_context(|| format!("failed to start {}", relay_bin.display()))?;

    Ok(child)
}

fn wait_for_relay(relay_url: &str) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    let client = RelayClient::new(relay_url);
    let start = Instant::now();
    let timeout = Duration::from_secs(10);

    loop {
        if rt.block_on(client.health_check()).is_ok() {
            return Ok(());
        }
        if start.elapsed() > timeout {
            bail!(
                "artduel-relay did not become ready within {}s",
                timeout.as_secs()
            );
        }
        thread::sleep(Duration::from_millis(50));
    }
}

fn run_tui(relay_url: &str) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, relay_url);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        eprintln!("Error: {e}");
    }

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    relay_url: &str,
) -> Result<()> {
    let mut app = App::new(relay_url);

    loop {
        terminal.draw(|frame| app.render(frame))?;

        // Tick while a run is in flight so the stage updates draw;
        // block on input otherwise.
        if app.needs_polling() {
            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if should_quit(&key) {
                        break;
                    }
                    app.handle_key(key);
                }
            } else {
                app.reap_run();
            }
        } else if let Event::Key(key) = event::read()? {
            if should_quit(&key) {
                break;
            }
            app.handle_key(key);
        }
    }

    Ok(())
}

fn should_quit(key: &event::KeyEvent) -> bool {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }
    matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
}
