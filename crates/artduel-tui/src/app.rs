use std::sync::Arc;
use std::thread;

use artduel_client::RelayClient;
use artduel_core::{RunState, Stage};
use artduel_engine::{Competition, EngineConfig};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

/// Terminal front end for the competition. Holds the workflow
/// controller and renders read-only snapshots of its state; a run
/// executes on a background thread so the draw loop stays responsive.
pub struct App {
    competition: Arc<Competition<RelayClient>>,
    config: EngineConfig,
    run_thread: Option<thread::JoinHandle<()>>,
}

impl App {
    pub fn new(relay_url: &str) -> Self {
        let config = EngineConfig::default();
        let client = RelayClient::new(relay_url);
        Self {
            competition: Arc::new(Competition::new(client, config.clone())),
            config,
            run_thread: None,
        }
    }

    /// Whether the draw loop should tick instead of blocking on input.
    pub fn needs_polling(&self) -> bool {
        self.run_thread.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Reap a finished run thread. Called from the draw loop tick.
    pub fn reap_run(&mut self) {
        if self.run_thread.as_ref().is_some_and(|h| h.is_finished()) {
            if let Some(handle) = self.run_thread.take() {
                let _ = handle.join();
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('s') | KeyCode::Enter => self.start_run(),
            _ => {}
        }
    }

    /// Kick off a run on a background thread. The engine itself rejects
    /// overlapping runs; the thread guard here just avoids piling up
    /// no-op threads while one is in flight.
    fn start_run(&mut self) {
        if self.needs_polling() {
            return;
        }
        let competition = self.competition.clone();
        self.run_thread = Some(thread::spawn(move || {
            let rt = tokio::runtime::Runtime::new().expect("failed to create tokio runtime");
            // Failures land in the run state; nothing to do with them here.
            let _ = rt.block_on(competition.start());
        }));
    }

    //  Rendering

    pub fn render(&self, frame: &mut Frame) {
        let state = self.competition.snapshot();

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(4),
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(frame.area());

        self.render_title_bar(frame, layout[0]);
        self.render_model_panels(frame, layout[1]);
        self.render_status_line(frame, &state, layout[2]);
        self.render_run(frame, &state, layout[3]);
        self.render_key_hints(frame, layout[4]);
    }

    fn render_title_bar(&self, frame: &mut Frame, area: Rect) {
        let title = Line::from(vec![
            Span::styled(" artduel ", Style::default().bold().fg(Color::Cyan)),
            Span::raw("| "),
            Span::styled(
                "one model draws, one model guesses",
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        frame.render_widget(title, area);
    }

    fn render_model_panels(&self, frame: &mut Frame, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        let generator = Paragraph::new(self.config.generator_model.as_str()).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" ASCII Art Generator "),
        );
        frame.render_widget(generator, columns[0]);

        let guesser = Paragraph::new(self.config.guesser_model.as_str()).block(
            Block::default().borders(Borders::ALL).title(" AI Guesser "),
        );
        frame.render_widget(guesser, columns[1]);
    }

    fn render_status_line(&self, frame: &mut Frame, state: &RunState, area: Rect) {
        let line = if let Some(ref error) = state.error {
            Line::from(Span::styled(
                format!(" Error: {error}"),
                Style::default().fg(Color::Red),
            ))
        } else {
            let style = match state.stage {
                Stage::Idle => Style::default().fg(Color::DarkGray),
                Stage::Complete => Style::default().fg(Color::Green),
                _ => Style::default().fg(Color::Yellow),
            };
            Line::from(Span::styled(
                format!(" {}", state.stage.display_name()),
                style,
            ))
        };
        frame.render_widget(line, area);
    }

    fn render_run(&self, frame: &mut Frame, state: &RunState, area: Rect) {
        let Some(ref art) = state.art else {
            let hint = Paragraph::new("Press s to start a competition.")
                .style(Style::default().fg(Color::DarkGray))
                .wrap(Wrap { trim: false });
            frame.render_widget(hint, area);
            return;
        };

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        let mut art_block = Block::default()
            .borders(Borders::ALL)
            .title(" Generated ASCII Art ");
        if state.stage == Stage::Complete {
            if let Some(animal) = state.animal {
                art_block = art_block
                    .title_bottom(Line::from(format!(" Actual animal: {animal} ")).centered());
            }
        }
        let art_panel = Paragraph::new(art.as_str()).block(art_block);
        frame.render_widget(art_panel, columns[0]);

        let results = self.results_lines(state);
        let results_panel = Paragraph::new(results)
            .block(Block::default().borders(Borders::ALL).title(" Guess Results "))
            .wrap(Wrap { trim: false });
        frame.render_widget(results_panel, columns[1]);
    }

    fn results_lines(&self, state: &RunState) -> Vec<Line<'static>> {
        if state.stage != Stage::Complete {
            return vec![Line::from(Span::styled(
                "Waiting for results...",
                Style::default().fg(Color::DarkGray),
            ))];
        }

        let mut lines = Vec::new();
        if let Some(elapsed) = state.elapsed_secs {
            lines.push(Line::from(vec![
                Span::styled("Time to guess:  ", Style::default().fg(Color::DarkGray)),
                Span::styled(format!("{elapsed:.2}s"), Style::default().bold()),
            ]));
        }
        if let Some(ref guess) = state.guess {
            lines.push(Line::from(vec![
                Span::styled("AI's guess:     ", Style::default().fg(Color::DarkGray)),
                Span::styled(guess.clone(), Style::default().bold()),
            ]));
        }
        lines.push(Line::from(""));
        match state.matched() {
            Some(true) => lines.push(Line::from(Span::styled(
                "Correct!",
                Style::default().bold().fg(Color::Green),
            ))),
            Some(false) => lines.push(Line::from(Span::styled(
                "Incorrect",
                Style::default().bold().fg(Color::Red),
            ))),
            None => {}
        }
        lines
    }

    fn render_key_hints(&self, frame: &mut Frame, area: Rect) {
        let hints = if self.needs_polling() {
            vec![("q", "quit")]
        } else {
            vec![("s", "start"), ("q", "quit")]
        };
        let spans: Vec<Span> = hints
            .iter()
            .flat_map(|(key, action)| {
                vec![
                    Span::styled(format!(" {key}"), Style::default().bold().fg(Color::Cyan)),
                    Span::raw(format!(" {action} ")),
                ]
            })
            .collect();
        frame.render_widget(Line::from(spans), area);
    }
}
