//! Single-screen display collaborator for the search pipeline.
//!
//! Owns all rendering: an input bar feeding submissions and the empty-flag
//! into the pipeline, a list with one title per row, and a status line with
//! a spinner while a fetch is in flight. The pipeline stays UI-agnostic; we
//! just watch its output channels.

use anyhow::Result;
use crossterm::{
    event::{Event as CtEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};
use scour_pipeline::SearchPipeline;
use scour_qiita::SearchResult;
use std::io::{self, Stdout};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time;

const BRAILLE_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const TICK: Duration = Duration::from_millis(120);

#[derive(Default)]
struct App {
    input: String,
    results: Vec<SearchResult>,
    busy: bool,
    spin_idx: usize,
}

enum Action {
    Continue,
    Quit,
}

pub async fn run(pipeline: SearchPipeline) -> Result<()> {
    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen)?;
    let mut term = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let outcome = event_loop(&mut term, &pipeline).await;

    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
    pipeline.shutdown().await;
    outcome
}

/// Forward terminal events into a channel so the main loop can `select!`
/// over them alongside the pipeline's watch channels.
fn spawn_input_feeder() -> mpsc::Receiver<io::Result<CtEvent>> {
    let (tx, rx) = mpsc::channel(16);
    tokio::spawn(async move {
        loop {
            let ev = tokio::task::spawn_blocking(crossterm::event::read).await;
            match ev {
                Ok(ev) => {
                    if tx.send(ev).await.is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        }
    });
    rx
}

async fn event_loop(
    term: &mut Terminal<CrosstermBackend<Stdout>>,
    pipeline: &SearchPipeline,
) -> Result<()> {
    let mut events = spawn_input_feeder();
    let mut results = pipeline.results();
    let mut busy = pipeline.busy();
    let mut ticker = time::interval(TICK);

    let mut app = App::default();
    loop {
        draw(term, &app)?;

        tokio::select! {
            maybe_ev = events.recv() => match maybe_ev {
                Some(Ok(CtEvent::Key(key))) => {
                    if matches!(on_key(&mut app, key, pipeline).await?, Action::Quit) {
                        break;
                    }
                }
                Some(Ok(_)) => {} // resize etc.; next draw picks it up
                Some(Err(e)) => {
                    tracing::warn!(error = %e, "terminal input error");
                    break;
                }
                None => break,
            },
            changed = results.changed() => {
                if changed.is_err() {
                    break;
                }
                app.results = results.borrow_and_update().clone();
            }
            changed = busy.changed() => {
                if changed.is_err() {
                    break;
                }
                app.busy = *busy.borrow_and_update();
            }
            _ = ticker.tick() => {
                if app.busy {
                    app.spin_idx = (app.spin_idx + 1) % BRAILLE_FRAMES.len();
                }
            }
        }
    }
    Ok(())
}

async fn on_key(app: &mut App, key: KeyEvent, pipeline: &SearchPipeline) -> Result<Action> {
    if key.kind != KeyEventKind::Press {
        return Ok(Action::Continue);
    }
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) | (KeyCode::Esc, _) => {
            return Ok(Action::Quit);
        }
        (KeyCode::Enter, _) => {
            pipeline.submit_query(app.input.clone()).await?;
        }
        (KeyCode::Backspace, _) => {
            app.input.pop();
            pipeline.set_input_empty(app.input.is_empty()).await?;
        }
        (KeyCode::Char(ch), _) => {
            app.input.push(ch);
            pipeline.set_input_empty(false).await?;
        }
        _ => {}
    }
    Ok(Action::Continue)
}

fn draw(term: &mut Terminal<CrosstermBackend<Stdout>>, app: &App) -> Result<()> {
    term.draw(|f| {
        let [input_area, list_area, status_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .areas(f.area());

        let input_box = Paragraph::new(app.input.clone())
            .block(Block::default().borders(Borders::ALL).title(" Search "));
        f.render_widget(input_box, input_area);

        let items: Vec<ListItem> = app
            .results
            .iter()
            .map(|r| ListItem::new(r.title.clone()))
            .collect();
        let list =
            List::new(items).block(Block::default().borders(Borders::ALL).title(" Titles "));
        f.render_widget(list, list_area);

        let status_line = if app.busy {
            format!("{} searching", BRAILLE_FRAMES[app.spin_idx])
        } else {
            format!("{} results · Enter searches · Esc quits", app.results.len())
        };
        let status = Paragraph::new(status_line)
            .block(Block::default().borders(Borders::ALL).title(" Status "));
        f.render_widget(status, status_area);
    })?;
    Ok(())
}
