//! Main TUI application
//!
//! Owns the mounted lane engine and the event hub feeding it, and runs the
//! terminal event loop.

use std::{
    cell::Cell,
    io,
    rc::Rc,
    time::{Duration, Instant},
};

use anyhow::Result;
use crossterm::{
    event::{
        DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture, Event,
        EventStream, KeyCode, KeyEventKind, KeyModifiers, MouseEvent,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use marquee_core::{
    config::AppConfig,
    constants::timing::FRAME_INTERVAL,
    engine::{LaneFrame, Renderer, ScrollEngine},
    events::EventHub,
    mount::{mount, EventSources, MountedEngine},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame, Terminal,
};

use super::demo_items::demo_labels;
use super::lane_widget::{lane_from_labels, LaneWidget};
use super::pointer::PointerTracker;

/// Longest frame delta fed to the engine; a stalled terminal should not fling the lane
const MAX_FRAME_DT: Duration = Duration::from_millis(100);

/// Engine render callback; the terminal redraws on the next loop pass
struct RedrawFlag(Rc<Cell<bool>>);

impl Renderer<str> for RedrawFlag {
    fn render(&mut self, _frame: &LaneFrame<'_, str>) {
        self.0.set(true);
    }
}

pub struct App {
    config: AppConfig,
    hub: Rc<EventHub>,
    lane: MountedEngine<str>,
    tracker: PointerTracker,
    lane_area: Option<Rect>,
    dirty: Rc<Cell<bool>>,
    started: Instant,
    last_frame: Instant,
    should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let labels = if config.lane.items.is_empty() {
            demo_labels()
        } else {
            config.lane.items.clone()
        };
        let lane = lane_from_labels(&labels, &config.lane, config.engine.axis);

        let dirty = Rc::new(Cell::new(true));
        let engine = ScrollEngine::new(lane, config.engine.clone())
            .with_renderer(RedrawFlag(Rc::clone(&dirty)));

        let hub = Rc::new(EventHub::new());
        let lane = mount(engine, EventSources::from_hub(&hub));
        tracing::info!(items = labels.len(), "Lane mounted");

        let now = Instant::now();
        Self {
            config,
            hub,
            lane,
            tracker: PointerTracker::new(),
            lane_area: None,
            dirty,
            started: now,
            last_frame: now,
            should_quit: false,
        }
    }

    /// Run the application
    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            EnterAlternateScreen,
            EnableMouseCapture,
            EnableFocusChange
        )?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal).await;

        self.lane.unmount();
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture,
            DisableFocusChange
        )?;
        terminal.show_cursor()?;
        result
    }

    /// Main event loop
    async fn main_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        loop {
            let now = Instant::now();
            let dt = now.duration_since(self.last_frame);
            if dt >= FRAME_INTERVAL {
                self.last_frame = now;
                self.advance_frame(dt);
            }

            // Only render if something changed
            if self.dirty.replace(false) {
                terminal.draw(|f| self.ui(f))?;
            }

            tokio::select! {
                biased; // Prefer events over timeout when both are ready

                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        match event {
                            Event::Key(key) if key.kind == KeyEventKind::Press => {
                                self.handle_key(key.code, key.modifiers);
                            }
                            Event::Mouse(mouse) => {
                                self.handle_mouse_event(mouse);
                            }
                            Event::FocusLost => {
                                self.handle_focus_lost();
                            }
                            Event::Resize(_, _) => {
                                self.handle_resize();
                            }
                            _ => {}
                        }
                    }
                }
                _ = tokio::time::sleep(FRAME_INTERVAL) => {}
            }

            if self.should_quit {
                break;
            }
        }
        Ok(())
    }

    /// Feed one display refresh to the engine
    fn advance_frame(&mut self, dt: Duration) {
        self.hub.tick(dt.min(MAX_FRAME_DT));
    }

    fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        match code {
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char(' ') => {
                self.config.engine.autoplay = !self.config.engine.autoplay;
                tracing::info!(autoplay = self.config.engine.autoplay, "Toggled autoplay");
                self.lane.reconfigure(self.config.engine.clone());
            }
            KeyCode::Char('r') => {
                let engine = &mut self.config.engine;
                engine.autoplay_direction = engine.autoplay_direction.reversed();
                tracing::info!(direction = ?engine.autoplay_direction, "Reversed autoplay");
                self.lane.reconfigure(self.config.engine.clone());
            }
            _ => {}
        }
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) {
        let Some(area) = self.lane_area else {
            return;
        };
        let at = self.started.elapsed();
        for event in self.tracker.translate(mouse, area, at) {
            self.hub.emit_pointer(event);
        }
    }

    /// Mouse left the terminal; the lane may never see it cross its edge
    fn handle_focus_lost(&mut self) {
        for event in self.tracker.focus_lost(self.started.elapsed()) {
            self.hub.emit_pointer(event);
        }
    }

    /// Re-render at the new size; the lane area is recomputed on draw
    fn handle_resize(&mut self) {
        self.lane_area = None;
        self.lane.with_mut(|engine| engine.render());
    }

    fn ui(&mut self, f: &mut Frame) {
        let [lane_area, status_area] =
            Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).areas(f.area());

        let block = Block::bordered()
            .title(" Marquee ")
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(lane_area);
        self.lane_area = Some(inner);
        f.render_widget(block, lane_area);

        self.lane
            .with(|engine| f.render_widget(LaneWidget::new(engine.frame()), inner));
        f.render_widget(self.status_line(), status_area);
    }

    fn status_line(&self) -> Paragraph<'static> {
        let engine = &self.config.engine;
        let (phase, paused) = self.lane.with(|e| (e.phase(), e.is_paused()));
        let autoplay = match (engine.autoplay, paused) {
            (false, _) => "autoplay off".to_string(),
            (true, true) => "paused".to_string(),
            (true, false) => format!(
                "autoplay {:?} {:.2}",
                engine.autoplay_direction, engine.autoplay_speed
            ),
        };
        let hint = Style::default().fg(Color::DarkGray);
        Paragraph::new(Line::from(vec![
            Span::styled(format!(" {autoplay} "), Style::default().fg(Color::Cyan)),
            Span::raw(format!(" {phase:?} ")),
            Span::styled(" │ space autoplay  r reverse  q quit", hint),
        ]))
    }
}
