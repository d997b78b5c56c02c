use anyhow::{Context, Result};
use std::{io, time::Duration};

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use ratatui::{
    backend::CrosstermBackend,
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
};

use super::{ScrollRegion, ViewerWindow, INSTRUCTIONS};
use crate::utils::wrap_text;

const POLL_INTERVAL: Duration = Duration::from_millis(100);
const WHEEL_STEP: isize = 3;
// Two border columns plus one column of left padding
const HORIZONTAL_CHROME: u16 = 3;
const VERTICAL_CHROME: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Close,
}

fn key_is_ctrl_c(key: &KeyEvent) -> bool {
    if let KeyCode::Char(ch) = key.code {
        if ch == '\u{3}' {
            return true;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && ch.eq_ignore_ascii_case(&'c') {
            return true;
        }
    }

    false
}

/// Read-only scrollable text panel.
pub struct InstructionPanel {
    title: String,
    text: String,
    wrap_width: Option<usize>,
    lines: Vec<String>,
    region: ScrollRegion,
}

impl InstructionPanel {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            wrap_width: None,
            lines: Vec::new(),
            region: ScrollRegion::default(),
        }
    }

    pub fn region(&self) -> &ScrollRegion {
        &self.region
    }

    /// Wrapped lines for the most recent layout.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Fit the content to a panel occupying `area`.
    ///
    /// The text is rewrapped when the inner width changes and the scroll
    /// extent follows the new wrapped height.
    pub fn layout(&mut self, area: Rect) {
        let inner_width = area.width.saturating_sub(HORIZONTAL_CHROME) as usize;
        let inner_height = area.height.saturating_sub(VERTICAL_CHROME) as usize;

        if self.wrap_width != Some(inner_width) {
            self.lines = wrap_text(&self.text, inner_width);
            self.wrap_width = Some(inner_width);
            if self.region.set_content_height(self.lines.len()) {
                log::debug!(
                    "Instruction extent is now {} rows at width {inner_width}",
                    self.lines.len()
                );
            }
        }
        self.region.set_viewport_height(inner_height);
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Flow {
        if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
            return Flow::Continue; // Ignore key release events
        }
        if key_is_ctrl_c(&key) {
            return Flow::Close;
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => return Flow::Close,
            KeyCode::Up | KeyCode::Char('k') => self.region.scroll_by(-1),
            KeyCode::Down | KeyCode::Char('j') => self.region.scroll_by(1),
            KeyCode::PageUp => self.region.page_up(),
            KeyCode::PageDown | KeyCode::Char(' ') => self.region.page_down(),
            KeyCode::Home | KeyCode::Char('g') => self.region.home(),
            KeyCode::End | KeyCode::Char('G') => self.region.end(),
            _ => {}
        }
        Flow::Continue
    }

    pub fn handle_mouse(&mut self, event: MouseEvent) {
        match event.kind {
            MouseEventKind::ScrollUp => self.region.scroll_by(-WHEEL_STEP),
            MouseEventKind::ScrollDown => self.region.scroll_by(WHEEL_STEP),
            _ => {}
        }
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        self.layout(area);

        let content: Vec<Line> = self.lines[self.region.visible()]
            .iter()
            .map(|line| Line::from(line.as_str()))
            .collect();

        let block = Block::default()
            .borders(Borders::ALL)
            .padding(Padding::left(1))
            .title(format!(" {} ", self.title))
            .title_bottom(" ↑/↓ scroll  PgUp/PgDn page  q close ");

        frame.render_widget(Paragraph::new(content).block(block), area);

        if self.region.is_scrollable() {
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight),
                area,
                &mut ScrollbarState::new(self.region.max_offset() + 1)
                    .position(self.region.offset())
                    .viewport_content_length(self.region.viewport_height()),
            );
        }
    }
}

/// Event loop: redraw, then dispatch input until the panel is closed.
pub fn run<B: Backend>(terminal: &mut Terminal<B>, panel: &mut InstructionPanel) -> Result<()> {
    loop {
        terminal.draw(|frame| panel.render(frame))?;

        if !crossterm::event::poll(POLL_INTERVAL)? {
            continue;
        }
        match crossterm::event::read()? {
            Event::Key(key) => {
                if panel.handle_key(key) == Flow::Close {
                    log::info!("[TUI] close requested");
                    break;
                }
            }
            Event::Mouse(event) => panel.handle_mouse(event),
            // Resize is picked up by the next layout
            _ => {}
        }
    }
    Ok(())
}

pub fn start(window: &ViewerWindow) -> Result<()> {
    log::info!("[TUI] instruction viewer starting...");

    crossterm::terminal::enable_raw_mode().context("Failed to initialize the terminal")?;
    if let Err(err) = crossterm::execute!(
        io::stdout(),
        crossterm::terminal::EnterAlternateScreen,
        crossterm::event::EnableMouseCapture
    ) {
        let _ = crossterm::terminal::disable_raw_mode();
        return Err(err).context("Failed to enter the alternate screen");
    }

    let mut panel = InstructionPanel::new(window.title.clone(), INSTRUCTIONS);
    let result = (|| -> Result<()> {
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;
        run(&mut terminal, &mut panel)?;
        terminal.clear()?;
        Ok(())
    })();

    finish(result, restore_terminal)
}

/// Restore the terminal and hand back the viewer's own outcome.
fn finish(result: Result<()>, restore: impl FnOnce() -> Result<()>) -> Result<()> {
    if let Err(err) = restore() {
        log::warn!("Failed to restore terminal: {err:#}");
    }
    result
}

// Every step runs even if an earlier one fails; the first error is returned
fn restore_terminal() -> Result<()> {
    let screen = crossterm::execute!(
        io::stdout(),
        crossterm::terminal::LeaveAlternateScreen,
        crossterm::event::DisableMouseCapture
    )
    .context("Failed to leave the alternate screen");
    let raw = crossterm::terminal::disable_raw_mode().context("Failed to disable raw mode");
    screen.and(raw)
}
