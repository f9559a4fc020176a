//! Platform driver entry point. [`main`] picks the driver for the target at
//! compile time and hands it to the caller's event loop.

use std::io;
use std::time::Duration;

use crate::terminal::input_event::{TerminalEvent, TerminalSize};
use crate::ui::span::SpanLine;

/// What an application sees of the platform driver.
pub trait App {
    fn size(&self) -> TerminalSize;
    /// Waits up to `timeout` for the next input event.
    fn poll_event(&mut self, timeout: Duration) -> io::Result<Option<TerminalEvent>>;
    /// Replaces the screen contents with `lines`.
    fn present(&mut self, lines: &[SpanLine]) -> io::Result<()>;
}

/// Runs `f` against the platform driver and restores the platform state
/// afterwards, whether or not `f` succeeded.
#[cfg(any(unix, windows))]
pub fn main<F>(f: F) -> io::Result<()>
where
    F: FnOnce(&mut dyn App) -> io::Result<()>,
{
    crossterm_driver::main(f)
}

#[cfg(not(any(unix, windows)))]
pub fn main<F>(_f: F) -> io::Result<()>
where
    F: FnOnce(&mut dyn App) -> io::Result<()>,
{
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "no platform driver for this target",
    ))
}

#[cfg(any(unix, windows))]
mod crossterm_driver {
    use std::io::{self, Stdout, Write};
    use std::time::Duration;

    use crossterm::cursor::{Hide, MoveTo, Show};
    use crossterm::event::{
        self, Event as CrosstermEvent, KeyCode as CrosstermKeyCode,
        KeyEvent as CrosstermKeyEvent, KeyEventKind, KeyModifiers as CrosstermKeyModifiers,
    };
    use crossterm::style::{
        Attribute, Color as CrosstermColor, Print, ResetColor, SetAttribute, SetBackgroundColor,
        SetForegroundColor,
    };
    use crossterm::terminal::{
        self, Clear, ClearType, DisableLineWrap, EnableLineWrap, EnterAlternateScreen,
        LeaveAlternateScreen,
    };
    use crossterm::{execute, queue};
    use unicode_width::UnicodeWidthChar;

    use super::App;
    use crate::terminal::input_event::{
        KeyCode, KeyEvent, KeyModifiers, TerminalEvent, TerminalSize,
    };
    use crate::ui::span::SpanLine;
    use crate::ui::style::Color;

    pub(super) fn main<F>(f: F) -> io::Result<()>
    where
        F: FnOnce(&mut dyn App) -> io::Result<()>,
    {
        let mut driver = TerminalDriver::enter()?;
        let result = f(&mut driver);
        let restored = driver.leave();
        result.and(restored)
    }

    struct TerminalDriver {
        stdout: Stdout,
        size: TerminalSize,
    }

    impl TerminalDriver {
        fn enter() -> io::Result<Self> {
            let mut stdout = io::stdout();
            let (width, height) = terminal::size()?;
            terminal::enable_raw_mode()?;
            if let Err(err) = execute!(stdout, EnterAlternateScreen, DisableLineWrap, Hide) {
                let _ = terminal::disable_raw_mode();
                return Err(err);
            }
            log::debug!("terminal driver started at {width}x{height}");
            Ok(Self {
                stdout,
                size: TerminalSize { width, height },
            })
        }

        fn leave(&mut self) -> io::Result<()> {
            execute!(self.stdout, Show, EnableLineWrap, LeaveAlternateScreen)?;
            terminal::disable_raw_mode()
        }
    }

    impl App for TerminalDriver {
        fn size(&self) -> TerminalSize {
            self.size
        }

        fn poll_event(&mut self, timeout: Duration) -> io::Result<Option<TerminalEvent>> {
            if !event::poll(timeout)? {
                return Ok(None);
            }
            match event::read()? {
                CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                    Ok(Some(TerminalEvent::Key(map_key_event(key))))
                }
                CrosstermEvent::Resize(width, height) => {
                    self.size = TerminalSize { width, height };
                    Ok(Some(TerminalEvent::Resize(self.size)))
                }
                _ => Ok(None),
            }
        }

        fn present(&mut self, lines: &[SpanLine]) -> io::Result<()> {
            queue!(self.stdout, MoveTo(0, 0), Clear(ClearType::All))?;
            let max_width = usize::from(self.size.width);
            for (row, line) in lines.iter().take(usize::from(self.size.height)).enumerate() {
                let row = u16::try_from(row).unwrap_or(u16::MAX);
                queue!(self.stdout, MoveTo(0, row))?;
                let mut used = 0usize;
                for span in line {
                    let text = clip_to_width(&span.text, max_width.saturating_sub(used));
                    used += text.chars().filter_map(UnicodeWidthChar::width).sum::<usize>();
                    if let Some(fg) = span.style.color {
                        queue!(self.stdout, SetForegroundColor(map_color(fg)))?;
                    }
                    if let Some(bg) = span.style.background {
                        queue!(self.stdout, SetBackgroundColor(map_color(bg)))?;
                    }
                    if span.style.bold {
                        queue!(self.stdout, SetAttribute(Attribute::Bold))?;
                    }
                    queue!(self.stdout, Print(text))?;
                    if !span.style.is_plain() {
                        queue!(self.stdout, SetAttribute(Attribute::Reset), ResetColor)?;
                    }
                }
            }
            self.stdout.flush()
        }
    }

    fn map_color(color: Color) -> CrosstermColor {
        match color {
            Color::Reset => CrosstermColor::Reset,
            Color::Black => CrosstermColor::Black,
            Color::DarkGrey => CrosstermColor::DarkGrey,
            Color::Red => CrosstermColor::Red,
            Color::Green => CrosstermColor::Green,
            Color::Yellow => CrosstermColor::DarkYellow,
            Color::Blue => CrosstermColor::DarkBlue,
            Color::Magenta => CrosstermColor::DarkMagenta,
            Color::Cyan => CrosstermColor::DarkCyan,
            Color::White => CrosstermColor::White,
        }
    }

    fn map_key_event(key: CrosstermKeyEvent) -> KeyEvent {
        KeyEvent {
            code: map_key_code(key.code),
            modifiers: map_key_modifiers(key.modifiers),
        }
    }

    fn map_key_code(code: CrosstermKeyCode) -> KeyCode {
        match code {
            CrosstermKeyCode::Char(ch) => KeyCode::Char(ch),
            CrosstermKeyCode::Enter => KeyCode::Enter,
            CrosstermKeyCode::Tab => KeyCode::Tab,
            CrosstermKeyCode::BackTab => KeyCode::BackTab,
            CrosstermKeyCode::Esc => KeyCode::Esc,
            CrosstermKeyCode::Backspace => KeyCode::Backspace,
            CrosstermKeyCode::Delete => KeyCode::Delete,
            CrosstermKeyCode::Home => KeyCode::Home,
            CrosstermKeyCode::End => KeyCode::End,
            CrosstermKeyCode::Left => KeyCode::Left,
            CrosstermKeyCode::Right => KeyCode::Right,
            CrosstermKeyCode::Up => KeyCode::Up,
            CrosstermKeyCode::Down => KeyCode::Down,
            _ => KeyCode::Unknown,
        }
    }

    fn map_key_modifiers(modifiers: CrosstermKeyModifiers) -> KeyModifiers {
        let mut out = KeyModifiers::NONE;
        if modifiers.contains(CrosstermKeyModifiers::SHIFT) {
            out = out.union(KeyModifiers::SHIFT);
        }
        if modifiers.contains(CrosstermKeyModifiers::CONTROL) {
            out = out.union(KeyModifiers::CONTROL);
        }
        if modifiers.contains(CrosstermKeyModifiers::ALT) {
            out = out.union(KeyModifiers::ALT);
        }
        out
    }

    fn clip_to_width(text: &str, max_width: usize) -> String {
        let mut used = 0usize;
        let mut out = String::new();
        for ch in text.chars().filter(|ch| !matches!(ch, '\n' | '\r')) {
            let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
            if used.saturating_add(ch_width) > max_width {
                break;
            }
            out.push(ch);
            used = used.saturating_add(ch_width);
        }
        out
    }

}
