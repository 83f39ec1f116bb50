use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::config::Config;
use crate::deck::{self, Deck};
use crate::error::RenderError;
use crate::nav::{self, Navigator, Outcome, Transition};
use crate::render::{self, effects, CellStyle, Command};
use crate::render::syntax::Highlighter;
use crate::term::canvas::{Canvas, TermCanvas};
use crate::term::input::{InputEvent, InputSource, TermInput};
use crate::term::{self, TerminalGuard};
use crate::theme::Theme;

/// Present a file. Parse and compile failures abort before the terminal
/// is touched, so errors always land on a normal screen.
pub fn run(file: &Path, start_slide: Option<usize>, config: &Config) -> Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let deck = deck::build(&content)?;

    let theme_name = deck
        .meta
        .theme
        .clone()
        .or_else(|| config.theme().map(String::from))
        .unwrap_or_else(|| "dark".to_string());
    let theme = Theme::from_name(&theme_name);
    let highlighter = Highlighter::new(&theme);

    let base_path = file
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .to_path_buf();
    let start = start_slide.unwrap_or(1).saturating_sub(1);

    term::install_panic_hook();
    let _guard = TerminalGuard::acquire()?;
    let canvas = TermCanvas::new(base_path);
    let mut session = Session::new(deck, start, theme, highlighter, config.fps(), canvas, TermInput);
    session.run_loop()
}

/// Everything one presentation session owns, passed explicitly so the
/// loop runs against mock collaborators in tests.
pub struct Session<C: Canvas, I: InputSource> {
    deck: Deck,
    nav: Navigator,
    theme: Theme,
    highlighter: Highlighter,
    frame_interval: Duration,
    canvas: C,
    input: I,
    size: (u16, u16),
}

impl<C: Canvas, I: InputSource> Session<C, I> {
    pub fn new(
        deck: Deck,
        start: usize,
        theme: Theme,
        highlighter: Highlighter,
        fps: u16,
        canvas: C,
        input: I,
    ) -> Self {
        let nav = Navigator::new(deck.len(), start);
        Self {
            deck,
            nav,
            theme,
            highlighter,
            frame_interval: Duration::from_millis(1000 / u64::from(fps.max(1))),
            canvas,
            input,
            size: (80, 24),
        }
    }

    /// The cooperative tick loop: read input (blocking while idle, frame
    /// interval while transitioning), update navigation, draw. Each tick
    /// completes fully before the next begins.
    pub fn run_loop(&mut self) -> Result<()> {
        self.size = self.canvas.size()?;
        self.draw_static()?;
        loop {
            let timeout = self.nav.is_transitioning().then_some(self.frame_interval);
            match self.input.read(timeout)? {
                Some(InputEvent::Key(key)) => {
                    if let Some(intent) = nav::map_key(key) {
                        if self.nav.handle(intent, &self.deck) == Outcome::Quit {
                            return Ok(());
                        }
                    }
                }
                Some(InputEvent::Resize(cols, rows)) => self.size = (cols, rows),
                None => {}
            }
            match self.nav.advance_frame(&self.deck) {
                Some(transition) => self.draw_transition(&transition)?,
                None => self.draw_static()?,
            }
        }
    }

    fn draw_static(&mut self) -> Result<()> {
        let (cols, rows) = self.size;
        let slide = self.deck.slide(self.nav.current());
        let commands = render::layout(slide, cols, rows, &self.theme);
        let base = render::base_style(slide, &self.theme);
        self.paint(base, commands)
    }

    fn draw_transition(&mut self, transition: &Transition) -> Result<()> {
        let (cols, rows) = self.size;
        let from = render::layout(self.deck.slide(transition.from), cols, rows, &self.theme);
        let to = render::layout(self.deck.slide(transition.to), cols, rows, &self.theme);
        let commands = effects::frame(
            &from,
            &to,
            transition.effect,
            transition.frame,
            transition.total,
            cols,
            rows,
        );
        let base = render::base_style(self.deck.slide(transition.to), &self.theme);
        self.paint(base, commands)
    }

    /// Put one frame on screen. Terminal I/O failures are fatal; a bad
    /// image degrades to a placeholder for that frame only.
    fn paint(&mut self, base: CellStyle, commands: Vec<Command>) -> Result<()> {
        self.canvas.clear(base.bg)?;
        for command in self.highlighter.apply(commands) {
            match command {
                Command::Text {
                    row,
                    col,
                    text,
                    style,
                    ..
                } => self.canvas.write(row, col, &text, &style)?,
                Command::Image { path, area } => {
                    match self.canvas.render_image(&path, area) {
                        Ok(()) => {}
                        Err(RenderError::Io(e)) => return Err(e.into()),
                        Err(RenderError::Image { .. }) => {
                            // Best effort for this frame: show where the
                            // image would have been.
                            let placeholder = render::truncate_to_width(
                                &format!("[image: {path}]"),
                                usize::from(area.width),
                            );
                            let row = area.row + area.height / 2;
                            self.canvas.write(row, area.col, &placeholder, &base)?;
                        }
                    }
                }
            }
        }
        self.canvas.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::io;
    use crate::nav::Key;
    use crate::render::{Area, CellStyle};
    use crate::theme::Paint;

    /// Canvas that records what the session drew.
    struct RecordingCanvas {
        size: (u16, u16),
        frames: usize,
        writes: Vec<(u16, u16, String)>,
    }

    impl RecordingCanvas {
        fn new() -> Self {
            Self {
                size: (80, 24),
                frames: 0,
                writes: Vec::new(),
            }
        }
    }

    impl Canvas for RecordingCanvas {
        fn size(&self) -> io::Result<(u16, u16)> {
            Ok(self.size)
        }

        fn clear(&mut self, _bg: Paint) -> io::Result<()> {
            self.frames += 1;
            self.writes.clear();
            Ok(())
        }

        fn write(&mut self, row: u16, col: u16, text: &str, _style: &CellStyle) -> io::Result<()> {
            self.writes.push((row, col, text.to_string()));
            Ok(())
        }

        fn render_image(&mut self, _path: &str, _area: Area) -> Result<(), RenderError> {
            Ok(())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Input that replays a fixed key script and fails loudly if the
    /// session outlives it.
    struct ScriptedInput(VecDeque<InputEvent>);

    impl InputSource for ScriptedInput {
        fn read(&mut self, _timeout: Option<Duration>) -> io::Result<Option<InputEvent>> {
            self.0
                .pop_front()
                .map(Some)
                .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted"))
        }
    }

    fn session(source: &str, keys: &[Key]) -> Session<RecordingCanvas, ScriptedInput> {
        let deck = deck::build(source).unwrap();
        let theme = Theme::dark();
        let highlighter = Highlighter::new(&theme);
        let script: VecDeque<InputEvent> = keys.iter().map(|k| InputEvent::Key(*k)).collect();
        Session::new(
            deck,
            0,
            theme,
            highlighter,
            30,
            RecordingCanvas::new(),
            ScriptedInput(script),
        )
    }

    #[test]
    fn test_quit_ends_the_loop() {
        let mut s = session("# A", &[Key::Char('q')]);
        s.run_loop().unwrap();
        assert_eq!(s.nav.current(), 0);
    }

    #[test]
    fn test_three_nexts_clamp_at_last_slide() {
        let mut s = session(
            "# A\n---\n# B\n---\n# C",
            &[Key::Char('n'), Key::Char('n'), Key::Char('n'), Key::Char('q')],
        );
        s.run_loop().unwrap();
        assert_eq!(s.nav.current(), 2);
    }

    #[test]
    fn test_unmapped_keys_are_ignored() {
        let mut s = session("# A\n---\n# B", &[Key::Char('z'), Key::Char('q')]);
        s.run_loop().unwrap();
        assert_eq!(s.nav.current(), 0);
    }

    #[test]
    fn test_quit_interrupts_a_transition() {
        let mut s = session(
            "# A\n---\n<!-- effect=explosions -->\n# B",
            &[Key::Char('n'), Key::Char('q')],
        );
        s.run_loop().unwrap();
        // One key started the transition; quit landed mid-effect.
        assert!(s.nav.is_transitioning());
    }

    #[test]
    fn test_transition_settles_on_destination_layout() {
        let deck = deck::build("# A\n---\n<!-- effect=explosions -->\n# B").unwrap();
        let total = effects::Effect::Explosions.total_frames();
        // One Next, then enough timeouts to run the whole effect out.
        let mut script: VecDeque<InputEvent> =
            VecDeque::from([InputEvent::Key(Key::Char('n'))]);
        let theme = Theme::dark();
        let highlighter = Highlighter::new(&theme);
        script.extend(std::iter::repeat_n(InputEvent::Key(Key::Char('z')), total));
        script.push_back(InputEvent::Key(Key::Char('q')));
        let mut s = Session::new(
            deck,
            0,
            theme,
            highlighter,
            30,
            RecordingCanvas::new(),
            ScriptedInput(script),
        );
        s.run_loop().unwrap();
        assert!(!s.nav.is_transitioning());
        assert_eq!(s.nav.current(), 1);
        // The last painted frame is slide B's static layout, which puts
        // the heading text on screen.
        assert!(s.canvas.writes.iter().any(|(_, _, t)| t.contains('B')));
    }

    #[test]
    fn test_resize_relayouts() {
        let mut s = session("# A", &[]);
        s.input.0.push_back(InputEvent::Resize(40, 12));
        s.input.0.push_back(InputEvent::Key(Key::Char('q')));
        s.run_loop().unwrap();
        assert_eq!(s.size, (40, 12));
    }
}
