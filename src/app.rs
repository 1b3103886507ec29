use crate::command::Command;
use crate::engine::{Engine, Intent, TickOutcome};
use crate::schedule::TickSchedule;
use crate::store::ScoreStore;
use crossterm::event::Event;
use rand::Rng;
use ratatui::{backend::Backend, Frame, Terminal};
use std::io;
use std::time::{Duration, Instant};

/// A source of terminal input events
pub(crate) trait EventSource {
    /// Wait up to `timeout` for an event to become available.  Returns `true`
    /// if one is ready to be read.
    fn poll(&mut self, timeout: Duration) -> io::Result<bool>;

    /// Block until an event is available and return it
    fn read(&mut self) -> io::Result<Event>;
}

/// Input events from the real terminal
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct TerminalEvents;

impl EventSource for TerminalEvents {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool> {
        crossterm::event::poll(timeout)
    }

    fn read(&mut self) -> io::Result<Event> {
        crossterm::event::read()
    }
}

/// The terminal front end.  Input handling and ticks both happen on the
/// thread calling [`App::run()`], one at a time.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct App<S, R = rand::rngs::ThreadRng> {
    engine: Engine<S, R>,
    schedule: TickSchedule,
    quitting: bool,
}

impl<S: ScoreStore, R: Rng> App<S, R> {
    pub(crate) fn new(engine: Engine<S, R>) -> App<S, R> {
        App {
            engine,
            schedule: TickSchedule::default(),
            quitting: false,
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        let mut events = TerminalEvents;
        while !self.quitting {
            terminal.draw(|frame| self.draw(frame))?;
            self.process_input(&mut events)?;
        }
        log::info!("Quitting");
        Ok(())
    }

    fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self.engine.snapshot(), frame.area());
    }

    /// Wait for either an input event or the next tick, whichever comes
    /// first, and handle it
    fn process_input<E: EventSource>(&mut self, events: &mut E) -> io::Result<()> {
        if !self.engine.runnable() {
            self.schedule.disarm();
            self.handle_event(events.read()?);
            return Ok(());
        }
        let wait = self
            .schedule
            .wait_time(Instant::now(), self.engine.tick_interval());
        if wait.is_zero() || !events.poll(wait)? {
            self.schedule.disarm();
            match self.engine.tick() {
                TickOutcome::Idle | TickOutcome::Moved => (),
                outcome => log::debug!("Tick: {outcome:?}"),
            }
        } else {
            self.handle_event(events.read()?);
            if !self.engine.runnable() {
                self.schedule.disarm();
            }
        }
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if event == Event::FocusLost {
            if self.engine.runnable() {
                log::debug!("Terminal lost focus; pausing");
                self.engine.apply(Intent::TogglePause);
            }
            return;
        }
        let Some(cmd) = event.as_key_press_event().and_then(Command::from_key_event) else {
            return;
        };
        if matches!(cmd, Command::Quit | Command::Q) {
            self.quitting = true;
        } else if let Some(intent) = cmd.to_intent(&self.engine.snapshot()) {
            self.engine.apply(intent);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{GridSize, LifecycleState};
    use crate::store::MemoryStore;
    use crossterm::event::{KeyCode, KeyEvent};
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use std::collections::VecDeque;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    /// Replays a fixed sequence of events.  `None` entries stand for a poll
    /// that times out with nothing to read.
    #[derive(Clone, Debug, Default, Eq, PartialEq)]
    struct ScriptedEvents {
        script: VecDeque<Option<Event>>,
        polls: Vec<Duration>,
    }

    impl ScriptedEvents {
        fn new<I: IntoIterator<Item = Option<Event>>>(script: I) -> Self {
            ScriptedEvents {
                script: script.into_iter().collect(),
                polls: Vec::new(),
            }
        }
    }

    impl EventSource for ScriptedEvents {
        fn poll(&mut self, timeout: Duration) -> io::Result<bool> {
            self.polls.push(timeout);
            match self.script.front() {
                Some(Some(_)) => Ok(true),
                Some(None) => {
                    self.script.pop_front();
                    Ok(false)
                }
                None => Err(io::Error::other("script exhausted")),
            }
        }

        fn read(&mut self) -> io::Result<Event> {
            match self.script.pop_front() {
                Some(Some(ev)) => Ok(ev),
                _ => Err(io::Error::other("no event to read")),
            }
        }
    }

    fn key(code: KeyCode) -> Option<Event> {
        Some(Event::Key(KeyEvent::from(code)))
    }

    fn app() -> App<MemoryStore, ChaCha12Rng> {
        App::new(Engine::new_with_rng(
            GridSize::default(),
            MemoryStore::default(),
            ChaCha12Rng::seed_from_u64(RNG_SEED),
        ))
    }

    fn head(app: &App<MemoryStore, ChaCha12Rng>) -> (u16, u16) {
        let h = app.engine.snapshot().snake.head();
        (h.x, h.y)
    }

    #[test]
    fn start_then_tick() {
        let mut app = app();
        let mut events = ScriptedEvents::new([key(KeyCode::Enter), None]);
        app.process_input(&mut events).unwrap();
        assert_eq!(app.engine.state(), LifecycleState::Playing);
        assert!(events.polls.is_empty());
        assert_eq!(head(&app), (5, 10));
        app.process_input(&mut events).unwrap();
        assert_eq!(head(&app), (6, 10));
        assert_eq!(events.polls, vec![Duration::from_millis(140)]);
        assert!(!app.schedule.is_armed());
    }

    #[test]
    fn input_between_ticks_keeps_deadline() {
        let mut app = app();
        app.engine.apply(Intent::Start);
        let mut events = ScriptedEvents::new([key(KeyCode::Down), None]);
        app.process_input(&mut events).unwrap();
        assert!(app.schedule.is_armed());
        assert_eq!(head(&app), (5, 10));
        app.process_input(&mut events).unwrap();
        assert_eq!(head(&app), (5, 11));
        assert_eq!(events.polls.len(), 2);
        assert!(events.polls[1] <= events.polls[0]);
    }

    #[test]
    fn pause_cancels_pending_tick() {
        let mut app = app();
        app.engine.apply(Intent::Start);
        let mut events = ScriptedEvents::new([key(KeyCode::Char('p')), key(KeyCode::Char('p'))]);
        app.process_input(&mut events).unwrap();
        assert!(app.engine.snapshot().paused);
        assert!(!app.schedule.is_armed());
        // While paused, input is read without polling and no tick happens
        app.process_input(&mut events).unwrap();
        assert!(!app.engine.snapshot().paused);
        assert_eq!(head(&app), (5, 10));
        assert_eq!(events.polls.len(), 1);
    }

    #[test]
    fn reset_cancels_pending_tick() {
        let mut app = app();
        app.engine.apply(Intent::Start);
        let mut events = ScriptedEvents::new([key(KeyCode::Char('r'))]);
        app.process_input(&mut events).unwrap();
        assert_eq!(app.engine.state(), LifecycleState::NotStarted);
        assert!(!app.schedule.is_armed());
    }

    #[test]
    fn focus_lost_pauses() {
        let mut app = app();
        app.engine.apply(Intent::Start);
        let mut events = ScriptedEvents::new([Some(Event::FocusLost)]);
        app.process_input(&mut events).unwrap();
        assert!(app.engine.snapshot().paused);
    }

    #[test]
    fn quit() {
        let mut app = app();
        let mut events = ScriptedEvents::new([key(KeyCode::Char('q'))]);
        app.process_input(&mut events).unwrap();
        assert!(app.quitting);
    }
}
