mod effect;

use crate::{app::effect::Periodic, audio::AudioCues, util::Clock};

use log::debug;

use std::time::Duration;

const TICK_PERIOD: Duration = Duration::from_secs(1);
const RUNNING_BLINK_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Stopped,
    Running,
}

/// Elapsed time split into the six digits shown on screen. Hours wrap at 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Digits {
    pub h1: u8,
    pub h2: u8,
    pub m1: u8,
    pub m2: u8,
    pub s1: u8,
    pub s2: u8,
}

impl Digits {
    pub fn from_elapsed(elapsed: u64) -> Digits {
        let hours = (elapsed / 3600) % 100;
        let minutes = (elapsed % 3600) / 60;
        let seconds = elapsed % 60;

        Digits {
            h1: (hours / 10) as u8,
            h2: (hours % 10) as u8,
            m1: (minutes / 10) as u8,
            m2: (minutes % 10) as u8,
            s1: (seconds / 10) as u8,
            s2: (seconds % 10) as u8,
        }
    }

    pub fn as_array(&self) -> [u8; 6] {
        [self.h1, self.h2, self.m1, self.m2, self.s1, self.s2]
    }
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerView {
    pub digits: Digits,
    pub run_state: RunState,
    pub colon_visible: bool,
    pub digits_visible: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlinkMode {
    // Running: digits stay solid
    Colon,
    // Paused: the whole display flashes
    Whole,
}

struct Blink {
    mode: BlinkMode,
    schedule: Periodic,
}

enum Firing {
    Tick,
    Blink,
}

pub struct TimerController<C: Clock> {
    clock: C,
    audio: Box<dyn AudioCues>,
    elapsed: u64,
    run_state: RunState,
    colon_visible: bool,
    digits_visible: bool,
    tick: Option<Periodic>,
    blink: Option<Blink>,
}

impl<C: Clock> TimerController<C> {
    pub fn new(clock: C, audio: Box<dyn AudioCues>) -> TimerController<C> {
        TimerController {
            clock,
            audio,
            elapsed: 0,
            run_state: RunState::Stopped,
            colon_visible: true,
            digits_visible: true,
            tick: None,
            blink: None,
        }
    }

    pub fn start(&mut self) {
        debug!("Starting at {}s", self.elapsed);
        self.cancel_effects();
        self.run_state = RunState::Running;
        self.show_all();
        self.audio.play_timer_start();

        let now = self.clock.now();
        self.tick = Some(Periodic::every(now, TICK_PERIOD));
        self.blink = Some(Blink {
            mode: BlinkMode::Colon,
            schedule: Periodic::after_delay(now, RUNNING_BLINK_DELAY, TICK_PERIOD),
        });
    }

    pub fn pause(&mut self) {
        debug!("Pausing at {}s", self.elapsed);
        self.cancel_effects();
        self.run_state = RunState::Stopped;
        self.show_all();
        self.audio.stop_timer_start();

        self.blink = Some(Blink {
            mode: BlinkMode::Whole,
            schedule: Periodic::every(self.clock.now(), TICK_PERIOD),
        });
    }

    pub fn reset(&mut self) {
        debug!("Resetting from {}s", self.elapsed);
        self.cancel_effects();
        self.run_state = RunState::Stopped;
        self.elapsed = 0;
        self.show_all();
        self.audio.stop_timer_start();
    }

    /// Pause when running, start otherwise
    pub fn toggle(&mut self) {
        match self.run_state {
            RunState::Running => self.pause(),
            RunState::Stopped => self.start(),
        }
    }

    pub fn teardown(&mut self) {
        self.cancel_effects();
    }

    /// Runs every firing that is due by now, oldest first. The elapsed tick wins ties with the
    /// blink so the digits and colon change in the same frame.
    pub fn poll(&mut self) {
        let now = self.clock.now();

        loop {
            let tick_due = self.tick.as_ref().and_then(|t| t.due(now));
            let blink_due = self.blink.as_ref().and_then(|b| b.schedule.due(now));

            let firing = match (tick_due, blink_due) {
                (None, None) => break,
                (Some(_), None) => Firing::Tick,
                (None, Some(_)) => Firing::Blink,
                (Some(t), Some(b)) if t <= b => Firing::Tick,
                (Some(_), Some(_)) => Firing::Blink,
            };

            match firing {
                Firing::Tick => self.fire_tick(),
                Firing::Blink => self.fire_blink(),
            }
        }
    }

    pub fn time_until_next_effect(&self) -> Option<Duration> {
        let tick = self.tick.as_ref().map(Periodic::next_deadline);
        let blink = self.blink.as_ref().map(|b| b.schedule.next_deadline());

        let next = match (tick, blink) {
            (Some(t), Some(b)) => t.min(b),
            (t, b) => t.or(b)?,
        };

        Some(next.saturating_sub(self.clock.now()))
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed
    }

    pub fn digits(&self) -> Digits {
        Digits::from_elapsed(self.elapsed)
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn colon_visible(&self) -> bool {
        self.colon_visible
    }

    pub fn digits_visible(&self) -> bool {
        self.digits_visible
    }

    pub fn view(&self) -> TimerView {
        TimerView {
            digits: self.digits(),
            run_state: self.run_state,
            colon_visible: self.colon_visible,
            digits_visible: self.digits_visible,
        }
    }

    pub fn play_click(&mut self) {
        self.audio.play_click();
    }

    fn fire_tick(&mut self) {
        let Some(tick) = &mut self.tick else {
            return;
        };
        tick.fire();
        self.elapsed += 1;
    }

    fn fire_blink(&mut self) {
        let Some(blink) = &mut self.blink else {
            return;
        };
        blink.schedule.fire();

        match blink.mode {
            BlinkMode::Colon => {
                self.colon_visible = !self.colon_visible;
            }
            BlinkMode::Whole => {
                self.colon_visible = !self.colon_visible;
                self.digits_visible = !self.digits_visible;
            }
        }
    }

    fn show_all(&mut self) {
        self.colon_visible = true;
        self.digits_visible = true;
    }

    fn cancel_effects(&mut self) {
        self.tick = None;
        self.blink = None;
    }
}

impl<C: Clock> Drop for TimerController<C> {
    fn drop(&mut self) {
        self.teardown();
    }
}
