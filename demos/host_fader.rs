//! Host demo: drives a console "strip" from commands typed on stdin.
//!
//! Commands: `on`, `off`, `hue <deg>`, `sat <pct>`, `bri <pct>`, `quit`.
//! Switch on three times, two seconds apart, to toggle the fade mode.

use std::io::BufRead;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::{Duration, Instant};

use neopixel_fader::{
    FaderConfig, LightController8, LightEvent, ServiceTiming, StripSink, TimeDuration,
    TimeInstant, TimeSource,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct HostDuration(Duration);

impl TimeDuration for HostDuration {
    const ZERO: Self = HostDuration(Duration::ZERO);

    fn as_millis(&self) -> u64 {
        self.0.as_millis() as u64
    }

    fn from_millis(millis: u64) -> Self {
        HostDuration(Duration::from_millis(millis))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct HostInstant(Instant);

impl TimeInstant for HostInstant {
    type Duration = HostDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        HostDuration(self.0.saturating_duration_since(earlier.0))
    }

    fn checked_add(self, duration: Self::Duration) -> Option<Self> {
        self.0.checked_add(duration.0).map(HostInstant)
    }
}

struct HostClock;

impl TimeSource<HostInstant> for HostClock {
    fn now(&self) -> HostInstant {
        HostInstant(Instant::now())
    }
}

/// Prints the first pixel of each frame as a 24-bit color swatch.
struct ConsoleStrip {
    first: [u8; 3],
}

impl StripSink for ConsoleStrip {
    type Error = std::convert::Infallible;

    fn set_pixel(&mut self, index: usize, channels: [u8; 3]) {
        if index == 0 {
            self.first = channels;
        }
    }

    fn show(&mut self) -> Result<(), Self::Error> {
        let [r, g, b] = self.first;
        println!("\x1b[48;2;{r};{g};{b}m      \x1b[0m  rgb({r}, {g}, {b})");
        Ok(())
    }
}

enum Input {
    Event(LightEvent),
    Quit,
}

fn parse(line: &str) -> Option<Input> {
    let mut words = line.split_whitespace();
    let command = words.next()?;
    let value = words.next().and_then(|word| word.parse::<f32>().ok());

    let event = match (command, value) {
        ("on", _) => LightEvent::On(true),
        ("off", _) => LightEvent::On(false),
        ("hue", Some(value)) => LightEvent::Hue(value),
        ("sat", Some(value)) => LightEvent::Saturation(value),
        ("bri", Some(value)) => LightEvent::Brightness(value),
        ("quit", _) => return Some(Input::Quit),
        _ => return None,
    };
    Some(Input::Event(event))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines().map_while(Result::ok) {
            match parse(&line) {
                Some(input) => {
                    if tx.send(input).is_err() {
                        break;
                    }
                }
                None => eprintln!("unknown command: {line}"),
            }
        }
    });

    // A one-minute fade keeps the demo lively.
    let config = FaderConfig::builder(1)
        .tick_interval(HostDuration::from_millis(250))
        .transition_length(HostDuration::from_millis(60_000))
        .build()?;
    let clock = HostClock;
    let mut controller =
        LightController8::new(ConsoleStrip { first: [0; 3] }, &clock, config)?;

    let mut timing: ServiceTiming<HostDuration> = ServiceTiming::Idle;
    loop {
        let input = match timing {
            ServiceTiming::Delay(delay) => match rx.recv_timeout(delay.0) {
                Ok(input) => Some(input),
                Err(RecvTimeoutError::Timeout) => None,
                Err(RecvTimeoutError::Disconnected) => break,
            },
            ServiceTiming::Idle => match rx.recv() {
                Ok(input) => Some(input),
                Err(_) => break,
            },
        };

        timing = match input {
            Some(Input::Quit) => break,
            Some(Input::Event(event)) => {
                let timing = controller.handle_event(event)?;
                println!("state: {:?}, mode: {:?}", controller.state(), controller.mode());
                timing
            }
            None => controller.service()?,
        };
    }

    Ok(())
}
