//! Accessory controller tying remote events, the fade tick and the strip
//! together.
//!
//! Provides [`LightController`], the single owner of every piece of mutable
//! lightbulb state. Remote setter calls, the periodic fade tick and the
//! acknowledgement flash all go through it, so no locking is needed inside
//! the crate: hosts feed it from one event loop.

use crate::color::Color;
use crate::command::LightEvent;
use crate::config::{ConfigError, FaderConfig};
use crate::fade::{FadeColorSet, FadeDirection, FadeEngine, FadeTick};
use crate::flash::{FlashError, FlashSequence};
use crate::gesture::{GestureOutcome, ModeGestureDetector, OnOrigin};
use crate::strip::{PixelStrip, StripSink};
use crate::time::{TimeDuration, TimeInstant, TimeSource};
use crate::types::{Mode, OnSuppression};

/// The observable state of a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FaderState {
    /// Accessory is off. Strip is black.
    Off,
    /// Accessory is on in [`Mode::SingleColor`]. Strip holds the primary color.
    Static,
    /// Accessory is on in [`Mode::AutoFade`], heading the given way.
    Fading(FadeDirection),
    /// Mode acknowledgement flash in progress.
    Flashing,
}

/// When the controller needs to be serviced again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ServiceTiming<D> {
    /// Call [`LightController::service`] again after this delay.
    ///
    /// Returned while fading (time to the next tick), while flashing (time
    /// until the flash changes color) and while a failed paint awaits retry.
    Delay(D),

    /// Nothing scheduled. Wait for the next event.
    Idle,
}

/// Errors that can occur during controller operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FaderError<E> {
    /// The strip sink failed to show a frame.
    ///
    /// Controller state is already updated; the next tick paints again.
    Paint(E),
}

impl<E: core::fmt::Debug> core::fmt::Display for FaderError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FaderError::Paint(err) => write!(f, "failed to paint strip: {:?}", err),
        }
    }
}

#[cfg(feature = "std")]
impl<E: core::fmt::Debug> std::error::Error for FaderError<E> {}

#[derive(Debug, Clone, Copy)]
struct ActiveFlash<I> {
    mode: Mode,
    started: I,
    shown: Option<Color>,
}

/// Drives an LED strip as a remote-controlled lightbulb.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `I` - Time instant type
/// * `S` - Strip sink implementation type
/// * `T` - Time source implementation type
/// * `N` - Capacity of the acknowledgement flash sequence (two steps per flash)
pub struct LightController<'t, I: TimeInstant, S: StripSink, T: TimeSource<I>, const N: usize> {
    strip: PixelStrip<S>,
    time_source: &'t T,
    config: FaderConfig<I::Duration>,
    colors: FadeColorSet,
    engine: FadeEngine,
    gesture: ModeGestureDetector<I>,
    is_on: bool,
    last_brightness: Option<I>,
    ack_single_color: FlashSequence<I::Duration, N>,
    ack_auto_fade: FlashSequence<I::Duration, N>,
    flash: Option<ActiveFlash<I>>,
    next_tick: Option<I>,
    repaint_pending: bool,
}

/// Controller with room for the default three-flash acknowledgement.
pub type LightController8<'t, I, S, T> = LightController<'t, I, S, T, 8>;

type FaderResult<T, S> = Result<T, FaderError<<S as StripSink>::Error>>;

impl<'t, I: TimeInstant, S: StripSink, T: TimeSource<I>, const N: usize>
    LightController<'t, I, S, T, N>
{
    /// Creates a controller for a switched-off accessory.
    ///
    /// The strip is not painted until the first event arrives.
    ///
    /// # Errors
    /// * `FlashCapacityExceeded` - The acknowledgement flash needs more than `N` steps
    /// * `EmptyFlash` - The acknowledgement flash has no steps
    pub fn new(
        sink: S,
        time_source: &'t T,
        config: FaderConfig<I::Duration>,
    ) -> Result<Self, ConfigError> {
        let flash = config.flash();
        let ack_single_color =
            acknowledgement(flash.color_for(Mode::SingleColor), flash.count, flash.period)?;
        let ack_auto_fade =
            acknowledgement(flash.color_for(Mode::AutoFade), flash.count, flash.period)?;
        let (primary, secondary) = config.endpoints();

        Ok(Self {
            strip: PixelStrip::new(sink, config.pixel_count(), config.wiring_order()),
            time_source,
            colors: FadeColorSet::new(primary, secondary),
            engine: FadeEngine::new(config.tick_interval(), config.transition_length()),
            gesture: ModeGestureDetector::new(*config.gesture(), config.initial_mode()),
            config,
            is_on: false,
            last_brightness: None,
            ack_single_color,
            ack_auto_fade,
            flash: None,
            next_tick: None,
            repaint_pending: false,
        })
    }

    /// Handles a light event by dispatching to the appropriate method.
    ///
    /// # Returns
    /// * `Ok(ServiceTiming)` - When [`service`](Self::service) is due next
    /// * `Err` - The strip failed to paint; state is already updated
    pub fn handle_event(&mut self, event: LightEvent) -> FaderResult<ServiceTiming<I::Duration>, S> {
        match event {
            LightEvent::On(on) => self.set_on(on)?,
            LightEvent::Hue(hue) => self.set_hue(hue)?,
            LightEvent::Saturation(saturation) => self.set_saturation(saturation)?,
            LightEvent::Brightness(brightness) => self.set_brightness(brightness)?,
            LightEvent::GestureOn {
                brightness_triggered,
            } => {
                let origin = if brightness_triggered {
                    OnOrigin::BrightnessEcho
                } else {
                    OnOrigin::Remote
                };
                self.register_on(origin)?
            }
            LightEvent::Tick => self.tick()?,
        }
        Ok(self.next_service())
    }

    /// Switches the accessory on or off.
    ///
    /// Switching on paints the primary color and feeds the mode gesture;
    /// whether the event counts is decided by the configured
    /// [`OnSuppression`] policy. Switching off cancels any flash and paints
    /// black.
    pub fn set_on(&mut self, on: bool) -> FaderResult<(), S> {
        if !on {
            return self.turn_off();
        }

        let now = self.time_source.now();
        let origin = self.classify_on(now);
        self.turn_on(now, origin)
    }

    /// Switches the accessory on with an explicit origin, bypassing the
    /// [`OnSuppression`] heuristic.
    pub fn register_on(&mut self, origin: OnOrigin) -> FaderResult<(), S> {
        let now = self.time_source.now();
        self.turn_on(now, origin)
    }

    /// Installs a new primary color with the given hue.
    ///
    /// The previous primary becomes the secondary fade endpoint.
    pub fn set_hue(&mut self, hue: f32) -> FaderResult<(), S> {
        let mut color = *self.colors.primary();
        color.set_hue(hue);
        self.colors.insert_new_color(color);

        let now = self.time_source.now();
        self.show_primary(now)
    }

    /// Edits the saturation of the primary color in place.
    pub fn set_saturation(&mut self, saturation: f32) -> FaderResult<(), S> {
        self.colors.primary_mut().set_saturation(saturation);

        let now = self.time_source.now();
        self.show_primary(now)
    }

    /// Applies a brightness edit to both fade endpoints.
    pub fn set_brightness(&mut self, brightness: f32) -> FaderResult<(), S> {
        self.colors.set_brightness(brightness);

        let now = self.time_source.now();
        self.last_brightness = Some(now);
        self.show_primary(now)
    }

    /// Advances the fade by one tick and repaints.
    ///
    /// Outside [`Mode::AutoFade`] the tick only retries a failed paint. Does
    /// nothing while flashing. Hosts with their own periodic timer call this
    /// directly; others let [`service`](Self::service) schedule it.
    pub fn tick(&mut self) -> FaderResult<(), S> {
        if self.flash.is_some() {
            return Ok(());
        }

        if !self.is_fading() {
            return if self.repaint_pending { self.repaint() } else { Ok(()) };
        }

        match self.engine.tick(&mut self.colors) {
            FadeTick::Advanced => self.paint_current(),
            FadeTick::Reversed(direction) => {
                debug!("fade reversed: {}", direction);
                self.paint_current()
            }
            FadeTick::Degenerate if self.repaint_pending => self.paint_current(),
            FadeTick::Degenerate => Ok(()),
        }
    }

    /// Runs whatever is due: the next flash step, the next fade tick or a
    /// paint retry.
    ///
    /// # Returns
    /// * `Ok(ServiceTiming::Delay(d))` - Call again after `d`
    /// * `Ok(ServiceTiming::Idle)` - Nothing scheduled until the next event
    /// * `Err` - The strip failed to paint; call [`next_service`](Self::next_service)
    ///   for the retry delay
    pub fn service(&mut self) -> FaderResult<ServiceTiming<I::Duration>, S> {
        let now = self.time_source.now();

        if self.flash.is_some() {
            return self.service_flash(now);
        }

        if !self.is_fading() && !self.repaint_pending {
            self.next_tick = None;
            return Ok(ServiceTiming::Idle);
        }

        let due = self.next_tick.unwrap_or(now);
        if now >= due {
            // Schedule from `now` so a late service never triggers a burst of
            // catch-up ticks.
            self.next_tick = now.checked_add(self.config.tick_interval());
            self.tick()?;
            if !self.is_fading() {
                self.next_tick = None;
            }
        }

        Ok(self.timing(now))
    }

    /// Returns when [`service`](Self::service) is due next.
    pub fn next_service(&self) -> ServiceTiming<I::Duration> {
        self.timing(self.time_source.now())
    }

    /// Returns the current state of the controller.
    pub fn state(&self) -> FaderState {
        if !self.is_on {
            FaderState::Off
        } else if self.flash.is_some() {
            FaderState::Flashing
        } else {
            match self.gesture.mode() {
                Mode::SingleColor => FaderState::Static,
                Mode::AutoFade => FaderState::Fading(self.engine.direction()),
            }
        }
    }

    pub fn mode(&self) -> Mode {
        self.gesture.mode()
    }

    pub fn is_on(&self) -> bool {
        self.is_on
    }

    /// Returns the primary, secondary and current colors.
    pub fn colors(&self) -> &FadeColorSet {
        &self.colors
    }

    pub fn direction(&self) -> FadeDirection {
        self.engine.direction()
    }

    pub fn config(&self) -> &FaderConfig<I::Duration> {
        &self.config
    }

    /// Returns the strip, e.g. to inspect the sink.
    pub fn strip(&self) -> &PixelStrip<S> {
        &self.strip
    }

    pub fn strip_mut(&mut self) -> &mut PixelStrip<S> {
        &mut self.strip
    }

    /// Returns true when the last paint failed and has not been retried yet.
    pub fn repaint_pending(&self) -> bool {
        self.repaint_pending
    }

    fn turn_on(&mut self, now: I, origin: OnOrigin) -> FaderResult<(), S> {
        self.is_on = true;
        self.last_brightness = None;

        if let GestureOutcome::Toggled(mode) = self.gesture.register_on(now, origin) {
            info!("mode gesture: switching to {}", mode);
            self.colors.reset_current();
            self.flash = Some(ActiveFlash {
                mode,
                started: now,
                shown: None,
            });
            self.next_tick = None;
            return self.service_flash(now).map(|_| ());
        }

        self.show_primary(now)
    }

    fn turn_off(&mut self) -> FaderResult<(), S> {
        if self.flash.take().is_some() {
            debug!("flash cancelled");
        }
        self.is_on = false;
        self.last_brightness = None;
        self.next_tick = None;
        self.paint(&Color::BLACK)
    }

    fn classify_on(&self, now: I) -> OnOrigin {
        let Some(edited_at) = self.last_brightness else {
            return OnOrigin::Remote;
        };

        match self.config.on_suppression() {
            OnSuppression::Disabled => OnOrigin::Remote,
            OnSuppression::NextOn => OnOrigin::BrightnessEcho,
            OnSuppression::Window(window) => {
                if now.duration_since(edited_at).as_millis() < window.as_millis() {
                    OnOrigin::BrightnessEcho
                } else {
                    OnOrigin::Remote
                }
            }
        }
    }

    // Restart the fade leg from the primary color. While a flash runs the
    // flash owns the strip; it lands on primary when it ends.
    fn show_primary(&mut self, now: I) -> FaderResult<(), S> {
        if !self.is_on || self.flash.is_some() {
            return Ok(());
        }

        self.colors.reset_current();
        self.engine.restart();
        self.restart_fade_clock(now);
        self.paint_current()
    }

    fn service_flash(&mut self, now: I) -> FaderResult<ServiceTiming<I::Duration>, S> {
        let Some(flash) = self.flash else {
            return Ok(self.timing(now));
        };

        let step = self
            .flash_sequence(flash.mode)
            .evaluate(now.duration_since(flash.started));

        match step {
            Some((color, remaining)) => {
                if flash.shown != Some(color) {
                    self.paint(&color)?;
                    self.flash = Some(ActiveFlash {
                        shown: Some(color),
                        ..flash
                    });
                }
                Ok(ServiceTiming::Delay(remaining))
            }
            None => {
                debug!("flash complete");
                self.flash = None;
                self.show_primary(now)?;
                Ok(self.timing(now))
            }
        }
    }

    fn flash_sequence(&self, mode: Mode) -> &FlashSequence<I::Duration, N> {
        match mode {
            Mode::SingleColor => &self.ack_single_color,
            Mode::AutoFade => &self.ack_auto_fade,
        }
    }

    fn is_fading(&self) -> bool {
        self.is_on && self.flash.is_none() && self.gesture.mode() == Mode::AutoFade
    }

    fn restart_fade_clock(&mut self, now: I) {
        self.next_tick = if self.is_fading() {
            now.checked_add(self.config.tick_interval())
        } else {
            None
        };
    }

    fn timing(&self, now: I) -> ServiceTiming<I::Duration> {
        if let Some(flash) = self.flash {
            let remaining = self
                .flash_sequence(flash.mode)
                .evaluate(now.duration_since(flash.started))
                .map_or(I::Duration::ZERO, |(_, remaining)| remaining);
            return ServiceTiming::Delay(remaining);
        }

        match self.next_tick {
            Some(due) if self.is_fading() || self.repaint_pending => {
                if due > now {
                    ServiceTiming::Delay(due.duration_since(now))
                } else {
                    ServiceTiming::Delay(I::Duration::ZERO)
                }
            }
            _ => ServiceTiming::Idle,
        }
    }

    // Paint whatever the strip should show right now.
    fn repaint(&mut self) -> FaderResult<(), S> {
        if self.is_on {
            self.paint_current()
        } else {
            self.paint(&Color::BLACK)
        }
    }

    fn paint_current(&mut self) -> FaderResult<(), S> {
        let color = *self.colors.current();
        self.paint(&color)
    }

    fn paint(&mut self, color: &Color) -> FaderResult<(), S> {
        match self.strip.paint(color) {
            Ok(()) => {
                self.repaint_pending = false;
                Ok(())
            }
            Err(err) => {
                warn!("strip paint failed");
                self.repaint_pending = true;
                if self.next_tick.is_none() {
                    self.next_tick = self
                        .time_source
                        .now()
                        .checked_add(self.config.tick_interval());
                }
                Err(FaderError::Paint(err))
            }
        }
    }
}

fn acknowledgement<D: TimeDuration, const N: usize>(
    color: Color,
    count: u8,
    period: D,
) -> Result<FlashSequence<D, N>, ConfigError> {
    FlashSequence::acknowledge(color, count, period).map_err(|err| match err {
        FlashError::CapacityExceeded => ConfigError::FlashCapacityExceeded,
        FlashError::EmptySequence | FlashError::ZeroDuration => ConfigError::EmptyFlash,
    })
}
