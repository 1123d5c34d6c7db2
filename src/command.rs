//! Event-based control for the light controller.
//!
//! Hosts translate their protocol callbacks (remote property writes, timer
//! expiries) into [`LightEvent`]s and feed them to
//! [`LightController::handle_event`](crate::LightController::handle_event),
//! typically through a channel drained by a single task.

/// Events accepted by the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LightEvent {
    /// Remote "On" characteristic written.
    On(bool),
    /// Remote hue written, in degrees.
    Hue(f32),
    /// Remote saturation written, in percent.
    Saturation(f32),
    /// Remote brightness written, in percent.
    Brightness(f32),
    /// On-event whose origin the host already knows.
    GestureOn { brightness_triggered: bool },
    /// Fade timer expired.
    Tick,
}
