use crate::config::{ClockConfig, Hand, HandConfig, Style};
use crate::geometry::{ClockTime, RenderState};
use crate::surface::Surface;

/// 12 o'clock in surface angles (0 = +x, clockwise).
pub const TWELVE_O_CLOCK: f64 = 3.0 * std::f64::consts::FRAC_PI_2;

/// Paints one complete frame: background over the whole surface first, then
/// the seconds, minutes and hours hands in that order.
pub fn render_frame<S: Surface + ?Sized>(
    surface: &mut S,
    config: &ClockConfig,
    state: &RenderState,
    time: ClockTime,
) {
    surface.clear();
    let (width, height) = (surface.width(), surface.height());
    surface.fill_rect(0.0, 0.0, width as f64, height as f64, config.background);

    for (hand, hand_config) in config.hands() {
        let angle = time.angle(hand);
        match config.style {
            Style::Classic => draw_classic_hand(surface, config, state, hand, hand_config, angle),
            Style::Modern => draw_modern_hand(surface, config, state, hand_config, angle),
        }
    }
}

fn draw_classic_hand<S: Surface + ?Sized>(
    surface: &mut S,
    config: &ClockConfig,
    state: &RenderState,
    hand: Hand,
    hand_config: &HandConfig,
    angle: f64,
) {
    let width = state.stroke_width(hand_config.thickness, config.radius_percent);
    let end = state.hand_end(angle, hand_config.size);
    surface.stroke_line(state.center(), end, width, hand_config.color);

    // the pivot sits on top of the hour hand
    if hand == Hand::Hours {
        surface.fill_circle(state.center(), pivot_radius(config, state), hand_config.color);
    }
}

fn draw_modern_hand<S: Surface + ?Sized>(
    surface: &mut S,
    config: &ClockConfig,
    state: &RenderState,
    hand_config: &HandConfig,
    angle: f64,
) {
    surface.stroke_arc(
        state.center(),
        state.hand_length(hand_config.size),
        TWELVE_O_CLOCK,
        angle + TWELVE_O_CLOCK,
        state.stroke_width(hand_config.thickness, config.radius_percent),
        hand_config.color,
    );
}

/// Radius of the classic-style center pivot, two thirds of the hour hand
/// stroke width.
pub fn pivot_radius(config: &ClockConfig, state: &RenderState) -> f64 {
    state.stroke_width(config.hours.thickness, config.radius_percent) / 1.5
}
