//! GPIO / ADC pin assignments for the EnvMon node board.
//!
//! Single source of truth — every adapter references this module rather
//! than hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Actuator outputs
// ---------------------------------------------------------------------------

/// General-purpose LED 1 — driven automatically by the light threshold.
pub const LED_GPIO: i32 = 4;
/// General-purpose LED 2 — toggled by the push-button and by remote writes.
pub const LED2_GPIO: i32 = 5;
/// Gas-level indicator: high concentration.
pub const RED_LED_GPIO: i32 = 25;
/// Gas-level indicator: moderate concentration.
pub const YELLOW_LED_GPIO: i32 = 26;
/// Gas-level indicator: low concentration.
pub const BLUE_LED_GPIO: i32 = 27;
/// Buzzer — driven by the proximity consumer, not routed through the gate.
pub const BUZZER_GPIO: i32 = 19;

// ---------------------------------------------------------------------------
// Digital inputs (interrupt lines)
// ---------------------------------------------------------------------------

/// Momentary push-button, active-low with pull-up. Falling-edge interrupt.
pub const BUTTON_GPIO: i32 = 17;
/// LJ12A3 inductive proximity (metal) detector, active-low. Any-edge interrupt.
pub const PROXIMITY_GPIO: i32 = 21;

// ---------------------------------------------------------------------------
// Sensors
// ---------------------------------------------------------------------------

/// DHT11 temperature/humidity one-wire data line (open-drain, pull-up).
pub const DHT_GPIO: i32 = 23;
/// MQ-135 gas sensor — ADC1 channel 6 (GPIO 34).
pub const GAS_ADC_CHANNEL: u32 = 6;
/// Photoresistor light sensor — ADC1 channel 4 (GPIO 32).
pub const LIGHT_ADC_CHANNEL: u32 = 4;

/// Full-scale value of the 12-bit ADC reads used for both analog channels.
pub const ADC_FULL_SCALE: u16 = 4095;
