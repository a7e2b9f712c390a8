//! GPIO / peripheral pin assignments for the FarmGuard main board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.
//!
//! Side numbering matches the physical layout: sides 1, 3 and 4 carry an
//! HC-SR04 ranging sensor in addition to their PIR; side 2 is PIR-only.

// ---------------------------------------------------------------------------
// Ultrasonic ranging sensors (HC-SR04, trigger/echo pairs)
// ---------------------------------------------------------------------------

/// Side 1 ranging sensor.
pub const TRIG1_GPIO: i32 = 2;
pub const ECHO1_GPIO: i32 = 5;

/// Side 3 ranging sensor.
pub const TRIG3_GPIO: i32 = 3;
pub const ECHO3_GPIO: i32 = 6;

/// Side 4 ranging sensor.
pub const TRIG4_GPIO: i32 = 4;
pub const ECHO4_GPIO: i32 = 7;

// ---------------------------------------------------------------------------
// PIR motion sensors (digital, active HIGH)
// ---------------------------------------------------------------------------

pub const PIR1_GPIO: i32 = 8;
pub const PIR2_GPIO: i32 = 9;
pub const PIR3_GPIO: i32 = 10;
pub const PIR4_GPIO: i32 = 11;

// ---------------------------------------------------------------------------
// Alarm outputs
// ---------------------------------------------------------------------------

/// Shared siren, active HIGH.
pub const BUZZER_GPIO: i32 = 12;

/// Per-side flood lights, active HIGH.
pub const LIGHT1_GPIO: i32 = 14;
pub const LIGHT2_GPIO: i32 = 15;
pub const LIGHT3_GPIO: i32 = 16;
pub const LIGHT4_GPIO: i32 = 17;

// ---------------------------------------------------------------------------
// Gate security (magnetic reed switch)
// ---------------------------------------------------------------------------

/// Reed loop input, configured with the internal pull-up.  The loop is
/// normally closed; a LOW read means the circuit has been broken.
pub const REED_GPIO: i32 = 13;

// ---------------------------------------------------------------------------
// GSM modem UART
// ---------------------------------------------------------------------------

pub const GSM_UART_PORT: u32 = 1;
pub const GSM_TX_GPIO: i32 = 18;
pub const GSM_RX_GPIO: i32 = 19;
/// SIM800-class modules default to 9600 baud.
pub const GSM_BAUD: u32 = 9600;
