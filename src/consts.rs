//! Shared numeric constants for the navigation crate.

// ── Gesture resolution ──────────────────────────────────────────

/// Cosine above which two contact movements count as parallel (pan) rather
/// than converging or diverging (pinch zoom).
pub const PAN_COSINE_THRESHOLD: f64 = 0.2;

/// Number of contacts a two-finger gesture (pinch, multi-touch pan) needs.
pub const MULTI_TOUCH_CONTACTS: usize = 2;

// ── Buttons ─────────────────────────────────────────────────────

/// Bit of the pointer `buttons` mask for the primary (left) button.
pub const PRIMARY_BUTTON_MASK: u16 = 1;

/// Bit of the pointer `buttons` mask for the secondary (right) button.
pub const SECONDARY_BUTTON_MASK: u16 = 1 << 1;

/// Bit of the pointer `buttons` mask for the auxiliary (middle) button.
pub const AUXILIARY_BUTTON_MASK: u16 = 1 << 2;

// ── Projection ──────────────────────────────────────────────────

/// Device pixel ratio assumed until the host reports one.
pub const DEFAULT_DEVICE_PIXEL_RATIO: f64 = 1.0;
