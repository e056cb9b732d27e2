//! Event coalescing and gesture navigation for interactive 3D viewers.
//!
//! The host feeds raw pointer, mouse, touch and keyboard events into
//! per-family [`provider::EventProvider`]s as they fire. Nothing is processed
//! at that point: events are appended to per-type buffers owned by the
//! [`dispatch::EventDispatcher`]. Once per render tick the host calls
//! [`navigation::Navigation::update`], which flushes every buffer in a fixed
//! order, tracks the active contacts, resolves the current gesture and drives
//! the camera modifiers. The modifiers themselves (turntable, trackball, pan,
//! pinch and wheel zoom math) live outside this crate behind the traits in
//! [`modifier`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`navigation`] | Top-level controller wiring events to camera modifiers |
//! | [`dispatch`] | Per-type event buffering and tick-driven handler dispatch |
//! | [`buffer`] | The `latest`/`previous` buffer pair and handler list of one event type |
//! | [`provider`] | Upstream event sources, subscriptions and pointer lock state |
//! | [`input`] | Event payloads and the closed per-family event type enums |
//! | [`tracker`] | Active contacts keyed by pointer id |
//! | [`gesture`] | Navigation modes and the gesture resolution rules |
//! | [`offsets`] | Projection of events to element-relative points |
//! | [`modifier`] | Camera modifier contracts and their factory |
//! | [`camera`] | Point and shared camera state |
//! | [`config`] | Navigation configuration (JSON / environment) |
//! | [`error`] | Crate error type |
//! | [`consts`] | Shared numeric constants |

pub mod buffer;
pub mod camera;
pub mod config;
pub mod consts;
pub mod dispatch;
pub mod error;
pub mod gesture;
pub mod input;
pub mod modifier;
pub mod navigation;
pub mod offsets;
pub mod provider;
pub mod tracker;

pub use error::NavigationError;
pub use navigation::Navigation;
