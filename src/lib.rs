//! wizcheck: test harnesses for the Nextcloud backup/restore wizard
//!
//! Three independent harnesses back the Tailscale navigation fix:
//!
//! - [`viewer`] shows the manual-test instructions in a scrollable panel
//!   (native window, terminal panel, or plain stdout).
//! - [`launcher`] prints a visual checklist and runs the external wizard
//!   until its window is closed.
//! - [`verify`] statically confirms the debug banner is gone from the wizard
//!   source while its two Tailscale entry points remain.
//!
//! Each harness has an argument-less binary; the `wizcheck` binary exposes
//! all three as subcommands. Startup helpers live in a hidden module.

#[doc(hidden)]
pub mod boot;
#[doc(hidden)]
pub mod cli;
pub mod config;
pub mod launcher;
#[doc(hidden)]
pub mod utils;
pub mod verify;
pub mod viewer;

pub use boot::init_common;
