//! Windows backend.
//!
//! File dialogs use the common dialog box library, folder selection the
//! shell item dialog (with a legacy fallback), and messages, entries and
//! option lists a small custom dialog built from an in-memory template.
//!
//! Everything that talks to the system is gated on Windows. The encodings
//! and layouts it relies on are plain data and build everywhere.

pub mod encode;
pub mod items;
pub mod layout;
pub mod template;

#[cfg(windows)]
mod backend;
#[cfg(windows)]
mod com;
#[cfg(windows)]
mod common_dialog;
#[cfg(windows)]
mod custom;
#[cfg(windows)]
mod folder;
#[cfg(windows)]
mod hook;
#[cfg(windows)]
mod notify;


#[cfg(windows)]
pub use backend::Win32Backend;
