//! A walk through every dialog kind on the host backend.
//!
//! Pass a TOML configuration file as the first argument to override the
//! defaults, and set `RUST_LOG=horizon_dialog=debug` to trace each step.
//!
//! Run with: cargo run -p horizon-dialog --example tour [config.toml]

use std::time::Duration;

use horizon_dialog::{
    Deadline, DialogBackend, DialogConfig, EntrySettings, FileFilter, FileSelectionSettings,
    MessageSettings, MessageStyle, NotificationSettings, OptionsSettings, OptionsStyle,
    host_dialogs,
};
use tracing_subscriber::EnvFilter;

fn main() -> horizon_dialog::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => DialogConfig::load(path)?,
        None => DialogConfig::default(),
    };
    let dialogs = host_dialogs(&config)?;
    println!("Backend: {}", dialogs.backend().name());

    let res = dialogs.show_message(
        &MessageSettings::new("Start the tour?")
            .style(MessageStyle::Question)
            .title("Horizon Dialog")
            .extra_button("Skip to files"),
        Deadline::after(Duration::from_secs(60)),
    )?;
    println!("message: {:?}", res.button);
    if res.button.is_canceled() {
        return Ok(());
    }

    if res.button.is_ok() {
        let picked = dialogs.show_options(
            &OptionsSettings::new("Pick a remote", ["origin", "upstream", "fork"]).default_option(0),
            Deadline::after(Duration::from_secs(60)),
        )?;
        println!("options: {:?} {:?}", picked.button, picked.selection);

        let choice = dialogs.show_options(
            &OptionsSettings::new("Merge strategy", ["rebase", "merge"])
                .style(OptionsStyle::Buttons)
                .default_option(0),
            Deadline::after(Duration::from_secs(60)),
        )?;
        println!("buttons: {:?} {:?}", choice.button, choice.selection);

        let entry = dialogs.show_entry(
            &EntrySettings::new("Commit message").default_entry("WIP"),
            Deadline::after(Duration::from_secs(60)),
        )?;
        println!("entry: {:?} {:?}", entry.button, entry.text);
    }

    let files = dialogs.show_file_selection(
        &FileSelectionSettings::default()
            .title("Pick sources")
            .multiple(true)
            .filter(FileFilter::new("Rust", &["*.rs"])),
        Deadline::after(Duration::from_secs(120)),
    )?;
    println!("files: {:?} {:?}", files.button, files.paths);

    dialogs.show_notification(&NotificationSettings::new("Tour finished"))?;
    Ok(())
}
