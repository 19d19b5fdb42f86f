use std::path::Path;

use clap::Subcommand;
use vegmart_core::PreferenceStore;

/// Sub-commands available under `preference`.
#[derive(Debug, Subcommand)]
pub enum PreferenceCommands {
    /// Save the customer's delivery location
    Set { location: String },
    /// Print the saved location
    Show,
    /// Forget the saved location
    Clear,
}

pub(crate) fn run(command: PreferenceCommands, path: &Path) -> anyhow::Result<()> {
    let store = PreferenceStore::new(path);

    match command {
        PreferenceCommands::Set { location } => {
            let saved = store.save(&location)?;
            println!("customer location set to {saved}");
        }
        PreferenceCommands::Show => {
            let location = store.load()?;
            if location.is_empty() {
                println!("no customer location saved; showing all products");
            } else {
                println!("{location}");
            }
        }
        PreferenceCommands::Clear => {
            store.clear()?;
            println!("customer location cleared");
        }
    }

    Ok(())
}
