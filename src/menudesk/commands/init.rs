use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{CredentialStore, StorageBackend};

pub fn run<B: StorageBackend>(
    credentials: &CredentialStore<B>,
    location: &str,
) -> Result<CmdResult> {
    let created = credentials.initialize()?;
    let message = if created {
        CmdMessage::success(format!("Initialized menudesk store at {}", location))
    } else {
        CmdMessage::info(format!("Store already exists at {}", location))
    };
    Ok(CmdResult::default().with_message(message))
}
