use anyhow::Result;
use taskdeck_core::clock::Clock;

use super::Session;
use crate::views::table::display_tags;

pub fn list_tags<C: Clock>(session: &Session<C>) -> Result<()> {
    display_tags(&session.repo);
    Ok(())
}
