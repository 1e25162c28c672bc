// SPDX-FileCopyrightText: 2026 Wabot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Declarative command table.
//!
//! Every routable command is one row here: its trigger token, the
//! handler it maps to, and the access level it requires. Adding a
//! command means adding a row, not threading a new conditional through
//! the dispatcher.

use crate::texts;

/// The handler a command token dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Menu,
    Owner,
    Bot,
    Runtime,
    Ai,
    Ttdl,
    Sticker,
    SaveStatus,
    SetName,
    SetDesc,
    Kick,
    TagAll,
    Recover,
}

/// Who may invoke a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Anyone, anywhere.
    Open,
    /// Only the configured bot owner.
    Owner,
    /// Only inside a group, and only by a group admin or superadmin.
    GroupAdmin,
}

/// One row of the dispatch table.
pub struct CommandSpec {
    pub token: &'static str,
    pub command: Command,
    pub access: Access,
}

/// The full dispatch table. `.uptime` is an alias row for [`Command::Runtime`].
pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec { token: ".menu", command: Command::Menu, access: Access::Open },
    CommandSpec { token: ".owner", command: Command::Owner, access: Access::Open },
    CommandSpec { token: ".bot", command: Command::Bot, access: Access::Open },
    CommandSpec { token: ".runtime", command: Command::Runtime, access: Access::Open },
    CommandSpec { token: ".uptime", command: Command::Runtime, access: Access::Open },
    CommandSpec { token: ".ai", command: Command::Ai, access: Access::Open },
    CommandSpec { token: ".ttdl", command: Command::Ttdl, access: Access::Open },
    CommandSpec { token: ".sticker", command: Command::Sticker, access: Access::Open },
    CommandSpec { token: ".s", command: Command::SaveStatus, access: Access::Open },
    CommandSpec { token: ".setname", command: Command::SetName, access: Access::GroupAdmin },
    CommandSpec { token: ".setdesc", command: Command::SetDesc, access: Access::GroupAdmin },
    CommandSpec { token: ".kick", command: Command::Kick, access: Access::GroupAdmin },
    CommandSpec { token: ".tagall", command: Command::TagAll, access: Access::GroupAdmin },
    CommandSpec { token: ".k", command: Command::Recover, access: Access::Open },
];

/// Looks up a lowercased command token in the table.
pub fn lookup(token: &str) -> Option<&'static CommandSpec> {
    COMMANDS.iter().find(|spec| spec.token == token)
}

/// The refusal text sent when a non-admin invokes an admin command.
pub fn admin_refusal(command: Command) -> &'static str {
    match command {
        Command::SetName => texts::SETNAME_ADMIN_ONLY,
        Command::SetDesc => texts::SETDESC_ADMIN_ONLY,
        Command::Kick => texts::KICK_ADMIN_ONLY,
        Command::TagAll => texts::TAGALL_ADMIN_ONLY,
        _ => texts::GROUP_ONLY,
    }
}
