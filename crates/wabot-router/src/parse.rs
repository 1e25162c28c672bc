// SPDX-FileCopyrightText: 2026 Wabot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command token extraction from a message's text surface.

/// The fixed prefix character that marks a text token as a command.
pub const TRIGGER: char = '.';

/// A parsed command invocation. Exists only for the duration of one
/// dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    /// The command token, lowercased, trigger character included.
    pub command: String,
    /// Remainder of the surface with the command token removed and trimmed.
    pub argument: String,
}

/// Extracts a command invocation from a text surface.
///
/// The command is the first whitespace-delimited token and must start with
/// the trigger character; matching is case-insensitive on the token only.
/// Exactly one leading token is stripped to form the argument.
pub fn parse(surface: &str) -> Option<CommandInvocation> {
    let rest = surface.trim_start();
    let token = rest.split_whitespace().next()?;
    if !token.starts_with(TRIGGER) {
        return None;
    }
    Some(CommandInvocation {
        command: token.to_lowercase(),
        argument: rest[token.len()..].trim().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_command_without_argument() {
        let inv = parse(".menu").expect("command");
        assert_eq!(inv.command, ".menu");
        assert_eq!(inv.argument, "");
    }

    #[test]
    fn command_token_is_case_insensitive() {
        for surface in [".Menu", ".MENU", ".menu"] {
            let inv = parse(surface).expect("command");
            assert_eq!(inv.command, ".menu");
        }
    }

    #[test]
    fn argument_strips_exactly_one_token_and_whitespace() {
        let inv = parse(".ai   apa itu black hole?").expect("command");
        assert_eq!(inv.command, ".ai");
        assert_eq!(inv.argument, "apa itu black hole?");
    }

    #[test]
    fn argument_preserves_inner_repetition_of_token() {
        // Only the leading token is removed, not later occurrences.
        let inv = parse(".ai .ai is a command").expect("command");
        assert_eq!(inv.argument, ".ai is a command");
    }

    #[test]
    fn leading_whitespace_is_tolerated() {
        let inv = parse("  .setname Grup Baru").expect("command");
        assert_eq!(inv.command, ".setname");
        assert_eq!(inv.argument, "Grup Baru");
    }

    #[test]
    fn non_trigger_text_is_not_a_command() {
        assert!(parse("hello world").is_none());
        assert!(parse("menu").is_none());
        assert!(parse("").is_none());
        assert!(parse("   ").is_none());
    }
}
