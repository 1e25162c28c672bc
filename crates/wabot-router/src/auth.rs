// SPDX-FileCopyrightText: 2026 Wabot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Authorization predicates.
//!
//! Pure, read-only checks with no caching: every admin-gated command
//! re-evaluates against freshly fetched participant data, so a demoted
//! admin never retains access through stale state.

use wabot_core::{Participant, ParticipantRole, digits_only};

/// True iff the sender is the configured bot owner.
///
/// The sender identifier is normalized to digits only before comparison,
/// so gateway suffixes and formatting never matter.
pub fn is_owner(sender_id: &str, owner_number: &str) -> bool {
    digits_only(sender_id) == owner_number
}

/// True iff the sender appears among the participants with role admin or
/// superadmin. Insensitive to participant order.
pub fn is_group_admin(participants: &[Participant], sender_id: &str) -> bool {
    participants.iter().any(|p| {
        p.id == sender_id
            && matches!(
                p.role,
                ParticipantRole::Admin | ParticipantRole::SuperAdmin
            )
    })
}
