//! Per-collection rules.

use super::{Access, Operation, Principal, Resource};

pub(super) fn allows(principal: &Principal, access: &Access<'_>) -> bool {
    let op = access.operation;
    match access.target {
        Resource::UserPermission { owner_id } => user_permission(principal, op, owner_id),
        Resource::Quiz { owner_id } => quiz(principal, op, owner_id, access.incoming),
        Resource::Quizzes { owner_filter } => {
            op == Operation::List && owner_filter.is_some_and(|id| principal.is(id))
        }
        Resource::QuizSecret { quiz_owner_id } => {
            op != Operation::List && principal.is(quiz_owner_id)
        }
        Resource::Team {
            quiz_owner_id,
            member,
        } => team(principal, op, quiz_owner_id, member),
        Resource::Teams { quiz_owner_id } => op == Operation::List && principal.is(quiz_owner_id),
        Resource::TeamSecret {
            quiz_owner_id,
            creator,
        } => match op {
            Operation::Get => principal.is(quiz_owner_id),
            Operation::Create => creator,
            _ => false,
        },
        Resource::PlayerTeam { player_id } => {
            matches!(op, Operation::Get | Operation::Create) && principal.is(player_id)
        }
        Resource::PlayerTeams { player_filter } => {
            op == Operation::List && player_filter.is_some_and(|id| principal.is(id))
        }
        Resource::WallInProgress {
            quiz_owner_id,
            member,
        } => wall(principal, op, quiz_owner_id, member, access.incoming),
        Resource::UserPermissions
        | Resource::QuizSecrets
        | Resource::TeamSecrets
        | Resource::WallsInProgress => false,
    }
}

fn user_permission(principal: &Principal, op: Operation, owner_id: &str) -> bool {
    match op {
        Operation::Get => principal.is(owner_id),
        Operation::Create | Operation::Update | Operation::Delete => principal.admin,
        Operation::List => false,
    }
}

fn quiz(
    principal: &Principal,
    op: Operation,
    owner_id: &str,
    incoming: Option<Resource<'_>>,
) -> bool {
    match op {
        Operation::Get => true,
        Operation::Create => principal.is(owner_id),
        // owner may edit but never hand the quiz over
        Operation::Update => {
            principal.is(owner_id)
                && matches!(incoming, Some(Resource::Quiz { owner_id: next }) if next == owner_id)
        }
        Operation::List | Operation::Delete => false,
    }
}

fn team(principal: &Principal, op: Operation, quiz_owner_id: &str, member: bool) -> bool {
    match op {
        Operation::Get => member || principal.is(quiz_owner_id),
        Operation::Create => member,
        Operation::List | Operation::Update | Operation::Delete => false,
    }
}

fn wall(
    principal: &Principal,
    op: Operation,
    quiz_owner_id: &str,
    member: bool,
    incoming: Option<Resource<'_>>,
) -> bool {
    match op {
        Operation::Get => member || principal.is(quiz_owner_id),
        Operation::Create => member,
        Operation::Update => {
            member && matches!(incoming, Some(Resource::WallInProgress { member: true, .. }))
        }
        Operation::List | Operation::Delete => false,
    }
}
