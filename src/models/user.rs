// src/models/user.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// Roles understood by the permission collaborator. Account management and
/// role assignment live in the external identity service; this core only
/// interprets what the token carries.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    ClubManager,
    TeamManager,
    Coach,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UserRole::Admin => "admin",
            UserRole::ClubManager => "club_manager",
            UserRole::TeamManager => "team_manager",
            UserRole::Coach => "coach",
        };
        f.write_str(s)
    }
}
