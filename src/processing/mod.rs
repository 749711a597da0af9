//! Keyword matching and scoring engine

pub mod matcher;
pub mod ranker;
pub mod advisor;
pub mod highlight;
pub mod role_detector;
pub mod screening;

pub use advisor::{improvement_suggestions, is_suitable, Suitability, DEFAULT_SUITABILITY_THRESHOLD};
pub use matcher::{match_score, MatchResult};
pub use ranker::{rank_all_roles, suggest_roles, suggest_roles_with_limit, RoleScore};
