use crate::domain::value_objects::{ArtifactKind, Flavor};

/// How a command decides whether generated routes require authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPolicy {
    /// Never authenticated, never asks.
    Never,
    /// Ask the user (or take a pre-supplied answer).
    Ask,
}

/// What one generation command produces, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationPlan {
    pub steps: Vec<ArtifactKind>,
    pub flavor: Flavor,
    pub auth: AuthPolicy,
}

impl GenerationPlan {
    /// `crud`: full CRUD triple, unauthenticated.
    pub fn crud() -> Self {
        Self {
            steps: ArtifactKind::ALL.to_vec(),
            flavor: Flavor::Crud,
            auth: AuthPolicy::Never,
        }
    }

    /// `all`: list + get-by-id triple, asks for auth.
    pub fn all() -> Self {
        Self {
            steps: ArtifactKind::ALL.to_vec(),
            flavor: Flavor::Basic,
            auth: AuthPolicy::Ask,
        }
    }

    /// `model`, `controller`, `route`: one basic artifact. Only routes ask.
    pub fn single(kind: ArtifactKind) -> Self {
        Self {
            steps: vec![kind],
            flavor: Flavor::Basic,
            auth: if kind == ArtifactKind::Route {
                AuthPolicy::Ask
            } else {
                AuthPolicy::Never
            },
        }
    }

    pub fn asks_for_auth(&self) -> bool {
        self.auth == AuthPolicy::Ask
    }
}
