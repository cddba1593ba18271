//! # Application State
//!
//! Shared state handed to every handler. Services are immutable after
//! startup, so cloning the state only bumps reference counts.

use std::sync::Arc;

use services::{AuthService, PostService};

#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<PostService>,
    pub auth: Arc<AuthService>,
}

impl AppState {
    pub fn new(posts: PostService, auth: AuthService) -> Self {
        Self {
            posts: Arc::new(posts),
            auth: Arc::new(auth),
        }
    }
}
