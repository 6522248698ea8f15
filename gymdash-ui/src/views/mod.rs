//! Per-view initializers
//!
//! Each runs after its fragment is installed and binds listeners on the fresh
//! markup. Missing elements mean the fragment is not the expected one; the
//! initializer then does nothing.

pub mod chat;
pub mod meals;
pub mod nutrition;
pub mod overview;
pub mod photos;
pub mod profile;
pub mod progress;
pub mod workout;

use gymdash::ViewRegistry;

/// Standard views with their initializers
pub fn registry() -> ViewRegistry {
    ViewRegistry::standard()
        .initializer("/overview", overview::init)
        .initializer("/workout", workout::init)
        .initializer("/nutrition", nutrition::init)
        .initializer("/chat", chat::init)
        .initializer("/progress", progress::init)
        .initializer("/photo-locker", photos::init)
        .initializer("/community-feed", photos::init)
        .build()
}
