//! Introspection fixtures.
//!
//! `blog_introspection.json` is the `data` payload a small blogging API returns
//! for the standard introspection query. It exercises every type kind, list and
//! non-null wrappers, argument defaults, deprecations, multi-line descriptions,
//! an interface, a union, a self-referential object (`User.bestFriend`), a
//! mutually recursive pair (`User.posts` / `Post.author`), meta types and both
//! built-in and custom directives.

/// Raw JSON text of the blog fixture (`{ "__schema": … }`).
pub const BLOG_INTROSPECTION_JSON: &str = include_str!("../fixtures/blog_introspection.json");

/// The blog fixture as the `data` object of an introspection response.
#[must_use]
pub fn blog_introspection_data() -> serde_json::Value {
    serde_json::from_str(BLOG_INTROSPECTION_JSON).expect("fixture is valid JSON")
}

/// The blog fixture wrapped in a full `{ "data": … }` response envelope.
#[must_use]
pub fn blog_introspection_response() -> serde_json::Value {
    serde_json::json!({ "data": blog_introspection_data() })
}
