// Store traits are consumed generically within the workspace; callers bound
// by `Store` get concrete futures, so the auto-trait caveat does not apply.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod model;
pub mod store;
