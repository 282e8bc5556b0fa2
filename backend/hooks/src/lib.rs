pub mod builtin;
pub mod registry;
pub mod types;

pub use builtin::{RedactHook, TimestampHook, TraceHook};
pub use registry::{
    FnPostHook, HookChain, PostEntry, PostHook, PreEntry, PreHook, post_series_future,
    run_post_series,
};
pub use types::HookEntry;
