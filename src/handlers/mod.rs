// handlers/mod.rs - Handler tiers
//
// Public (no auth) → Protected (HTTP Basic, re-checked on every request)
//
// The auth module mixes both tiers: signup is public, the rest sit behind
// basic_auth_middleware. Everything under items is protected.

pub mod auth;
pub mod items;
