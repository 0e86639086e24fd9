//! The application's controllers.
//!
//! Each controller module follows the same layout: `mod.rs` declares the props,
//! actions, automaton state, view props and the [`ControllerLogic`](crate::ControllerLogic)
//! (projection); `reducer.rs` holds the transition table; `effects.rs` holds the
//! reactions and assembles them in `reactions(env)`.

pub mod authentication_modal;
pub mod connection_modal;
pub mod router;
pub mod storage_page;
