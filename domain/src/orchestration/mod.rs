//! Request orchestration domain
//!
//! A request moves through these phases:
//!
//! ```text
//! Planning → Dispatching(Plan) ─┬─ Aborted(errors)
//!                               └─ Drafting → Enriching → Finalizing → Done
//! ```
//!
//! `Aborted` is terminal. `Enriching` is a pass-through when the draft asks
//! for no follow-up searches.

pub mod entities;
pub mod value_objects;
