#![forbid(unsafe_code)]

//! Tourkit Runtime
//!
//! This crate provides the stateful half of tourkit: the pieces that turn
//! the pure placement engine from `tourkit-core` into a running guided
//! tour.
//!
//! # Key Components
//!
//! - [`Observable`] - Change-notifying value cell with version tracking
//! - [`Animated`] - An observable driven by an optional tween
//! - [`TransitionCoordinator`] - Retargets all animatable geometry at once,
//!   with supersede semantics for overlapping moves
//! - [`TourController`] - The step-sequencing state machine
//! - [`StepRegistry`] / [`ScrollHost`] - Traits the host implements to
//!   expose its registered steps and scrollable ancestor
//!
//! # How it fits in the system
//! The runtime is the orchestrator. The host calls [`TourController`]
//! methods (`start`, `next`, `stop`, ...) and drives everything by calling
//! `tick` once per frame; renderers subscribe to the coordinator's
//! observables and read placements from the controller. Everything is
//! single-threaded and cooperatively scheduled.

pub mod animated;
pub mod controller;
pub mod coordinator;
pub mod observable;

pub use animated::Animated;
pub use controller::{
    START_RETRY_BUDGET, ScrollHost, StepRegistry, TourController, TourEvent,
};
pub use coordinator::{MoveHandle, MoveOutcome, TransitionCoordinator};
pub use observable::{Observable, Subscription};
