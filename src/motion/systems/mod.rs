//! Motion domain: fixed-tick pipeline systems.

pub(crate) mod contacts;
pub(crate) mod dispatch;
pub(crate) mod report;
pub(crate) mod timers;
pub(crate) mod transitions;

pub(crate) use contacts::{detect_climb_regions, detect_ground, detect_headroom};
pub(crate) use dispatch::dispatch_motion;
pub(crate) use report::publish_report;
pub(crate) use timers::update_timers;
pub(crate) use transitions::evaluate_transitions;
