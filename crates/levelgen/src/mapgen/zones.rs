//! One builder per zone kind. Each lays its columns starting at the request's
//! `x` and returns how many it used, never more than `max_length`.

mod cannons;
mod dead_end;
mod gap;
mod platform;
mod straight;
mod tubes;

pub(crate) use cannons::build_cannons;
pub(crate) use dead_end::build_dead_end;
pub(crate) use gap::build_gap;
pub(crate) use platform::{PlatformSpec, build_platform};
pub(crate) use straight::build_straight;
pub(crate) use tubes::build_tubes;
