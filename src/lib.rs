//! # nightwatch
//!
//! Ranks candidate astronomical sources by how observable they are from a
//! fixed ground site across a range of nights, accounting for solar and lunar
//! interference and a site-specific obstructed horizon (tree line).
//!
//! The pipeline: [`time_grid`] builds the night-restricted sample sequence,
//! [`ephemeris`] resolves sun/moon/source positions, [`horizon`] tests
//! obstruction clearance, [`scoring`] folds everything into a bounded score
//! and [`pipeline`] collects the per-source series into a
//! [`report::VisibilityReport`].

pub mod catalog;
pub mod constants;
pub mod ephemeris;
pub mod errors;
pub mod horizon;
pub mod pipeline;
pub mod report;
pub mod scoring;
pub mod site;
pub mod time_grid;

pub use catalog::Source;
pub use ephemeris::{separation, AnalyticEphemeris, Ephemeris, HorizontalCoord, Target};
pub use errors::NightwatchError;
pub use horizon::{HorizonProfile, HorizonSample};
pub use pipeline::{observe_sources, sky_conditions, SkyConditions};
pub use report::{SamplePoint, VisibilityReport};
pub use scoring::VisibilityScorer;
pub use site::Site;
pub use time_grid::TimeGridSpec;
