//! Deterministic analysis stages: section classification, field
//! extraction, skills matching, quality scoring, ATS scoring, and
//! recommendation aggregation.

pub mod ats;
pub mod extract;
pub mod quality;
pub mod recommend;
pub mod sections;
pub mod skills;
pub mod types;
