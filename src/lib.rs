//! Entity creation form and onboarding wizard core for collectives.

pub mod api;
pub mod config;
pub mod entity;
pub mod error;
pub mod form;
pub mod i18n;
pub mod navigation;
pub mod telemetry;
pub mod validation;
pub mod wizard;
