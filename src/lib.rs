//! TalentScout - Conversational Candidate Screening
//!
//! This crate runs a phase-driven screening interview: it collects a
//! candidate profile, asks tech-stack questions, evaluates the answers with
//! a language model and produces a final candidate report.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
