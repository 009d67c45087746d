//! Bluelog - A personal blog engine
//!
//! This library provides the core functionality for the Bluelog blog engine.

pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod db;
pub mod models;
pub mod services;
pub mod web;
