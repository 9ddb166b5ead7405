//! Test suite for PetalPix
//!
//! This module organizes all tests

pub mod common;
pub mod integration;
