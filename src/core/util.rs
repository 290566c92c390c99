//! Validation utilities for triangulations and meshes.

pub mod delaunay_validation;

pub use delaunay_validation::*;
