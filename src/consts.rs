// Floating point comparisons and surface offsets
pub const FEQ_EPSILON: f64 = 0.0001;

// Default reflection/refraction bounce budget
pub const DEFAULT_RECURSION_DEPTH: usize = 4;

// Worker count used when the available parallelism can't be queried
pub const DEFAULT_WORKERS: usize = 4;

// Default output location for the command-line renderer
pub const OUT_FILE: &str = "out.ppm";

// Common refraction indices
pub const VACUUM_RI: f64 = 1.0;
pub const AIR_RI: f64 = 1.00029;
pub const WATER_RI: f64 = 1.333;
pub const GLASS_RI: f64 = 1.5;
pub const DIAMOND_RI: f64 = 2.417;
