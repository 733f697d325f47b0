//! Checks on the shape of the test suite itself

mod coverage;
