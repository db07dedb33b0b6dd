//! Host-side test suites for the counter panel

#[cfg(test)]
mod scenario_tests;

#[cfg(test)]
mod property_tests;
