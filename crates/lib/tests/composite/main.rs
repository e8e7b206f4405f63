mod common;
mod configure_tests;
mod resolve_tests;
