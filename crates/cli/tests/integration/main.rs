mod common;
mod plugins_tests;
mod resolve_tests;
