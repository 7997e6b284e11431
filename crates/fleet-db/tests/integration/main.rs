mod admin_tests;
mod common;
