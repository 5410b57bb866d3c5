#![allow(dead_code)]

pub mod file;

/// Fixed author date used by every command run from the tests (%Y-%m-%d %H:%M:%S %z)
pub const AUTHOR_DATE: &str = "2023-01-01 12:00:00 +0000";

/// Author identity used by every command run from the tests
pub const AUTHOR_NAME: &str = "fake_user";
