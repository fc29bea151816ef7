//! donorlink library exports for testing

pub mod core;
pub mod feed;
pub mod i18n;
pub mod tui;

#[cfg(test)]
pub mod test_support;
