//! メッセージログ（永続化）の実装
//!
//! - `inmemory`: HashMap を使った追記専用ログ

pub mod inmemory;

pub use inmemory::InMemoryMessageLog;
