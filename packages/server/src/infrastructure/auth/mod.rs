//! 認証コラボレーター（IdentityProvider）の実装
//!
//! ログイン・会員登録は外部サービスの責務。ここではセッショントークンから
//! ニックネームを引くディレクトリのみを提供する。

pub mod session_directory;

pub use session_directory::InMemorySessionDirectory;
