//! Infrastructure 層
//!
//! ドメイン層が定義する trait（Repository, MessagePusher, IdentityProvider, MessageLog）の
//! 具体的な実装と、プロトコルごとの DTO を提供します。

pub mod auth;
pub mod dto;
pub mod message_log;
pub mod message_pusher;
pub mod repository;
