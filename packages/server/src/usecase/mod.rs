//! UseCase layer
//!
//! プレゼンス（参加・移動・退室・切断）、メッセージ中継、ブロードキャストの
//! アプリケーションロジックを提供します。
//! Repository / MessagePusher / IdentityProvider / MessageLog の trait にのみ依存します。

mod broadcast;
mod disconnect;
mod error;
mod get_presence;
mod get_room_messages;
mod identity;
mod join_room;
mod leave_room;
mod open_connection;
mod send_message;

#[cfg(test)]
pub(crate) mod test_support;

pub use broadcast::BroadcastGateway;
pub use disconnect::DisconnectUseCase;
pub use error::{GetRoomMessagesError, IdentityError, JoinError, SendMessageError};
pub use get_presence::GetPresenceUseCase;
pub use get_room_messages::GetRoomMessagesUseCase;
pub use identity::{AUTH_REQUIRED_MESSAGE, IdentityResolver};
pub use join_room::JoinRoomUseCase;
pub use leave_room::LeaveRoomUseCase;
pub use open_connection::OpenConnectionUseCase;
pub use send_message::SendMessageUseCase;
