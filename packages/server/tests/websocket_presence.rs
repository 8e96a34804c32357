//! Integration tests for presence and message relay over WebSocket.
//!
//! ========================================
//! テスト作業記録
//! ========================================
//! 【何をテストするか】
//! - join / leave / send_message / 切断 の各イベントと、それに伴う配信
//! - 移動時の原子性（旧ルームから外れ、新ルームにのみ所属する）
//! - 認証必須の構成での auth_required の配信と接続の切断
//!
//! 【どのようなシナリオをテストするか】
//! 1. 参加 → 移動 → 切断で人数が正しく推移する
//! 2. 未認証の送信は送信者にのみ auth_required が届く
//! 3. 同じ名前の 2 接続は両方ともリストに載る
//! 4. 未認証の参加は auth_required の後に接続が閉じられる
//! 5. 処理中の切断を含め、全クライアント切断後に在室者が残らない
//! ========================================

mod fixtures;

use fixtures::TestServer;
use serde_json::json;

#[tokio::test]
async fn test_join_switch_disconnect_counts() {
    // テスト項目: 参加 → 移動 → 切断で人数が推移し、移動時のスナップショットは 1 回だけ
    // given (前提条件):
    let server = TestServer::start().await;
    let mut observer = server.connect(None).await;
    observer.join_and_settle("중국", "Observer").await;
    let mut alice = server.connect(None).await;

    // when (操作): Alice が 한국 に参加
    alice.join("한국", "Alice").await;

    // then (期待する結果):
    let entered = alice.next_event().await.unwrap();
    assert_eq!(entered["type"], "receive_message");
    assert_eq!(entered["user"], "SYSTEM");
    assert_eq!(entered["msg"], "Alice 님이 입장했습니다.");
    let update = alice.next_event().await.unwrap();
    assert_eq!(update["type"], "room_users_update");
    assert_eq!(update["counts"]["한국"], 1);
    assert_eq!(update["lists"]["한국"], json!(["Alice"]));
    assert_eq!(observer.next_event_of("room_users_update").await, update);

    // when (操作): Alice が 일본 に移動
    alice.join("일본", "Alice").await;

    // then (期待する結果): 観測者にはスナップショットが 1 回だけ届く
    let update = observer.next_event().await.unwrap();
    assert_eq!(update["type"], "room_users_update");
    assert_eq!(update["counts"]["한국"], 0);
    assert_eq!(update["counts"]["일본"], 1);
    assert_eq!(update["lists"]["일본"], json!(["Alice"]));
    observer.expect_no_event().await;

    // when (操作): Alice が切断
    alice.close().await;

    // then (期待する結果):
    let update = observer.next_event().await.unwrap();
    assert_eq!(update["type"], "room_users_update");
    assert_eq!(update["counts"]["일본"], 0);
    assert_eq!(update["counts"]["중국"], 1);
    let presence = server.presence().await;
    assert_eq!(presence["counts"]["일본"], 0);
    assert_eq!(presence["counts"]["한국"], 0);
}

#[tokio::test]
async fn test_switch_notifies_old_and_new_rooms() {
    // テスト項目: 移動時は旧ルームに退室通知、新ルームに入室通知が届く
    // given (前提条件):
    let server = TestServer::start().await;
    let mut bob = server.connect(None).await;
    bob.join_and_settle("한국", "Bob").await;
    let mut carol = server.connect(None).await;
    carol.join_and_settle("일본", "Carol").await;
    let mut alice = server.connect(None).await;
    alice.join_and_settle("한국", "Alice").await;
    // Bob: Carol 参加時のスナップショット、Alice の入室通知とスナップショット
    // Carol: Alice 参加時のスナップショット
    bob.next_event_of("room_users_update").await;
    bob.next_event_of("room_users_update").await;
    carol.next_event_of("room_users_update").await;

    // when (操作):
    alice.join("일본", "Alice").await;

    // then (期待する結果):
    let left = bob.next_event().await.unwrap();
    assert_eq!(left["msg"], "Alice 님이 퇴장했습니다.");
    assert_eq!(bob.next_event().await.unwrap()["type"], "room_users_update");

    let entered = carol.next_event().await.unwrap();
    assert_eq!(entered["msg"], "Alice 님이 입장했습니다.");
    let update = carol.next_event().await.unwrap();
    assert_eq!(update["lists"]["일본"], json!(["Carol", "Alice"]));
    assert_eq!(update["lists"]["한국"], json!(["Bob"]));
}

#[tokio::test]
async fn test_unauthenticated_send_reaches_sender_only() {
    // テスト項目: 認証必須で未認証の送信は、送信者にのみ auth_required が届く
    // given (前提条件):
    let server = TestServer::start_with_auth(&[("tok-bob", "Bob")]).await;
    let mut bob = server.connect(Some("tok-bob")).await;
    bob.join_and_settle("한국", "Bob").await;
    let mut stranger = server.connect(None).await;

    // when (操作):
    stranger.send_message("한국", "hi").await;

    // then (期待する結果):
    let event = stranger.next_event().await.unwrap();
    assert_eq!(event["type"], "auth_required");
    assert!(event["msg"].as_str().is_some_and(|m| !m.is_empty()));
    bob.expect_no_event().await;
    let history = server.get_json("/api/rooms/한국/messages").await;
    assert_eq!(history, json!([]));
}

#[tokio::test]
async fn test_same_nickname_listed_twice() {
    // テスト項目: 同じ名前の 2 接続は両方ともリストに載り、人数は 2
    // given (前提条件):
    let server = TestServer::start().await;
    let mut first = server.connect(None).await;
    first.join_and_settle("미국", "Bob").await;
    let mut second = server.connect(None).await;

    // when (操作):
    let update = second.join_and_settle("미국", "Bob").await;

    // then (期待する結果):
    assert_eq!(update["counts"]["미국"], 2);
    assert_eq!(update["lists"]["미국"], json!(["Bob", "Bob"]));
}

#[tokio::test]
async fn test_unauthenticated_join_is_closed() {
    // テスト項目: 認証必須で未認証の参加は auth_required の後に接続が閉じられる
    // given (前提条件):
    let server = TestServer::start_with_auth(&[]).await;
    let mut stranger = server.connect(None).await;

    // when (操作):
    stranger.join("한국", "Mallory").await;

    // then (期待する結果):
    let event = stranger.next_event().await.unwrap();
    assert_eq!(event["type"], "auth_required");
    stranger.expect_closed().await;
    let presence = server.presence().await;
    assert_eq!(presence["counts"]["한국"], 0);
}

#[tokio::test]
async fn test_authenticated_identity_overrides_claimed_name() {
    // テスト項目: 認証済みの接続は名乗りではなくセッションの名前で表示される
    // given (前提条件):
    let server = TestServer::start_with_auth(&[("tok-alice", "Alice")]).await;
    let mut alice = server.connect(Some("tok-alice")).await;

    // when (操作):
    let update = alice.join_and_settle("한국", "Mallory").await;

    // then (期待する結果):
    assert_eq!(update["lists"]["한국"], json!(["Alice"]));
}

#[tokio::test]
async fn test_message_relay_to_room() {
    // テスト項目: メッセージは同じルームの参加者（送信者を含む）にのみ届く
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = server.connect(None).await;
    alice.join_and_settle("한국", "Alice").await;
    let mut bob = server.connect(None).await;
    bob.join_and_settle("한국", "Bob").await;
    let mut carol = server.connect(None).await;
    carol.join_and_settle("일본", "Carol").await;
    alice.next_event_of("room_users_update").await;
    alice.next_event_of("room_users_update").await;
    bob.next_event_of("room_users_update").await;

    // when (操作):
    alice
        .send_json(json!({"type": "send_message", "room": "한국", "text": "안녕", "user": "Alice"}))
        .await;

    // then (期待する結果):
    for client in [&mut alice, &mut bob] {
        let event = client.next_event().await.unwrap();
        assert_eq!(event["type"], "receive_message");
        assert_eq!(event["user"], "Alice");
        assert_eq!(event["msg"], "안녕");
        assert_eq!(event["time"].as_str().map(str::len), Some(8));
    }
    carol.expect_no_event().await;
}

#[tokio::test]
async fn test_leave_and_duplicate_leave() {
    // テスト項目: 退室で人数が減り、重複した退室では何も配信されない
    // given (前提条件):
    let server = TestServer::start().await;
    let mut observer = server.connect(None).await;
    observer.join_and_settle("중국", "Observer").await;
    let mut alice = server.connect(None).await;
    alice.join_and_settle("한국", "Alice").await;
    observer.next_event_of("room_users_update").await;

    // when (操作):
    alice.leave("한국").await;

    // then (期待する結果):
    let update = observer.next_event().await.unwrap();
    assert_eq!(update["counts"]["한국"], 0);

    // when (操作): 重複した退室
    alice.leave("한국").await;

    // then (期待する結果):
    observer.expect_no_event().await;
    alice.expect_no_event().await;
}

#[tokio::test]
async fn test_malformed_frames_are_ignored() {
    // テスト項目: 不正なフレームや未知のイベントは無視され、接続は維持される
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = server.connect(None).await;

    // when (操作):
    alice.send_raw("not json").await;
    alice.send_json(json!({"type": "typing"})).await;
    alice.send_json(json!({"type": "join", "room": "화성"})).await;
    alice.send_message("한국", "   ").await;

    // then (期待する結果):
    alice.expect_no_event().await;
    let update = alice.join_and_settle("한국", "Alice").await;
    assert_eq!(update["counts"]["한국"], 1);
}

#[tokio::test]
async fn test_join_without_room_uses_default_room_and_anonymous_name() {
    // テスト項目: ルームと名前を省略した参加はデフォルトルームに匿名名で参加する
    // given (前提条件):
    let server = TestServer::start().await;
    let mut client = server.connect(None).await;

    // when (操作):
    client.send_json(json!({"type": "join", "room": 42})).await;

    // then (期待する結果):
    let update = client.next_event_of("room_users_update").await;
    assert_eq!(update["lists"]["한국"], json!(["익명"]));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_presence_is_empty_after_every_client_drops() {
    // テスト項目: 参加処理中に切断された接続も含め、全クライアント切断後は全ルームが 0 人になる
    // given (前提条件): 参加済みのクライアントと、参加・移動を送った直後のクライアント
    let server = TestServer::start().await;
    let mut settled = Vec::new();
    for (room, user) in [("한국", "Alice"), ("일본", "Bob"), ("한국", "Alice")] {
        let mut client = server.connect(None).await;
        client.join_and_settle(room, user).await;
        settled.push(client);
    }
    let mut in_flight = Vec::new();
    for i in 0..8 {
        let mut client = server.connect(None).await;
        client.join("한국", &format!("Guest{}", i)).await;
        client.join("중국", &format!("Guest{}", i)).await;
        in_flight.push(client);
    }

    // when (操作): 応答を待たずに全員が切断（close しないまま破棄する）
    drop(in_flight);
    drop(settled);

    // then (期待する結果):
    let presence = server
        .wait_for_presence(|p| {
            p["counts"]
                .as_object()
                .is_some_and(|counts| counts.values().all(|c| c == 0))
        })
        .await;
    for members in presence["lists"].as_object().unwrap().values() {
        assert_eq!(members, &json!([]));
    }
}
