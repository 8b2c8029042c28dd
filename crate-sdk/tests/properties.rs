//! Universal invariants, checked over generated event sequences.

use std::sync::Arc;

use common::types::{channel_key, Member, ServerEvent, Time};
use proptest::prelude::*;
use sdk::Store;
use uuid::Uuid;

fn ts() -> Time {
    serde_json::from_str("\"2026-01-01T00:00:00Z\"").unwrap()
}

fn seed_message(store: &Store, id: Uuid, channel: &str) {
    store.apply(ServerEvent::Message {
        id,
        server_id: Some("srv1".into()),
        from: "bob".into(),
        target: channel.into(),
        content: "seed".into(),
        timestamp: ts(),
        avatar_url: None,
        reply_to: None,
        attachments: None,
    });
}

/// add/remove reaction ops over a small pool of users and emoji
fn reaction_ops() -> impl Strategy<Value = Vec<(bool, u8, u8)>> {
    prop::collection::vec((any::<bool>(), 0u8..4, 0u8..3), 0..40)
}

proptest! {
    // invariant 1: every reaction group satisfies count = |user_ids| > 0
    #[test]
    fn reaction_groups_never_empty_and_always_counted(ops in reaction_ops()) {
        let store = Store::new();
        let id = Uuid::from_u128(1);
        seed_message(&store, id, "#general");

        let emoji = ["👍", "🎉", "😄"];
        for (add, user, e) in ops {
            let user_id = format!("u{user}");
            let event = if add {
                ServerEvent::ReactionAdd {
                    message_id: id,
                    server_id: "srv1".into(),
                    channel: "#general".into(),
                    user_id: user_id.clone(),
                    nickname: user_id,
                    emoji: emoji[e as usize].into(),
                }
            } else {
                ServerEvent::ReactionRemove {
                    message_id: id,
                    server_id: "srv1".into(),
                    channel: "#general".into(),
                    user_id: user_id.clone(),
                    nickname: user_id,
                    emoji: emoji[e as usize].into(),
                }
            };
            store.apply(event);

            for group in &store.messages("srv1:#general")[0].reactions {
                prop_assert!(group.count > 0);
                prop_assert_eq!(group.count, group.user_ids.len());
                let mut unique = group.user_ids.clone();
                unique.sort();
                unique.dedup();
                prop_assert_eq!(unique.len(), group.user_ids.len());
            }
        }
    }

    // invariant 2: names is idempotent
    #[test]
    fn names_twice_equals_names_once(nicks in prop::collection::vec("[a-z]{1,8}", 0..10)) {
        let store = Store::new();
        let names = ServerEvent::Names {
            server_id: "srv1".into(),
            channel: "#general".into(),
            members: nicks.iter().map(|n| Member::new(n.clone())).collect(),
        };
        store.apply(names.clone());
        let once = store.members("srv1:#general");
        store.apply(names);
        let twice = store.members("srv1:#general");
        prop_assert_eq!(&*once, &*twice);
    }

    // invariant 3: join is idempotent by nickname
    #[test]
    fn repeated_joins_are_one_member(nick in "[a-z]{1,8}", repeats in 1usize..5) {
        let store = Store::new();
        for _ in 0..repeats {
            store.apply(ServerEvent::Join {
                nickname: nick.clone(),
                server_id: "srv1".into(),
                channel: "#general".into(),
                avatar_url: None,
            });
        }
        prop_assert_eq!(store.members("srv1:#general").len(), 1);
    }

    // invariant 4: quit after quit is a no-op
    #[test]
    fn double_quit_is_noop(nick in "[a-z]{1,8}") {
        let store = Store::new();
        store.apply(ServerEvent::Join {
            nickname: nick.clone(),
            server_id: "srv1".into(),
            channel: "#general".into(),
            avatar_url: None,
        });
        let quit = ServerEvent::Quit { nickname: nick, reason: None };
        store.apply(quit.clone());
        let after_first = store.members("srv1:#general");
        store.apply(quit);
        let after_second = store.members("srv1:#general");
        prop_assert_eq!(&*after_first, &*after_second);
        prop_assert!(after_second.is_empty());
    }

    // invariant 6: channel_key is the exact concatenation
    #[test]
    fn channel_key_spelling(server in "[a-z0-9-]{0,12}", channel in "\\PC{0,12}") {
        let key = channel_key(&server, &channel);
        prop_assert_eq!(key, format!("{server}:{channel}"));
    }
}

// invariant 5: untouched keys keep referential identity across reducers
#[test]
fn reducers_preserve_identity_of_untouched_keys() {
    let store = Store::new();
    seed_message(&store, Uuid::from_u128(1), "#general");
    seed_message(&store, Uuid::from_u128(2), "#other");

    let other_before = store.messages(&channel_key("srv1", "#other"));
    let members_before = store.members(&channel_key("srv1", "#general"));

    seed_message(&store, Uuid::from_u128(3), "#general");

    let other_after = store.messages(&channel_key("srv1", "#other"));
    assert!(Arc::ptr_eq(&other_before, &other_after));
    // a message reducer never touches the member map at all
    assert!(Arc::ptr_eq(
        &members_before,
        &store.members(&channel_key("srv1", "#general"))
    ));
}

// invariant 7: missing keys share one constant empty per type
#[test]
fn empty_sentinels_are_identity_stable() {
    let store = Store::new();
    assert!(Arc::ptr_eq(&store.messages("a:x"), &store.messages("b:y")));
    assert!(Arc::ptr_eq(&store.members("a:x"), &store.members("b:y")));
    assert!(Arc::ptr_eq(&store.channels("a"), &store.channels("b")));
    assert!(Arc::ptr_eq(&store.roles("a"), &store.roles("b")));
    assert!(Arc::ptr_eq(&store.typing_users("a:x"), &store.typing_users("b:y")));
    assert!(Arc::ptr_eq(&store.presences("a"), &store.presences("b")));
    assert!(Arc::ptr_eq(&store.bookmarks(), &store.bookmarks()));

    // and a populated key does not disturb the sentinel
    seed_message(&store, Uuid::from_u128(1), "#general");
    assert!(Arc::ptr_eq(&store.messages("a:x"), &store.messages("b:y")));
}
