mod common;

use pawpad::pets::{starter_catalog, ChatProcessor, ChatUser};
use tokio::runtime::Runtime;

#[test]
fn a_new_user_can_go_from_first_message_to_cared_for_pet() {
    let rt = Runtime::new().unwrap();
    rt.block_on(async {
        let dir = tempfile::tempdir().unwrap();
        let service = common::service_in(&dir);
        service.seed_catalog(starter_catalog()).await.unwrap();

        let processor = ChatProcessor::new(service, "Hello from the pet house!");
        let kira = ChatUser::new("7711", Some("kira"));

        let reply = processor.process(&kira, "/start").await;
        assert!(reply.contains("Hello from the pet house!"), "{}", reply);

        // Points arrive out of band (platform rewards); grant some directly.
        processor.service().credit("7711", 50).await.unwrap();

        let reply = processor.process(&kira, "shop").await;
        assert!(reply.contains("Hamster"), "{}", reply);

        let reply = processor.process(&kira, "buy hamster").await;
        assert!(reply.contains("Balance left: 20 pts"), "{}", reply);

        let reply = processor.process(&kira, "feed").await;
        assert!(reply.contains("Hunger is now 100/100"), "{}", reply);

        let reply = processor.process(&kira, "balance").await;
        assert!(reply.contains("20 pts"), "{}", reply);
    });
}

#[test]
fn two_users_keep_separate_pets_and_balances() {
    let rt = Runtime::new().unwrap();
    rt.block_on(async {
        let dir = tempfile::tempdir().unwrap();
        let service = common::service_in(&dir);
        service.seed_catalog(starter_catalog()).await.unwrap();
        let processor = ChatProcessor::new(service, "hi");

        let alice = ChatUser::new("1", Some("alice"));
        let bob = ChatUser::new("2", Some("bob"));

        processor.process(&alice, "start").await;
        processor.process(&bob, "start").await;
        processor.service().credit("1", 100).await.unwrap();
        processor.service().credit("2", 100).await.unwrap();

        processor.process(&alice, "buy cat").await;
        processor.process(&bob, "buy dog").await;

        let doc = processor.service().snapshot().await.unwrap();
        assert_eq!(doc.user_pets["1"].kind, "cat");
        assert_eq!(doc.user_pets["2"].kind, "dog");
        assert_eq!(doc.users["1"].balance, 40);
        assert_eq!(doc.users["2"].balance, 20);
    });
}

#[test]
fn gibberish_gets_a_help_hint_not_an_error() {
    let rt = Runtime::new().unwrap();
    rt.block_on(async {
        let dir = tempfile::tempdir().unwrap();
        let service = common::service_in(&dir);
        let processor = ChatProcessor::new(service, "hi");
        let user = ChatUser::new("5", None);

        let reply = processor.process(&user, "sudo make me a sandwich").await;
        assert!(reply.contains("SHOP, BUY <name>, FEED, PLAY"), "{}", reply);
    });
}
