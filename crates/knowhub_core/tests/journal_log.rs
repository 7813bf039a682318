use knowhub_core::db::open_db_in_memory;
use knowhub_core::{
    Conversation, ConversationListQuery, ConversationRepository, ConversationValidationError,
    RepoError, SqliteConversationRepository, SqliteTopicRepository, Topic, TopicListQuery,
    TopicRepository, TopicStatus, TopicValidationError,
};
use std::collections::HashSet;

#[test]
fn record_and_get_topic_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTopicRepository::new(&conn);

    let mut topic = Topic::new("pricing", "saas", "Pricing research");
    topic.section = Some("go-to-market".to_string());
    topic.description = Some("competitor pricing notes".to_string());
    let id = repo.record_topic(&topic).unwrap();

    let loaded = repo.get_topic(id).unwrap().unwrap();
    assert_eq!(loaded.uuid, topic.uuid);
    assert_eq!(loaded.topic_key, "pricing");
    assert_eq!(loaded.project_key, "saas");
    assert_eq!(loaded.section.as_deref(), Some("go-to-market"));
    assert_eq!(loaded.status, TopicStatus::Active);
    assert!(loaded.created_at > 0);
}

#[test]
fn topic_listing_filters_project_and_hides_archived() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTopicRepository::new(&conn);

    let saas_topic = Topic::new("pricing", "saas", "Pricing research");
    let ops_topic = Topic::new("onboarding", "ops", "Onboarding runbook");
    let mut archived = Topic::new("legacy", "saas", "Legacy notes");
    archived.status = TopicStatus::Archived;

    repo.record_topic(&saas_topic).unwrap();
    repo.record_topic(&ops_topic).unwrap();
    repo.record_topic(&archived).unwrap();

    let active = repo.list_topics(&TopicListQuery::default()).unwrap();
    let keys: HashSet<String> = active.into_iter().map(|record| record.topic_key).collect();
    assert_eq!(
        keys,
        HashSet::from(["pricing".to_string(), "onboarding".to_string()])
    );

    let saas_only = repo
        .list_topics(&TopicListQuery {
            project: Some("saas".to_string()),
            ..TopicListQuery::default()
        })
        .unwrap();
    assert_eq!(saas_only.len(), 1);
    assert_eq!(saas_only[0].topic_key, "pricing");

    let with_archived = repo
        .list_topics(&TopicListQuery {
            include_archived: true,
            ..TopicListQuery::default()
        })
        .unwrap();
    assert_eq!(with_archived.len(), 3);
}

#[test]
fn topic_keys_are_validated_on_write() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTopicRepository::new(&conn);

    let err = repo
        .record_topic(&Topic::new("Bad Key", "saas", "title"))
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Topic(TopicValidationError::InvalidTopicKey(value)) if value == "Bad Key"
    ));
}

#[test]
fn record_and_list_conversations_with_filters() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteConversationRepository::new(&conn);

    let mut claude_saas = Conversation::new("claude", "Pricing brainstorm");
    claude_saas.project_key = Some("saas".to_string());
    claude_saas.summary = Some("tier ladder options".to_string());
    claude_saas.message_count = 14;

    let mut claude_ops = Conversation::new("claude", "Oncall retro");
    claude_ops.project_key = Some("ops".to_string());

    let mut chatgpt_saas = Conversation::new("chatgpt", "Churn analysis");
    chatgpt_saas.project_key = Some("saas".to_string());

    repo.record_conversation(&claude_saas).unwrap();
    repo.record_conversation(&claude_ops).unwrap();
    repo.record_conversation(&chatgpt_saas).unwrap();

    let all = repo
        .list_conversations(&ConversationListQuery::default())
        .unwrap();
    assert_eq!(all.len(), 3);

    let claude_only = repo
        .list_conversations(&ConversationListQuery {
            provider: Some("claude".to_string()),
            ..ConversationListQuery::default()
        })
        .unwrap();
    let titles: HashSet<String> = claude_only
        .into_iter()
        .map(|record| record.title)
        .collect();
    assert_eq!(
        titles,
        HashSet::from([
            "Pricing brainstorm".to_string(),
            "Oncall retro".to_string()
        ])
    );

    let claude_saas_only = repo
        .list_conversations(&ConversationListQuery {
            provider: Some("claude".to_string()),
            project: Some("saas".to_string()),
            ..ConversationListQuery::default()
        })
        .unwrap();
    assert_eq!(claude_saas_only.len(), 1);
    assert_eq!(claude_saas_only[0].title, "Pricing brainstorm");
    assert_eq!(claude_saas_only[0].message_count, 14);
}

#[test]
fn conversation_rejects_negative_message_count() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteConversationRepository::new(&conn);

    let mut conversation = Conversation::new("claude", "Broken import");
    conversation.message_count = -4;
    let err = repo.record_conversation(&conversation).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Conversation(ConversationValidationError::NegativeMessageCount(-4))
    ));
}

#[test]
fn listing_respects_limit() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteConversationRepository::new(&conn);

    for index in 0..5 {
        repo.record_conversation(&Conversation::new("claude", format!("Chat {index}")))
            .unwrap();
    }

    let limited = repo
        .list_conversations(&ConversationListQuery {
            limit: Some(2),
            ..ConversationListQuery::default()
        })
        .unwrap();
    assert_eq!(limited.len(), 2);
}
