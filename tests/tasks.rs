use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use dailytasks::auth::{AuthService, LoginRequest, RegisterRequest};
use dailytasks::error::AppError;
use dailytasks::models::{TaskInput, COLOR_PALETTE, DEFAULT_LIST_ID};
use dailytasks::storage::{progress_key, KvStore, MemoryStore};
use dailytasks::tasks::{ProgressMessage, TaskService};
use pretty_assertions::assert_eq;

fn input(name: &str) -> TaskInput {
    TaskInput {
        name: name.to_string(),
        date: None,
        emoji: None,
    }
}

/// Registers and logs in a fresh user, then opens their task board.
async fn logged_in_service(store: Arc<MemoryStore>) -> TaskService {
    let auth = AuthService::new(store.clone(), 7, Duration::ZERO);
    auth.register(&RegisterRequest {
        name: "Ana".to_string(),
        email: "ana@x.com".to_string(),
        password: "secret1".to_string(),
        confirm_password: "secret1".to_string(),
    })
    .await
    .expect("registration should succeed");
    let session = auth
        .login(&LoginRequest {
            email: "ana@x.com".to_string(),
            password: "secret1".to_string(),
        })
        .await
        .expect("login should succeed");

    TaskService::open(store, session.user).expect("board should open")
}

#[test_log::test(tokio::test)]
async fn test_add_toggle_progress_scenario() {
    let store = Arc::new(MemoryStore::new());
    let mut service = logged_in_service(store).await;

    let task = service
        .add_task(TaskInput {
            name: "Buy milk".to_string(),
            date: Some(Utc::now().date_naive()),
            emoji: Some("🛒".to_string()),
        })
        .unwrap();

    let progress = service.progress();
    assert_eq!(progress.total, 1);
    assert_eq!(progress.pending, 1);
    assert_eq!(progress.percentage, 0.0);
    assert_eq!(progress.message, ProgressMessage::AllPending { total: 1 });

    service.toggle_task(task.id).unwrap();

    let progress = service.progress();
    assert_eq!(progress.pending, 0);
    assert_eq!(progress.completed, 1);
    assert_eq!(progress.percentage, 100.0);
    assert_eq!(progress.message, ProgressMessage::AllDone);
}

#[tokio::test]
async fn test_counts_partition_total_after_every_mutation() {
    let store = Arc::new(MemoryStore::new());
    let mut service = logged_in_service(store).await;

    let a = service.add_task(input("a")).unwrap();
    let b = service.add_task(input("b")).unwrap();
    let _c = service.add_task(input("c")).unwrap();
    let check = |service: &TaskService| {
        let p = service.progress();
        assert_eq!(p.pending + p.completed, p.total);
    };
    check(&service);

    service.toggle_task(a.id).unwrap();
    check(&service);

    service.delete_task(b.id).unwrap();
    check(&service);
    assert_eq!(service.progress().total, 2);
}

#[tokio::test]
async fn test_tasks_are_newest_first() {
    let store = Arc::new(MemoryStore::new());
    let mut service = logged_in_service(store).await;

    service.add_task(input("first")).unwrap();
    service.add_task(input("second")).unwrap();

    let names: Vec<&str> = service
        .current_list()
        .tasks
        .iter()
        .map(|t| t.name.as_str())
        .collect();
    assert_eq!(names, vec!["second", "first"]);
}

#[tokio::test]
async fn test_toggle_twice_restores_original_state() {
    let store = Arc::new(MemoryStore::new());
    let mut service = logged_in_service(store).await;
    let task = service.add_task(input("water plants")).unwrap();

    service.toggle_task(task.id).unwrap();
    let toggled = service.current_list().tasks[0].clone();
    assert!(toggled.completed);
    assert!(toggled.completed_at.is_some());

    service.toggle_task(task.id).unwrap();
    let restored = service.current_list().tasks[0].clone();
    assert!(!restored.completed);
    assert!(restored.completed_at.is_none());
}

#[tokio::test]
async fn test_unknown_ids_are_silently_ignored() {
    let store = Arc::new(MemoryStore::new());
    let mut service = logged_in_service(store).await;
    service.add_task(input("a")).unwrap();

    let ghost = uuid::Uuid::new_v4();
    service.toggle_task(ghost).unwrap();
    service.edit_task(ghost, input("renamed")).unwrap();
    service.delete_task(ghost).unwrap();

    assert_eq!(service.progress().total, 1);
    assert_eq!(service.current_list().tasks[0].name, "a");
}

#[tokio::test]
async fn test_edit_pending_task_updates_fields() {
    let store = Arc::new(MemoryStore::new());
    let mut service = logged_in_service(store).await;
    let task = service.add_task(input("draft")).unwrap();

    service
        .edit_task(
            task.id,
            TaskInput {
                name: "final".to_string(),
                date: None,
                emoji: Some("✅".to_string()),
            },
        )
        .unwrap();

    let edited = &service.current_list().tasks[0];
    assert_eq!(edited.name, "final");
    assert_eq!(edited.emoji.as_deref(), Some("✅"));
    assert!(edited.updated_at.is_some());
    // An absent date keeps the original one.
    assert_eq!(edited.date, task.date);
}

#[tokio::test]
async fn test_edit_completed_task_is_blocked() {
    let store = Arc::new(MemoryStore::new());
    let mut service = logged_in_service(store).await;
    let task = service.add_task(input("done deal")).unwrap();
    service.toggle_task(task.id).unwrap();

    let result = service.edit_task(task.id, input("rewrite history"));
    assert!(matches!(result, Err(AppError::Validation(_))));
    assert_eq!(service.current_list().tasks[0].name, "done deal");
}

#[tokio::test]
async fn test_blank_task_name_rejected() {
    let store = Arc::new(MemoryStore::new());
    let mut service = logged_in_service(store).await;

    let result = service.add_task(input("   "));
    assert!(matches!(result, Err(AppError::Validation(_))));
    assert_eq!(service.progress().total, 0);
}

#[tokio::test]
async fn test_default_list_cannot_be_deleted() {
    let store = Arc::new(MemoryStore::new());
    let mut service = logged_in_service(store).await;

    let result = service.delete_list(DEFAULT_LIST_ID);
    assert!(matches!(result, Err(AppError::Validation(_))));
    assert!(service.lists().iter().any(|l| l.id == DEFAULT_LIST_ID));
}

#[test_log::test(tokio::test)]
async fn test_deleting_current_list_falls_back_to_default() {
    let store = Arc::new(MemoryStore::new());
    let mut service = logged_in_service(store).await;

    let work = service.create_list("Work").unwrap();
    service.switch_list(&work);
    assert_eq!(service.current_list_id(), work);
    service.add_task(input("ship release")).unwrap();

    service.delete_list(&work).unwrap();
    assert_eq!(service.current_list_id(), DEFAULT_LIST_ID);
    assert!(!service.lists().iter().any(|l| l.id == work));
}

#[tokio::test]
async fn test_switch_to_unknown_list_is_ignored() {
    let store = Arc::new(MemoryStore::new());
    let mut service = logged_in_service(store).await;

    service.switch_list("no-such-list");
    assert_eq!(service.current_list_id(), DEFAULT_LIST_ID);
}

#[tokio::test]
async fn test_new_lists_take_unused_palette_colors() {
    let store = Arc::new(MemoryStore::new());
    let mut service = logged_in_service(store).await;

    service.create_list("Work").unwrap();
    service.create_list("Errands").unwrap();

    let colors: Vec<&str> = service
        .lists()
        .iter()
        .map(|l| l.color_tag.as_str())
        .collect();
    assert_eq!(colors, vec![COLOR_PALETTE[0], COLOR_PALETTE[1], COLOR_PALETTE[2]]);

    // Exhaust the palette; the fallback still hands out palette colors.
    for i in 0..6 {
        service.create_list(&format!("Extra {}", i)).unwrap();
    }
    assert!(service
        .lists()
        .iter()
        .all(|l| COLOR_PALETTE.contains(&l.color_tag.as_str())));
}

#[tokio::test]
async fn test_rename_list() {
    let store = Arc::new(MemoryStore::new());
    let mut service = logged_in_service(store).await;

    service.rename_list(DEFAULT_LIST_ID, "Today").unwrap();
    assert_eq!(service.current_list().name, "Today");

    // Unknown list ids no-op; blank names are rejected.
    service.rename_list("no-such-list", "Whatever").unwrap();
    let result = service.rename_list(DEFAULT_LIST_ID, "  ");
    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn test_board_persists_across_reopen() {
    let store = Arc::new(MemoryStore::new());
    let mut service = logged_in_service(store.clone()).await;

    let task = service.add_task(input("persisted")).unwrap();
    service.toggle_task(task.id).unwrap();
    let user = service.user().clone();
    drop(service);

    let reopened = TaskService::open(store, user).unwrap();
    assert_eq!(reopened.current_list().tasks.len(), 1);
    assert!(reopened.current_list().tasks[0].completed);
    assert_eq!(reopened.progress().percentage, 100.0);
}

#[tokio::test]
async fn test_progress_snapshot_written_after_mutations() {
    let store = Arc::new(MemoryStore::new());
    let mut service = logged_in_service(store.clone()).await;

    let task = service.add_task(input("a")).unwrap();
    service.toggle_task(task.id).unwrap();

    let raw = store
        .get(&progress_key(&service.user().id))
        .unwrap()
        .expect("snapshot should exist");
    let snapshot: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(snapshot["total"], 1);
    assert_eq!(snapshot["completed"], 1);
    assert_eq!(snapshot["percentage"], 100.0);
    assert!(snapshot["timestamp"].is_string());
}

#[tokio::test]
async fn test_boards_are_partitioned_per_user() {
    let store = Arc::new(MemoryStore::new());
    let auth = AuthService::new(store.clone(), 7, Duration::ZERO);

    let mut profiles = Vec::new();
    for (name, email) in [("Ana", "ana@x.com"), ("Ben", "ben@x.com")] {
        let profile = auth
            .register(&RegisterRequest {
                name: name.to_string(),
                email: email.to_string(),
                password: "secret1".to_string(),
                confirm_password: "secret1".to_string(),
            })
            .await
            .unwrap();
        profiles.push(profile);
    }

    let mut ana_board = TaskService::open(store.clone(), profiles[0].clone()).unwrap();
    ana_board.add_task(input("ana's task")).unwrap();

    let ben_board = TaskService::open(store, profiles[1].clone()).unwrap();
    assert_eq!(ben_board.progress().total, 0);
}
