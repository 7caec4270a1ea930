// Test-specific lint overrides: integration tests use unwrap/expect freely,
// and some pedantic/nursery lints are not appropriate for test code.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::doc_markdown,
    clippy::future_not_send,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! Integration tests for the task, comment and candidate services.
//!
//! Each service call is checked for the verb, path, query and body it sends
//! and for the typed value it hands back.
//!
//! Verification command: `cargo test --test services`

mod support;

use pipetrack::services::{CandidateService, CommentService, TaskService};
use pipetrack_proto::candidate::{CreateCandidateInput, UpdateCandidateInput};
use pipetrack_proto::comment::{CreateCommentInput, UpdateCommentInput};
use pipetrack_proto::query::{PaginationParams, SortOrder};
use pipetrack_proto::task::{CreateTaskInput, TaskStatus, UpdateTaskInput};
use serde_json::json;

use support::{
    Reply, StubBackend, candidate_json, comment_json, log_json, logged_in, task_json,
};

#[tokio::test]
async fn task_list_sends_pagination_query() {
    let stub = StubBackend::start().await;
    stub.on(
        "GET",
        "/api/tasks",
        Reply::json(
            200,
            &json!([
                task_json(1, "Jane Doe", "To Do", 1),
                task_json(2, "John Roe", "In Progress", 2),
            ]),
        ),
    );
    let tasks = TaskService::new(stub.client(&logged_in("t")));

    let params = PaginationParams {
        page: Some(1),
        limit: Some(20),
        search: Some("doe".to_string()),
        sort_by: Some("created_at".to_string()),
        order: Some(SortOrder::Desc),
    };
    let list = tasks.list(&params).await.unwrap();

    assert_eq!(list.len(), 2);
    assert_eq!(list[1].status, TaskStatus::InProgress);
    let request = stub.last_request();
    assert_eq!(
        request.query.as_deref(),
        Some("page=1&limit=20&search=doe&sort_by=created_at&order=desc")
    );
    assert_eq!(request.authorization.as_deref(), Some("Bearer t"));
}

#[tokio::test]
async fn archived_list_uses_its_own_path() {
    let stub = StubBackend::start().await;
    stub.on("GET", "/api/tasks/archived", Reply::json(200, &json!([])));
    let tasks = TaskService::new(stub.client(&logged_in("t")));

    let list = tasks.list_archived(&PaginationParams::default()).await.unwrap();
    assert!(list.is_empty());
    assert_eq!(stub.last_request().query, None);
}

#[tokio::test]
async fn task_crud_round() {
    let stub = StubBackend::start().await;
    stub.on("GET", "/api/tasks/4", Reply::json(200, &task_json(4, "Ann", "Done", 1)));
    stub.on("POST", "/api/tasks", Reply::json(201, &task_json(5, "New", "To Do", 1)));
    stub.on(
        "PUT",
        "/api/tasks/5",
        Reply::json(200, &task_json(5, "New", "In Progress", 1)),
    );
    stub.on("DELETE", "/api/tasks/5", Reply::empty(204));
    let tasks = TaskService::new(stub.client(&logged_in("t")));

    assert_eq!(tasks.get(4).await.unwrap().title, "Ann");

    let created = tasks
        .create(&CreateTaskInput {
            title: "New".to_string(),
            description: Some("first call".to_string()),
            status: None,
            due_date: Some("2024-06-01".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(created.id, 5);
    assert_eq!(
        stub.last_request().json(),
        json!({ "title": "New", "description": "first call", "due_date": "2024-06-01" })
    );

    let updated = tasks
        .update(
            5,
            &UpdateTaskInput {
                status: Some(TaskStatus::InProgress),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.status, TaskStatus::InProgress);
    assert_eq!(stub.last_request().json(), json!({ "status": "In Progress" }));

    tasks.delete(5).await.unwrap();
    assert_eq!(stub.last_request().method, "DELETE");
}

#[tokio::test]
async fn archive_and_unarchive_post_to_action_paths() {
    let stub = StubBackend::start().await;
    stub.on(
        "POST",
        "/api/tasks/3/archive",
        Reply::json(200, &json!({ "message": "archived" })),
    );
    stub.on("POST", "/api/tasks/3/unarchive", Reply::empty(200));
    let tasks = TaskService::new(stub.client(&logged_in("t")));

    tasks.archive(3).await.unwrap();
    tasks.unarchive(3).await.unwrap();

    assert_eq!(stub.requests_to("POST", "/api/tasks/3/archive").len(), 1);
    assert_eq!(stub.requests_to("POST", "/api/tasks/3/unarchive").len(), 1);
}

#[tokio::test]
async fn task_logs_are_read_only() {
    let stub = StubBackend::start().await;
    stub.on(
        "GET",
        "/api/tasks/2/logs",
        Reply::json(200, &json!([log_json(1, 2, "created"), log_json(2, 2, "status_changed")])),
    );
    let tasks = TaskService::new(stub.client(&logged_in("t")));

    let logs = tasks.logs(2).await.unwrap();
    assert_eq!(logs.len(), 2);
    assert_eq!(logs[1].action, "status_changed");
}

#[tokio::test]
async fn backend_errors_propagate_from_services() {
    let stub = StubBackend::start().await;
    stub.on(
        "DELETE",
        "/api/tasks/8",
        Reply::json(403, &json!({ "error": "only the creator can delete this task" })),
    );
    let session = logged_in("t");
    let tasks = TaskService::new(stub.client(&session));

    let err = tasks.delete(8).await.unwrap_err();
    assert_eq!(err.status(), Some(403));
    assert_eq!(err.to_string(), "only the creator can delete this task");
    assert!(session.is_authenticated());
}

#[tokio::test]
async fn comment_endpoints() {
    let stub = StubBackend::start().await;
    stub.on(
        "GET",
        "/api/tasks/7/comments",
        Reply::json(200, &json!([comment_json(1, 7, "strong candidate")])),
    );
    stub.on(
        "POST",
        "/api/tasks/7/comments",
        Reply::json(201, &comment_json(2, 7, "second round booked")),
    );
    stub.on(
        "PUT",
        "/api/comments/2",
        Reply::json(200, &comment_json(2, 7, "second round moved")),
    );
    stub.on("DELETE", "/api/comments/2", Reply::empty(204));
    let comments = CommentService::new(stub.client(&logged_in("t")));

    let list = comments.list(7).await.unwrap();
    assert_eq!(list[0].content, "strong candidate");

    let created = comments
        .create(
            7,
            &CreateCommentInput {
                content: "second round booked".to_string(),
            },
        )
        .await
        .unwrap();
    assert_eq!(created.id, 2);
    assert_eq!(
        stub.last_request().json(),
        json!({ "content": "second round booked" })
    );

    let updated = comments
        .update(
            2,
            &UpdateCommentInput {
                content: "second round moved".to_string(),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.content, "second round moved");

    comments.delete(2).await.unwrap();
    assert_eq!(stub.requests().len(), 4);
}

#[tokio::test]
async fn candidate_endpoints() {
    let stub = StubBackend::start().await;
    stub.on(
        "GET",
        "/candidates",
        Reply::json(
            200,
            &json!({
                "data": [candidate_json(1, "Jane", "Doe"), candidate_json(2, "John", "Roe")],
                "total": 12,
                "page": 2,
                "limit": 2,
            }),
        ),
    );
    stub.on("GET", "/candidates/1", Reply::json(200, &candidate_json(1, "Jane", "Doe")));
    stub.on("POST", "/candidates", Reply::json(201, &candidate_json(3, "Ann", "Lee")));
    stub.on("PUT", "/candidates/3", Reply::json(200, &candidate_json(3, "Anne", "Lee")));
    stub.on("DELETE", "/candidates/3", Reply::empty(204));
    stub.on("POST", "/candidates/3/archive", Reply::empty(200));
    stub.on("POST", "/candidates/3/unarchive", Reply::empty(200));
    let candidates = CandidateService::new(stub.client(&logged_in("t")));

    let page = candidates
        .list(&PaginationParams {
            page: Some(2),
            limit: Some(2),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(page.total, 12);
    assert_eq!(page.data[1].full_name(), "John Roe");
    assert_eq!(stub.last_request().query.as_deref(), Some("page=2&limit=2"));

    assert_eq!(candidates.get(1).await.unwrap().first_name, "Jane");

    let created = candidates
        .create(&CreateCandidateInput {
            first_name: "Ann".to_string(),
            last_name: "Lee".to_string(),
            email: "ann@example.com".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(created.id, 3);

    let updated = candidates
        .update(
            3,
            &UpdateCandidateInput {
                first_name: Some("Anne".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.first_name, "Anne");
    assert_eq!(stub.last_request().json(), json!({ "first_name": "Anne" }));

    candidates.delete(3).await.unwrap();
    candidates.archive(3).await.unwrap();
    candidates.unarchive(3).await.unwrap();
    assert_eq!(stub.requests().len(), 7);
}
