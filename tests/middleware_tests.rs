//! Middleware chain behavior through the full application pipeline:
//! ordering, short-circuiting, authentication, failures, and context
//! propagation into controller arguments.

use http::Method;
use serde_json::json;
use std::sync::{Arc, Mutex};

use switchboard::{
    Application, AuthMiddleware, ParamBinding, RequestEvent, Route, RouteTable,
};

mod common;
use common::{
    registry_with_users, ContextMiddleware, FailingMiddleware, HaltMiddleware,
    RecordingMiddleware, TestTracing, UsersController,
};

#[test]
fn application_middleware_runs_before_route_middleware() {
    let _tracing = TestTracing::init();
    let log = Arc::new(Mutex::new(Vec::new()));
    let users = UsersController::new();

    let mut registry = registry_with_users(&users);
    registry.register_middleware("first", RecordingMiddleware::new("first", log.clone()));
    registry.register_middleware("second", RecordingMiddleware::new("second", log.clone()));
    registry.register_middleware("route-only", RecordingMiddleware::new("route-only", log.clone()));

    let table = RouteTable::new().with_route(
        Route::new(Method::GET, "/users", "users", "list").with_middleware("route-only"),
    );
    let app = Application::new(table, Arc::new(registry))
        .expect("app builds")
        .with_middleware("first")
        .expect("first resolves")
        .with_middleware("second")
        .expect("second resolves");

    let response = app.handle(&RequestEvent::new(Method::GET, "/users"));
    assert_eq!(response.status, 200);
    let seen = log.lock().expect("log lock");
    assert_eq!(*seen, vec!["first", "second", "route-only"]);
}

#[test]
fn halting_middleware_skips_later_stages_and_the_controller() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let users = UsersController::new();

    let mut registry = registry_with_users(&users);
    registry.register_middleware("before", RecordingMiddleware::new("before", log.clone()));
    registry.register_middleware("halt", Arc::new(HaltMiddleware));
    registry.register_middleware("after", RecordingMiddleware::new("after", log.clone()));

    let table = RouteTable::new().with_route(
        Route::new(Method::GET, "/users", "users", "list")
            .with_middleware("before")
            .with_middleware("halt")
            .with_middleware("after"),
    );
    let app = Application::new(table, Arc::new(registry)).expect("app builds");

    let response = app.handle(&RequestEvent::new(Method::GET, "/users"));
    assert_eq!(response.status, 204);
    assert_eq!(users.call_count(), 0);
    assert_eq!(*log.lock().expect("log lock"), vec!["before"]);
}

#[test]
fn auth_middleware_rejects_missing_or_wrong_tokens() {
    let users = UsersController::new();
    let mut registry = registry_with_users(&users);
    registry.register_middleware("auth", Arc::new(AuthMiddleware::new("sesame")));

    let table = RouteTable::new().with_route(
        Route::new(Method::GET, "/users", "users", "list").with_middleware("auth"),
    );
    let app = Application::new(table, Arc::new(registry)).expect("app builds");

    let denied = app.handle(&RequestEvent::new(Method::GET, "/users"));
    assert_eq!(denied.status, 401);
    assert_eq!(denied.body["error"]["message"], "Unauthorized");
    assert_eq!(users.call_count(), 0);

    let wrong = app.handle(
        &RequestEvent::new(Method::GET, "/users").header("authorization", "stolen"),
    );
    assert_eq!(wrong.status, 401);

    let allowed = app.handle(
        &RequestEvent::new(Method::GET, "/users").header("Authorization", "sesame"),
    );
    assert_eq!(allowed.status, 200);
    assert_eq!(users.call_count(), 1);
}

#[test]
fn failing_middleware_renders_a_server_error() {
    let users = UsersController::new();
    let mut registry = registry_with_users(&users);
    registry.register_middleware("broken", Arc::new(FailingMiddleware));

    let table = RouteTable::new().with_route(
        Route::new(Method::GET, "/users", "users", "list").with_middleware("broken"),
    );
    let app = Application::new(table, Arc::new(registry)).expect("app builds");

    let response = app.handle(&RequestEvent::new(Method::GET, "/users"));
    assert_eq!(response.status, 500);
    assert_eq!(users.call_count(), 0);
}

#[test]
fn context_written_by_middleware_reaches_controller_arguments() {
    let users = UsersController::new();
    let mut registry = registry_with_users(&users);
    registry.register_middleware(
        "session",
        ContextMiddleware::new("user_id", json!("u-7")),
    );

    let table = RouteTable::new().with_route(
        Route::new(Method::GET, "/session", "users", "echo_args")
            .with_middleware("session")
            .with_binding(ParamBinding::context("user_id")),
    );
    let app = Application::new(table, Arc::new(registry)).expect("app builds");

    let response = app.handle(&RequestEvent::new(Method::GET, "/session"));
    assert_eq!(response.status, 200);
    assert_eq!(response.body, json!(["u-7"]));
}
