//! Construction-time validation: every misconfigured route table must be
//! rejected when the application is built, not when traffic arrives.

use http::Method;
use std::sync::Arc;

use switchboard::{Application, Error, ParamBinding, Route, RouteTable};

mod common;
use common::{registry_with_users, TestTracing, UsersController};

#[test]
fn unknown_controller_fails_construction() {
    let _tracing = TestTracing::init();
    let users = UsersController::new();
    let table = RouteTable::new()
        .with_route(Route::new(Method::GET, "/ghosts", "ghosts", "list"));

    let err = Application::new(table, Arc::new(registry_with_users(&users))).unwrap_err();
    match err {
        Error::HandlerResolution { reference, .. } => assert_eq!(reference, "ghosts"),
        other => panic!("expected HandlerResolution, got {other:?}"),
    }
}

#[test]
fn unknown_action_fails_construction() {
    let users = UsersController::new();
    let table = RouteTable::new()
        .with_route(Route::new(Method::GET, "/users", "users", "vanish"));

    let err = Application::new(table, Arc::new(registry_with_users(&users))).unwrap_err();
    match err {
        Error::UnknownAction { controller, action } => {
            assert_eq!(controller, "users");
            assert_eq!(action, "vanish");
        }
        other => panic!("expected UnknownAction, got {other:?}"),
    }
}

#[test]
fn path_binding_must_name_a_placeholder() {
    let users = UsersController::new();
    let table = RouteTable::new().with_route(
        Route::new(Method::GET, "/users/:id", "users", "get_user")
            .with_binding(ParamBinding::path("user_id")),
    );

    let err = Application::new(table, Arc::new(registry_with_users(&users))).unwrap_err();
    match err {
        Error::InvalidBinding { key, controller, action, .. } => {
            assert_eq!(key, "user_id");
            assert_eq!(controller, "users");
            assert_eq!(action, "get_user");
        }
        other => panic!("expected InvalidBinding, got {other:?}"),
    }
}

#[test]
fn duplicate_binding_keys_fail_construction() {
    let users = UsersController::new();
    let table = RouteTable::new().with_route(
        Route::new(Method::GET, "/users/:id", "users", "get_user")
            .with_binding(ParamBinding::path("id"))
            .with_binding(ParamBinding::query("id")),
    );

    let err = Application::new(table, Arc::new(registry_with_users(&users))).unwrap_err();
    assert!(matches!(err, Error::InvalidBinding { .. }));
}

#[test]
fn unknown_route_middleware_fails_construction() {
    let users = UsersController::new();
    let table = RouteTable::new().with_route(
        Route::new(Method::GET, "/users", "users", "list").with_middleware("phantom"),
    );

    let err = Application::new(table, Arc::new(registry_with_users(&users))).unwrap_err();
    match err {
        Error::HandlerResolution { reference, .. } => assert_eq!(reference, "phantom"),
        other => panic!("expected HandlerResolution, got {other:?}"),
    }
}

#[test]
fn unknown_application_middleware_is_rejected_immediately() {
    let users = UsersController::new();
    let table = RouteTable::new()
        .with_route(Route::new(Method::GET, "/users", "users", "list"));
    let app = Application::new(table, Arc::new(registry_with_users(&users)))
        .expect("app builds");

    let err = app.with_middleware("phantom").unwrap_err();
    assert!(matches!(err, Error::HandlerResolution { .. }));
}

#[test]
fn invalid_patterns_fail_construction() {
    let users = UsersController::new();
    let table = RouteTable::new()
        .with_route(Route::new(Method::GET, "/users/:", "users", "list"));

    let err = Application::new(table, Arc::new(registry_with_users(&users))).unwrap_err();
    match err {
        Error::InvalidPattern { pattern, .. } => assert_eq!(pattern, "/users/:"),
        other => panic!("expected InvalidPattern, got {other:?}"),
    }
}
