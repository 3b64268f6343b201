use std::sync::Arc;

use trellis_router::path::PathError;
use trellis_router::route::RouteError;
use trellis_router::{
    HttpMethod, Pattern, Request, Response, Route, Router, RouterError, Uri,
};

fn respond(body: &'static str) -> Arc<Route> {
    Route::callback(move |_| Response::new(200).with_body(body))
}

fn sample_router(users: Arc<Route>) -> Router {
    Router::new(Route::scan(
        [
            (
                "home",
                Route::pattern_gate(Pattern::path("home"), respond("home")),
            ),
            (
                "admin",
                Route::method_switch([(
                    HttpMethod::Get,
                    Route::scan([("users", users)], None),
                )]),
            ),
        ],
        None,
    ))
}

#[test]
fn router_when_dotted_name_is_selected_then_it_equals_a_manual_walk() {
    let users = Route::pattern_gate(Pattern::path("users"), respond("users"));
    let router = sample_router(users.clone());

    let selected = router.select("admin.GET.users").expect("name should resolve");
    let walked = router
        .select("admin")
        .and_then(|r| Ok(r.select("GET")?))
        .and_then(|r| Ok(r.select("users")?))
        .expect("manual walk should resolve");

    assert!(Arc::ptr_eq(&selected, &users));
    assert!(Arc::ptr_eq(&selected, &walked));
}

#[test]
fn router_when_subtree_is_detached_then_it_routes_independently() {
    let users = Route::pattern_gate(Pattern::path("users"), respond("users"));
    let router = sample_router(users);

    let detached = router.route("admin.GET.users").expect("subtree should detach");
    let response = detached
        .handle(
            &Request::new(HttpMethod::Get, Uri::parse("/users").unwrap()),
            &Response::new(404),
        )
        .expect("detached subtree should respond");
    assert_eq!(response.body(), "users");
}

#[test]
fn router_when_label_is_unknown_then_error_carries_route_position() {
    let users = Route::pattern_gate(Pattern::path("users"), respond("users"));
    let router = sample_router(users);

    match router.select("admin.GET.nope").expect_err("expected route miss") {
        RouterError::Route(RouteError::NotFound { name, at }) => {
            assert_eq!(name, "nope");
            assert_eq!(at, "admin.GET");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn router_when_method_label_is_unregistered_then_route_is_not_found() {
    let users = Route::pattern_gate(Pattern::path("users"), respond("users"));
    let router = sample_router(users);

    match router.select("admin.POST").expect_err("expected route miss") {
        RouterError::Route(RouteError::NotFound { name, at }) => {
            assert_eq!(name, "POST");
            assert_eq!(at, "admin");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn router_when_name_is_empty_then_select_rejects_it() {
    let users = Route::pattern_gate(Pattern::path("users"), respond("users"));
    let router = sample_router(users);

    match router.select("").expect_err("expected invalid name") {
        RouterError::Route(RouteError::Name(PathError::EmptyName)) => {}
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn router_when_selecting_past_an_endpoint_then_route_is_not_found() {
    let router = Router::new(Route::scan([("home", respond("home"))], None));

    match router.select("home.deeper").expect_err("expected route miss") {
        RouterError::Route(RouteError::NotFound { name, at }) => {
            assert_eq!(name, "deeper");
            assert_eq!(at, "home");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn router_when_selecting_through_gates_then_outer_patterns_are_retained() {
    let router = Router::new(Route::forward_gate(Route::pattern_gate(
        Pattern::path("api"),
        Route::scan([("target", respond("target"))], None),
    )));

    let selected = router.select("target").expect("name should resolve through gates");
    let response = selected
        .forward(
            &Request::new(HttpMethod::Get, Uri::parse("/api").unwrap()),
            &Response::new(404),
        )
        .expect("selected sub-route should still require the gate's path");
    assert_eq!(response.body(), "target");

    assert!(selected
        .forward(
            &Request::new(HttpMethod::Get, Uri::parse("/").unwrap()),
            &Response::new(404),
        )
        .is_none());
}
