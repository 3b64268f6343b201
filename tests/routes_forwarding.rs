use std::sync::Arc;

use trellis_router::{
    HttpMethod, Middleware, Pattern, Request, Response, ResourceAction, ResourceEndpoint, Route,
    Router, Uri,
};

fn request(method: HttpMethod, uri: &str) -> Request {
    Request::new(method, Uri::parse(uri).expect("test uri should parse"))
}

fn prototype() -> Response {
    Response::new(404)
}

fn respond(body: &'static str) -> Arc<Route> {
    Route::callback(move |_| Response::new(200).with_body(body))
}

#[test]
fn router_when_no_pattern_matches_then_request_is_unhandled() {
    let router = Router::new(Route::pattern_gate(Pattern::path("foo"), respond("foo")));
    assert!(router
        .handle(&request(HttpMethod::Get, "/bar"), &prototype())
        .is_none());
}

#[test]
fn router_when_pattern_matches_then_endpoint_responds() {
    let router = Router::new(Route::pattern_gate(Pattern::path("foo"), respond("foo")));
    let response = router
        .handle(&request(HttpMethod::Get, "/foo"), &prototype())
        .expect("matched route should respond");
    assert_eq!(response.body(), "foo");
}

#[test]
fn router_when_path_suffix_remains_then_endpoint_declines() {
    let router = Router::new(Route::pattern_gate(Pattern::path("foo"), respond("foo")));
    assert!(router
        .handle(&request(HttpMethod::Get, "/foo/extra"), &prototype())
        .is_none());
}

#[test]
fn router_when_method_differs_then_switch_returns_unhandled() {
    let router = Router::new(Route::method_switch([(
        HttpMethod::Get,
        Route::pattern_gate(Pattern::path("form"), respond("form")),
    )]));
    assert!(router
        .handle(&request(HttpMethod::Post, "/form"), &prototype())
        .is_none());
}

#[test]
fn router_when_method_matches_but_pattern_does_not_then_unhandled() {
    let router = Router::new(Route::method_switch([(
        HttpMethod::Get,
        Route::pattern_gate(Pattern::path("form"), respond("form")),
    )]));
    assert!(router
        .handle(&request(HttpMethod::Get, "/other"), &prototype())
        .is_none());
}

#[test]
fn router_when_scan_children_overlap_then_first_registered_wins() {
    let router = Router::new(Route::scan(
        [
            ("first", Route::pattern_gate(Pattern::path("page"), respond("first"))),
            ("second", Route::pattern_gate(Pattern::path("page"), respond("second"))),
        ],
        None,
    ));
    let response = router
        .handle(&request(HttpMethod::Get, "/page"), &prototype())
        .expect("overlapping scan should respond");
    assert_eq!(response.body(), "first");
}

#[test]
fn router_when_no_scan_child_matches_then_default_responds() {
    let router = Router::new(Route::scan(
        [("a", Route::pattern_gate(Pattern::path("a"), respond("a")))],
        Some(respond("fallback")),
    ));
    let response = router
        .handle(&request(HttpMethod::Get, "/"), &prototype())
        .expect("default route should respond");
    assert_eq!(response.body(), "fallback");
}

#[test]
fn router_when_id_attribute_present_then_item_branch_is_taken() {
    let select = Route::attribute_select(
        "id",
        ("item", respond("item")),
        ("index", respond("index")),
    );
    let router = Router::new(Route::pattern_gate(
        Pattern::path("user"),
        Route::scan(
            [(
                "item",
                Route::pattern_gate(
                    Pattern::param_number("id").expect("preset constraint"),
                    select.clone(),
                ),
            )],
            Some(select),
        ),
    ));

    let item = router
        .handle(&request(HttpMethod::Get, "/user/7"), &prototype())
        .expect("item request should respond");
    assert_eq!(item.body(), "item");

    let index = router
        .handle(&request(HttpMethod::Get, "/user"), &prototype())
        .expect("index request should respond");
    assert_eq!(index.body(), "index");
}

struct HeaderStamp;

impl Middleware for HeaderStamp {
    fn process(
        &self,
        request: &Request,
        next: &dyn Fn(&Request) -> Option<Response>,
    ) -> Option<Response> {
        next(request).map(|response| response.with_header("X-Traced", "1"))
    }
}

#[test]
fn router_when_middleware_wraps_route_then_inner_response_is_decorated() {
    let router = Router::new(Route::middleware(
        Arc::new(HeaderStamp),
        Route::pattern_gate(Pattern::path("mw"), respond("mw")),
    ));

    let response = router
        .handle(&request(HttpMethod::Get, "/mw"), &prototype())
        .expect("middleware route should respond");
    assert_eq!(response.header("x-traced"), Some("1"));

    assert!(router
        .handle(&request(HttpMethod::Get, "/other"), &prototype())
        .is_none());
}

#[test]
fn router_when_path_end_gate_guards_resource_then_item_paths_are_blocked() {
    let resource = ResourceEndpoint::new()
        .on(ResourceAction::Index, |_| Response::new(200))
        .on(ResourceAction::Get, |_| Response::new(200));

    let open = Router::new(Route::pattern_gate(
        Pattern::path("pages"),
        Route::resource(resource),
    ));
    assert!(open
        .handle(&request(HttpMethod::Get, "/pages/7"), &prototype())
        .is_some());

    let resource = ResourceEndpoint::new()
        .on(ResourceAction::Index, |_| Response::new(200))
        .on(ResourceAction::Get, |_| Response::new(200));
    let guarded = Router::new(Route::pattern_gate(
        Pattern::path("pages"),
        Route::path_end(Route::resource(resource)),
    ));
    assert!(guarded
        .handle(&request(HttpMethod::Get, "/pages/7"), &prototype())
        .is_none());
    assert!(guarded
        .handle(&request(HttpMethod::Get, "/pages"), &prototype())
        .is_some());
}

#[test]
fn router_when_lazy_route_is_first_used_then_factory_resolves_once() {
    let router = Router::new(Route::lazy(|| {
        Route::pattern_gate(Pattern::path("lazy"), respond("lazy"))
    }));

    let first = router
        .handle(&request(HttpMethod::Get, "/lazy"), &prototype())
        .expect("lazy route should respond");
    let second = router
        .handle(&request(HttpMethod::Get, "/lazy"), &prototype())
        .expect("lazy route should respond again");
    assert_eq!(first, second);
}

#[test]
fn router_when_forwarded_twice_then_outputs_are_equal() {
    let router = Router::new(Route::pattern_gate(
        Pattern::composite([
            Pattern::path("post"),
            Pattern::param_number("id").expect("preset constraint"),
        ]),
        Route::callback(|req| Response::new(200).with_body(req.attribute("id").unwrap_or(""))),
    ));

    let req = request(HttpMethod::Get, "/post/7523");
    let first = router.handle(&req, &prototype());
    let second = router.handle(&req, &prototype());
    assert_eq!(first, second);
    assert_eq!(first.expect("should respond").body(), "7523");
}
