mod common;

use common::{init_tracing, MapRenderer};
use http::Method;
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use switchyard::{Controller, DirRenderer, Error, Request, Router};

fn items_controller() -> Arc<Controller> {
    Arc::new(
        Controller::new("items")
            .action("show", |ctx| {
                let id = ctx.param("id").unwrap_or_default().to_string();
                ctx.render_content(id, "text/plain")
            })
            .action("create", |ctx| ctx.redirect("/items")),
    )
}

#[test]
fn dispatch_extracts_named_capture_into_params() {
    init_tracing();
    let router = Router::builder()
        .get(r"/items/(?P<id>.+)", items_controller(), "show")
        .build()
        .unwrap();

    let res = router
        .dispatch(Request::new(Method::GET, "/items/42"))
        .unwrap();
    assert_eq!(res.status, 200);
    assert_eq!(res.body, b"42");
    assert_eq!(res.header("content-type"), Some("text/plain"));
}

#[test]
fn path_capture_overrides_query_param_of_same_name() {
    init_tracing();
    let router = Router::builder()
        .get(r"/items/(?P<id>.+)", items_controller(), "show")
        .build()
        .unwrap();

    let res = router
        .dispatch(Request::new(Method::GET, "/items/42?id=99"))
        .unwrap();
    assert_eq!(res.body, b"42");
}

#[test]
fn query_params_still_reach_the_action() {
    init_tracing();
    let echo = Arc::new(Controller::new("echo").action("limit", |ctx| {
        let limit = ctx.param("limit").unwrap_or("none").to_string();
        ctx.render_content(limit, "text/plain")
    }));
    let router = Router::builder()
        .get(r"/echo", echo, "limit")
        .build()
        .unwrap();

    let res = router
        .dispatch(Request::new(Method::GET, "/echo?limit=10"))
        .unwrap();
    assert_eq!(res.body, b"10");
}

#[test]
fn method_mismatch_is_not_found() {
    init_tracing();
    let router = Router::builder()
        .delete(r"/items/(?P<id>.+)", items_controller(), "show")
        .build()
        .unwrap();

    let res = router
        .dispatch(Request::new(Method::POST, "/items/42"))
        .unwrap();
    assert_eq!(res.status, 404);
    assert!(res.body.is_empty());
}

#[test]
fn unmatched_request_never_invokes_a_handler() {
    init_tracing();
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let controller = Arc::new(Controller::new("probe").action("touch", move |ctx| {
        counter.fetch_add(1, Ordering::SeqCst);
        ctx.render_content("touched", "text/plain")
    }));
    let router = Router::builder()
        .get("/probe", controller, "touch")
        .build()
        .unwrap();

    let res = router
        .dispatch(Request::new(Method::GET, "/elsewhere"))
        .unwrap();
    assert_eq!(res.status, 404);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn first_registered_route_shadows_later_ones() {
    init_tracing();
    let first = Arc::new(
        Controller::new("first").action("show", |ctx| ctx.render_content("first", "text/plain")),
    );
    let second = Arc::new(
        Controller::new("second").action("show", |ctx| ctx.render_content("second", "text/plain")),
    );
    let router = Router::builder()
        .get(r"/items/(?P<id>.+)", first, "show")
        .get(r"/items/(?P<id>.+)", second, "show")
        .build()
        .unwrap();

    let res = router
        .dispatch(Request::new(Method::GET, "/items/1"))
        .unwrap();
    assert_eq!(res.body, b"first");
}

#[test]
fn redirect_finalizes_with_302_and_location() {
    init_tracing();
    let router = Router::builder()
        .post(r"/items", items_controller(), "create")
        .build()
        .unwrap();

    let res = router
        .dispatch(Request::new(Method::POST, "/items"))
        .unwrap();
    assert_eq!(res.status, 302);
    assert_eq!(res.header("location"), Some("/items"));
}

#[test]
fn action_without_finalize_auto_renders_action_template() {
    init_tracing();
    let quiet = Arc::new(Controller::new("pages").action("about", |_ctx| Ok(())));
    let router = Router::builder()
        .get("/about", quiet, "about")
        .renderer(MapRenderer::new().template("pages", "about", "<h1>About</h1>"))
        .build()
        .unwrap();

    let res = router
        .dispatch(Request::new(Method::GET, "/about"))
        .unwrap();
    assert_eq!(res.status, 200);
    assert_eq!(res.body, b"<h1>About</h1>");
    assert_eq!(res.header("content-type"), Some("text/html"));
}

#[test]
fn missing_default_template_propagates_as_error() {
    init_tracing();
    let quiet = Arc::new(Controller::new("pages").action("about", |_ctx| Ok(())));
    let router = Router::builder()
        .get("/about", quiet, "about")
        .renderer(MapRenderer::new())
        .build()
        .unwrap();

    let err = router
        .dispatch(Request::new(Method::GET, "/about"))
        .unwrap_err();
    assert!(matches!(err, Error::TemplateMissing { .. }));
}

#[test]
fn double_render_inside_action_propagates() {
    init_tracing();
    let greedy = Arc::new(Controller::new("greedy").action("twice", |ctx| {
        ctx.render_content("one", "text/plain")?;
        ctx.render_content("two", "text/plain")
    }));
    let router = Router::builder()
        .get("/twice", greedy, "twice")
        .build()
        .unwrap();

    let err = router
        .dispatch(Request::new(Method::GET, "/twice"))
        .unwrap_err();
    assert!(matches!(err, Error::DoubleRender));
}

#[test]
fn action_errors_pass_through_untouched() {
    init_tracing();
    let failing = Arc::new(
        Controller::new("broken")
            .action("boom", |_ctx| Err(anyhow::anyhow!("database is down").into())),
    );
    let router = Router::builder()
        .get("/boom", failing, "boom")
        .build()
        .unwrap();

    let err = router
        .dispatch(Request::new(Method::GET, "/boom"))
        .unwrap_err();
    assert!(matches!(err, Error::Other(_)));
}

#[test]
fn assigns_flow_into_file_backed_templates() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let views = dir.path().join("widgets");
    fs::create_dir_all(&views).unwrap();
    fs::write(views.join("show.html"), "<p>Hi {{ name }}</p>").unwrap();

    let widgets = Arc::new(
        Controller::new("widgets").action("show", |ctx| ctx.assign("name", "Ada")),
    );
    let router = Router::builder()
        .get("/widgets", widgets, "show")
        .renderer(DirRenderer::new(dir.path()))
        .build()
        .unwrap();

    let res = router
        .dispatch(Request::new(Method::GET, "/widgets"))
        .unwrap();
    assert_eq!(res.body, b"<p>Hi Ada</p>");
    assert_eq!(res.header("content-type"), Some("text/html"));
}
