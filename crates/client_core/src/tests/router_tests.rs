use shared::domain::CurrentUser;

use super::*;
use crate::page::HeadlessPage;

fn anonymous() -> AppContext {
    AppContext::init(&Settings::default(), HeadlessPage::default())
}

fn signed_in(is_admin: bool) -> AppContext {
    let mut ctx = anonymous();
    ctx.session_mut().set_current_user(CurrentUser {
        uid: "61889".into(),
        is_authenticated: true,
        is_admin,
        ..CurrentUser::default()
    });
    ctx
}

fn router() -> Router {
    Router::course_evaluations(&Settings::default())
}

#[test]
fn anonymous_user_is_sent_to_login_with_redirect() {
    let mut ctx = anonymous();
    let nav = router().navigate(&mut ctx, "/lists").expect("navigate");

    assert_eq!(nav.route.path, LOGIN_PATH);
    assert_eq!(nav.route.query_value("redirect"), Some("/lists"));
    assert_eq!(nav.redirected_from, vec!["/lists".to_string()]);
    assert_eq!(ctx.document_title(), "Welcome | Course Evaluations");
    let current = ctx.current_route().expect("committed route");
    assert_eq!(current.path, LOGIN_PATH);
}

#[test]
fn every_authenticated_route_requires_login() {
    for path in [
        "/home",
        "/departments",
        "/department/12",
        "/lists",
        "/status",
    ] {
        let mut ctx = anonymous();
        let nav = router().navigate(&mut ctx, path).expect("navigate");
        assert_eq!(nav.route.path, LOGIN_PATH, "{path} should require login");
    }
}

#[test]
fn signed_in_user_skips_login_page() {
    let mut ctx = signed_in(false);
    let nav = router().navigate(&mut ctx, "/login").expect("navigate");

    assert_eq!(
        nav.redirected_from,
        vec!["/login".to_string(), "/".to_string()]
    );
    assert_eq!(nav.route.path, "/home");
    assert_eq!(ctx.document_title(), "Home | Course Evaluations");
}

#[test]
fn login_with_redirect_lands_on_redirect_target() {
    let mut ctx = signed_in(false);
    let nav = router()
        .navigate(&mut ctx, "/login?redirect=/home")
        .expect("navigate");
    assert_eq!(nav.route.path, "/home");

    let nav = router()
        .navigate(&mut ctx, "/login?redirect=%2Fdepartment%2F7")
        .expect("navigate");
    assert_eq!(nav.route.path, "/department/7");
    assert_eq!(nav.route.param("departmentId"), Some("7"));
}

#[test]
fn global_pre_hook_follows_redirect_query_once_signed_in() {
    let mut ctx = signed_in(false);
    let nav = router()
        .navigate(&mut ctx, "/home?redirect=%20/lists%20")
        .expect("navigate");
    assert_eq!(nav.route.path, "/lists");
    assert_eq!(ctx.page().title, "List Management | Course Evaluations");
}

#[test]
fn blank_redirect_query_is_ignored() {
    let mut ctx = signed_in(false);
    let nav = router()
        .navigate(&mut ctx, "/lists?redirect=%20")
        .expect("navigate");
    assert_eq!(nav.route.path, "/lists");
    assert!(nav.redirected_from.is_empty());
}

#[test]
fn anonymous_redirect_query_is_not_followed() {
    let mut ctx = anonymous();
    let nav = router()
        .navigate(&mut ctx, "/404?redirect=/status")
        .expect("navigate");
    assert_eq!(nav.route.path, NOT_FOUND_PATH);
}

#[test]
fn status_board_requires_admin() {
    let mut ctx = signed_in(false);
    let nav = router().navigate(&mut ctx, "/status").expect("navigate");
    assert_eq!(nav.route.path, NOT_FOUND_PATH);

    let mut ctx = signed_in(true);
    let nav = router().navigate(&mut ctx, "/status").expect("navigate");
    assert_eq!(nav.route.path, "/status");
    assert_eq!(ctx.document_title(), "Status Board | Course Evaluations");
}

#[test]
fn admin_denial_path_is_configurable() {
    let settings = Settings {
        admin_denied_path: "/error".into(),
        ..Settings::default()
    };
    let mut ctx = signed_in(false);
    let nav = Router::course_evaluations(&settings)
        .navigate(&mut ctx, "/status")
        .expect("navigate");
    assert_eq!(nav.route.path, "/error");
}

#[test]
fn unmatched_paths_land_on_not_found() {
    for path in ["/nope", "/department", "/home/extra", "/errors/1"] {
        let mut ctx = anonymous();
        let nav = router().navigate(&mut ctx, path).expect("navigate");
        assert_eq!(nav.route.path, NOT_FOUND_PATH);
        assert_eq!(ctx.document_title(), "Page not found | Course Evaluations");
    }
}

#[test]
fn public_routes_are_open_to_everyone() {
    let mut ctx = anonymous();
    let nav = router().navigate(&mut ctx, "/errors").expect("navigate");
    assert!(nav.redirected_from.is_empty());
    assert_eq!(
        ctx.document_title(),
        "Course Errors Board | Course Evaluations"
    );
}

#[test]
fn title_falls_back_to_name_then_welcome() {
    let route = |name: Option<&str>, title: Option<&str>| Route {
        path: "/x".into(),
        full_path: "/x".into(),
        name: name.map(str::to_string),
        title: title.map(str::to_string),
        params: Default::default(),
        query: Default::default(),
    };
    assert_eq!(
        route(Some("home"), Some("Dashboard")).display_title(),
        "Dashboard"
    );
    assert_eq!(route(Some("sTATUS"), None).display_title(), "Status");
    assert_eq!(route(None, None).display_title(), "Welcome");
}

struct AlwaysRedirect;

impl NavigationGuard for AlwaysRedirect {
    fn name(&self) -> &'static str {
        "always_redirect"
    }

    fn check(&self, to: &Route, _user: &CurrentUser) -> GuardDecision {
        GuardDecision::Redirect(format!("{}/again", to.path.trim_end_matches('/')))
    }
}

#[test]
fn redirect_loops_are_cut_off() {
    let router = Router::new(vec![RouteRecord::view("*")]).before_each(Arc::new(AlwaysRedirect));
    let mut ctx = anonymous();
    let err = router.navigate(&mut ctx, "/start").expect_err("loop");
    assert!(matches!(err, NavigationError::RedirectLoop { .. }));
    assert!(ctx.current_route().is_none());
}

#[test]
fn unmatched_path_without_fallback_is_an_error() {
    let mut ctx = anonymous();
    ctx.set_document_title("before".into());
    let router = Router::new(vec![RouteRecord::view("/only")]);
    let err = router.navigate(&mut ctx, "/missing").expect_err("missing");
    assert_eq!(err, NavigationError::NoMatch("/missing".into()));
    assert_eq!(ctx.document_title(), "before");
}

#[test]
fn repeated_slashes_commit_canonical_path() {
    let mut ctx = signed_in(false);
    let nav = router().navigate(&mut ctx, "//home//").expect("navigate");
    assert_eq!(nav.route.path, "/home");
    assert_eq!(nav.route.full_path, "/home");
    assert!(nav.redirected_from.is_empty());
}

#[test]
fn department_param_is_percent_decoded() {
    let mut ctx = signed_in(false);
    let nav = router()
        .navigate(&mut ctx, "/department/a%20b")
        .expect("navigate");
    assert_eq!(nav.route.path, "/department/a%20b");
    assert_eq!(nav.route.param("departmentId"), Some("a b"));
}
