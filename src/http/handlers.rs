//! Route dispatch.
//!
//! One handler receives every request, parses it into a `Route` and runs
//! the matching branch. Each branch fetches what its template needs from
//! the content store and returns a finished response.

use axum::extract::State;
use axum::http::Uri;
use axum::response::{Html, IntoResponse, Response};
use axum::Extension;

use crate::content::PageLookup;
use crate::http::context::RequestContext;
use crate::http::error::{AppError, NO_ROUTE, PAGE_NOT_FOUND};
use crate::http::response::{found, tree_json};
use crate::http::server::AppState;
use crate::render::{Template, ViewModel};
use crate::routing::Route;

/// `current` marker used by the cheatsheet page.
pub const CHEATSHEET_CURRENT: &str = "cheatsheet";

/// Entry point for all GET routes.
pub async fn dispatch(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    uri: Uri,
) -> Result<Response, AppError> {
    let route = Route::parse(uri.path()).ok_or(AppError::NotFound(NO_ROUTE))?;

    tracing::debug!(route = route.kind(), path = %uri.path(), "Dispatching request");

    match route {
        Route::Home => home(&ctx),
        Route::Tree { version } => tree(&state, &ctx, &version),
        Route::ClassReference { version } => class_reference(&state, &ctx, &version),
        Route::Cheatsheet { version } => cheatsheet(&state, &ctx, &version),
        Route::Page { version, slug } => page(&state, &ctx, &version, &slug),
    }
}

fn home(ctx: &RequestContext) -> Result<Response, AppError> {
    found(&ctx.site().start_page)
}

fn tree(state: &AppState, ctx: &RequestContext, version: &str) -> Result<Response, AppError> {
    let menu = state.store.json_menu(version, &ctx.site().menu_resource)?;
    tree_json(&menu)
}

fn class_reference(
    state: &AppState,
    ctx: &RequestContext,
    version: &str,
) -> Result<Response, AppError> {
    let classes = state.store.class_reference(version)?;
    let menu = state.store.menu(version, &ctx.site().menu_resource)?;

    let vars = ViewModel::new()
        .with("title", &format!("{} Class Reference", ctx.site().name))?
        .with("menu", &menu)?
        .with("version", version)?
        .with("classes", &classes)?;

    render(state, ctx, Template::ClassReference, &vars)
}

fn cheatsheet(state: &AppState, ctx: &RequestContext, version: &str) -> Result<Response, AppError> {
    let data = state.store.cheatsheet(version)?;
    let menu = state.store.menu(version, &ctx.site().menu_resource)?;

    let vars = ViewModel::new()
        .with("title", &format!("{} Cheatsheet", ctx.site().name))?
        .with("menu", &menu)?
        .with("version", version)?
        .with("cheatsheet", &data)?
        .with("current", CHEATSHEET_CURRENT)?;

    render(state, ctx, Template::Cheatsheet, &vars)
}

fn page(
    state: &AppState,
    ctx: &RequestContext,
    version: &str,
    slug: &str,
) -> Result<Response, AppError> {
    let page = match state.store.page(version, slug)? {
        PageLookup::Found(page) => page,
        PageLookup::NotFound => return Err(AppError::NotFound(PAGE_NOT_FOUND)),
    };

    let resource = &ctx.site().menu_resource;
    let menu = state.store.menu(version, resource)?;
    let submenu = state.store.submenu(version, resource, slug)?;

    let vars = ViewModel::new()
        .with("title", &page.title)?
        .with("source", &page.source)?
        .with("menu", &menu)?
        .with("submenu", &submenu)?
        .with("current", slug)?
        .with("version", version)?;

    render(state, ctx, Template::Index, &vars)
}

fn render(
    state: &AppState,
    ctx: &RequestContext,
    template: Template,
    vars: &ViewModel,
) -> Result<Response, AppError> {
    let html = state.renderer.render(template, &ctx.globals, vars)?;
    Ok(Html(html).into_response())
}
