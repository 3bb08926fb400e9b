//! Wishlist item handlers

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::{Html, Redirect};
use axum::Form;
use serde::Deserialize;
use tower_cookies::Cookies;

use crate::error::WishlistError;
use crate::pages;
use crate::state::AppState;
use crate::store::{ItemId, SessionStore, User, UserStore, WishlistStore};

/// Resolve the requesting user, or fail with a redirect to /login
fn require_user<U, S, W>(
    state: &AppState<U, S, W>,
    cookies: &Cookies,
) -> Result<User, WishlistError>
where
    U: UserStore,
    S: SessionStore,
    W: WishlistStore,
{
    let session = super::session::get_session_from_cookies(cookies, &state.session_store)
        .ok_or(WishlistError::NotAuthenticated)?;

    state
        .user_store
        .get_user(session.user_id)?
        .ok_or(WishlistError::NotAuthenticated)
}

/// Item ids arrive as path strings; anything that does not parse as an id
/// reads as a missing item.
fn parse_item_id(raw: &str) -> Result<ItemId, WishlistError> {
    raw.parse::<u64>()
        .map(ItemId)
        .map_err(|_| WishlistError::ItemNotFound)
}

/// GET /
pub async fn index<U, S, W>(
    State(state): State<Arc<AppState<U, S, W>>>,
    cookies: Cookies,
) -> Result<Html<String>, WishlistError>
where
    U: UserStore,
    S: SessionStore,
    W: WishlistStore,
{
    let user = require_user(&state, &cookies)?;
    let items = state.wishlist_store.list_by_owner(user.id)?;

    Ok(Html(pages::index(&user.username, &items)))
}

#[derive(Deserialize)]
pub struct ItemForm {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// GET /add
pub async fn add_form<U, S, W>(
    State(state): State<Arc<AppState<U, S, W>>>,
    cookies: Cookies,
) -> Result<Html<String>, WishlistError>
where
    U: UserStore,
    S: SessionStore,
    W: WishlistStore,
{
    require_user(&state, &cookies)?;

    Ok(Html(pages::add_item()))
}

/// POST /add
pub async fn add<U, S, W>(
    State(state): State<Arc<AppState<U, S, W>>>,
    cookies: Cookies,
    Form(form): Form<ItemForm>,
) -> Result<Redirect, WishlistError>
where
    U: UserStore,
    S: SessionStore,
    W: WishlistStore,
{
    let user = require_user(&state, &cookies)?;

    state
        .wishlist_store
        .add_item(user.id, &form.name, &form.description)?;

    Ok(Redirect::to("/"))
}

/// GET /update/{id}
pub async fn update_form<U, S, W>(
    State(state): State<Arc<AppState<U, S, W>>>,
    cookies: Cookies,
    Path(id): Path<String>,
) -> Result<Html<String>, WishlistError>
where
    U: UserStore,
    S: SessionStore,
    W: WishlistStore,
{
    let user = require_user(&state, &cookies)?;
    let id = parse_item_id(&id)?;

    let item = state
        .wishlist_store
        .find_item(id, user.id)?
        .ok_or(WishlistError::ItemNotFound)?;

    Ok(Html(pages::update_item(&item)))
}

/// POST /update/{id}
pub async fn update<U, S, W>(
    State(state): State<Arc<AppState<U, S, W>>>,
    cookies: Cookies,
    Path(id): Path<String>,
    Form(form): Form<ItemForm>,
) -> Result<Redirect, WishlistError>
where
    U: UserStore,
    S: SessionStore,
    W: WishlistStore,
{
    let user = require_user(&state, &cookies)?;
    let id = parse_item_id(&id)?;

    let updated = state
        .wishlist_store
        .update_item(id, user.id, &form.name, &form.description)?;

    if !updated {
        return Err(WishlistError::ItemNotFound);
    }

    Ok(Redirect::to("/"))
}

/// GET /delete/{id}
pub async fn delete<U, S, W>(
    State(state): State<Arc<AppState<U, S, W>>>,
    cookies: Cookies,
    Path(id): Path<String>,
) -> Result<Redirect, WishlistError>
where
    U: UserStore,
    S: SessionStore,
    W: WishlistStore,
{
    let user = require_user(&state, &cookies)?;
    let id = parse_item_id(&id)?;

    let deleted = state.wishlist_store.delete_item(id, user.id)?;

    if !deleted {
        return Err(WishlistError::ItemNotFound);
    }

    Ok(Redirect::to("/"))
}
