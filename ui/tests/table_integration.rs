//! The dashboard app against a mock REST backend.
//!
//! Clicks inside `TableBuilder` rows do not reach the widgets under kittest,
//! so row actions are started through the screen; dialog and toolbar buttons
//! are clicked normally.

#![cfg(not(target_arch = "wasm32"))]

mod support;

use dashboard_business::{DELETED, FormMode, SAVED};
use kittest::Queryable;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::support::{TestCtx, two_nodes};

#[tokio::test]
async fn table_shows_loaded_rows() {
    let mut ctx = TestCtx::with_rows(two_nodes()).await;
    ctx.settle().await;

    let harness = ctx.harness();
    assert_eq!(harness.state().state.screen.data().rows().len(), 2);
    assert!(harness.query_by_label("Name").is_some());
    assert!(harness.query_by_label("Visibility").is_some());
    assert!(harness.query_by_label("alpha").is_some());
    assert!(harness.query_by_label("#2").is_some());
    assert!(harness.query_by_label("2 GB").is_some());
    assert!(harness.query_by_label("Page 1 of 1").is_some());
    assert_eq!(ctx.requests("GET").await, 1);
}

#[tokio::test]
async fn confirmed_delete_reloads_once() {
    let mut ctx = TestCtx::with_rows(two_nodes()).await;
    Mock::given(method("DELETE"))
        .and(path("/api/node/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Ok": true})))
        .mount(&ctx.server)
        .await;
    ctx.settle().await;

    ctx.harness_mut().state_mut().state.screen.request_delete(1);
    ctx.harness_mut().run();
    assert!(ctx.harness().query_by_label("Delete node").is_some());

    ctx.harness().get_by_label("Confirm").click();
    ctx.settle().await;

    assert_eq!(ctx.requests("DELETE").await, 1);
    assert_eq!(ctx.requests("GET").await, 2);
    let state = &ctx.harness().state().state;
    assert!(state.screen.pending_delete().is_none());
    assert!(state.notices.messages().any(|message| message == DELETED));
}

#[tokio::test]
async fn cancelled_delete_sends_nothing() {
    let mut ctx = TestCtx::with_rows(two_nodes()).await;
    ctx.settle().await;

    ctx.harness_mut().state_mut().state.screen.request_delete(2);
    ctx.harness_mut().run();
    ctx.harness().get_by_label("Cancel").click();
    ctx.settle().await;

    assert!(ctx.harness().state().state.screen.pending_delete().is_none());
    assert_eq!(ctx.requests("DELETE").await, 0);
    assert_eq!(ctx.requests("GET").await, 1);
}

#[tokio::test]
async fn create_posts_example_values() {
    let mut ctx = TestCtx::with_rows(two_nodes()).await;
    Mock::given(method("POST"))
        .and(path("/api/node"))
        .and(body_partial_json(json!({"port": 443, "enabled": true, "expire_date": null})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Ok": true})))
        .expect(1)
        .mount(&ctx.server)
        .await;
    ctx.settle().await;

    ctx.harness().get_by_label("Create").click();
    ctx.harness_mut().run();
    {
        let form = ctx.harness().state().state.screen.form();
        assert!(form.open);
        assert_eq!(form.mode, FormMode::Create);
    }
    assert!(ctx.harness().query_by_label("Create node").is_some());

    ctx.harness().get_by_label("Save").click();
    ctx.settle().await;

    let state = &ctx.harness().state().state;
    assert!(!state.screen.form().open);
    assert!(state.notices.messages().any(|message| message == SAVED));
    assert_eq!(ctx.requests("GET").await, 2);
}

#[tokio::test]
async fn failed_load_leaves_table_empty_with_notice() {
    let mut ctx = TestCtx::with_rows(json!([])).await;
    ctx.server.reset().await;
    Mock::given(method("GET"))
        .and(path("/api/node"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"Ok": false, "Msg": "token expired"})),
        )
        .mount(&ctx.server)
        .await;
    ctx.settle().await;

    let state = &ctx.harness().state().state;
    assert!(state.screen.data().rows().is_empty());
    assert!(state.notices.messages().any(|message| message == "token expired"));
    assert!(ctx.harness().query_by_label("No data").is_some());
}
