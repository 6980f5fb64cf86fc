//! Shared setup for the dashboard harness tests.

use std::time::Duration;

use dashboard_ui::DashboardApp;
use dashboard_ui::state::State;
use egui_kittest::Harness;
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// How long to let the mock server answer between frames.
pub const NETWORK_WAIT_MS: u64 = 20;

pub struct TestCtx<'a> {
    pub server: MockServer,
    harness: Harness<'a, DashboardApp>,
}

impl<'a> TestCtx<'a> {
    /// App against a server that lists `rows`.
    pub async fn with_rows(rows: Value) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        let server = MockServer::start().await;
        mount_list(&server, rows).await;

        let app = DashboardApp::new(State::test(server.uri()));
        let harness = Harness::builder()
            .with_size(egui::vec2(1280.0, 800.0))
            .build_eframe(|_| app);

        Self { server, harness }
    }

    pub fn harness_mut(&mut self) -> &mut Harness<'a, DashboardApp> {
        &mut self.harness
    }

    pub fn harness(&self) -> &Harness<'a, DashboardApp> {
        &self.harness
    }

    /// Step frames until the table has nothing in flight.
    pub async fn settle(&mut self) {
        for _ in 0..200 {
            self.harness.step();
            tokio::time::sleep(Duration::from_millis(NETWORK_WAIT_MS)).await;
            self.harness.step();
            if self.harness.state().state.screen.is_idle() {
                self.harness.run_steps(4);
                return;
            }
        }
        panic!("dashboard did not settle");
    }

    pub async fn requests(&self, verb: &str) -> usize {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|request| request.method.as_str() == verb)
            .count()
    }
}

pub async fn mount_list(server: &MockServer, rows: Value) {
    let count = rows.as_array().map_or(0, Vec::len);
    Mock::given(method("GET"))
        .and(path("/api/node"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Ok": true,
            "Data": rows,
            "Count": count,
        })))
        .mount(server)
        .await;
}

pub fn two_nodes() -> Value {
    json!([
        {"id": 1, "name": "alpha", "host": "a.example.com", "traffic": 2, "status_permission": 0, "updated": "2024-05-06 07:08:09"},
        {"id": 2, "name": "beta", "host": "b.example.com", "traffic": 0.5, "status_permission": 1, "updated": "0001-01-01 00:00:00"},
    ])
}
