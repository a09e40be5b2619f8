//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use lookup_route::inventory::{
    Application, Destination, Domain, Inventory, InventoryError, InventoryResult, Organization,
    Route, Space,
};

/// One inventory call, as seen by [`FakeInventory`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Domains(String),
    Routes {
        hosts: Vec<String>,
        domain_guid: String,
        path: String,
    },
    Apps(Vec<String>),
    Space(String),
}

/// In-memory inventory with call recording and failure injection.
#[derive(Debug, Default)]
pub struct FakeInventory {
    pub domains: Vec<Domain>,
    pub routes: Vec<Route>,
    pub apps: Vec<Application>,
    pub spaces: Vec<(Space, Organization)>,
    /// Zero-based index of the app batch call that fails.
    pub fail_batch: Option<usize>,
    pub fail_space: bool,
    /// Later batches answer faster, so concurrent fetches finish out of order.
    pub stagger_batches: bool,
    /// Answer app batches in reverse order of the requested guids.
    pub reverse_batches: bool,
    /// Split domain name filters on commas, as the Cloud Controller does.
    pub split_name_filters: bool,
    batch_calls: AtomicUsize,
    calls: Mutex<Vec<Call>>,
}

impl FakeInventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_domain(mut self, name: &str) -> Self {
        self.domains.push(domain(name));
        self
    }

    pub fn with_route(mut self, route: Route) -> Self {
        self.routes.push(route);
        self
    }

    /// Register `count` apps named `app-0..` in `space-1`/`org-1`.
    pub fn with_apps(mut self, count: usize) -> Self {
        for i in 0..count {
            self.apps.push(app(&format!("app-{i}"), "space-1"));
        }
        self.with_space("space-1", "dev", "org-1", "acme")
    }

    pub fn with_space(mut self, guid: &str, name: &str, org_guid: &str, org_name: &str) -> Self {
        self.spaces.push((
            Space {
                guid: guid.into(),
                name: name.into(),
                organization_guid: org_guid.into(),
            },
            Organization {
                guid: org_guid.into(),
                name: org_name.into(),
            },
        ));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn app_batches(&self) -> Vec<Vec<String>> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Apps(ids) => Some(ids),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

fn injected(what: &str) -> InventoryError {
    InventoryError::Status {
        url: format!("fake://{what}"),
        status: 500,
        detail: "injected failure".into(),
    }
}

impl Inventory for FakeInventory {
    async fn lookup_domains_by_name(&self, name: &str) -> InventoryResult<Vec<Domain>> {
        self.record(Call::Domains(name.into()));
        let names: Vec<&str> = if self.split_name_filters {
            name.split(',').collect()
        } else {
            vec![name]
        };
        Ok(self
            .domains
            .iter()
            .filter(|d| names.contains(&d.name.as_str()))
            .cloned()
            .collect())
    }

    async fn lookup_routes(
        &self,
        hosts: &[&str],
        domain_guid: &str,
        path: &str,
    ) -> InventoryResult<Vec<Route>> {
        self.record(Call::Routes {
            hosts: hosts.iter().map(|h| h.to_string()).collect(),
            domain_guid: domain_guid.into(),
            path: path.into(),
        });
        Ok(self
            .routes
            .iter()
            .filter(|r| {
                hosts.contains(&r.host.as_str()) && r.domain_guid == domain_guid && r.path == path
            })
            .cloned()
            .collect())
    }

    async fn fetch_applications_by_ids(&self, guids: &[String]) -> InventoryResult<Vec<Application>> {
        let index = self.batch_calls.fetch_add(1, Ordering::SeqCst);
        self.record(Call::Apps(guids.to_vec()));

        if self.stagger_batches {
            let delay = 20u64.saturating_sub(index as u64 * 5);
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
        if self.fail_batch == Some(index) {
            return Err(injected("apps"));
        }

        let mut found: Vec<Application> = self
            .apps
            .iter()
            .filter(|a| guids.contains(&a.guid))
            .cloned()
            .collect();
        if self.reverse_batches {
            found.reverse();
        }
        Ok(found)
    }

    async fn fetch_space_with_organization(
        &self,
        space_guid: &str,
    ) -> InventoryResult<(Space, Organization)> {
        self.record(Call::Space(space_guid.into()));
        if self.fail_space {
            return Err(injected("space"));
        }
        self.spaces
            .iter()
            .find(|(s, _)| s.guid == space_guid)
            .cloned()
            .ok_or_else(|| InventoryError::MissingOrganization(space_guid.into()))
    }
}

pub fn domain(name: &str) -> Domain {
    Domain {
        guid: format!("domain-{name}"),
        name: name.into(),
    }
}

pub fn app(guid: &str, space_guid: &str) -> Application {
    Application {
        guid: guid.into(),
        name: format!("{guid}-name"),
        state: "STARTED".into(),
        space_guid: space_guid.into(),
    }
}

/// A route on `domain_name` bound to `apps`, in that order.
pub fn route(guid: &str, host: &str, domain_name: &str, path: &str, apps: &[String]) -> Route {
    Route {
        guid: guid.into(),
        host: host.into(),
        path: path.into(),
        domain_guid: format!("domain-{domain_name}"),
        url: None,
        destinations: apps
            .iter()
            .enumerate()
            .map(|(i, a)| Destination {
                guid: format!("{guid}-dest-{i}"),
                app_guid: a.clone(),
            })
            .collect(),
    }
}

pub fn app_ids(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("app-{i}")).collect()
}

/// A request as received by the mock API.
#[derive(Debug, Clone)]
pub struct MockRequest {
    /// Path and query, e.g. `/v3/domains?names=example.com`.
    pub target: String,
    pub headers: Vec<(String, String)>,
}

impl MockRequest {
    pub fn path(&self) -> &str {
        self.target.split('?').next().unwrap_or_default()
    }

    /// Decoded value of query parameter `name`.
    pub fn query(&self, name: &str) -> Option<String> {
        let url = url::Url::parse(&format!("http://mock{}", self.target)).ok()?;
        url.query_pairs()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.into_owned())
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Start a programmable mock Cloud Controller on an ephemeral port.
///
/// `f` maps each request to `(status, json body)`. All requests are kept in
/// the returned log.
pub async fn start_mock_api<F>(f: F) -> (SocketAddr, Arc<Mutex<Vec<MockRequest>>>)
where
    F: Fn(&MockRequest) -> (u16, String) + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let log = Arc::new(Mutex::new(Vec::new()));
    let f = Arc::new(f);

    let requests = log.clone();
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    let requests = requests.clone();
                    tokio::spawn(async move {
                        let Some(request) = read_request(&mut socket).await else {
                            return;
                        };
                        requests.lock().unwrap().push(request.clone());

                        let (status, body) = f(&request);
                        let status_text = match status {
                            200 => "200 OK",
                            400 => "400 Bad Request",
                            401 => "401 Unauthorized",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };
                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, log)
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> Option<MockRequest> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let head = String::from_utf8_lossy(&buf);
    let mut lines = head.split("\r\n");
    let target = lines.next()?.split_whitespace().nth(1)?.to_string();
    let headers = lines
        .take_while(|l| !l.is_empty())
        .filter_map(|l| l.split_once(':'))
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .collect();

    Some(MockRequest { target, headers })
}

/// JSON for one page of a list endpoint.
pub fn page(resources: &[serde_json::Value], next: Option<String>) -> String {
    let next = next.map(|href| serde_json::json!({ "href": href }));
    serde_json::json!({
        "pagination": { "total_results": resources.len(), "next": next },
        "resources": resources,
    })
    .to_string()
}
