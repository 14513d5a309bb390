// Shared test helpers: an in-memory daemon standing in for zerotier-cli

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use zerotier_state::central::CentralClient;
use zerotier_state::device::{CommandRunner, DeviceClient};
use zerotier_state::errors::{Result, ZeroTierError};
use zerotier_state::state::{StateContext, ZeroTierStates};

pub const NODE_ID: &str = "deadbeef01";
pub const NETWORK_ID: &str = "8056c2e21c000001";
pub const API_KEY: &str = "secret-token";

/// Scripted daemon: keeps a network list and records every invocation.
pub struct FakeDaemon {
    networks: Mutex<Vec<Value>>,
    join_reply: Mutex<Option<String>>,
    calls: Mutex<Vec<Vec<String>>>,
}

impl FakeDaemon {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            networks: Mutex::new(Vec::new()),
            join_reply: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn add_network(&self, id: &str, status: &str) {
        self.networks
            .lock()
            .unwrap()
            .push(json!({"id": id, "nwid": id, "name": "test-net", "status": status}));
    }

    /// Raw stdout returned by the next joins instead of the default behaviour.
    pub fn set_join_reply(&self, raw: &str) {
        *self.join_reply.lock().unwrap() = Some(raw.to_string());
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of calls whose argv contains `verb`.
    pub fn count(&self, verb: &str) -> usize {
        self.calls()
            .iter()
            .filter(|argv| argv.iter().any(|a| a == verb))
            .count()
    }

    fn join(&self, id: &str) -> String {
        if let Some(raw) = self.join_reply.lock().unwrap().clone() {
            return raw;
        }
        let mut networks = self.networks.lock().unwrap();
        networks.retain(|n| n["id"] != id);
        let entry = json!({"id": id, "nwid": id, "name": "test-net", "status": "OK"});
        networks.push(entry.clone());
        entry.to_string()
    }

    fn leave(&self, id: &str) -> String {
        let mut networks = self.networks.lock().unwrap();
        let found = networks.iter().position(|n| n["id"] == id);
        match found {
            Some(idx) => networks.remove(idx).to_string(),
            None => "null".to_string(),
        }
    }
}

#[async_trait]
impl CommandRunner for FakeDaemon {
    async fn run(&self, _program: &str, args: &[&str]) -> Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push(args.iter().map(|a| a.to_string()).collect());

        match args {
            ["-v"] => Ok("1.12.2\n".to_string()),
            ["-j", "info"] => Ok(json!({"address": NODE_ID, "online": true, "version": "1.12.2"})
                .to_string()),
            ["-j", "listnetworks"] => {
                Ok(Value::Array(self.networks.lock().unwrap().clone()).to_string())
            }
            ["-j", "join", id] => Ok(self.join(id)),
            ["-j", "leave", id] => Ok(self.leave(id)),
            other => Err(ZeroTierError::remote(
                None,
                format!("unexpected invocation: {:?}", other),
            )),
        }
    }
}

pub fn device(daemon: &Arc<FakeDaemon>) -> DeviceClient {
    DeviceClient::new(daemon.clone(), "zerotier-cli")
}

pub fn central(base_url: &str, daemon: &Arc<FakeDaemon>) -> CentralClient {
    CentralClient::new(base_url, Duration::from_secs(5), device(daemon)).unwrap()
}

pub fn states(base_url: &str, daemon: &Arc<FakeDaemon>, context: StateContext) -> ZeroTierStates {
    ZeroTierStates::new(device(daemon), central(base_url, daemon), context)
}

pub fn member_path() -> String {
    format!("/api/network/{}/member/{}", NETWORK_ID, NODE_ID)
}
