//! Common test utilities

#![allow(dead_code)]

use roast::dispatch::Outcome;
use roast::error::DispatchResult;
use roast::{App, Invocation};
use std::sync::{Arc, Mutex};

/// Records every invocation of the handlers it hands out
#[derive(Clone, Default)]
pub struct Recorder {
    calls: Arc<Mutex<Vec<Invocation>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handler(&self) -> impl Fn(&Invocation) -> anyhow::Result<()> + Send + Sync + 'static {
        let calls = Arc::clone(&self.calls);
        move |invocation: &Invocation| {
            calls.lock().unwrap().push(invocation.clone());
            Ok(())
        }
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().unwrap().clone()
    }
}

/// Run `argv` through `app`, capturing everything written to the output
pub fn run(app: &App, argv: &[&str]) -> (DispatchResult<Outcome>, String) {
    let mut out = Vec::new();
    let result = app.run(argv.iter().copied(), &mut out);
    (result, String::from_utf8(out).unwrap())
}
