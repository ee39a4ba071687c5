#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;

use std::error::Error;

use serde_json::json;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use calculator::config::{self, Config};
use calculator::{Engine, SessionStore};
use calculator_client::CalculatorRequest;
use telemetry::Measure;

lazy_static! {
    static ref ACTION_MEASURE: Measure = Measure::new("driver", "action");
}

const DEFAULT_SESSION: &str = "default";

async fn handle(store: &SessionStore, line: &str) -> String {
    let result = ACTION_MEASURE
        .stats(async move {
            let request: CalculatorRequest = serde_json::from_str(line)?;
            let session = request.session.as_deref().unwrap_or(DEFAULT_SESSION);
            let response = store.apply(session, request.action()).await;
            Ok::<_, Box<dyn Error>>(serde_json::to_string(&response)?)
        })
        .await;

    result.unwrap_or_else(|e| {
        warn!("Rejected request {:?}: {}", line, e);
        json!({ "error": e.to_string() }).to_string()
    })
}

/// Reads one JSON request per line from stdin and answers on stdout
///
/// Sessions are keyed by the request's `session` id and live until they
/// have been idle for `sessions.idle_timeout_secs`, or for the whole process
/// when that is unset.
#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let config: Config = config::figment().extract()?;
    info!("Starting calculator: {:?}", config);

    let store = SessionStore::new(Engine::new(config.engine.clone()));
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let output = handle(&store, &line).await;
        if let Some(max_idle) = config.sessions.idle_timeout() {
            store.evict_idle(max_idle).await;
        }
        stdout.write_all(output.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
    }

    if config.telemetry.dump_on_exit {
        eprint!("{}", telemetry::encode()?);
    }
    Ok(())
}
