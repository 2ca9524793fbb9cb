use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

fn main() -> std::process::ExitCode {
    // Load .env early so RUST_LOG and friends take effect
    dotenv().ok();
    common::utils::logging::init_logging_default();

    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    info!(
        service = "cafes",
        event = "start",
        %service_id,
        pid,
        version = env!("CARGO_PKG_VERSION"),
        "cafes service starting"
    );

    // Log unhandled panics before the process dies
    std::panic::set_hook(Box::new(move |panic| {
        error!(
            service = "cafes",
            event = "panic",
            %service_id,
            pid,
            message = %panic,
            "unhandled panic occurred"
        );
    }));

    // Runtime sized from config.toml when present; tokio's default otherwise
    let worker_threads = configs::AppConfig::load_and_validate()
        .ok()
        .and_then(|cfg| cfg.server.worker_threads);
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = worker_threads {
        builder.worker_threads(w);
    }
    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "cafes", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    rt.block_on(async {
        tokio::select! {
            res = server::run() => match res {
                Ok(()) => {
                    info!(service = "cafes", event = "stop", %service_id, pid, "server stopped normally");
                    std::process::ExitCode::SUCCESS
                }
                Err(e) => {
                    error!(service = "cafes", event = "run_failed", error = %e, "server exited with error");
                    std::process::ExitCode::FAILURE
                }
            },
            _ = tokio::signal::ctrl_c() => {
                info!(service = "cafes", event = "shutdown_signal", %service_id, pid, "received Ctrl+C, shutting down");
                std::process::ExitCode::SUCCESS
            }
        }
    })
}
