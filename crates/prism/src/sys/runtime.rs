use crate::events::AppEvent;
use async_channel::Sender;
use std::thread;
use tokio::runtime::Builder;
use tokio::task::JoinSet;

/// Runs the control socket and the config watcher on a dedicated thread.
/// Both only talk to the GTK side through `tx`.
pub fn start_background_services(tx: Sender<AppEvent>) {
    let spawned = thread::Builder::new()
        .name("prism-services".into())
        .spawn(move || {
            let rt = match Builder::new_multi_thread()
                .worker_threads(2)
                .enable_all()
                .build()
            {
                Ok(rt) => rt,
                Err(e) => {
                    log::error!("Failed to create Tokio runtime: {}", e);
                    return;
                }
            };

            rt.block_on(async move {
                let mut services = JoinSet::new();
                services.spawn(crate::sys::server::run_server(tx.clone()));
                services.spawn(crate::config::run_async_watcher(tx));

                while let Some(result) = services.join_next().await {
                    if let Err(e) = result {
                        log::error!("Background service failed: {}", e);
                    }
                }
                log::debug!("Background services stopped");
            });
        });

    if let Err(e) = spawned {
        log::error!("Failed to start background services: {}", e);
    }
}
