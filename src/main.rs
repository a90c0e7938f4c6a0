#[tokio::main]
async fn main() {
    clipcycle_lib::init_tracing();

    if let Err(e) = clipcycle_lib::run().await {
        tracing::error!("FATAL: {}", e);
        std::process::exit(1);
    }
}
