use tracing::error;

#[tokio::main]
async fn main() {
    if let Err(err) = vm_api::run().await {
        error!(error = %err, "vm-api exited with error");
        eprintln!("vm-api: {err}");
        std::process::exit(1);
    }
}
