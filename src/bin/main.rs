//! Binary entrypoint for the skell tool

#[tokio::main]
async fn main() {
    if let Err(e) = skell::cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
